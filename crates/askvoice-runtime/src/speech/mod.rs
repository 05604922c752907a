//! Speech process supervision.
//!
//! - `SpeechCommand` - how the engine program is spawned for one utterance
//! - `SpeechSupervisor` - owns the single live unit and implements `SpeechPort`

mod command;
mod supervisor;

pub use command::SpeechCommand;
pub use supervisor::SpeechSupervisor;
