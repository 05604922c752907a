// Allow unused: each test binary uses a different subset of the fakes
#[allow(dead_code)]
pub mod fakes;
