//! Speech engine command builder.
//!
//! Each utterance runs in its own OS process: the configured engine program
//! is spawned, the text is fed on stdin by a detached task, and stderr is
//! streamed into the log.

use std::process::Stdio;
use std::time::Instant;

use askvoice_core::{SpeechError, SpeechSettings};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdin, Command};
use tracing::debug;

/// A live speech process. Only the supervisor holds one.
#[derive(Debug)]
pub(crate) struct SpeechUnit {
    pub(crate) child: Child,
    pub(crate) pid: u32,
    pub(crate) chars: usize,
    pub(crate) started_at: Instant,
}

/// The program and arguments used to speak text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCommand {
    program: String,
    args: Vec<String>,
}

impl SpeechCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &SpeechSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Spawn the engine for `text`.
    ///
    /// The process leads its own process group so teardown can signal any
    /// helpers it forks. It is killed if its handle is ever dropped.
    pub(crate) fn spawn(&self, text: String) -> Result<SpeechUnit, SpeechError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd
            .spawn()
            .map_err(|e| SpeechError::SpawnFailed(format!("{}: {e}", self.program)))?;
        let pid = child.id().ok_or_else(|| {
            SpeechError::SpawnFailed(format!("{} exited before reporting a PID", self.program))
        })?;

        let chars = text.chars().count();
        if let Some(stdin) = child.stdin.take() {
            feed_stdin(stdin, text, pid);
        }
        if let Some(stderr) = child.stderr.take() {
            forward_stderr(stderr, pid);
        }

        Ok(SpeechUnit {
            child,
            pid,
            chars,
            started_at: Instant::now(),
        })
    }
}

fn feed_stdin(mut stdin: ChildStdin, text: String, pid: u32) {
    tokio::spawn(async move {
        if let Err(e) = stdin.write_all(text.as_bytes()).await {
            debug!(pid, "Failed to write text to speech engine: {e}");
            return;
        }
        // EOF tells the engine the text is complete.
        if let Err(e) = stdin.shutdown().await {
            debug!(pid, "Failed to close speech engine stdin: {e}");
        }
    });
}

fn forward_stderr(stderr: ChildStderr, pid: u32) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(pid, "speech engine: {line}");
        }
        debug!(pid, "stderr reader task exiting");
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawn_feeds_text_on_stdin() {
        // `cat` exits once stdin closes, proving the text was delivered and EOF sent
        let command = SpeechCommand::new("cat", Vec::new());
        let mut unit = command.spawn("hello".to_string()).unwrap();

        assert_eq!(unit.chars, 5);
        let status = tokio::time::timeout(std::time::Duration::from_secs(5), unit.child.wait())
            .await
            .expect("cat did not see EOF")
            .unwrap();
        assert!(status.success());
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let command = SpeechCommand::new("/nonexistent/speech-engine", Vec::new());
        let err = command.spawn("hello".to_string()).unwrap_err();
        assert!(matches!(err, SpeechError::SpawnFailed(_)));
        assert!(err.to_string().contains("/nonexistent/speech-engine"));
    }

    #[test]
    fn from_settings_copies_program_and_args() {
        let settings = SpeechSettings::default();
        let command = SpeechCommand::from_settings(&settings);
        assert_eq!(command.program(), "espeak-ng");
        assert_eq!(command.args, vec!["--stdin".to_string()]);
    }
}
