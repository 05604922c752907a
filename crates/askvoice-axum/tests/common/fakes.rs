//! Hand-written port fakes for router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use askvoice_axum::AxumContext;
use askvoice_core::{
    AdmissionPolicy, AnswerError, AnswerPort, AnswerService, RawAnswer, RawCitation, SpeechError,
    SpeechPort, SpeechStatus,
};
use askvoice_runtime::RateLimiter;
use async_trait::async_trait;

/// Answering service returning a canned reply.
pub struct StubAnswers {
    reply: Result<RawAnswer, String>,
    calls: AtomicUsize,
}

impl StubAnswers {
    pub fn answering(text: &str, citations: Vec<RawCitation>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(RawAnswer {
                text: Some(text.to_string()),
                citations,
            }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerPort for StubAnswers {
    async fn ask(&self, _question: &str) -> Result<RawAnswer, AnswerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(|message| AnswerError::Api { status: 503, message })
    }
}

/// Answering service that panics.
pub struct PanickingAnswers;

#[async_trait]
impl AnswerPort for PanickingAnswers {
    async fn ask(&self, _question: &str) -> Result<RawAnswer, AnswerError> {
        panic!("collaborator blew up")
    }
}

/// Speech port recording every request.
#[derive(Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<String>>,
    stops: AtomicUsize,
    fail_stop: bool,
}

impl RecordingSpeech {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_stop() -> Arc<Self> {
        Arc::new(Self {
            fail_stop: true,
            ..Self::default()
        })
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Wait for detached speak tasks to land, up to one second.
    pub async fn wait_for_speech(&self, count: usize) -> Vec<String> {
        for _ in 0..100 {
            let spoken = self.spoken();
            if spoken.len() >= count {
                return spoken;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.spoken()
    }
}

#[async_trait]
impl SpeechPort for RecordingSpeech {
    async fn speak(&self, text: String) {
        self.spoken.lock().unwrap().push(text);
    }

    async fn stop_speech(&self) -> Result<(), SpeechError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop {
            return Err(SpeechError::StopFailed("signal refused".to_string()));
        }
        Ok(())
    }

    async fn status(&self) -> SpeechStatus {
        match self.spoken.lock().unwrap().last() {
            Some(text) => SpeechStatus::Speaking {
                pid: 4242,
                chars: text.chars().count(),
            },
            None => SpeechStatus::Idle,
        }
    }
}

/// Context with a limiter loose enough not to slow tests down.
pub fn context(answers: Arc<dyn AnswerPort>, speech: Arc<dyn SpeechPort>) -> AxumContext {
    AxumContext::new(
        Arc::new(AnswerService::new(answers)),
        speech,
        Arc::new(RateLimiter::new(1000.0, AdmissionPolicy::BestEffort).unwrap()),
    )
}
