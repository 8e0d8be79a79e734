//! Test doubles shared by unit tests.

use anyhow::{Result, bail};
use futures_util::stream;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::translation::{Backend, BackendSession, EventStream, SessionEvent};

/// Step at which a [`FakeBackend`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Start,
    CreateSession,
    Send,
}

/// What a [`FakeBackend`] observed.
#[derive(Debug, Default)]
pub struct Calls {
    pub started: usize,
    pub stopped: usize,
    pub models: Vec<String>,
    pub prompts: Vec<String>,
    pub destroyed: usize,
}

/// In-memory backend that answers every prompt with a fixed reply.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    reply: Option<String>,
    failure: Option<Failure>,
    hang: bool,
    calls: Arc<Mutex<Calls>>,
}

impl FakeBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    /// Goes idle without sending any assistant text.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Accepts the prompt but never answers.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            reply: Some("unused".to_string()),
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Calls>> {
        Arc::clone(&self.calls)
    }

    #[allow(clippy::unwrap_used)]
    fn record<F: FnOnce(&mut Calls)>(&self, f: F) {
        f(&mut self.calls.lock().unwrap());
    }
}

impl Backend for FakeBackend {
    type Session = FakeSession;

    async fn start(&mut self) -> Result<()> {
        self.record(|c| c.started += 1);
        if self.failure == Some(Failure::Start) {
            bail!("authentication failed");
        }
        Ok(())
    }

    async fn create_session(&self, model: &str) -> Result<FakeSession> {
        if self.failure == Some(Failure::CreateSession) {
            bail!("unknown model: {model}");
        }
        self.record(|c| c.models.push(model.to_string()));
        Ok(FakeSession {
            backend: self.clone(),
        })
    }

    async fn stop(&mut self) {
        self.record(|c| c.stopped += 1);
    }
}

pub struct FakeSession {
    backend: FakeBackend,
}

impl BackendSession for FakeSession {
    async fn send(&mut self, prompt: &str) -> Result<EventStream> {
        self.backend.record(|c| c.prompts.push(prompt.to_string()));
        if self.backend.failure == Some(Failure::Send) {
            bail!("connection refused");
        }
        if self.backend.hang {
            return Ok(Box::pin(stream::pending::<Result<SessionEvent>>()));
        }

        let mut events: Vec<Result<SessionEvent>> = Vec::new();
        if let Some(reply) = &self.backend.reply {
            // Deliver the reply in two fragments, split on a char boundary.
            let mid = reply
                .char_indices()
                .nth(reply.chars().count() / 2)
                .map_or(reply.len(), |(i, _)| i);
            events.push(Ok(SessionEvent::AssistantMessage(reply[..mid].to_string())));
            events.push(Ok(SessionEvent::AssistantMessage(reply[mid..].to_string())));
        }
        events.push(Ok(SessionEvent::Idle));

        Ok(Box::pin(stream::iter(events)))
    }

    async fn destroy(self) {
        self.backend.record(|c| c.destroyed += 1);
    }
}

/// Cloneable in-memory writer for capturing indicator output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    #[allow(clippy::unwrap_used)]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
