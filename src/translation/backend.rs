//! Capability traits for a session-oriented chat backend.
//!
//! A [`Backend`] is a client that must be started before use and stopped
//! afterwards. It opens [`BackendSession`]s bound to a model; a session
//! accepts a prompt and answers with a stream of [`SessionEvent`]s that
//! ends with [`SessionEvent::Idle`].

use anyhow::{Result, bail};
use futures_util::{Stream, StreamExt};
use std::pin::Pin;

/// Event emitted by a session while it answers a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An incremental fragment of assistant text.
    AssistantMessage(String),
    /// The exchange is complete; no more fragments follow.
    Idle,
}

pub type EventStream = Pin<Box<dyn Stream<Item = Result<SessionEvent>> + Send>>;

pub trait Backend {
    type Session: BackendSession + Send;

    /// Acquires transport and credentials.
    fn start(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Opens a fresh session for `model`.
    fn create_session(&self, model: &str) -> impl Future<Output = Result<Self::Session>> + Send;

    /// Releases everything acquired by [`start`](Self::start).
    ///
    /// Called on every exit path, including after a failed start.
    fn stop(&mut self) -> impl Future<Output = ()> + Send;
}

pub trait BackendSession {
    /// Submits `prompt` and subscribes to the resulting events.
    fn send(&mut self, prompt: &str) -> impl Future<Output = Result<EventStream>> + Send;

    /// Tears the session down.
    fn destroy(self) -> impl Future<Output = ()> + Send;
}

/// Sends `prompt` and blocks until the session reports [`SessionEvent::Idle`].
///
/// Returns the concatenated assistant fragments, or `None` when the session
/// went idle without producing any.
pub async fn send_and_wait<S>(session: &mut S, prompt: &str) -> Result<Option<String>>
where
    S: BackendSession + Send,
{
    let mut events = session.send(prompt).await?;
    let mut response: Option<String> = None;

    while let Some(event) = events.next().await {
        match event? {
            SessionEvent::AssistantMessage(fragment) => {
                response.get_or_insert_with(String::new).push_str(&fragment);
            }
            SessionEvent::Idle => return Ok(response),
        }
    }

    bail!("Response stream ended before the session became idle")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::stream;

    struct ScriptedSession {
        events: Vec<Result<SessionEvent>>,
    }

    impl BackendSession for ScriptedSession {
        async fn send(&mut self, _prompt: &str) -> Result<EventStream> {
            let events = std::mem::take(&mut self.events);
            Ok(Box::pin(stream::iter(events)))
        }

        async fn destroy(self) {}
    }

    fn fragment(text: &str) -> Result<SessionEvent> {
        Ok(SessionEvent::AssistantMessage(text.to_string()))
    }

    #[tokio::test]
    async fn test_send_and_wait_concatenates_fragments() {
        let mut session = ScriptedSession {
            events: vec![fragment("こんに"), fragment("ちは"), Ok(SessionEvent::Idle)],
        };

        let response = send_and_wait(&mut session, "Hello").await.unwrap();
        assert_eq!(response, Some("こんにちは".to_string()));
    }

    #[tokio::test]
    async fn test_send_and_wait_ignores_events_after_idle() {
        let mut session = ScriptedSession {
            events: vec![fragment("done"), Ok(SessionEvent::Idle), fragment("late")],
        };

        let response = send_and_wait(&mut session, "Hello").await.unwrap();
        assert_eq!(response, Some("done".to_string()));
    }

    #[tokio::test]
    async fn test_send_and_wait_idle_without_fragments() {
        let mut session = ScriptedSession {
            events: vec![Ok(SessionEvent::Idle)],
        };

        let response = send_and_wait(&mut session, "Hello").await.unwrap();
        assert_eq!(response, None);
    }

    #[tokio::test]
    async fn test_send_and_wait_stream_error() {
        let mut session = ScriptedSession {
            events: vec![fragment("partial"), Err(anyhow::anyhow!("connection reset"))],
        };

        let err = send_and_wait(&mut session, "Hello").await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_send_and_wait_stream_ends_without_idle() {
        let mut session = ScriptedSession {
            events: vec![fragment("partial")],
        };

        assert!(send_and_wait(&mut session, "Hello").await.is_err());
    }
}
