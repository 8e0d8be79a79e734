use std::pin::{Pin, pin};

use super::backend::{Backend, BackendSession, send_and_wait};
use super::prompt::build_prompt;
use crate::error::TranslateError;

/// Drives one request/response exchange with a backend.
///
/// A `TranslationSession` is consumed by [`translate`](Self::translate): the
/// backend client and the conversation it opens live exactly as long as that
/// call.
pub struct TranslationSession<B> {
    backend: B,
    model: String,
}

impl<B: Backend> TranslationSession<B> {
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Translates `input` and returns the assistant's full reply.
    ///
    /// The session is destroyed and the client stopped before this returns,
    /// whether the exchange succeeded, failed, or was cut short by `cancel`.
    pub async fn translate<C>(mut self, input: &str, cancel: C) -> Result<String, TranslateError>
    where
        C: Future<Output = ()>,
    {
        let mut cancel = pin!(cancel);

        let started = tokio::select! {
            () = &mut cancel => Err(TranslateError::Cancelled),
            started = self.backend.start() => started.map_err(TranslateError::ClientStart),
        };
        let result = match started {
            Ok(()) => self.exchange(input, cancel).await,
            Err(err) => Err(err),
        };

        self.backend.stop().await;
        result
    }

    async fn exchange<C>(
        &self,
        input: &str,
        mut cancel: Pin<&mut C>,
    ) -> Result<String, TranslateError>
    where
        C: Future<Output = ()>,
    {
        let mut session = tokio::select! {
            () = &mut cancel => return Err(TranslateError::Cancelled),
            session = self.backend.create_session(&self.model) => {
                session.map_err(TranslateError::SessionCreate)?
            }
        };

        let prompt = build_prompt(input);
        let response = tokio::select! {
            () = &mut cancel => Err(TranslateError::Cancelled),
            response = send_and_wait(&mut session, &prompt) => {
                response.map_err(TranslateError::Send)
            }
        };
        session.destroy().await;

        response?
            .filter(|text| !text.trim().is_empty())
            .ok_or(TranslateError::EmptyResponse)
    }
}
