mod backend;
mod client;
mod prompt;
mod session;
mod sse_parser;

pub use backend::{Backend, BackendSession, EventStream, SessionEvent, send_and_wait};
pub use client::{ChatCompletionsBackend, ChatSession};
pub use prompt::{TRANSLATION_PROMPT_TEMPLATE, build_prompt};
pub use session::TranslationSession;
