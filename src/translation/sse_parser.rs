//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.
//!
//! Converts the raw byte stream of a chat completion into session events:
//! each content delta becomes an [`SessionEvent::AssistantMessage`], and the
//! `data: [DONE]` marker (or the end of the body) becomes
//! [`SessionEvent::Idle`].

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use super::backend::SessionEvent;

const DONE_MARKER: &str = "data: [DONE]";

/// Response structure for streaming chat completions.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Converts a raw SSE byte stream into a stream of session events.
///
/// Lines are split on raw bytes before decoding, so multi-byte characters
/// cut across network chunks are reassembled intact. The first transport
/// error is yielded and ends the stream.
pub fn sse_to_events<E>(
    byte_stream: impl Stream<Item = Result<Bytes, E>> + Send + 'static,
) -> impl Stream<Item = Result<SessionEvent>> + Send
where
    E: std::error::Error + Send + Sync + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&line);
                let line = line.trim();

                if line == DONE_MARKER {
                    yield Ok(SessionEvent::Idle);
                    return;
                }
                if let Some(content) = parse_sse_line(line) {
                    yield Ok(SessionEvent::AssistantMessage(content));
                }
            }
        }

        // Trailing line without a newline terminator.
        let rest = String::from_utf8_lossy(&buffer);
        if let Some(content) = parse_sse_line(rest.trim()) {
            yield Ok(SessionEvent::AssistantMessage(content));
        }

        yield Ok(SessionEvent::Idle);
    }
}

/// Parses a single SSE line and extracts the text content.
///
/// # Returns
///
/// * `Some(content)` - The extracted text content if the line contains valid data
/// * `None` - For non-data lines, empty content, or parse errors
fn parse_sse_line(line: &str) -> Option<String> {
    let json_str = line.strip_prefix("data:")?.trim_start();

    let response = serde_json::from_str::<StreamResponse>(json_str).ok()?;

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .filter(|c| !c.is_empty())
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}
