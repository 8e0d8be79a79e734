//! # clijp - Japanese translation filter
//!
//! `clijp` reads text from standard input, echoes it, and prints a Japanese
//! translation obtained from an OpenAI-compatible chat-completions endpoint.
//! Translations are cached on disk by the SHA-256 of the input, so the same
//! input is only ever sent once.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate command output
//! cargo --help | clijp
//!
//! # Use another model or a local endpoint
//! cat README.md | clijp --endpoint http://localhost:11434 --model gemma3:12b
//!
//! # Bypass the cache
//! echo "Hello" | clijp --no-cache
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/clijp/config.toml`:
//!
//! ```toml
//! [clijp]
//! endpoint = "https://api.openai.com"
//! model = "gpt-5-mini"
//! api_key_env = "OPENAI_API_KEY"
//! ```

/// On-disk translation cache keyed by content fingerprint.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Error types.
pub mod error;

/// Content fingerprints used as cache keys.
pub mod fingerprint;

/// File system utilities.
pub mod fs;

/// Input reading from stdin.
pub mod input;

/// Global output configuration (quiet mode, colors) and logging macros.
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Translation sessions against a chat backend.
pub mod translation;

/// Terminal UI components (progress indicator, colors).
pub mod ui;

#[cfg(test)]
mod testing;
