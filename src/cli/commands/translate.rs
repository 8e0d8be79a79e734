use std::io::{self, Write};

use crate::cache::ResultCache;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::error::{AppError, TranslateError};
use crate::fingerprint::fingerprint;
use crate::input::{InputReader, echo_text, is_blank};
use crate::paths;
use crate::translation::{Backend, ChatCompletionsBackend, TranslationSession};
use crate::ui::{IndicatorHandle, ProgressIndicator};
use crate::warn;

pub const TRANSLATION_HEADER: &str = "\n=== 日本語翻訳 ===\n\n";
pub const CACHED_TRANSLATION_HEADER: &str = "\n=== 日本語翻訳 (キャッシュ) ===\n\n";

pub struct TranslateOptions {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub no_cache: bool,
}

/// Where a delivered translation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Cached,
    Translated,
}

/// One-line usage shown when there is nothing to translate.
pub fn usage() -> String {
    format!(
        "clijp v{} - 標準入力で受け取った内容を AI を使って日本語に翻訳するツール",
        env!("CARGO_PKG_VERSION")
    )
}

pub async fn run_translate(options: TranslateOptions) -> Result<(), AppError> {
    if InputReader::stdin_is_terminal() {
        eprintln!("{}", usage());
        return Ok(());
    }

    let input = InputReader::read_stdin().map_err(AppError::StdinRead)?;

    if is_blank(&input) {
        eprintln!("{}", usage());
        return Ok(());
    }

    let mut stdout = io::stdout();
    echo_input(&mut stdout, &input)?;

    let config = load_config(&options)?;
    let cache = if options.no_cache {
        None
    } else {
        Some(ResultCache::open(paths::cache_dir()?))
    };

    let session = TranslationSession::new(
        ChatCompletionsBackend::new(&config),
        config.model.clone(),
    );

    deliver(
        &input,
        cache.as_ref(),
        session,
        &mut stdout,
        ProgressIndicator::start_on_stderr,
        ctrl_c(),
    )
    .await?;

    Ok(())
}

/// Prints the input back before any network activity.
pub fn echo_input<W: Write>(out: &mut W, input: &str) -> io::Result<()> {
    write!(out, "{}", echo_text(input))?;
    out.flush()
}

/// Resolves on the first Ctrl-C. Never resolves if the handler cannot be
/// installed.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Serves `input` from the cache, or translates it and caches the result.
///
/// The indicator runs only while the session is outstanding and is stopped
/// before anything else is written. When `cancel` resolves first, the
/// session is torn down and [`AppError::Interrupted`] is returned. A failure
/// to store the result is logged and does not prevent delivery.
pub async fn deliver<B, W, F, C>(
    input: &str,
    cache: Option<&ResultCache>,
    session: TranslationSession<B>,
    out: &mut W,
    start_indicator: F,
    cancel: C,
) -> Result<Delivery, AppError>
where
    B: Backend,
    W: Write,
    F: FnOnce() -> IndicatorHandle,
    C: Future<Output = ()>,
{
    let key = fingerprint(input);

    if let Some(cached) = cache.and_then(|cache| cache.lookup(&key)) {
        print_translation(out, CACHED_TRANSLATION_HEADER, &cached)?;
        return Ok(Delivery::Cached);
    }

    let mut indicator = start_indicator();

    let result = session.translate(input, cancel).await;
    indicator.stop().await;

    let translated = result.map_err(|err| match err {
        TranslateError::Cancelled => AppError::Interrupted,
        err => AppError::Translate(err),
    })?;

    if let Some(cache) = cache
        && let Err(err) = cache.store(&key, &translated)
    {
        warn!("{err}");
    }

    print_translation(out, TRANSLATION_HEADER, &translated)?;
    Ok(Delivery::Translated)
}

fn print_translation<W: Write>(out: &mut W, header: &str, text: &str) -> io::Result<()> {
    write!(out, "{header}{text}")?;
    out.flush()
}

fn load_config(options: &TranslateOptions) -> Result<ResolvedConfig, AppError> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load().map_err(AppError::Config)?;

    let resolve_options = ResolveOptions {
        endpoint: options.endpoint.clone(),
        model: options.model.clone(),
    };

    Ok(resolve_config(&resolve_options, &config_file))
}
