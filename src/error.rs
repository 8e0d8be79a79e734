//! Error types for the translation pipeline.
//!
//! Errors raised before a translation is obtained abort the run.
//! [`CacheError`] is only ever logged: a cache failure never prevents
//! delivery of a translation that was already received.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single request/response exchange with the backend.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The backend client could not be started (transport or credentials).
    #[error("クライアントの開始に失敗しました: {0:#}")]
    ClientStart(#[source] anyhow::Error),

    /// The backend refused to open a session for the configured model.
    #[error("セッションの作成に失敗しました: {0:#}")]
    SessionCreate(#[source] anyhow::Error),

    /// The prompt could not be delivered or the response stream broke.
    #[error("メッセージの送信に失敗しました: {0:#}")]
    Send(#[source] anyhow::Error),

    /// The backend completed the exchange without any assistant text.
    #[error("バックエンドから有効なレスポンスが返ってきませんでした")]
    EmptyResponse,

    /// The exchange was abandoned before a reply arrived.
    #[error("翻訳が中断されました")]
    Cancelled,
}

/// Failures of the on-disk result cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("キャッシュディレクトリの作成に失敗しました ({}): {source}", path.display())]
    DirCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("キャッシュの読み込みに失敗しました ({}): {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("キャッシュの書き込みに失敗しました ({}): {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that terminate a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("標準入力の読み取りに失敗しました: {0:#}")]
    StdinRead(#[source] anyhow::Error),

    #[error("ホームディレクトリの取得に失敗しました")]
    HomeDir,

    #[error("設定の読み込みに失敗しました: {0:#}")]
    Config(#[source] anyhow::Error),

    #[error("翻訳に失敗しました: {0}")]
    Translate(#[from] TranslateError),

    #[error("出力に失敗しました: {0}")]
    Output(#[from] io::Error),

    #[error("中断されました")]
    Interrupted,
}

impl AppError {
    /// Process exit status for this error.
    pub const fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::StdinRead(_) | Self::Output(_) => exitcode::IOERR,
            Self::HomeDir | Self::Config(_) => exitcode::CONFIG,
            Self::Translate(_) => exitcode::UNAVAILABLE,
            // 128 + SIGINT
            Self::Interrupted => 130,
        }
    }
}
