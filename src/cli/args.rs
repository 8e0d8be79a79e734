use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "clijp")]
#[command(about = "標準入力で受け取った内容を AI を使って日本語に翻訳するツール")]
#[command(version)]
pub struct Args {
    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// API endpoint URL (OpenAI-compatible)
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Disable cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// Do not show the progress indicator
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
