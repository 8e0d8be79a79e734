use clap::Parser;

use clijp::cli::Args;
use clijp::cli::commands::translate::{self, TranslateOptions};
use clijp::output::{self, OutputConfig};
use clijp::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        ..OutputConfig::default()
    });

    let options = TranslateOptions {
        model: args.model,
        endpoint: args.endpoint,
        no_cache: args.no_cache,
    };

    if let Err(err) = translate::run_translate(options).await {
        eprintln!("{} {err}", Style::error("エラー:"));
        std::process::exit(err.exit_code());
    }
}
