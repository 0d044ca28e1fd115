use clap::Parser;
use restgate::cli::{run_cli, Cli};
use restgate::logging::{init_logging_with_config, LogConfig, LogFormat};

fn main() {
    let cli = Cli::parse();

    // stdout carries the generated document, so the CLI logs pretty to stderr
    let mut log_config = LogConfig::from_env();
    log_config.format = LogFormat::Pretty;
    if let Err(err) = init_logging_with_config(&log_config) {
        eprintln!("warning: {err:#}");
    }

    if let Err(err) = run_cli(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
