mod cli;

use clap::Parser;

use crate::cli::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "ipmi-codec", version, about = "Encode and decode IPMI/DCMI command payloads")]
struct Cli {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.log_format, args.log_level);

    cli::run(args.command)
}
