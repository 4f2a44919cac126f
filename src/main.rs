mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use forge::config::load_user_config;
use forge::{CancelToken, ForgeConfig, Printer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    let mut config = ForgeConfig::resolve(load_user_config()?);
    config.quiet = cli.quiet;
    config.no_color = cli.no_color;
    let printer = Printer::new(config.quiet, config.no_color);

    match cli.command {
        Commands::New(args) => commands::new::run(args, &config, &printer, cancel),
        Commands::Templates { long } => commands::templates::run(&config, &printer, long),
        Commands::Version => {
            commands::version::run(&printer);
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise `forge=debug` with `--verbose` and `warn` by default.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "warn,forge=debug" } else { "warn" })
    });
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
