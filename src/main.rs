use std::process::ExitCode;

use clap::Parser;
use seereal_valuation::{
    app::{run, Cli, Context},
    util::persistence::load_settings,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ctx = Context::new(load_settings(), &cli);
    tracing::debug!(policy = ?ctx.policy, model = ?ctx.model_override, "starting");

    match run(&mut ctx, cli.command) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
