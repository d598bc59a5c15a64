//! Interactive menu shell for planning a multi-book series.

mod console;
mod error;
mod menus;

use std::io;
use std::process;

use clap::Parser;
use codex_core::{CodexConfig, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::console::Console;
use crate::error::ShellResult;

#[derive(Parser)]
#[command(
    name = "series-codex",
    about = "Series Codex: plan a multi-book series from one interactive menu",
    version
)]
struct Cli {}

fn main() {
    Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .init();

    if let Err(e) = run(CodexConfig::default()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(config: CodexConfig) -> ShellResult {
    let mut session = Session::open(config)?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut console = Console::new(&mut input, &mut output, session.config().wrap_width);
    menus::run(&mut session, &mut console)
}
