//! Library CLI - a personal snippet collection with password-protected entries
//!
//! This is the command-line interface for Library. Public snippets are stored
//! as-is; private ones are encrypted under a password and only shown once a
//! matching password has been entered.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;

use clap::Parser;
use library_core::VERSION;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, items, misc, session};
use crate::constants::env;
use crate::errors::exit_code_for;
use crate::output::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        print_error(&e);
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr. `--verbose` and `--quiet` win over LIBRARY_LOG.
fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            items::handle_add(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            items::handle_list(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            items::handle_show(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            items::handle_edit(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            items::handle_delete(ctx, args)?;
        }
        Some(Commands::Like(args)) => {
            items::handle_like(ctx, args)?;
        }
        Some(Commands::Session) => {
            session::handle_session(ctx)?;
        }
        Some(Commands::Completions { shell }) => {
            misc::handle_completions(*shell)?;
        }
        None => {
            println!("Library v{}", VERSION);
            println!("\nQuickstart:");
            println!("  library init");
            println!("  library add --body \"Hello\" --tag greeting");
            println!("  library add --private --body \"for my eyes only\"");
            println!("  library list --unlock");
            println!("  library session");
            println!("\nRun `library --help` for full usage.");
        }
    }

    Ok(())
}
