//! PTW RS scenario runner
//!
//! Seeds the built-in users, then drives the permit core from a YAML script.

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ptw_core::config::AppConfig;

mod cli;
mod roster;
mod runner;
mod script;

use cli::{Cli, Command};
use runner::ScriptRunner;
use script::Script;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = AppConfig::from_env().context("invalid PTW configuration")?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Users => {
            for user in roster::users() {
                println!("{:<8} {:<16} {}", user.id, user.name, user.role);
            }
        }
        Command::Run { script, json } => {
            let source = std::fs::read_to_string(&script)
                .with_context(|| format!("failed to read {}", script.display()))?;
            let parsed = Script::from_yaml(&source)
                .with_context(|| format!("failed to parse {}", script.display()))?;

            info!(script = %script.display(), steps = parsed.steps.len(), "Running scenario");

            let runner = ScriptRunner::new(&config, roster::directory());
            let reports = runner.run(&parsed);

            for report in &reports {
                if json {
                    println!("{}", serde_json::to_string(report)?);
                } else {
                    println!("{}", report.summary());
                }
            }

            let unmet = reports.iter().filter(|r| !r.matched).count();
            if unmet > 0 {
                bail!("{} of {} step(s) did not meet expectations", unmet, reports.len());
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,ptw_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
