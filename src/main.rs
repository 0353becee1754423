//! Route-table resolver.
//!
//! Loads a declarative route table, materializes the router, and resolves
//! the paths given on the command line in order, printing one outcome per
//! path. Exits non-zero if any path failed to resolve.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use path_router::config::loader::load_config;
use path_router::config::table::{build_router, TableHit};
use path_router::{NavigationState, Resolved, RouteError};

#[derive(Parser)]
#[command(name = "path-router")]
#[command(about = "Resolve paths against a declarative route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Print outcomes as JSON.
    #[arg(long)]
    json: bool,

    /// Paths to resolve, in order.
    paths: Vec<String>,
}

/// Outcome of one top-level resolution, written by the notification
/// callback and drained after each `route` call.
struct Report {
    hit: Option<(TableHit, NavigationState)>,
    canonical: String,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "path_router=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: failed to load {}: {}", cli.config.display(), err);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        table = %cli.config.display(),
        routes = config.routes.len(),
        "Route table loaded"
    );

    let report: Rc<RefCell<Option<Report>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&report);
    let mut router = match build_router(&config, move |resolved, canonical| {
        *sink.borrow_mut() = Some(Report {
            hit: resolved.map(|r: Resolved<TableHit>| (r.value, r.context.navigation())),
            canonical: canonical.to_string(),
        });
    }) {
        Ok(router) => router,
        Err(err) => {
            eprintln!("Error: invalid route table: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Some(initial) = config.resolution.initial_path.clone() {
        match router.init(&initial) {
            Ok(handled) => {
                tracing::info!(path = %initial, handled, "Initial location resolved");
            }
            Err(err) => {
                eprintln!("Error: initial resolution failed: {}", err);
                return ExitCode::FAILURE;
            }
        }
        report.borrow_mut().take();
    }

    let mut failed = false;
    for raw in &cli.paths {
        match router.route(raw, NavigationState::Push) {
            Ok(_) => {
                if let Some(outcome) = report.borrow_mut().take() {
                    print_report(raw, &outcome, cli.json);
                    if outcome.hit.is_none() {
                        failed = true;
                    }
                }
            }
            Err(RouteError::RedirectLoop { hops, path }) => {
                eprintln!("Error: {}: redirect loop after {} hops (last {})", raw, hops, path);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_report(raw: &str, report: &Report, json: bool) {
    if json {
        let value = match &report.hit {
            Some((hit, nav)) => serde_json::json!({
                "input": raw,
                "canonical": report.canonical,
                "handled": true,
                "label": hit.label,
                "captures": hit
                    .captures
                    .iter()
                    .map(|c| c.text().unwrap_or_default().to_string())
                    .collect::<Vec<_>>(),
                "nav": format!("{:?}", nav).to_lowercase(),
            }),
            None => serde_json::json!({
                "input": raw,
                "canonical": report.canonical,
                "handled": false,
            }),
        };
        println!("{}", value);
        return;
    }

    match &report.hit {
        Some((hit, nav)) => {
            let captures: Vec<&str> = hit
                .captures
                .iter()
                .map(|c| c.text().unwrap_or_default())
                .collect();
            println!(
                "{} -> {} {:?} [{:?}]",
                raw, hit.label, captures, nav
            );
        }
        None => println!("{} -> not found ({})", raw, report.canonical),
    }
}
