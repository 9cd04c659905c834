//! Chatdesk CLI and REST API entry point.
//!
//! Binary name: `chatdesk`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use sqlx::Row;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; `serve --otel` adds span export.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,chatdesk=debug",
        _ => "trace",
    };
    let otel = matches!(&cli.command, Commands::Serve { otel: true, .. });
    chatdesk_observe::tracing_setup::init_tracing(filter, otel)?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatdesk", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (config, DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host, .. } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!();
            println!(
                "  {} Chatdesk API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Migrate => {
            // Pending migrations were applied when the pool opened; report
            // what the database now carries.
            let rows =
                sqlx::query("SELECT version, description FROM _sqlx_migrations ORDER BY version")
                    .fetch_all(&state.db_pool.reader)
                    .await?;

            if cli.json {
                let mut applied = Vec::new();
                for row in &rows {
                    let version: i64 = row.try_get("version")?;
                    let description: String = row.try_get("description")?;
                    applied.push(serde_json::json!({
                        "version": version,
                        "description": description,
                    }));
                }
                let report = serde_json::json!({
                    "database": state.data_dir.join("chatdesk.db").display().to_string(),
                    "applied": applied,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!();
                println!(
                    "  {} Database schema is up to date",
                    console::style("✓").green()
                );
                for row in &rows {
                    let version: i64 = row.try_get("version")?;
                    let description: String = row.try_get("description")?;
                    println!(
                        "  {} {}",
                        console::style(format!("{version:04}")).dim(),
                        description
                    );
                }
                println!();
            }
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    chatdesk_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
