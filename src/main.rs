use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stepwise::api::{self, AppState, SecurityConfig};
use stepwise::config::GatewayConfig;
use stepwise::gateway::AnthropicGateway;
use stepwise::models::{Checklist, Task};
use stepwise::store::ChecklistStore;
use stepwise::{parser, render, service};

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(about = "Turn \"how to\" answers from a language model into checklists")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Ask a question and print the checklist
    Ask {
        /// The "how to" question
        question: String,

        /// Model to use instead of STEPWISE_MODEL
        #[arg(short, long)]
        model: Option<String>,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Parse a saved model answer (stdin when no file is given)
    Parse {
        file: Option<PathBuf>,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
}

/// Initialize tracing with output to stderr (for one-shot commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "stepwise=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Keep stdout for the checklist itself
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn print_tasks(tasks: &[Task], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else {
        print!("{}", render::render_tasks(tasks));
    }
    Ok(())
}

async fn serve(port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting Stepwise server on port {}", port);

    let gateway = AnthropicGateway::from_env()?;
    if gateway.config().api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; questions will fail until it is");
    }

    let security = SecurityConfig::from_env();
    if let Some(limiter) = security.rate_limiter.clone() {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(limiter.window());
            loop {
                interval.tick().await;
                limiter.cleanup();
            }
        });
    }

    let state = AppState::new(ChecklistStore::new(), Arc::new(gateway));
    let app = api::create_router_with_security(state, security);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Stepwise server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await?,
        Some(Commands::Ask {
            question,
            model,
            json,
        }) => {
            let mut config = GatewayConfig::from_env();
            if let Some(model) = model {
                config = config.with_model(model);
            }
            let gateway = AnthropicGateway::new(config)?;

            let tasks = service::ask(&gateway, &question).await?;
            if json {
                print_tasks(&tasks, true)?;
            } else {
                print!(
                    "{}",
                    render::render_checklist(&Checklist::new(question.trim(), tasks))
                );
            }
        }
        Some(Commands::Parse { file, json }) => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            print_tasks(&parser::parse_response(&raw), json)?;
        }
        None => serve(3000).await?,
    }

    Ok(())
}
