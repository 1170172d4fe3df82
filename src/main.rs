//! Blog navigation CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   blog.toml ──▶ config ──▶ RouteTable + ViewRegistry ──▶ Navigator
//!                    │                                        │
//!                    └────────▶ ApiClient                      ▼
//!                                  │              resolve → load view → title
//!                                  ▼
//!                      get/post/put/delete → callback(Result)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use blog_nav::config::load_config;
use blog_nav::http::{Method, ParamValue, Params};
use blog_nav::observability::logging::init_logging;
use blog_nav::routing::{LogTitleSink, RouteError, RouteKind};
use blog_nav::App;

#[derive(Parser)]
#[command(name = "blog-nav")]
#[command(about = "Route table navigation and request facade for the blog", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "blog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route table in match order
    Routes,
    /// Navigate to each path in turn
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Send a request through the facade
    Request {
        method: Method,
        url: String,
        /// Parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability);

    tracing::info!(config = %cli.config.display(), "blog-nav v0.1.0 starting");

    let app = App::new(config, Arc::new(LogTitleSink))?;

    match cli.command {
        Commands::Routes => {
            for (id, route) in app.navigator.table().iter() {
                let target = match &route.kind {
                    RouteKind::View(_) => "view".to_string(),
                    RouteKind::Redirect(target) => format!("redirect -> {}", target),
                };
                println!(
                    "{:<4} {:<16} {:<12} {:<24} {}",
                    id.to_string(),
                    route.path.to_string(),
                    route.name.as_deref().unwrap_or("-"),
                    route.meta.title.as_deref().unwrap_or("-"),
                    target
                );
            }
        }
        Commands::Navigate { paths } => {
            for path in paths {
                match app.navigator.navigate(&path).await {
                    Ok(nav) => {
                        println!(
                            "{} -> {} [{}] params={:?} query={:?}",
                            path,
                            nav.path,
                            nav.view.name,
                            nav.params,
                            nav.query
                        );
                        if let Some(err) = &nav.recovered_from {
                            println!("  recovered from: {}", err);
                        }
                    }
                    Err(RouteError::NoMatch { path }) => println!("{} -> 404 Not Found", path),
                    Err(err) => println!("{} -> error: {}", path, err),
                }
            }
        }
        Commands::Request {
            method,
            url,
            params,
        } => {
            let params: Params = params
                .into_iter()
                .map(|(k, v)| (k, ParamValue::Str(v)))
                .collect();

            app.api
                .invoke(method, &url, params, |result| match result {
                    Ok(response) => {
                        println!("HTTP {} {}", response.status, response.url);
                        println!("{}", response.body);
                    }
                    Err(err) => eprintln!("Request failed: {}", err),
                })
                .await;
        }
    }

    Ok(())
}
