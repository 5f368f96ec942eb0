use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use trie_router::config::{build_routes, load_manifest, ManifestWatcher};
use trie_router::http::{serve, shutdown_signal};
use trie_router::observability::logging;
use trie_router::routing::GLOBAL_SCOPE;

#[derive(Parser)]
#[command(name = "routectl")]
#[command(about = "Inspect, check and serve a trie route manifest", long_about = None)]
struct Cli {
    /// Route manifest (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route, sorted by path
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Resolve a scope and path to an endpoint
    Match { scope: String, path: String },
    /// List the scopes in which a path matches
    Scopes { path: String },
    /// Validate the manifest and bind every route
    Check,
    /// Re-check the manifest whenever it changes
    Watch,
    /// Serve the manifest over HTTP
    Serve {
        /// Overrides `[server] bind_address`
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let manifest = load_manifest(&cli.manifest)?;
    logging::init(&manifest.logging)?;

    let routes = build_routes(&manifest)?;

    match cli.command {
        Commands::Routes { json } => {
            let endpoints = routes.list_routes();
            if json {
                let summaries: Vec<_> = endpoints.iter().map(|e| e.summary()).collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for endpoint in endpoints {
                    println!(
                        "{:<7} /{:<32} {}",
                        display_scope(endpoint.scope()),
                        endpoint.path(),
                        endpoint.handler_path()
                    );
                }
            }
        }
        Commands::Match { scope, path } => {
            let (endpoint, params) = routes.match_route(&scope, &path);
            let Some(endpoint) = endpoint else {
                return Err(format!("no route matches {scope} {path}").into());
            };
            let report = serde_json::json!({
                "route": endpoint.summary(),
                "params": params,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Scopes { path } => {
            for scope in routes.match_scopes(&path) {
                println!("{}", display_scope(scope));
            }
        }
        Commands::Check => {
            println!(
                "ok: {} routes in {} scopes",
                routes.len(),
                routes.scopes().count()
            );
        }
        Commands::Watch => {
            routes.log_routes();
            let (watcher, mut updates) = ManifestWatcher::new(&cli.manifest);
            let _watcher = watcher.run()?;
            let shutdown = shutdown_signal();
            tokio::pin!(shutdown);
            loop {
                tokio::select! {
                    _ = &mut shutdown => break,
                    update = updates.recv() => {
                        let Some(update) = update else { break };
                        match update.and_then(|manifest| build_routes(&manifest)) {
                            Ok(routes) => {
                                tracing::info!(routes = routes.len(), "Manifest reloaded");
                                routes.log_routes();
                            }
                            Err(e) => tracing::error!(error = %e, "Manifest rejected, keeping previous routes"),
                        }
                    }
                }
            }
        }
        Commands::Serve { bind } => {
            let address = bind.unwrap_or(manifest.server.bind_address);
            let listener = TcpListener::bind(&address).await?;
            routes.log_routes();
            serve(listener, routes, shutdown_signal()).await?;
        }
    }

    Ok(())
}

fn display_scope(scope: &str) -> &str {
    if scope == GLOBAL_SCOPE {
        "*"
    } else {
        scope
    }
}
