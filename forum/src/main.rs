#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;

use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{Env, ServerConfig, StoreKind},
    identity::models::identity::Traits,
    store::{MemoryStore, PgStore, SessionStore, Store},
};

mod authz;
mod comment;
mod config;
mod error;
mod extract;
mod flash;
mod identity;
mod models;
mod pages;
mod question;
mod render;
mod routes;
mod schema;
mod store;
mod utils;
mod validation;

#[cfg(test)]
mod test_utils;

#[derive(Clone)]
pub struct App {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn Store>,
    pub sessions: Arc<dyn SessionStore>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();

    let env = Env::from_env();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "forum=debug,tower_http=debug".into());

    if env == Env::Dev {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    }

    let config = ServerConfig::new_from_env();
    tracing::info!("Starting forum in {:?} mode", config.env);

    let app = match &config.store {
        StoreKind::Postgres { database_url } => {
            if config.run_migrations {
                let applied = store::postgres::run_migrations(database_url.clone()).await?;
                tracing::info!(applied, "Database migrations are up to date");
            }

            let store = Arc::new(PgStore::connect(
                database_url,
                config.database_max_connections,
            )?);

            App {
                store: store.clone(),
                sessions: store,
                config: Arc::new(config),
            }
        }
        StoreKind::Memory => {
            let store = Arc::new(MemoryStore::new());

            if let Some(token) = &config.dev_session_token {
                let developer = store
                    .add_identity(Traits {
                        email: None,
                        name: Some("Developer".into()),
                    })
                    .await;
                store.add_session(token.clone(), developer.id).await;
                tracing::info!(identity_id = developer.id, "Seeded development session");
            }

            tracing::warn!("Using the in-memory store, nothing will survive a restart");

            App {
                store: store.clone(),
                sessions: store,
                config: Arc::new(config),
            }
        }
    };

    let listener = tokio::net::TcpListener::bind(&app.config.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, routes::router(app)).await?;

    Ok(())
}
