#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Env {
    Dev,
    Staging,
    Production,
}

impl Env {
    pub fn from_env() -> Self {
        match var("ENVIRONMENT") {
            Ok(Some(env)) => match env.as_str() {
                "dev" => Env::Dev,
                "staging" => Env::Staging,
                "production" => Env::Production,
                _ => Env::Dev,
            },
            _ => Env::Dev,
        }
    }
}

/// Which document store backs the forum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres { database_url: String },
    Memory,
}

pub struct ServerConfig {
    pub env: Env,
    pub store: StoreKind,
    pub bind_address: String,
    pub site_name: String,
    /// Where anonymous visitors are sent. The login flow itself lives outside
    /// this service, it only has to hand back an `auth_token` cookie.
    pub login_url: String,
    pub database_max_connections: usize,
    pub run_migrations: bool,
    pub dev_session_token: Option<String>,
}

fn var(key: &str) -> Result<Option<String>, String> {
    match std::env::var(key) {
        Ok(env) => Ok(Some(env)),
        Err(e) => match e {
            std::env::VarError::NotPresent => Ok(None),
            std::env::VarError::NotUnicode(_) => Err(format!(
                "Could not get the environment variable `{key}` due to unicode error"
            )),
        },
    }
}

fn var_or(key: &str, default: &str) -> String {
    match var(key) {
        Ok(Some(val)) => val,
        Ok(None) => {
            tracing::debug!("Environment variable `{key}` not set, using `{default}`");
            default.to_string()
        }
        Err(e) => {
            tracing::warn!("{e}, using `{default}`");
            default.to_string()
        }
    }
}

fn required_var(key: &str) -> String {
    let val = var(key);
    match val {
        Ok(val) => match val {
            Some(val) => val,
            None => {
                tracing::error!("Environment variable `{key}` is required");
                std::process::exit(1)
            }
        },
        Err(e) => {
            tracing::error!(
                "Environment variable `{key}` is required, but could not retrieve: {e}"
            );
            std::process::exit(1)
        }
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    pub fn new_from_env() -> Self {
        let store = match var_or("STORE", "postgres").as_str() {
            "memory" => StoreKind::Memory,
            "postgres" => StoreKind::Postgres {
                database_url: required_var("DATABASE_URL"),
            },
            other => {
                tracing::error!("Unknown store `{other}`, expected `postgres` or `memory`");
                std::process::exit(1)
            }
        };

        let database_max_connections = var_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .unwrap_or_else(|e| {
                tracing::warn!("Invalid DATABASE_MAX_CONNECTIONS ({e}), using 10");
                10
            });

        let run_migrations = parse_bool(&var_or("RUN_MIGRATIONS", "true")).unwrap_or(true);

        ServerConfig {
            env: Env::from_env(),
            store,
            bind_address: var_or("BIND_ADDRESS", "0.0.0.0:3000"),
            site_name: var_or("SITE_NAME", "Money Matters Forum"),
            login_url: var_or("LOGIN_URL", "/login"),
            database_max_connections,
            run_migrations,
            dev_session_token: var("DEV_SESSION_TOKEN").ok().flatten(),
        }
    }
}
