use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// When unset the binary falls back to the in-memory store, which is
    /// only suitable for local development.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3000);
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        Self { port, database_url }
    }
}
