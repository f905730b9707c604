use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub static_dir: String,
    pub seed_demo: bool,
}

impl Config {
    /// Read settings from the environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://local_library.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            seed_demo: env::var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(false),
        }
    }
}
