use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub app_name: String,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "ecommerce-lite".to_string()),
            db_path: env::var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/app.db")),
        })
    }
}
