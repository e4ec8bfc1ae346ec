use crate::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mongodb: MongoConfig,
    pub quote_api: QuoteApiConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct QuoteApiConfig {
    pub url: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let port = get_env("PORT", Some("3000"), is_prod)?
            .parse::<u16>()
            .map_err(|e| AppError::Config(anyhow::anyhow!("Invalid PORT value: {}", e)))?;

        Ok(AppConfig {
            port,
            mongodb: MongoConfig {
                // The store credentials are the one hard startup requirement:
                // in prod a missing URI is fatal before the listener binds.
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("posts_db"), is_prod)?,
            },
            quote_api: QuoteApiConfig {
                url: get_env("QUOTE_API_URL", Some("https://www.affirmations.dev"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::Config(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::Config(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
