use std::env;

const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "hotelapp";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Runtime configuration read from the environment (after `.env` is loaded)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub allowed_origins: Vec<String>,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Config {
            host: var("HOST", "0.0.0.0"),
            port: parse_or("PORT", &var("PORT", "8080"), 8080),
            mongo_uri: var("MONGO_URI", DEFAULT_MONGO_URI),
            mongo_database: var("MONGO_DATABASE", DEFAULT_DATABASE),
            allowed_origins: split_origins(&var("CORS_ALLOWED_ORIGINS", DEFAULT_ORIGINS)),
            bcrypt_cost: parse_or(
                "BCRYPT_COST",
                &var("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string()),
                bcrypt::DEFAULT_COST,
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: &str, default: T) -> T {
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            log::warn!("⚠️  Invalid value for {}: '{}', using default", key, raw);
            default
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
