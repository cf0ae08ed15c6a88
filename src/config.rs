use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_db: String,
    pub jwt_secret: String,
    pub stripe_secret_key: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "5000"),
            mongo_uri: try_load("MONGO_URI", "mongodb://localhost:27017"),
            mongo_db: try_load("MONGO_DB", "doctors_portal"),
            jwt_secret: require("JWT_SECRET"),
            stripe_secret_key: require("STRIPE_SECRET_KEY"),
            mail_api_url: try_load("MAIL_API_URL", "https://api.sendgrid.com/v3/mail/send"),
            mail_api_key: require("MAIL_API_KEY"),
            mail_from: try_load("MAIL_FROM", "no-reply@doctors-portal.local"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn require(key: &str) -> String {
    env::var(key)
        .map_err(|_| {
            warn!("Required environment variable {key} is missing");
        })
        .expect("Environment misconfigured!")
}
