use std::{sync::Arc, time::Duration};

use mongodb::Database;

use super::{config::Config, database::init_mongo};

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub http: reqwest::Client,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let db = init_mongo(&config.mongo_uri, &config.mongo_db).await;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("HTTP client misconfigured!");

        Arc::new(Self { config, db, http })
    }
}
