use std::sync::Arc;

use postgrest::Postgrest;
use reqwest::Client;

use crate::utils::{
    config::Config,
    storage::{ObjectStorage, SupabaseStorage},
};

#[derive(Clone)]
pub struct AppState {
    pub supabase: Postgrest,
    pub storage: Arc<dyn ObjectStorage>,
    pub config: Config,
}

impl AppState {
    pub fn init(config: Config) -> Self {
        let http_client = Client::new();
        let storage = SupabaseStorage::new(
            http_client,
            &config.supabase_url,
            &config.supabase_service_key,
        );

        AppState {
            supabase: postgrest_client(&config),
            storage: Arc::new(storage),
            config,
        }
    }
}

pub fn postgrest_client(config: &Config) -> Postgrest {
    Postgrest::new(config.rest_url())
        .insert_header("apikey", config.supabase_service_key.clone())
        .insert_header(
            "Authorization",
            format!("Bearer {}", config.supabase_service_key),
        )
}
