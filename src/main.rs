mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::db::DBClient;
use service::{job_service::JobService, notification_service::NotificationService};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub job_service: Arc<JobService>,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client = Arc::new(db_client);

        let notification_service = Arc::new(NotificationService::new(db_client.clone()));
        let job_service = Arc::new(JobService::new(
            db_client.clone(),
            notification_service.clone(),
        ));

        Self {
            env: config,
            db_client,
            job_service,
            notification_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("connected to the database");
            pool
        }
        Err(err) => {
            tracing::error!("failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let allowed_origins = vec![
        "https://kaamsaathi.app".parse::<HeaderValue>().unwrap(),
        "http://localhost:3000".parse::<HeaderValue>().unwrap(),
        "http://localhost:8000".parse::<HeaderValue>().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = Arc::new(AppState::new(DBClient::new(pool), config.clone()));

    let app = create_router(app_state).layer(cors);

    tracing::info!("server is running on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
