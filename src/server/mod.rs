mod handlers;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{DynAPI, API};
use crate::auth::SessionKeys;
use crate::relay::{gateway, Relay};
use crate::server::handlers::{auth, locations, rides};

const DEFAULT_PORT: u16 = 5000;

pub async fn serve<T: API + Sync + Send + 'static>(api: T, relay: Relay, keys: SessionKeys) {
    let api = Arc::new(api) as DynAPI;
    let relay = Arc::new(relay);

    // the browser client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(root))
        .route("/api/auth/send-otp", post(auth::send_otp))
        .route("/api/auth/verify-otp", post(auth::verify_otp))
        .route("/api/user/me", get(auth::me))
        .route("/api/ride/estimate", get(rides::estimate).post(rides::estimate_trip))
        .route("/api/location/calculate", post(locations::calculate))
        .route("/api/location/autocomplete", get(locations::autocomplete))
        .route("/ws", get(gateway))
        .layer(Extension(api))
        .layer(Extension(relay))
        .layer(Extension(keys))
        .layer(cors);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn root() -> &'static str {
    "ride API server is running"
}
