use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use flashdeck_core::{CardSelector, DocumentStore};
use crate::api::routes::{next_card, random_card, AppState};

pub async fn run(store: Arc<dyn DocumentStore>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(CardSelector::new(store));

    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %listener.local_addr()?, "serving flashdeck API");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn router(selector: CardSelector) -> Router {
    let state = Arc::new(AppState { selector });

    Router::new()
        .route("/random", get(random_card))
        .route("/next", get(next_card))
        .with_state(state)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
}

/// Permissive CORS on every response; preflight requests end here with 204.
async fn cors(req: Request, next: Next) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let h = res.headers_mut();
    h.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    h.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    h.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Origin, Content-Type"),
    );
    res
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
