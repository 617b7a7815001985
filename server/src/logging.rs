use axum::{extract::Request, middleware::Next, response::Response};
use chrono::Utc;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default},hyper=warn,tower_http=warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Log every request's method, path and arrival time.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    info!(%method, uri = %uri, at = %Utc::now().to_rfc3339(), "request");

    let response = next.run(req).await;
    debug!(%method, uri = %uri, status = response.status().as_u16(), "response");
    response
}
