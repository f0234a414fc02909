use warp::http::StatusCode;
use warp::Filter;

use super::PrometheusReporter;
use crate::domain::value_objects::RelayState;

/// Loop status exposed on `/health` and `/readyz`
#[derive(serde::Serialize)]
struct RelayStatus {
    status: &'static str,
    state: String,
    service: &'static str,
    version: &'static str,
}

impl RelayStatus {
    fn new(status: &'static str, state: RelayState) -> Self {
        Self {
            status,
            state: state.to_string(),
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Ready only while a relay process is running; probing and backoff are 503
fn readiness(state: RelayState) -> warp::reply::WithStatus<warp::reply::Json> {
    if state.is_streaming() {
        warp::reply::with_status(
            warp::reply::json(&RelayStatus::new("ready", state)),
            StatusCode::OK,
        )
    } else {
        warp::reply::with_status(
            warp::reply::json(&RelayStatus::new("not_ready", state)),
            StatusCode::SERVICE_UNAVAILABLE,
        )
    }
}

/// Metrics and status routes. `state` reads the current loop state.
pub fn routes<S>(
    state: S,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    S: Fn() -> RelayState + Clone + Send + Sync + 'static,
{
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "OPTIONS"])
        .allow_headers(vec!["Content-Type"]);

    let metrics_route = warp::path("metrics").map(|| {
        let body = PrometheusReporter::gather_metrics();
        warp::reply::with_header(body, "content-type", "text/plain; version=0.0.4; charset=utf-8")
    });

    // The process is healthy while the loop runs, whatever the link state
    let health_state = state.clone();
    let health_route = warp::path("health").map(move || {
        let state = health_state();
        let status = if state == RelayState::Stopped { "stopped" } else { "healthy" };
        warp::reply::json(&RelayStatus::new(status, state))
    });

    let readiness_route = warp::path("readyz").map(move || readiness(state()));

    metrics_route.or(health_route).or(readiness_route).with(cors)
}

pub async fn serve_metrics(port: u16) {
    tracing::info!("Metrics server starting on port {}", port);

    warp::serve(routes(PrometheusReporter::current_state))
        .run(([0, 0, 0, 0], port))
        .await;
}
