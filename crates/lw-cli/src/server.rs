//! HTTP server for the interactive widget: JSON API, SVG endpoint, SSE
//! change feed, and the embedded slider page.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_stream::stream;
use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use futures_util::Stream;
use lw_core::{
    Balance, CATEGORIES, Category, ChartLayout, Slice, compute_slices, rebalance, render_chart,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, broadcast};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Broadcast capacity for the change feed. A consumer that lags simply
/// misses intermediate states and picks up from the next one.
const EVENT_BUFFER: usize = 64;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Shared>,
}

struct Shared {
    balance: Mutex<Balance>,
    events: broadcast::Sender<Balance>,
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            inner: Arc::new(Shared {
                balance: Mutex::new(Balance::default()),
                events,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Apply one slider move under the lock, so concurrent moves serialize,
    /// then notify live viewers.
    async fn apply(&self, category: Category, value: i32) -> Balance {
        let mut balance = self.inner.balance.lock().await;
        *balance = rebalance(*balance, category, value);
        let next = *balance;
        drop(balance);
        // send only fails with no subscribers, which is fine
        let _ = self.inner.events.send(next);
        next
    }

    /// Replace the state wholesale and notify live viewers.
    async fn replace(&self, next: Balance) {
        *self.inner.balance.lock().await = next;
        let _ = self.inner.events.send(next);
    }

    async fn snapshot(&self) -> Balance {
        *self.inner.balance.lock().await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct RebalanceRequest {
    /// Which slider moved
    category: Category,
    /// Its requested new value
    value: i32,
}

#[derive(Debug, Serialize)]
struct StateResponse {
    state: Balance,
    total: i32,
}

/// A slice plus everything the page needs to draw it.
#[derive(Debug, Serialize)]
struct SliceView {
    category: Category,
    label: &'static str,
    color: &'static str,
    start_angle: f64,
    end_angle: f64,
    path: String,
}

#[derive(Debug, Serialize)]
struct RebalanceResponse {
    state: Balance,
    total: i32,
    slices: Vec<SliceView>,
}

fn slice_views(balance: &Balance) -> Vec<SliceView> {
    let layout = ChartLayout::default();
    compute_slices(balance, &CATEGORIES)
        .iter()
        .map(|slice: &Slice| SliceView {
            category: slice.category,
            label: slice.category.info().label,
            color: slice.color,
            start_angle: slice.start_angle,
            end_angle: slice.end_angle,
            path: slice.path(&layout),
        })
        .collect()
}

fn rebalance_response(balance: Balance) -> RebalanceResponse {
    RebalanceResponse {
        state: balance,
        total: balance.total(),
        slices: slice_views(&balance),
    }
}

// --- Handlers ---

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_state(State(app): State<AppState>) -> Json<StateResponse> {
    let balance = app.snapshot().await;
    Json(StateResponse {
        state: balance,
        total: balance.total(),
    })
}

async fn post_rebalance(
    State(app): State<AppState>,
    Json(req): Json<RebalanceRequest>,
) -> Json<RebalanceResponse> {
    let next = app.apply(req.category, req.value).await;
    tracing::debug!(
        "rebalanced {} -> {}: {:?}",
        req.category.as_str(),
        req.value,
        next
    );
    Json(rebalance_response(next))
}

async fn post_reset(State(app): State<AppState>) -> Json<RebalanceResponse> {
    let next = Balance::default();
    app.replace(next).await;
    Json(rebalance_response(next))
}

async fn get_slices(State(app): State<AppState>) -> Json<Vec<SliceView>> {
    let balance = app.snapshot().await;
    Json(slice_views(&balance))
}

async fn get_chart(State(app): State<AppState>) -> impl IntoResponse {
    let balance = app.snapshot().await;
    let svg = render_chart(&balance, &CATEGORIES, &ChartLayout::default());
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

async fn get_events(
    State(app): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut rx = app.inner.events.subscribe();
    let shutdown = app.inner.shutdown.clone();

    let stream = stream! {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                next = rx.recv() => match next {
                    Ok(balance) => {
                        let payload = StateResponse { state: balance, total: balance.total() };
                        match Event::default().json_data(&payload) {
                            Ok(event) => yield Ok(event),
                            Err(e) => tracing::warn!("failed to encode state event: {e}"),
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!("change feed lagged, skipped {skipped} states");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub fn router(app: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/state", get(get_state))
        .route("/api/rebalance", post(post_rebalance))
        .route("/api/reset", post(post_reset))
        .route("/api/slices", get(get_slices))
        .route("/api/events", get(get_events))
        .route("/chart.svg", get(get_chart))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app)
}

pub async fn run(addr: SocketAddr) -> Result<()> {
    let app = AppState::new();
    let shutdown = app.inner.shutdown.clone();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("failed to read bound address")?;

    // First stdout line is the machine-readable startup announcement.
    println!("listening on http://{local}");
    tracing::info!("widget server listening on http://{local}");

    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    tracing::info!("widget server stopped");
    Ok(())
}

/// Resolve on ctrl-c or SIGTERM, cancelling live SSE streams on the way out.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install ctrl-c handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
    token.cancel();
}
