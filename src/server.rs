//! Trade ledger server implementation

use anyhow::Result;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use rustc_hash::FxHashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::TradeLedger;
use crate::config::LedgerConfig;
use crate::handlers::trades::UserQuery;
use crate::handlers::{HealthHandlers, TradeHandlers};
use crate::models::{ApiResponse, HealthCheckResponse, HistoricalTrade, SubmitTradeResponse};
use crate::stats::TickerStats;

/// Unified application state containing all handlers
#[derive(Clone)]
pub struct AppState {
    /// Trade endpoints
    pub trade_handlers: TradeHandlers,
    /// Health endpoints
    pub health_handlers: HealthHandlers,
}

/// Trade ledger HTTP server
pub struct TradeLedgerServer {
    config: LedgerConfig,
    ledger: Arc<TradeLedger>,
    start_time: Instant,
}

impl TradeLedgerServer {
    /// Create a new server over the configured database
    pub async fn new(config: LedgerConfig) -> Result<Self> {
        info!("Initializing trade ledger server");

        let ledger = TradeLedger::new(&config).await?;

        info!("Trade ledger server initialized successfully");
        Ok(Self {
            config,
            ledger: Arc::new(ledger),
            start_time: Instant::now(),
        })
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = match self.config.server_address().parse() {
            Ok(addr) => addr,
            Err(parse_error) => {
                error!(
                    "Invalid server address '{}': {}",
                    self.config.server_address(),
                    parse_error
                );
                return Err(anyhow::anyhow!("Invalid server address: {}", parse_error));
            }
        };

        let app = self.create_app();
        info!("Starting trade ledger server on {}", addr);

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(bind_error) => {
                error!("Failed to bind TCP listener to {}: {}", addr, bind_error);
                return Err(anyhow::anyhow!(
                    "Failed to bind to address {}: {}",
                    addr,
                    bind_error
                ));
            }
        };

        if let Err(serve_error) = axum::serve(listener, app).await {
            error!("Server encountered a fatal error: {}", serve_error);
            return Err(anyhow::anyhow!("Server error: {}", serve_error));
        }

        Ok(())
    }

    /// Create the axum application with all routes and middleware
    fn create_app(&self) -> Router {
        let trade_handlers = TradeHandlers::new(Arc::clone(&self.ledger));
        let health_handlers = HealthHandlers::new(Arc::clone(&self.ledger), self.start_time);

        let app_state = AppState {
            trade_handlers,
            health_handlers,
        };

        let mut app = Router::new()
            .route("/health", get(health_check))
            .route("/api/v1/trades", post(submit_trade))
            .route("/api/v1/trades/stats", get(get_stats))
            .route("/api/v1/trades/history", get(get_history))
            .with_state(app_state)
            .layer(DefaultBodyLimit::max(self.config.server.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.server.timeout_seconds,
            )))
            .layer(TraceLayer::new_for_http());

        if self.config.cors.enabled {
            app = app.layer(create_cors_layer(&self.config));
        }

        info!("Trade ledger routes configured successfully");
        app
    }
}

// Handler wrapper functions to work with unified state

async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthCheckResponse>> {
    HealthHandlers::health_check(State(state.health_handlers)).await
}

async fn submit_trade(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<ApiResponse<SubmitTradeResponse>>) {
    TradeHandlers::submit_trade(State(state.trade_handlers), Json(payload)).await
}

async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> (
    StatusCode,
    Json<ApiResponse<FxHashMap<String, TickerStats>>>,
) {
    TradeHandlers::get_stats(State(state.trade_handlers), Query(query)).await
}

async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<HistoricalTrade>>>) {
    TradeHandlers::get_history(State(state.trade_handlers), Query(query)).await
}

/// Build the CORS layer from configuration
#[must_use]
pub fn create_cors_layer(config: &LedgerConfig) -> CorsLayer {
    let cors_config = &config.cors;

    let mut cors = CorsLayer::new()
        .allow_credentials(cors_config.allow_credentials)
        .max_age(Duration::from_secs(cors_config.max_age_seconds));

    cors = if cors_config.allowed_origins.iter().any(|origin| origin == "*") {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        cors.allow_origin(origins)
    };

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();

    let headers: Vec<HeaderName> = cors_config
        .allowed_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();

    cors.allow_methods(methods).allow_headers(headers)
}

/// API route documentation
pub fn print_routes() {
    println!("Trade Ledger Routes:");
    println!("====================");
    println!();
    println!("Health:");
    println!("  GET  /health                  - Health check and counters");
    println!();
    println!("Trades:");
    println!("  POST /api/v1/trades           - Submit a trade");
    println!("  GET  /api/v1/trades/stats     - Per-ticker statistics (?user_id=)");
    println!("  GET  /api/v1/trades/history   - Historical trades (?user_id=)");
    println!();
    println!("All endpoints support:");
    println!("- JSON request/response bodies");
    println!("- CORS");
    println!("- Request tracing");
}
