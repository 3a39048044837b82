use std::{net::SocketAddr, process::ExitCode};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::{HeaderValue, Method},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{
    AppState, PaginationConfig, build_router, graceful_shutdown, logging_middleware,
};

/// The REST API server for the sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: String,

    /// URL of the JSON feed used to (re)initialize the transactions.
    #[arg(long, env = "FEED_URL")]
    feed_url: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Listen on all interfaces instead of only localhost.
    #[arg(long, env = "LISTEN_ALL", default_value_t = false)]
    listen_all: bool,

    /// The origin allowed to call the API from a browser, e.g. "http://localhost:3000".
    #[arg(long, env = "CORS_ORIGIN")]
    cors_origin: Option<String>,

    /// Page size used when a request does not give one. Must not exceed `--max-page-size`.
    #[arg(long, default_value_t = 10)]
    default_page_size: u64,

    /// The largest page size a request may ask for.
    #[arg(long, default_value_t = 100)]
    max_page_size: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    setup_logging();

    let args = Args::parse();

    let ip = if args.listen_all {
        [0, 0, 0, 0]
    } else {
        [127, 0, 0, 1]
    };
    let addr = SocketAddr::from((ip, args.port));

    let pagination_config =
        match PaginationConfig::new(args.default_page_size, args.max_page_size) {
            Ok(config) => config,
            Err(error) => {
                tracing::error!("Could not start server: {error}");
                return ExitCode::FAILURE;
            }
        };

    let conn = match Connection::open(&args.db_path) {
        Ok(conn) => conn,
        Err(error) => {
            tracing::error!("Could not open database at {}: {error}", args.db_path);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(conn, &args.feed_url, pagination_config) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize the database: {error}");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);
    let router = match args.cors_origin.as_deref() {
        Some(origin) => match add_cors_layer(router, origin) {
            Some(router) => router,
            None => return ExitCode::FAILURE,
        },
        None => router,
    };

    tracing::info!("HTTP server listening on {addr}");
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are turned into responses.
        .on_failure(());

    router.layer(tracing_layer)
}

fn add_cors_layer(router: Router, origin: &str) -> Option<Router> {
    let origin = match origin.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(error) => {
            tracing::error!("Invalid CORS origin {origin:?}: {error}");
            return None;
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET]);

    Some(router.layer(cors))
}
