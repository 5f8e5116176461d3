use policy_demo::{AppState, ServiceConfig, config::Env, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initialises logging, binds the listener and serves until
/// a shutdown signal arrives. Startup failures exit with status 1.
#[tokio::main]
async fn main() {
    // 1. Configuration
    // `.env` first, so it can supply SERVICE_NAME / SERVICE_PORT / APP_ENV.
    dotenv::dotenv().ok();

    // Logging is not up yet, so a configuration error goes straight to stderr.
    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    };

    // 2. Logging Filter
    // RUST_LOG wins. The fallback prints the startup line and fatal errors only;
    // per-request events need `tower_http=debug,policy_demo=debug`.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "policy_demo=info,tower_http=warn".into());

    // 3. Log Format by Environment
    match config.env {
        // LOCAL: pretty multi-line output for a terminal.
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        // PROD: one JSON object per line for the cluster log collector.
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    // 4. State and Router
    let service_name = config.service_name.clone();
    let listen_label = config.listen_label();
    let addr = config.bind_addr();

    let app = create_router(AppState::new(config));

    // 5. Listener
    // A bind failure (port in use, no permission) is fatal and not retried.
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!("{} starting on {}", service_name, listen_label);

    // 6. Serve until Ctrl-C / SIGTERM, then drain in-flight requests.
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }

    tracing::info!("{} stopped", service_name);
}

/// Resolves on Ctrl-C, or SIGTERM on unix (container stop).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
