use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use chirpy::config::Config;
use chirpy::domain::chirp::service::ChirpService;
use chirpy::domain::user::service::UserService;
use chirpy::inbound::http::metrics::ApiMetrics;
use chirpy::inbound::http::router::create_router;
use chirpy::inbound::http::router::AppState;
use chirpy::outbound::repositories::PostgresChirpRepository;
use chirpy::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        file_root = %config.server.file_root,
        platform = ?config.platform,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::with_hasher(
        password_hasher,
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl()?,
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            user_repository,
            Arc::clone(&authenticator),
        )),
        chirp_service: Arc::new(ChirpService::new(chirp_repository)),
        authenticator,
        metrics: Arc::new(ApiMetrics::new()),
        platform: config.platform,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.file_root);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
