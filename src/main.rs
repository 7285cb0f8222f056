use actix_web::{App, HttpServer, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sliceline::{
  adapters::http::{
    IdentityMiddleware, MetricsMiddleware, configure_auth_routes, configure_franchise_routes,
    configure_order_routes,
  },
  application::auth::{LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase, UpdateUserUseCase},
  application::franchise::{
    CreateFranchiseUseCase, CreateStoreUseCase, DeleteFranchiseUseCase, DeleteStoreUseCase,
    ListFranchisesUseCase, ListUserFranchisesUseCase,
  },
  application::order::{
    AddMenuItemUseCase, GetMenuUseCase, ListOrdersUseCase, PlaceOrderUseCase,
  },
  domain::auth::services::AuthService,
  domain::franchise::services::FranchiseService,
  domain::order::services::OrderService,
  infrastructure::{
    config::Config,
    factory::HttpOrderVerifier,
    metrics::{ServiceMetrics, spawn_push_task},
    persistence::postgres::{
      PostgresFranchiseRepository, PostgresMenuRepository, PostgresOrderRepository,
      PostgresSessionRepository, PostgresUserRepository, seed_default_menu,
    },
    security::{Argon2PasswordHasher, JwtTokenCodec},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sliceline=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Sliceline");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    std::io::Error::other(format!("Database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  // Schema init is idempotent and runs on every start
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Best-effort seeding; failures are logged, never fatal
  seed_default_menu(&db_pool).await;

  // Initialize metrics and the background push loop
  let metrics = ServiceMetrics::new(&config.metrics.source).expect("Failed to create metrics");
  spawn_push_task(metrics.clone(), config.metrics.clone());

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let franchise_repo = Arc::new(PostgresFranchiseRepository::new(db_pool.clone()));
  let menu_repo = Arc::new(PostgresMenuRepository::new(db_pool.clone()));
  let order_repo = Arc::new(PostgresOrderRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));
  let token_codec = Arc::new(JwtTokenCodec::new(&config.security.jwt_secret));

  // Order-verification collaborator
  let order_verifier =
    Arc::new(HttpOrderVerifier::new(&config.factory).expect("Failed to create order verifier"));

  // Initialize domain services
  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    session_repo.clone(),
    password_hasher,
    token_codec,
  ));
  let franchise_service = Arc::new(FranchiseService::new(franchise_repo.clone()));
  let order_service = Arc::new(OrderService::new(
    menu_repo.clone(),
    order_repo.clone(),
    order_verifier,
    config.orders.page_size,
  ));

  // Initialize auth use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(
    auth_service.clone(),
    metrics.clone(),
  ));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone(), metrics.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));
  let update_user_use_case = Arc::new(UpdateUserUseCase::new(auth_service.clone()));

  // Initialize franchise use cases
  let list_franchises_use_case = Arc::new(ListFranchisesUseCase::new(franchise_service.clone()));
  let list_user_franchises_use_case =
    Arc::new(ListUserFranchisesUseCase::new(franchise_service.clone()));
  let create_franchise_use_case = Arc::new(CreateFranchiseUseCase::new(franchise_service.clone()));
  let delete_franchise_use_case = Arc::new(DeleteFranchiseUseCase::new(franchise_service.clone()));
  let create_store_use_case = Arc::new(CreateStoreUseCase::new(franchise_service.clone()));
  let delete_store_use_case = Arc::new(DeleteStoreUseCase::new(franchise_service.clone()));

  // Initialize order use cases
  let get_menu_use_case = Arc::new(GetMenuUseCase::new(order_service.clone()));
  let add_menu_item_use_case = Arc::new(AddMenuItemUseCase::new(order_service.clone()));
  let list_orders_use_case = Arc::new(ListOrdersUseCase::new(order_service.clone()));
  let place_order_use_case = Arc::new(PlaceOrderUseCase::new(
    order_service.clone(),
    metrics.clone(),
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Request counters and latency
      .wrap(MetricsMiddleware::new(metrics.clone()))
      // Resolve the optional bearer token into an identity
      .wrap(IdentityMiddleware::new(auth_service.clone()))
      .service(web::scope("/api/auth").configure(|cfg| {
        configure_auth_routes(
          cfg,
          register_use_case.clone(),
          login_use_case.clone(),
          logout_use_case.clone(),
          update_user_use_case.clone(),
        )
      }))
      .service(web::scope("/api/franchise").configure(|cfg| {
        configure_franchise_routes(
          cfg,
          list_franchises_use_case.clone(),
          list_user_franchises_use_case.clone(),
          create_franchise_use_case.clone(),
          delete_franchise_use_case.clone(),
          create_store_use_case.clone(),
          delete_store_use_case.clone(),
        )
      }))
      .service(web::scope("/api/order").configure(|cfg| {
        configure_order_routes(
          cfg,
          get_menu_use_case.clone(),
          add_menu_item_use_case.clone(),
          list_orders_use_case.clone(),
          place_order_use_case.clone(),
        )
      }))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
