pub mod franchise_repository;
pub mod menu_repository;
pub mod order_repository;
pub mod session_repository;
pub mod user_repository;

pub use franchise_repository::PostgresFranchiseRepository;
pub use menu_repository::PostgresMenuRepository;
pub use order_repository::PostgresOrderRepository;
pub use session_repository::PostgresSessionRepository;
pub use user_repository::PostgresUserRepository;

use rust_decimal_macros::dec;
use sqlx::PgPool;

/// Seeds a small default menu when the menu table is empty.
///
/// Best-effort: runs on every start, does nothing once any item exists,
/// and failures are logged rather than aborting startup.
pub async fn seed_default_menu(pool: &PgPool) {
  if let Err(e) = try_seed_default_menu(pool).await {
    tracing::warn!("Default menu seeding failed: {}", e);
  }
}

async fn try_seed_default_menu(pool: &PgPool) -> Result<(), sqlx::Error> {
  let existing: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
    .fetch_one(pool)
    .await?;
  if existing.0 > 0 {
    return Ok(());
  }

  let defaults = [
    ("Veggie", "A garden of delight", "pizza1.png", dec!(0.0038)),
    ("Pepperoni", "Spicy treat", "pizza2.png", dec!(0.0042)),
    ("Margarita", "Essential classic", "pizza3.png", dec!(0.0014)),
  ];

  for (title, description, image, price) in defaults {
    sqlx::query(
      r#"
            INSERT INTO menu_items (id, title, description, image, price, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
    )
    .bind(uuid::Uuid::new_v4())
    .bind(title)
    .bind(description)
    .bind(image)
    .bind(price)
    .execute(pool)
    .await?;
  }

  tracing::info!("Seeded default menu ({} items)", defaults.len());
  Ok(())
}
