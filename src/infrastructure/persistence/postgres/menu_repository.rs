use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::order::{entities::MenuItem, errors::OrderError, ports::MenuRepository};

#[derive(Debug, FromRow)]
struct MenuItemRow {
  id: Uuid,
  title: String,
  description: String,
  image: String,
  price: Decimal,
}

impl From<MenuItemRow> for MenuItem {
  fn from(row: MenuItemRow) -> Self {
    MenuItem {
      id: row.id,
      title: row.title,
      description: row.description,
      image: row.image,
      price: row.price,
    }
  }
}

/// PostgreSQL implementation of the MenuRepository trait
pub struct PostgresMenuRepository {
  pool: PgPool,
}

impl PostgresMenuRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl MenuRepository for PostgresMenuRepository {
  async fn add(&self, item: MenuItem) -> Result<MenuItem, OrderError> {
    let row = sqlx::query_as::<_, MenuItemRow>(
      r#"
            INSERT INTO menu_items (id, title, description, image, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, image, price
            "#,
    )
    .bind(item.id)
    .bind(&item.title)
    .bind(&item.description)
    .bind(&item.image)
    .bind(item.price)
    .bind(Utc::now())
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn list(&self) -> Result<Vec<MenuItem>, OrderError> {
    let rows = sqlx::query_as::<_, MenuItemRow>(
      r#"
            SELECT id, title, description, image, price
            FROM menu_items
            ORDER BY created_at ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(MenuItem::from).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  #[tokio::test]
  async fn test_add_and_list_menu_items() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresMenuRepository::new(pool);

    let added = repo
      .add(MenuItem::new(
        "Veggie".into(),
        "A garden of delight".into(),
        "pizza1.png".into(),
        dec!(0.0038),
      ))
      .await
      .unwrap();
    assert_eq!(added.title, "Veggie");

    let menu = repo.list().await.unwrap();
    assert_eq!(menu.len(), 1);
    // NUMERIC preserves the exact decimal value
    assert_eq!(menu[0].price, dec!(0.0038));
  }

  #[tokio::test]
  async fn test_list_preserves_insertion_order() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresMenuRepository::new(pool);

    for title in ["First", "Second", "Third"] {
      repo
        .add(MenuItem::new(
          title.into(),
          "d".into(),
          "img.png".into(),
          dec!(9.99),
        ))
        .await
        .unwrap();
    }

    let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
  }
}
