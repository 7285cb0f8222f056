use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::errors::RepositoryError;
use crate::domain::order::{
  entities::{Order, OrderDraft, OrderItem},
  errors::OrderError,
  ports::OrderRepository,
};

#[derive(Debug, FromRow)]
struct OrderRow {
  id: Uuid,
  diner_id: Uuid,
  franchise_id: Uuid,
  store_id: Uuid,
  created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
  id: Uuid,
  menu_item_id: Uuid,
  description: String,
  price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
  fn from(row: OrderItemRow) -> Self {
    OrderItem {
      id: row.id,
      menu_item_id: row.menu_item_id,
      description: row.description,
      price: row.price,
    }
  }
}

/// PostgreSQL implementation of the OrderRepository trait
pub struct PostgresOrderRepository {
  pool: PgPool,
}

impl PostgresOrderRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn load_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, OrderError> {
    let rows = sqlx::query_as::<_, OrderItemRow>(
      r#"
            SELECT id, menu_item_id, description, price
            FROM order_items
            WHERE order_id = $1
            ORDER BY line_no ASC
            "#,
    )
    .bind(order_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(OrderItem::from).collect())
  }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
  /// Order + item snapshots in one transaction. Every menu id is checked
  /// inside the same transaction; an unknown id aborts the whole insert.
  async fn create(&self, diner_id: Uuid, draft: OrderDraft) -> Result<Order, OrderError> {
    let mut tx = self
      .pool
      .begin()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    let order_id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
      r#"
            INSERT INTO orders (id, diner_id, franchise_id, store_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
    )
    .bind(order_id)
    .bind(diner_id)
    .bind(draft.franchise_id)
    .bind(draft.store_id)
    .bind(created_at)
    .execute(&mut *tx)
    .await?;

    let mut items = Vec::with_capacity(draft.items.len());
    for (line_no, item) in draft.items.into_iter().enumerate() {
      let known: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM menu_items WHERE id = $1)")
          .bind(item.menu_item_id)
          .fetch_one(&mut *tx)
          .await?;
      if !known.0 {
        return Err(OrderError::MenuItemNotFound(item.menu_item_id));
      }

      let item_id = Uuid::new_v4();
      sqlx::query(
        r#"
                INSERT INTO order_items (id, order_id, line_no, menu_item_id, description, price)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
      )
      .bind(item_id)
      .bind(order_id)
      .bind(line_no as i32)
      .bind(item.menu_item_id)
      .bind(&item.description)
      .bind(item.price)
      .execute(&mut *tx)
      .await?;

      items.push(OrderItem {
        id: item_id,
        menu_item_id: item.menu_item_id,
        description: item.description,
        price: item.price,
      });
    }

    tx.commit()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    Ok(Order {
      id: order_id,
      diner_id,
      franchise_id: draft.franchise_id,
      store_id: draft.store_id,
      created_at,
      items,
    })
  }

  /// One page of a single diner's orders, oldest first (insertion order)
  async fn list_for_diner(
    &self,
    diner_id: Uuid,
    page: u32,
    page_size: u32,
  ) -> Result<Vec<Order>, OrderError> {
    let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);

    let rows = sqlx::query_as::<_, OrderRow>(
      r#"
            SELECT id, diner_id, franchise_id, store_id, created_at
            FROM orders
            WHERE diner_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
    )
    .bind(diner_id)
    .bind(i64::from(page_size))
    .bind(offset)
    .fetch_all(&self.pool)
    .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
      let items = self.load_items(row.id).await?;
      orders.push(Order {
        id: row.id,
        diner_id: row.diner_id,
        franchise_id: row.franchise_id,
        store_id: row.store_id,
        created_at: row.created_at,
        items,
      });
    }

    Ok(orders)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::order::entities::OrderItemDraft;
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

  async fn create_test_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    let email = format!("test_{}@example.com", user_id);
    sqlx::query(
      r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, 'Test User', $2, 'hash', NOW(), NOW())
            "#,
    )
    .bind(user_id)
    .bind(&email)
    .execute(pool)
    .await
    .expect("Failed to create test user");
    user_id
  }

  async fn create_menu_item(pool: &PgPool, title: &str, price: Decimal) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
      r#"
            INSERT INTO menu_items (id, title, description, image, price, created_at)
            VALUES ($1, $2, 'desc', 'img.png', $3, NOW())
            "#,
    )
    .bind(id)
    .bind(title)
    .bind(price)
    .execute(pool)
    .await
    .expect("Failed to create menu item");
    id
  }

  fn draft(menu_item_id: Uuid, description: &str, price: Decimal) -> OrderDraft {
    OrderDraft {
      franchise_id: Uuid::new_v4(),
      store_id: Uuid::new_v4(),
      items: vec![OrderItemDraft {
        menu_item_id,
        description: description.into(),
        price,
      }],
    }
  }

  #[tokio::test]
  async fn test_create_order_snapshots_items() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let diner = create_test_user(&pool).await;
    let cheese = create_menu_item(&pool, "Cheese", dec!(9.99)).await;

    let order = repo
      .create(diner, draft(cheese, "Cheese Pizza", dec!(9.99)))
      .await
      .unwrap();

    assert_eq!(order.diner_id, diner);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].description, "Cheese Pizza");
    assert_eq!(order.items[0].price, dec!(9.99));
  }

  #[tokio::test]
  async fn test_unknown_menu_item_aborts_whole_insert() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let diner = create_test_user(&pool).await;
    let ghost = Uuid::new_v4();

    let result = repo.create(diner, draft(ghost, "Ghost", dec!(1))).await;
    assert!(matches!(result, Err(OrderError::MenuItemNotFound(id)) if id == ghost));

    let orders: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
      .fetch_one(&pool)
      .await
      .unwrap();
    let items: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM order_items")
      .fetch_one(&pool)
      .await
      .unwrap();
    assert_eq!((orders.0, items.0), (0, 0));
  }

  #[tokio::test]
  async fn test_menu_price_change_does_not_touch_history() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let diner = create_test_user(&pool).await;
    let cheese = create_menu_item(&pool, "Cheese", dec!(9.99)).await;

    let order = repo
      .create(diner, draft(cheese, "Cheese", dec!(9.99)))
      .await
      .unwrap();

    sqlx::query("UPDATE menu_items SET price = $1 WHERE id = $2")
      .bind(dec!(19.99))
      .bind(cheese)
      .execute(&pool)
      .await
      .unwrap();

    let history = repo.list_for_diner(diner, 1, 10).await.unwrap();
    assert_eq!(history[0].id, order.id);
    assert_eq!(history[0].items[0].price, dec!(9.99));
  }

  #[tokio::test]
  async fn test_history_is_scoped_and_insertion_ordered() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let jerry = create_test_user(&pool).await;
    let james = create_test_user(&pool).await;
    let cheese = create_menu_item(&pool, "Cheese", dec!(9.99)).await;

    let first = repo
      .create(jerry, draft(cheese, "Ham Pizza", dec!(10.99)))
      .await
      .unwrap();
    let second = repo
      .create(jerry, draft(cheese, "Cheese Pizza", dec!(9.99)))
      .await
      .unwrap();
    repo
      .create(james, draft(cheese, "Soda", dec!(2.99)))
      .await
      .unwrap();

    let jerrys = repo.list_for_diner(jerry, 1, 10).await.unwrap();
    assert_eq!(
      jerrys.iter().map(|o| o.id).collect::<Vec<_>>(),
      vec![first.id, second.id]
    );
    assert!(jerrys.iter().all(|o| o.diner_id == jerry));
  }

  #[tokio::test]
  async fn test_items_keep_their_submitted_order() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let diner = create_test_user(&pool).await;
    let cheese = create_menu_item(&pool, "Cheese", dec!(9.99)).await;
    let soda = create_menu_item(&pool, "Soda", dec!(2.99)).await;

    let order = OrderDraft {
      franchise_id: Uuid::new_v4(),
      store_id: Uuid::new_v4(),
      items: vec![
        OrderItemDraft {
          menu_item_id: cheese,
          description: "Cheese Pizza".into(),
          price: dec!(9.99),
        },
        OrderItemDraft {
          menu_item_id: soda,
          description: "Soda".into(),
          price: dec!(2.99),
        },
      ],
    };
    repo.create(diner, order).await.unwrap();

    let history = repo.list_for_diner(diner, 1, 10).await.unwrap();
    let descriptions: Vec<&str> = history[0]
      .items
      .iter()
      .map(|i| i.description.as_str())
      .collect();
    assert_eq!(descriptions, vec!["Cheese Pizza", "Soda"]);
  }

  #[tokio::test]
  async fn test_pagination() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let diner = create_test_user(&pool).await;
    let cheese = create_menu_item(&pool, "Cheese", dec!(9.99)).await;

    for i in 0..5 {
      repo
        .create(diner, draft(cheese, &format!("Order {}", i), dec!(9.99)))
        .await
        .unwrap();
    }

    let first_page = repo.list_for_diner(diner, 1, 2).await.unwrap();
    let second_page = repo.list_for_diner(diner, 2, 2).await.unwrap();
    let third_page = repo.list_for_diner(diner, 3, 2).await.unwrap();

    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 2);
    assert_eq!(third_page.len(), 1);
    assert_ne!(first_page[0].id, second_page[0].id);
  }
}
