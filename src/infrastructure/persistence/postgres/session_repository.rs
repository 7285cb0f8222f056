use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::SessionRepository;
use crate::domain::auth::value_objects::TokenSignature;

/// PostgreSQL implementation of the SessionRepository trait.
///
/// Rows are keyed by the token's trailing signature segment. There is no
/// expiry sweep: logout deletes exactly one row, and that is the only way
/// a session ends.
pub struct PostgresSessionRepository {
  pool: PgPool,
}

impl PostgresSessionRepository {
  /// Creates a new PostgresSessionRepository with the given connection pool
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
  async fn create(&self, session: Session) -> Result<(), AuthError> {
    // Re-login within the same second can mint a byte-identical token;
    // the session row is then already present.
    sqlx::query(
      r#"
            INSERT INTO auth_sessions (signature, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (signature) DO NOTHING
            "#,
    )
    .bind(session.signature.as_str())
    .bind(session.user_id)
    .bind(session.created_at)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create session: {}", e);
      AuthError::from(e)
    })?;

    Ok(())
  }

  async fn exists(&self, signature: &TokenSignature) -> Result<bool, AuthError> {
    let exists: (bool,) = sqlx::query_as(
      r#"
            SELECT EXISTS(SELECT 1 FROM auth_sessions WHERE signature = $1)
            "#,
    )
    .bind(signature.as_str())
    .fetch_one(&self.pool)
    .await?;

    Ok(exists.0)
  }

  async fn delete(&self, signature: &TokenSignature) -> Result<(), AuthError> {
    sqlx::query(
      r#"
            DELETE FROM auth_sessions
            WHERE signature = $1
            "#,
    )
    .bind(signature.as_str())
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};
  use uuid::Uuid;

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

  #[tokio::test]
  async fn test_session_round_trip() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let signature = TokenSignature::of("header.payload.sig-round-trip");

    repo
      .create(Session::new(signature.clone(), user_id))
      .await
      .unwrap();
    assert!(repo.exists(&signature).await.unwrap());

    repo.delete(&signature).await.unwrap();
    assert!(!repo.exists(&signature).await.unwrap());
  }

  #[tokio::test]
  async fn test_delete_missing_session_is_not_an_error() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool);

    let signature = TokenSignature::of("a.b.never-stored");
    repo.delete(&signature).await.unwrap();
  }

  #[tokio::test]
  async fn test_duplicate_signature_insert_is_idempotent() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let signature = TokenSignature::of("h.p.same-signature");

    repo
      .create(Session::new(signature.clone(), user_id))
      .await
      .unwrap();
    repo
      .create(Session::new(signature.clone(), user_id))
      .await
      .unwrap();

    assert!(repo.exists(&signature).await.unwrap());
  }

  #[tokio::test]
  async fn test_delete_removes_exactly_one_signature() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let first = TokenSignature::of("h.p.first");
    let second = TokenSignature::of("h.p.second");

    repo.create(Session::new(first.clone(), user_id)).await.unwrap();
    repo
      .create(Session::new(second.clone(), user_id))
      .await
      .unwrap();

    repo.delete(&first).await.unwrap();

    assert!(!repo.exists(&first).await.unwrap());
    assert!(repo.exists(&second).await.unwrap());
  }
}
