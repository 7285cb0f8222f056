use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::{
  entities::{Role, RoleBinding, User},
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::{Email, PasswordHash},
};

/// Database row structure for the users table
#[derive(Debug, FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct RoleRow {
  role: String,
  object: Option<String>,
}

impl RoleRow {
  fn into_binding(self) -> Result<RoleBinding, AuthError> {
    let role = Role::from_str(&self.role)?;
    Ok(RoleBinding {
      role,
      object: self.object,
    })
  }
}

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn load_roles(&self, user_id: Uuid) -> Result<Vec<RoleBinding>, AuthError> {
    let rows = sqlx::query_as::<_, RoleRow>(
      r#"
            SELECT role, object
            FROM user_roles
            WHERE user_id = $1
            "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(RoleRow::into_binding).collect()
  }

  fn hydrate(row: UserRow, roles: Vec<RoleBinding>) -> User {
    User::from_db(
      row.id,
      row.name,
      row.email,
      row.password_hash,
      roles,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  /// Inserts the user and its role bindings in one transaction
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut tx = self
      .pool
      .begin()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match RepositoryError::from(e) {
      RepositoryError::DuplicateKey(_) => AuthError::EmailAlreadyExists,
      other => AuthError::Repository(other),
    })?;

    for binding in &user.roles {
      sqlx::query(
        r#"
                INSERT INTO user_roles (id, user_id, role, object)
                VALUES ($1, $2, $3, $4)
                "#,
      )
      .bind(Uuid::new_v4())
      .bind(user.id)
      .bind(binding.role.as_str())
      .bind(&binding.object)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    Ok(Self::hydrate(row, user.roles))
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => {
        let roles = self.load_roles(row.id).await?;
        Ok(Some(Self::hydrate(row, roles)))
      }
      None => Ok(None),
    }
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => {
        let roles = self.load_roles(row.id).await?;
        Ok(Some(Self::hydrate(row, roles)))
      }
      None => Ok(None),
    }
  }

  /// Updates only the provided fields; absent fields keep their value
  async fn update_credentials(
    &self,
    id: Uuid,
    email: Option<&Email>,
    password_hash: Option<&PasswordHash>,
  ) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            UPDATE users
            SET email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                updated_at = $4
            WHERE id = $1
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
    )
    .bind(id)
    .bind(email.map(Email::as_str))
    .bind(password_hash.map(PasswordHash::as_str))
    .bind(Utc::now())
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| match RepositoryError::from(e) {
      RepositoryError::DuplicateKey(_) => AuthError::EmailAlreadyExists,
      other => AuthError::Repository(other),
    })?
    .ok_or(AuthError::UserNotFound)?;

    let roles = self.load_roles(row.id).await?;
    Ok(Self::hydrate(row, roles))
  }
}
