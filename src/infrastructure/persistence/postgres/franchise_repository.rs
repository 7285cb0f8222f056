use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::franchise::{
  entities::{Franchise, FranchiseAdmin, NewFranchise, Store},
  errors::FranchiseError,
  ports::FranchiseRepository,
};
use crate::domain::auth::errors::RepositoryError;

#[derive(Debug, FromRow)]
struct FranchiseRow {
  id: Uuid,
  name: String,
}

#[derive(Debug, FromRow)]
struct AdminRow {
  id: Uuid,
  name: String,
  email: String,
}

impl From<AdminRow> for FranchiseAdmin {
  fn from(row: AdminRow) -> Self {
    FranchiseAdmin {
      id: row.id,
      name: row.name,
      email: row.email,
    }
  }
}

#[derive(Debug, FromRow)]
struct StoreRow {
  id: Uuid,
  franchise_id: Uuid,
  name: String,
}

impl From<StoreRow> for Store {
  fn from(row: StoreRow) -> Self {
    Store {
      id: row.id,
      franchise_id: row.franchise_id,
      name: row.name,
    }
  }
}

/// PostgreSQL implementation of the FranchiseRepository trait
pub struct PostgresFranchiseRepository {
  pool: PgPool,
}

impl PostgresFranchiseRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn load_admins(&self, franchise_id: Uuid) -> Result<Vec<FranchiseAdmin>, FranchiseError> {
    let rows = sqlx::query_as::<_, AdminRow>(
      r#"
            SELECT u.id, u.name, u.email
            FROM franchise_admins fa
            JOIN users u ON u.id = fa.user_id
            WHERE fa.franchise_id = $1
            ORDER BY fa.created_at ASC
            "#,
    )
    .bind(franchise_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(FranchiseAdmin::from).collect())
  }

  async fn load_stores(&self, franchise_id: Uuid) -> Result<Vec<Store>, FranchiseError> {
    let rows = sqlx::query_as::<_, StoreRow>(
      r#"
            SELECT id, franchise_id, name
            FROM stores
            WHERE franchise_id = $1
            ORDER BY created_at ASC
            "#,
    )
    .bind(franchise_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Store::from).collect())
  }

  async fn hydrate(&self, row: FranchiseRow) -> Result<Franchise, FranchiseError> {
    let admins = self.load_admins(row.id).await?;
    let stores = self.load_stores(row.id).await?;
    Ok(Franchise {
      id: row.id,
      name: row.name,
      admins,
      stores,
    })
  }
}

#[async_trait]
impl FranchiseRepository for PostgresFranchiseRepository {
  /// Creates the franchise and its admin links in one transaction.
  ///
  /// The first unresolvable admin email aborts the whole insert; the
  /// transaction rolls back and no franchise or link rows survive.
  async fn create(&self, franchise: NewFranchise) -> Result<Franchise, FranchiseError> {
    let mut tx = self
      .pool
      .begin()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    let franchise_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
      r#"
            INSERT INTO franchises (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
    )
    .bind(franchise_id)
    .bind(&franchise.name)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match RepositoryError::from(e) {
      RepositoryError::DuplicateKey(_) => FranchiseError::NameAlreadyExists,
      other => FranchiseError::Repository(other),
    })?;

    let mut admins = Vec::with_capacity(franchise.admin_emails.len());
    for email in &franchise.admin_emails {
      let admin = sqlx::query_as::<_, AdminRow>(
        r#"
                SELECT id, name, email
                FROM users
                WHERE email = $1
                "#,
      )
      .bind(email)
      .fetch_optional(&mut *tx)
      .await?
      .ok_or_else(|| FranchiseError::UnknownAdminEmail(email.clone()))?;

      sqlx::query(
        r#"
                INSERT INTO franchise_admins (franchise_id, user_id, created_at)
                VALUES ($1, $2, $3)
                "#,
      )
      .bind(franchise_id)
      .bind(admin.id)
      .bind(now)
      .execute(&mut *tx)
      .await?;

      admins.push(FranchiseAdmin::from(admin));
    }

    tx.commit()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    Ok(Franchise {
      id: franchise_id,
      name: franchise.name,
      admins,
      stores: Vec::new(),
    })
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Franchise>, FranchiseError> {
    let row = sqlx::query_as::<_, FranchiseRow>(
      r#"
            SELECT id, name
            FROM franchises
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => Ok(Some(self.hydrate(row).await?)),
      None => Ok(None),
    }
  }

  async fn list_all(&self) -> Result<Vec<Franchise>, FranchiseError> {
    let rows = sqlx::query_as::<_, FranchiseRow>(
      r#"
            SELECT id, name
            FROM franchises
            ORDER BY created_at ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    let mut franchises = Vec::with_capacity(rows.len());
    for row in rows {
      franchises.push(self.hydrate(row).await?);
    }
    Ok(franchises)
  }

  async fn list_for_admin(&self, user_id: Uuid) -> Result<Vec<Franchise>, FranchiseError> {
    let rows = sqlx::query_as::<_, FranchiseRow>(
      r#"
            SELECT f.id, f.name
            FROM franchises f
            JOIN franchise_admins fa ON fa.franchise_id = f.id
            WHERE fa.user_id = $1
            ORDER BY f.created_at ASC
            "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    let mut franchises = Vec::with_capacity(rows.len());
    for row in rows {
      franchises.push(self.hydrate(row).await?);
    }
    Ok(franchises)
  }

  /// Deletes the franchise row; admin links and stores go with it via
  /// the schema's cascades.
  async fn delete(&self, id: Uuid) -> Result<(), FranchiseError> {
    let result = sqlx::query(
      r#"
            DELETE FROM franchises
            WHERE id = $1
            "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      return Err(FranchiseError::NotFound);
    }

    Ok(())
  }

  async fn create_store(&self, franchise_id: Uuid, name: String) -> Result<Store, FranchiseError> {
    let store = Store::new(franchise_id, name);

    sqlx::query(
      r#"
            INSERT INTO stores (id, franchise_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
    )
    .bind(store.id)
    .bind(store.franchise_id)
    .bind(&store.name)
    .bind(Utc::now())
    .execute(&self.pool)
    .await
    .map_err(|e| {
      // A foreign-key failure here means the franchise is gone
      if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
          return FranchiseError::NotFound;
        }
      }
      FranchiseError::from(e)
    })?;

    Ok(store)
  }

  /// Store deletion is scoped: the store must belong to the franchise
  async fn delete_store(&self, franchise_id: Uuid, store_id: Uuid) -> Result<(), FranchiseError> {
    let result = sqlx::query(
      r#"
            DELETE FROM stores
            WHERE id = $1 AND franchise_id = $2
            "#,
    )
    .bind(store_id)
    .bind(franchise_id)
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      return Err(FranchiseError::StoreNotFound);
    }

    Ok(())
  }
}
