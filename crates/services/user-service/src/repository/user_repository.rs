//! SeaORM-backed implementation of the user repository port.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::infra::migrations::EMAIL_INDEX;
use domain::{DomainError, DomainResult, Email, User, UserId, UserRepository};

/// Relational user store.
///
/// The unique index on `users.email` is the final authority on email
/// uniqueness; violations surface as [`DomainError::Conflict`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: User) -> DomainResult<User> {
        let txn = self.db.begin().await.map_err(DomainError::repository)?;

        let result = upsert(&txn, &user).await;
        match result {
            Ok(model) => {
                txn.commit().await.map_err(DomainError::repository)?;
                User::try_from(model)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(map_write_error(e, &user))
            }
        }
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        UserEntity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .map_err(DomainError::repository)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(DomainError::repository)?
            .map(User::try_from)
            .transpose()
    }

    async fn list_all(&self) -> DomainResult<Vec<User>> {
        UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(DomainError::repository)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn delete_by_id(&self, id: UserId) -> DomainResult<()> {
        let result = UserEntity::delete_by_id(id.as_uuid())
            .exec(&self.db)
            .await
            .map_err(DomainError::repository)?;

        if result.rows_affected == 0 {
            tracing::debug!(user_id = %id, "Delete matched no rows");
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> DomainResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .count(&self.db)
            .await
            .map_err(DomainError::repository)?;

        Ok(count > 0)
    }
}

/// Insert or update by primary key inside the caller's transaction.
async fn upsert(txn: &DatabaseTransaction, user: &User) -> Result<user::Model, DbErr> {
    let exists = UserEntity::find_by_id(user.id().as_uuid())
        .one(txn)
        .await?
        .is_some();

    let model = ActiveModel::from(user);
    if exists {
        model.update(txn).await
    } else {
        model.insert(txn).await
    }
}

fn map_write_error(err: DbErr, user: &User) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) if is_email_violation(&message) => {
            DomainError::conflict(format!("User with email '{}'", user.email()))
        }
        _ => DomainError::repository(err),
    }
}

/// Postgres names the violated index; SQLite names the column.
fn is_email_violation(message: &str) -> bool {
    message.contains(EMAIL_INDEX) || message.contains("users.email")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_violation_detected() {
        assert!(is_email_violation(
            r#"duplicate key value violates unique constraint "idx_users_email""#
        ));
        assert!(is_email_violation("UNIQUE constraint failed: users.email"));
    }

    #[test]
    fn test_other_unique_violations_are_not_conflicts() {
        assert!(!is_email_violation(
            r#"duplicate key value violates unique constraint "users_pkey""#
        ));
        assert!(!is_email_violation("UNIQUE constraint failed: users.id"));
    }

    #[test]
    fn test_primary_key_violation_maps_to_repository_error() {
        let user = User::create(
            Email::new("a@b.com").unwrap(),
            domain::UserName::new("John", "Doe").unwrap(),
        );
        let err = DbErr::Query(sea_orm::RuntimeErr::Internal(
            "UNIQUE constraint failed: users.id".to_string(),
        ));

        // Not a typed SQL error, so never a conflict
        assert!(matches!(
            map_write_error(err, &user),
            DomainError::Repository(_)
        ));
    }
}
