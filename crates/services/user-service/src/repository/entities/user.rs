//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainError, Email, User, UserId, UserName};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rebuild the aggregate from a stored row.
///
/// Rows are re-validated; a row that no longer satisfies the value object
/// rules surfaces as a validation error instead of a half-built user.
impl TryFrom<Model> for User {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        User::reconstitute(
            UserId::from(model.id),
            Email::new(&model.email)?,
            UserName::new(&model.first_name, &model.last_name)?,
            model.active,
            model.created_at,
            model.updated_at,
        )
    }
}

/// Every column set, so the same model serves insert and update.
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id().as_uuid()),
            email: Set(user.email().as_str().to_string()),
            first_name: Set(user.name().first_name().to_string()),
            last_name: Set(user.name().last_name().to_string()),
            active: Set(user.is_active()),
            created_at: Set(user.created_at()),
            updated_at: Set(user.updated_at()),
        }
    }
}
