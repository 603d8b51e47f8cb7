//! User Service Library
//!
//! Application layer for user management: the create, read, update and
//! delete use cases, plus the SeaORM and in-memory adapters for the
//! repository port defined in `domain`.

pub mod dto;
pub mod infra;
pub mod repository;
pub mod service;

use common::DatabaseConfig;
use sea_orm::DbErr;
use tracing::info;

use crate::infra::Database;

pub use dto::{CreateUserCommand, UpdateUserCommand, UserResponse};
pub use service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use service::MockUserService;

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction, config: &DatabaseConfig) -> Result<(), DbErr> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
