//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` aggregate, its value objects, domain errors and the
//! repository port that persistence adapters implement.

pub mod constants;
pub mod email;
pub mod error;
pub mod port;
pub mod user;
pub mod user_id;
pub mod user_name;

pub use constants::*;
pub use email::Email;
pub use error::{BoxError, DomainError, DomainResult};
pub use port::UserRepository;
pub use user::User;
pub use user_id::UserId;
pub use user_name::UserName;

#[cfg(any(test, feature = "test-utils"))]
pub use port::MockUserRepository;
