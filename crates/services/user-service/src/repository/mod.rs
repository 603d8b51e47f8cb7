//! Persistence adapters for the user repository port.

pub mod entities;
mod memory;
mod user_repository;

pub use memory::InMemoryUserStore;
pub use user_repository::UserStore;
