//! In-memory user store.

mod user;

pub use user::InMemoryUserRepository;
