//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod file_key_value_store;
mod in_memory_key_value_store;
mod system_clock;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
pub use system_clock::SystemClock;
