//! Credential adapters: Argon2 hashing and the YAML users file.

mod password;
mod yaml_credential_store;

pub use password::{PasswordHashError, hash_password, verify_password};
pub use yaml_credential_store::YamlCredentialStore;
