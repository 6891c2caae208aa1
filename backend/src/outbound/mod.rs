//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **filesystem**: the document store, rooted in a `cap_std` directory.
//! - **credentials**: the YAML users file and Argon2 password hashing.
//!
//! Adapters are thin translators between domain types and storage. They
//! contain no workflow logic.

pub mod credentials;
pub mod filesystem;
