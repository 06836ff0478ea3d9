//! # Regmap Protocols
//!
//! Contract surface shared by registry implementations and their consumers.
//!
//! ## Components
//!
//! - [`RegistryError`] - Error taxonomy for lookups and strict insertion
//! - [`Zero`] - Total construction of a type's safe zero value
//! - [`DefaultPolicy`] - Ordered strategy chain for resolving absent keys

pub mod default;
pub mod error;

pub use default::{DefaultPolicy, Zero};
pub use error::RegistryError;

// Re-export CancellationToken for convenience
pub use tokio_util::sync::CancellationToken;
