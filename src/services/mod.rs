//! External service collaborators.
//!
//! Thin HTTP glue over remote systems the gateway hands cleaned data to.
//! No retry logic lives here; a failed call is reported and the caller
//! decides what to surface.

pub mod directory;

pub use directory::{DirectoryClient, ServiceError};
