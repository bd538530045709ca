//! Zensync remote client — blocking JSON transport for the Help Center API.
//!
//! [`RemoteClient`] is the seam the sync engine talks through; [`HttpRemote`]
//! is the production implementation over `ureq`. Tests substitute a scripted
//! fake.

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::{HttpRemote, RemoteClient};
