//! Session, role elevation, and route guarding for a portfolio front end.
//!
//! Re-exports the workspace crates and hosts the interactive console.
pub mod console;

pub use folio_auth::*;
pub use folio_core::*;
