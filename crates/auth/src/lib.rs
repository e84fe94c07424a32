//! Sessions, role elevation, and route guarding.
//!
//! Mirrors an external identity provider into a single observable session,
//! promotes identities with secret codes, and answers access checks.
//!
//! ## Identity Types
//!
//! - [`Identity`] — Profile of an authenticated actor
//! - [`Role`] — Ranked authority level (`user < admin < owner`)
//! - [`Session`] — Loading, anonymous, or authenticated state
//! - [`Grant`] — Raw provider session
//!
//! ## Services
//!
//! - [`Manager`] — Session lifecycle, login, registration, profile writes
//! - [`Elevator`] — Secret-code role promotion
//! - [`Guard`] — Access decisions for protected views
//! - [`Provider`] — Remote collaborator interface, with [`Memory`] as a local implementation
mod claims;
mod credentials;
mod digest;
mod elevation;
mod error;
mod guard;
mod identity;
mod manager;
mod memory;
mod provider;
mod recovery;
mod role;
mod roster;
mod session;
mod settings;
mod tokens;

pub use claims::*;
pub use credentials::*;
pub use digest::*;
pub use elevation::*;
pub use error::*;
pub use guard::*;
pub use identity::*;
pub use manager::*;
pub use memory::*;
pub use provider::*;
pub use role::*;
pub use session::*;
pub use settings::*;
pub use tokens::*;

#[cfg(test)]
mod testing;
