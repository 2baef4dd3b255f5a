//! Hosted-backend client
//!
//! The application owns no persistence or auth protocol of its own; every
//! data read/write goes through the hosted backend's REST surface. The
//! table endpoints follow PostgREST conventions, the auth endpoints GoTrue
//! conventions. Row-level multi-tenant access control is enforced
//! backend-side; this client only shapes requests and surfaces errors.

pub mod auth;
pub mod client;
pub mod query;

pub use auth::{AuthApi, AuthUser, Session, SignUpOutcome};
pub use client::BackendClient;
pub use query::{Order, TableQuery};
