//! # WorkflowCRM Common Library
//!
//! Shared code for the WorkflowCRM crates including:
//! - Hosted-backend client (table queries + auth)
//! - Domain models for the backend tables
//! - Industry configuration registry and resolver
//! - Session/tenant context objects
//! - Transcript parsing for the voice workflow
//! - Configuration loading and local persisted state

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod industry;
pub mod models;
pub mod store;
pub mod voice;

pub use error::{Error, Result};
pub use industry::IndustryResolver;
