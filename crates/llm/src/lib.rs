//! HTTP clients for generative text providers.
//!
//! Each client implements [`wastecast_core::provider::GenerativeProvider`]
//! so the recommendation orchestrator never sees which backend is in use.
//! The backend is chosen at startup from [`config::ProviderConfig`].

pub mod chat;
pub mod config;
pub mod error;
pub mod inference;

pub use config::{build_provider, ProviderBackend, ProviderConfig};
pub use error::LlmError;
