//! Rust client for the commerce platform category API
//!
//! Covers the two calls a category selector needs: the OAuth
//! client-credentials token exchange and the paged category query.
//!
//! # Example
//!
//! ```rust,no_run
//! use commerce_client::CommerceClient;
//!
//! # async fn example(host_config: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
//! // Validate the host-supplied configuration object
//! let client = CommerceClient::from_host_config(&host_config)?;
//!
//! // One token per load cycle, then every page in sequence
//! let token = client.fetch_token().await?;
//! let categories = client.fetch_all_categories(&token).await?;
//! println!("{} categories", categories.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export main types
pub use auth::AccessToken;
pub use client::{CommerceClient, PAGE_SIZE};
pub use config::CommerceConfig;
pub use error::{CommerceError, Result};
pub use types::*;
