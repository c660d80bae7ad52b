//! Client adapter for the mbd Farcaster API
//!
//! This crate exposes the mbd social-graph and content recommendation API
//! (feeds, semantic search, AI labels, user similarity) as typed async
//! operations, plus helpers that render responses as readable text.
//!
//! # Features
//!
//! - **Host-provided settings**: `MBD_API_KEY`, `MBD_APP_NAME`, `MBD_APP_URL`
//!   and `MBD_DEBUG` resolved and validated once
//! - **One request per call**: no retry, caching or rate limiting; errors
//!   surface unchanged
//! - **Typed envelopes**: casts, users and label maps decoded from the
//!   `{success, message, data, pagination}` wrapper
//! - **Text formatters**: Markdown-like summaries for chat output
//!
//! # Example
//!
//! ```rust,no_run
//! use mbd_client::{format_casts, MbdClient, Options};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads MBD_* variables from the environment
//!     let client = MbdClient::new()?;
//!
//!     let feed = client.casts().trending_feed(Options::new()).await?;
//!     println!("{}", format_casts(&feed));
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod options;
pub mod service;
pub mod types;

pub use client::MbdClient;
pub use config::{ClientConfig, EnvSettings, Settings, SettingsFn, SettingsSource};
pub use error::{ApiError, ApiResult};
pub use format::{format_casts, format_labels, format_users};
pub use options::{options_from, Options};
pub use service::{MbdService, Service, SERVICE_TYPE};
pub use types::{
    Cast, CastFeedResponse, EventType, LabelCategory, LabelsResponse, MbdResponse, UserFeedResponse,
    UserProfile,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::MbdClient;
    pub use crate::config::{ClientConfig, Settings, SettingsSource};
    pub use crate::endpoints::{CastsApi, LabelsApi, UsersApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::format::{format_casts, format_labels, format_users};
    pub use crate::options::Options;
    pub use crate::service::{MbdService, Service};
    pub use crate::types::{EventType, LabelCategory};
}
