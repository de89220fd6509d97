//! AWS service interaction module
//!
//! Each remote dependency of the audit job sits behind a small trait so the
//! job can be driven by the real SDK clients or by in-memory fakes.
//!
//! # Module Structure
//!
//! - [`client`] - shared SDK configuration and construction of [`Services`]
//! - [`error`] - SDK error wrapping and user-facing error summaries
//! - [`identity`] - caller account resolution (STS)
//! - [`parameters`] - keyed configuration lookup (SSM Parameter Store)
//! - [`quicksight`] - QuickSight operation dispatch
//! - [`storage`] - report upload (S3)
//!
//! # Example
//!
//! ```ignore
//! use qsaudit::aws::client;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let services = client::connect(Some("eu-west-1")).await;
//!     let account_id = services.identity.account_id().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod identity;
pub mod parameters;
pub mod quicksight;
pub mod storage;

use identity::IdentityProvider;
use parameters::ParameterStore;
use quicksight::QuickSightApi;
use storage::ObjectStore;

/// Remote services used by one job run
pub struct Services {
    pub identity: Box<dyn IdentityProvider>,
    pub parameters: Box<dyn ParameterStore>,
    pub quicksight: Box<dyn QuickSightApi>,
    pub storage: Box<dyn ObjectStore>,
}
