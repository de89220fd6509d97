//! QuickSight resource layer
//!
//! - [`operation`] - the enumerated set of QuickSight calls and their response fields
//! - [`fetcher`] - the paginated lister and the typed domain fetchers built on it
//! - [`model`] - deserialized domain records and principal parsing
//!
//! # Example
//!
//! ```ignore
//! use qsaudit::resource::{list_groups, list_group_memberships};
//!
//! async fn members(api: &dyn QuickSightApi, account: &str) -> anyhow::Result<usize> {
//!     let mut total = 0;
//!     for group in list_groups(api, account, "default").await? {
//!         total += list_group_memberships(api, account, &group.group_name, "default").await?.len();
//!     }
//!     Ok(total)
//! }
//! ```

mod fetcher;
pub mod model;
pub mod operation;

pub use fetcher::{
    describe_dashboard_permissions, describe_data_set_permissions, fetch_page, list_all,
    list_dashboards, list_datasets, list_group_memberships, list_groups, list_users,
    PaginatedResult,
};
pub use model::{DataSet, Dashboard, Group, Member, Principal, ResourcePermission, User};
pub use operation::Operation;
