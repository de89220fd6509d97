//! Report builders and output
//!
//! - [`membership`] - `(group, member)` rows
//! - [`access`] - `(kind, resource, principal type, principal name, namespace)` rows
//! - [`sink`] - CSV writing and upload

pub mod access;
pub mod membership;
pub mod sink;

pub use access::{AccessRow, ResourceKind};
pub use membership::MembershipRow;
pub use sink::{write_csv, PublishedReport, ReportKind, ReportSink};
