//! qsaudit
//!
//! Audits the access-control state of a QuickSight account: group memberships
//! and dashboard/dataset sharing permissions are flattened into two CSV reports
//! and uploaded to S3.
//!
//! # Module Structure
//!
//! - [`aws`] - AWS service seams (identity, parameters, QuickSight, S3) and their SDK adapters
//! - [`resource`] - QuickSight operations, the paginated lister and domain fetchers
//! - [`report`] - report builders and the CSV storage sink
//! - [`config`] - job configuration
//! - [`job`] - the job entry point wiring everything together

pub mod aws;
pub mod config;
pub mod job;
pub mod report;
pub mod resource;
