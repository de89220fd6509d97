//! QuickSight domain records
//!
//! Field names follow the QuickSight API's PascalCase JSON shapes so page items
//! deserialize straight from the listed values.

use anyhow::{bail, Result};
use serde::Deserialize;

/// QuickSight group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    pub group_name: String,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub principal_id: Option<String>,
}

/// Member of a group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    pub member_name: String,
    #[serde(default)]
    pub arn: Option<String>,
}

/// QuickSight user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub user_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub principal_id: Option<String>,
}

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dashboard {
    pub dashboard_id: String,
    pub name: String,
    #[serde(default)]
    pub arn: Option<String>,
}

/// Dataset summary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSet {
    pub data_set_id: String,
    pub name: String,
    #[serde(default)]
    pub arn: Option<String>,
}

/// Permission grant on a dashboard or dataset, as returned upstream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourcePermission {
    pub principal: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Principal parsed from a permission's identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// `user` or `group` for QuickSight principals
    pub principal_type: String,
    pub name: String,
    pub namespace: String,
}

impl Principal {
    /// Parse a principal ARN such as
    /// `arn:aws:quicksight:us-east-1:111122223333:group/gademo/finance-team`.
    ///
    /// The type is the last `:` piece of the first `/` segment, the name is
    /// the last segment and the namespace the one before it.
    pub fn parse(identifier: &str) -> Result<Self> {
        let segments: Vec<&str> = identifier.split('/').collect();
        if segments.len() < 2 {
            bail!(
                "Malformed principal identifier '{}': expected at least two '/' segments",
                identifier
            );
        }

        let Some((_, principal_type)) = segments[0].rsplit_once(':') else {
            bail!(
                "Malformed principal identifier '{}': no ':' in '{}'",
                identifier,
                segments[0]
            );
        };

        let name = segments[segments.len() - 1];
        let namespace = segments[segments.len() - 2];

        if principal_type.is_empty() || name.is_empty() {
            bail!(
                "Malformed principal identifier '{}': empty principal type or name",
                identifier
            );
        }

        Ok(Self {
            principal_type: principal_type.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
        })
    }
}
