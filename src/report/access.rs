//! Object access report
//!
//! Flattens the sharing permissions of every dashboard and dataset into one
//! row per grant.

use crate::aws::quicksight::QuickSightApi;
use crate::resource::{
    describe_dashboard_permissions, describe_data_set_permissions, list_dashboards, list_datasets,
    Principal, ResourcePermission,
};
use anyhow::{Context, Result};
use serde::Serialize;

/// Kind of shared QuickSight object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Dashboard,
    Dataset,
}

/// One permission grant on one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRow {
    pub kind: ResourceKind,
    pub resource_name: String,
    pub principal_type: String,
    pub principal_name: String,
    pub namespace: String,
}

impl AccessRow {
    /// Build a row from a raw permission, failing on a malformed principal
    pub fn from_permission(
        kind: ResourceKind,
        resource_name: &str,
        permission: &ResourcePermission,
    ) -> Result<Self> {
        let principal = Principal::parse(&permission.principal)?;
        Ok(Self {
            kind,
            resource_name: resource_name.to_string(),
            principal_type: principal.principal_type,
            principal_name: principal.name,
            namespace: principal.namespace,
        })
    }
}

/// Build the access rows: dashboards first, then datasets not in `excluded_datasets`
pub async fn build(
    api: &dyn QuickSightApi,
    account_id: &str,
    excluded_datasets: &[String],
) -> Result<Vec<AccessRow>> {
    let mut rows = Vec::new();

    let dashboards = list_dashboards(api, account_id).await?;
    tracing::info!("Found {} dashboards", dashboards.len());

    for dashboard in dashboards {
        let permissions =
            describe_dashboard_permissions(api, account_id, &dashboard.dashboard_id).await?;
        for permission in &permissions {
            let row = AccessRow::from_permission(ResourceKind::Dashboard, &dashboard.name, permission)
                .with_context(|| format!("Dashboard {} ({})", dashboard.name, dashboard.dashboard_id))?;
            rows.push(row);
        }
    }

    let datasets = list_datasets(api, account_id).await?;
    tracing::info!("Found {} datasets", datasets.len());

    for dataset in datasets {
        if excluded_datasets.iter().any(|name| *name == dataset.name) {
            tracing::debug!("Skipping excluded dataset {}", dataset.name);
            continue;
        }

        let permissions =
            describe_data_set_permissions(api, account_id, &dataset.data_set_id).await?;
        for permission in &permissions {
            let row = AccessRow::from_permission(ResourceKind::Dataset, &dataset.name, permission)
                .with_context(|| format!("Dataset {} ({})", dataset.name, dataset.data_set_id))?;
            rows.push(row);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_permission() {
        let permission = ResourcePermission {
            principal: "arn:aws:quicksight:us-east-1:111122223333:group/gademo/finance-team"
                .to_string(),
            actions: vec!["quicksight:DescribeDashboard".to_string()],
        };
        let row = AccessRow::from_permission(ResourceKind::Dashboard, "Revenue", &permission).unwrap();
        assert_eq!(row.kind, ResourceKind::Dashboard);
        assert_eq!(row.resource_name, "Revenue");
        assert_eq!(row.principal_type, "group");
        assert_eq!(row.principal_name, "finance-team");
        assert_eq!(row.namespace, "gademo");
    }

    #[test]
    fn test_row_from_malformed_permission() {
        let permission = ResourcePermission {
            principal: "finance-team".to_string(),
            actions: vec![],
        };
        assert!(AccessRow::from_permission(ResourceKind::Dataset, "Sales", &permission).is_err());
    }
}
