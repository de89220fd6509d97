//! QuickSight operations consumed by the audit
//!
//! Each variant carries its fixed request parameters. The account id is
//! supplied separately at dispatch time.

use std::fmt;

/// One read-only QuickSight API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListGroups { namespace: String },
    ListUsers { namespace: String },
    ListGroupMemberships { group_name: String, namespace: String },
    ListDashboards,
    ListDataSets,
    DescribeDashboardPermissions { dashboard_id: String },
    DescribeDataSetPermissions { data_set_id: String },
}

impl Operation {
    /// API operation name, used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListGroups { .. } => "ListGroups",
            Operation::ListUsers { .. } => "ListUsers",
            Operation::ListGroupMemberships { .. } => "ListGroupMemberships",
            Operation::ListDashboards => "ListDashboards",
            Operation::ListDataSets => "ListDataSets",
            Operation::DescribeDashboardPermissions { .. } => "DescribeDashboardPermissions",
            Operation::DescribeDataSetPermissions { .. } => "DescribeDataSetPermissions",
        }
    }

    /// Response field holding the page items, for paginated operations
    pub fn list_field(&self) -> Option<&'static str> {
        match self {
            Operation::ListGroups { .. } => Some("GroupList"),
            Operation::ListUsers { .. } => Some("UserList"),
            Operation::ListGroupMemberships { .. } => Some("GroupMemberList"),
            Operation::ListDashboards => Some("DashboardSummaryList"),
            Operation::ListDataSets => Some("DataSetSummaries"),
            Operation::DescribeDashboardPermissions { .. }
            | Operation::DescribeDataSetPermissions { .. } => None,
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.list_field().is_some()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ListGroups { namespace } | Operation::ListUsers { namespace } => {
                write!(f, "{} (namespace={})", self.name(), namespace)
            }
            Operation::ListGroupMemberships {
                group_name,
                namespace,
            } => write!(
                f,
                "{} (group={}, namespace={})",
                self.name(),
                group_name,
                namespace
            ),
            Operation::DescribeDashboardPermissions { dashboard_id } => {
                write!(f, "{} (dashboard={})", self.name(), dashboard_id)
            }
            Operation::DescribeDataSetPermissions { data_set_id } => {
                write!(f, "{} (dataset={})", self.name(), data_set_id)
            }
            Operation::ListDashboards | Operation::ListDataSets => f.write_str(self.name()),
        }
    }
}
