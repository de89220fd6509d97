//! QuickSight dispatch
//!
//! Maps each [`Operation`] variant to its concrete SDK call and renders the
//! output in the API's JSON response shape (`GroupList`, `NextToken`, ...).

use super::error::call_failed;
use crate::resource::Operation;
use anyhow::Result;
use aws_sdk_quicksight::types::{
    DashboardSummary, DataSetSummary, Group, GroupMember, ResourcePermission, User,
};
use futures::future::BoxFuture;
use serde_json::{json, Map, Value};

/// Read-only access to the QuickSight API
pub trait QuickSightApi: Send + Sync {
    /// Invoke one operation, continuing from `next_token` when given
    fn invoke<'a>(
        &'a self,
        account_id: &'a str,
        operation: &'a Operation,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Value>>;
}

/// SDK-backed QuickSight client
pub struct QuickSightClient {
    client: aws_sdk_quicksight::Client,
}

impl QuickSightClient {
    pub fn new(client: aws_sdk_quicksight::Client) -> Self {
        Self { client }
    }
}

impl QuickSightApi for QuickSightClient {
    fn invoke<'a>(
        &'a self,
        account_id: &'a str,
        operation: &'a Operation,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(self.dispatch(account_id, operation, next_token.map(str::to_string)))
    }
}

impl QuickSightClient {
    async fn dispatch(
        &self,
        account_id: &str,
        operation: &Operation,
        next_token: Option<String>,
    ) -> Result<Value> {
        tracing::debug!("invoke: {} token={:?}", operation, next_token);

        let name = format!("QuickSight {}", operation.name());

        match operation {
            Operation::ListGroups { namespace } => {
                let out = self
                    .client
                    .list_groups()
                    .aws_account_id(account_id)
                    .namespace(namespace)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|e| call_failed(&name, e))?;
                Ok(page(
                    "GroupList",
                    out.group_list().iter().map(group_json).collect(),
                    out.next_token(),
                ))
            }
            Operation::ListUsers { namespace } => {
                let out = self
                    .client
                    .list_users()
                    .aws_account_id(account_id)
                    .namespace(namespace)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|e| call_failed(&name, e))?;
                Ok(page(
                    "UserList",
                    out.user_list().iter().map(user_json).collect(),
                    out.next_token(),
                ))
            }
            Operation::ListGroupMemberships {
                group_name,
                namespace,
            } => {
                let out = self
                    .client
                    .list_group_memberships()
                    .aws_account_id(account_id)
                    .group_name(group_name)
                    .namespace(namespace)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|e| call_failed(&name, e))?;
                Ok(page(
                    "GroupMemberList",
                    out.group_member_list().iter().map(member_json).collect(),
                    out.next_token(),
                ))
            }
            Operation::ListDashboards => {
                let out = self
                    .client
                    .list_dashboards()
                    .aws_account_id(account_id)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|e| call_failed(&name, e))?;
                Ok(page(
                    "DashboardSummaryList",
                    out.dashboard_summary_list().iter().map(dashboard_json).collect(),
                    out.next_token(),
                ))
            }
            Operation::ListDataSets => {
                let out = self
                    .client
                    .list_data_sets()
                    .aws_account_id(account_id)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|e| call_failed(&name, e))?;
                Ok(page(
                    "DataSetSummaries",
                    out.data_set_summaries().iter().map(data_set_json).collect(),
                    out.next_token(),
                ))
            }
            Operation::DescribeDashboardPermissions { dashboard_id } => {
                let out = self
                    .client
                    .describe_dashboard_permissions()
                    .aws_account_id(account_id)
                    .dashboard_id(dashboard_id)
                    .send()
                    .await
                    .map_err(|e| call_failed(&name, e))?;
                Ok(json!({
                    "DashboardId": out.dashboard_id(),
                    "Permissions": out.permissions().iter().map(permission_json).collect::<Vec<_>>(),
                }))
            }
            Operation::DescribeDataSetPermissions { data_set_id } => {
                let out = self
                    .client
                    .describe_data_set_permissions()
                    .aws_account_id(account_id)
                    .data_set_id(data_set_id)
                    .send()
                    .await
                    .map_err(|e| call_failed(&name, e))?;
                Ok(json!({
                    "DataSetId": out.data_set_id(),
                    "Permissions": out.permissions().iter().map(permission_json).collect::<Vec<_>>(),
                }))
            }
        }
    }
}

/// Build a list response: `{ <field>: [...], "NextToken": ... }`
fn page(field: &str, items: Vec<Value>, next_token: Option<&str>) -> Value {
    let mut map = Map::new();
    map.insert(field.to_string(), Value::Array(items));
    if let Some(token) = next_token {
        map.insert("NextToken".to_string(), Value::String(token.to_string()));
    }
    Value::Object(map)
}

fn group_json(group: &Group) -> Value {
    json!({
        "GroupName": group.group_name(),
        "Arn": group.arn(),
        "Description": group.description(),
        "PrincipalId": group.principal_id(),
    })
}

fn user_json(user: &User) -> Value {
    json!({
        "UserName": user.user_name(),
        "Email": user.email(),
        "Role": user.role().map(|r| r.as_str()),
        "Arn": user.arn(),
        "Active": user.active(),
        "PrincipalId": user.principal_id(),
    })
}

fn member_json(member: &GroupMember) -> Value {
    json!({
        "MemberName": member.member_name(),
        "Arn": member.arn(),
    })
}

fn dashboard_json(dashboard: &DashboardSummary) -> Value {
    json!({
        "DashboardId": dashboard.dashboard_id(),
        "Name": dashboard.name(),
        "Arn": dashboard.arn(),
    })
}

fn data_set_json(data_set: &DataSetSummary) -> Value {
    json!({
        "DataSetId": data_set.data_set_id(),
        "Name": data_set.name(),
        "Arn": data_set.arn(),
    })
}

fn permission_json(permission: &ResourcePermission) -> Value {
    json!({
        "Principal": permission.principal(),
        "Actions": permission.actions(),
    })
}
