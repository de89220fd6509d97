//! Resource Fetcher
//!
//! Fetches QuickSight resources through the [`QuickSightApi`] seam. Listing
//! operations are auto-paginated; permission lookups are single calls.

use super::model::{DataSet, Dashboard, Group, Member, ResourcePermission, User};
use super::operation::Operation;
use crate::aws::quicksight::QuickSightApi;
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Response field carrying the continuation token
const NEXT_TOKEN_FIELD: &str = "NextToken";

/// Response field carrying a resource's permission list
const PERMISSIONS_FIELD: &str = "Permissions";

/// Result of paginated fetch
#[derive(Debug)]
pub struct PaginatedResult {
    pub items: Vec<Value>,
    pub next_token: Option<String>,
}

/// Fetch every item of a paginated operation, in page order
pub async fn list_all(
    api: &dyn QuickSightApi,
    account_id: &str,
    operation: &Operation,
) -> Result<Vec<Value>> {
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let result = fetch_page(api, account_id, operation, page_token.as_deref()).await?;
        all_items.extend(result.items);
        pages += 1;

        if result.next_token.is_none() {
            break;
        }
        page_token = result.next_token;
    }

    tracing::debug!("{}: {} items in {} pages", operation, all_items.len(), pages);

    Ok(all_items)
}

/// Fetch one page of a paginated operation
pub async fn fetch_page(
    api: &dyn QuickSightApi,
    account_id: &str,
    operation: &Operation,
    page_token: Option<&str>,
) -> Result<PaginatedResult> {
    let Some(field) = operation.list_field() else {
        return Err(anyhow!("{} is not a paginated operation", operation.name()));
    };

    let response = api
        .invoke(account_id, operation, page_token)
        .await
        .with_context(|| format!("Failed to fetch {}", operation))?;

    let items = extract_items(&response, field)
        .with_context(|| format!("Unexpected {} response", operation.name()))?;

    let next_token = response
        .get(NEXT_TOKEN_FIELD)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(PaginatedResult { items, next_token })
}

/// Take the named array field out of a response
fn extract_items(response: &Value, field: &str) -> Result<Vec<Value>> {
    response
        .get(field)
        .and_then(|v| v.as_array())
        .cloned()
        .ok_or_else(|| anyhow!("response has no '{}' array", field))
}

fn decode<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Result<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).with_context(|| format!("Invalid {} entry #{}", what, i + 1))
        })
        .collect()
}

/// List all groups in a namespace
pub async fn list_groups(
    api: &dyn QuickSightApi,
    account_id: &str,
    namespace: &str,
) -> Result<Vec<Group>> {
    let operation = Operation::ListGroups {
        namespace: namespace.to_string(),
    };
    decode(list_all(api, account_id, &operation).await?, "group")
}

/// List all users in a namespace
pub async fn list_users(
    api: &dyn QuickSightApi,
    account_id: &str,
    namespace: &str,
) -> Result<Vec<User>> {
    let operation = Operation::ListUsers {
        namespace: namespace.to_string(),
    };
    decode(list_all(api, account_id, &operation).await?, "user")
}

/// List the members of one group
pub async fn list_group_memberships(
    api: &dyn QuickSightApi,
    account_id: &str,
    group_name: &str,
    namespace: &str,
) -> Result<Vec<Member>> {
    let operation = Operation::ListGroupMemberships {
        group_name: group_name.to_string(),
        namespace: namespace.to_string(),
    };
    decode(list_all(api, account_id, &operation).await?, "group member")
}

/// List all dashboards in the account
pub async fn list_dashboards(api: &dyn QuickSightApi, account_id: &str) -> Result<Vec<Dashboard>> {
    decode(
        list_all(api, account_id, &Operation::ListDashboards).await?,
        "dashboard",
    )
}

/// List all datasets in the account
pub async fn list_datasets(api: &dyn QuickSightApi, account_id: &str) -> Result<Vec<DataSet>> {
    decode(
        list_all(api, account_id, &Operation::ListDataSets).await?,
        "dataset",
    )
}

/// Fetch the permission list of a dashboard
pub async fn describe_dashboard_permissions(
    api: &dyn QuickSightApi,
    account_id: &str,
    dashboard_id: &str,
) -> Result<Vec<ResourcePermission>> {
    let operation = Operation::DescribeDashboardPermissions {
        dashboard_id: dashboard_id.to_string(),
    };
    describe_permissions(api, account_id, &operation).await
}

/// Fetch the permission list of a dataset
pub async fn describe_data_set_permissions(
    api: &dyn QuickSightApi,
    account_id: &str,
    data_set_id: &str,
) -> Result<Vec<ResourcePermission>> {
    let operation = Operation::DescribeDataSetPermissions {
        data_set_id: data_set_id.to_string(),
    };
    describe_permissions(api, account_id, &operation).await
}

async fn describe_permissions(
    api: &dyn QuickSightApi,
    account_id: &str,
    operation: &Operation,
) -> Result<Vec<ResourcePermission>> {
    let response = api
        .invoke(account_id, operation, None)
        .await
        .with_context(|| format!("Failed to fetch {}", operation))?;

    let items = extract_items(&response, PERMISSIONS_FIELD)
        .with_context(|| format!("Unexpected {} response", operation.name()))?;

    decode(items, "permission")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves canned pages keyed by the incoming token and records each call
    struct PagedApi {
        pages: Vec<(Option<&'static str>, Value)>,
        calls: Mutex<Vec<(Operation, Option<String>)>>,
    }

    impl PagedApi {
        fn new(pages: Vec<(Option<&'static str>, Value)>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl QuickSightApi for PagedApi {
        fn invoke<'a>(
            &'a self,
            _account_id: &'a str,
            operation: &'a Operation,
            next_token: Option<&'a str>,
        ) -> BoxFuture<'a, Result<Value>> {
            self.calls
                .lock()
                .unwrap()
                .push((operation.clone(), next_token.map(str::to_string)));
            let page = self
                .pages
                .iter()
                .find(|(token, _)| *token == next_token)
                .map(|(_, page)| page.clone());
            Box::pin(async move { page.ok_or_else(|| anyhow!("no page for token {:?}", next_token)) })
        }
    }

    #[tokio::test]
    async fn test_list_all_follows_tokens_in_page_order() {
        let api = PagedApi::new(vec![
            (
                None,
                json!({"DashboardSummaryList": [{"Name": "a"}, {"Name": "b"}], "NextToken": "t1"}),
            ),
            (
                Some("t1"),
                json!({"DashboardSummaryList": [{"Name": "c"}, {"Name": "d"}], "NextToken": "t2"}),
            ),
            (Some("t2"), json!({"DashboardSummaryList": [{"Name": "e"}]})),
        ]);

        let items = list_all(&api, "111122223333", &Operation::ListDashboards)
            .await
            .unwrap();

        let names: Vec<&str> = items.iter().filter_map(|v| v["Name"].as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);

        let tokens: Vec<Option<String>> = api
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, token)| token.clone())
            .collect();
        assert_eq!(tokens, vec![None, Some("t1".to_string()), Some("t2".to_string())]);
    }

    #[tokio::test]
    async fn test_list_users_decodes_pages() {
        let api = PagedApi::new(vec![
            (
                None,
                json!({"UserList": [{"UserName": "jane", "Role": "ADMIN", "Active": true}], "NextToken": "t1"}),
            ),
            (Some("t1"), json!({"UserList": [{"UserName": "joe"}]})),
        ]);

        let users = list_users(&api, "111122223333", "gademo").await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role.as_deref(), Some("ADMIN"));
        assert!(!users[1].active);
        assert_eq!(
            api.calls.lock().unwrap()[0].0,
            Operation::ListUsers {
                namespace: "gademo".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_list_field_fails() {
        let api = PagedApi::new(vec![(None, json!({"Status": 200}))]);
        let err = list_groups(&api, "111122223333", "gademo").await.unwrap_err();
        assert!(format!("{:#}", err).contains("GroupList"));
    }

    #[tokio::test]
    async fn test_page_error_propagates() {
        let api = PagedApi::new(vec![(
            None,
            json!({"GroupMemberList": [{"MemberName": "jane"}], "NextToken": "gone"}),
        )]);
        let result = list_group_memberships(&api, "111122223333", "finance-team", "gademo").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_describe_is_single_call() {
        let api = PagedApi::new(vec![(
            None,
            json!({
                "Permissions": [{
                    "Principal": "arn:aws:quicksight:us-east-1:111122223333:user/gademo/jane",
                    "Actions": ["quicksight:DescribeDashboard"]
                }],
                "NextToken": "ignored"
            }),
        )]);

        let permissions = describe_dashboard_permissions(&api, "111122223333", "d-1")
            .await
            .unwrap();
        assert_eq!(permissions.len(), 1);
        assert_eq!(permissions[0].actions, vec!["quicksight:DescribeDashboard"]);
        assert_eq!(api.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_describe_rejects_list_operation_for_pages() {
        let api = PagedApi::new(vec![]);
        let op = Operation::DescribeDataSetPermissions {
            data_set_id: "ds-1".to_string(),
        };
        let err = fetch_page(&api, "111122223333", &op, None).await.unwrap_err();
        assert!(err.to_string().contains("not a paginated operation"));
    }
}
