//! Group membership report

use crate::aws::quicksight::QuickSightApi;
use crate::resource::{list_group_memberships, list_groups};
use anyhow::Result;
use serde::Serialize;

/// One `(group, member)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipRow {
    pub group: String,
    pub member: String,
}

/// Build the membership rows for every group in `namespace`.
///
/// Groups without members contribute no rows.
pub async fn build(
    api: &dyn QuickSightApi,
    account_id: &str,
    namespace: &str,
) -> Result<Vec<MembershipRow>> {
    let groups = list_groups(api, account_id, namespace).await?;
    tracing::info!("Found {} groups in namespace {}", groups.len(), namespace);

    let mut rows = Vec::new();
    for group in groups {
        let members = list_group_memberships(api, account_id, &group.group_name, namespace).await?;
        if members.is_empty() {
            tracing::debug!("Group {} has no members", group.group_name);
        }

        rows.extend(members.into_iter().map(|member| MembershipRow {
            group: group.group_name.clone(),
            member: member.member_name,
        }));
    }

    Ok(rows)
}
