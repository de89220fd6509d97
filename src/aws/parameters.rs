//! Parameter Store lookup

use super::error::call_failed;
use crate::config::BucketParameter;
use anyhow::{anyhow, Context, Result};
use futures::future::BoxFuture;

/// Keyed configuration store
pub trait ParameterStore: Send + Sync {
    /// Fetch the raw string value stored under `name`
    fn get_parameter<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// SSM Parameter Store backend
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

impl ParameterStore for SsmParameterStore {
    fn get_parameter<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            tracing::debug!("GetParameter {}", name);

            let out = self
                .client
                .get_parameter()
                .name(name)
                .send()
                .await
                .map_err(|e| call_failed("SSM GetParameter", e))?;

            out.parameter()
                .and_then(|p| p.value())
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Parameter {} has no value", name))
        })
    }
}

/// Resolve the report bucket from the JSON value stored under `key`
pub async fn resolve_bucket(store: &dyn ParameterStore, key: &str) -> Result<String> {
    let value = store
        .get_parameter(key)
        .await
        .with_context(|| format!("Failed to read configuration parameter {}", key))?;

    let parameter = BucketParameter::parse(&value)
        .with_context(|| format!("Invalid configuration in parameter {}", key))?;

    Ok(parameter.bucket_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapStore(HashMap<String, String>);

    impl ParameterStore for MapStore {
        fn get_parameter<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String>> {
            let value = self.0.get(name).cloned();
            Box::pin(async move { value.ok_or_else(|| anyhow!("ParameterNotFound: {}", name)) })
        }
    }

    fn store(entries: &[(&str, &str)]) -> MapStore {
        MapStore(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_resolve_bucket() {
        let store = store(&[("/qs/config/groups", r#"{"bucket-name": "audit-reports"}"#)]);
        let bucket = resolve_bucket(&store, "/qs/config/groups").await.unwrap();
        assert_eq!(bucket, "audit-reports");
    }

    #[tokio::test]
    async fn test_missing_parameter() {
        let store = store(&[]);
        let err = resolve_bucket(&store, "/qs/config/groups").await.unwrap_err();
        assert!(format!("{:#}", err).contains("ParameterNotFound"));
    }

    #[tokio::test]
    async fn test_missing_bucket_field() {
        let store = store(&[("/qs/config/groups", r#"{"region": "us-east-1"}"#)]);
        let err = resolve_bucket(&store, "/qs/config/groups").await.unwrap_err();
        assert!(format!("{:#}", err).contains("bucket-name"));
    }
}
