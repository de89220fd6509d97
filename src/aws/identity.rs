//! Caller identity
//!
//! Resolves the account id the audit runs against from the caller's own credentials.

use super::error::call_failed;
use anyhow::{anyhow, Result};
use futures::future::BoxFuture;

/// Source of the caller's account id
pub trait IdentityProvider: Send + Sync {
    fn account_id(&self) -> BoxFuture<'_, Result<String>>;
}

/// STS-backed identity provider
pub struct StsIdentity {
    client: aws_sdk_sts::Client,
}

impl StsIdentity {
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }
}

impl IdentityProvider for StsIdentity {
    fn account_id(&self) -> BoxFuture<'_, Result<String>> {
        Box::pin(async move {
            let out = self
                .client
                .get_caller_identity()
                .send()
                .await
                .map_err(|e| call_failed("STS GetCallerIdentity", e))?;

            out.account()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("STS GetCallerIdentity response missing Account"))
        })
    }
}
