//! Report upload

use super::error::call_failed;
use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use futures::future::BoxFuture;
use std::path::Path;

/// Object store accepting whole-file uploads
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `path` to `bucket`/`key`, replacing any existing object
    fn put_file<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        path: &'a Path,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<()>>;
}

/// S3 backend
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3Store {
    fn put_file<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        path: &'a Path,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            tracing::debug!("PUT s3://{}/{} from {}", bucket, key, path.display());

            let body = ByteStream::from_path(path)
                .await
                .with_context(|| format!("Failed to open {} for upload", path.display()))?;

            self.client
                .put_object()
                .bucket(bucket)
                .key(key)
                .content_type(content_type)
                .body(body)
                .send()
                .await
                .map_err(|e| call_failed("S3 PutObject", e))?;

            Ok(())
        })
    }
}
