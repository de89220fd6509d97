//! Storage Sink
//!
//! Writes report rows to a headerless CSV file in a scratch directory and
//! uploads it to the report bucket.

use crate::aws::storage::ObjectStore;
use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Content type of uploaded reports
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// The two reports produced per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    GroupMembership,
    ObjectAccess,
}

impl ReportKind {
    fn stem(self) -> &'static str {
        match self {
            ReportKind::GroupMembership => "group_membership",
            ReportKind::ObjectAccess => "object_access",
        }
    }

    /// Local and remote file name
    pub fn file_name(self) -> String {
        format!("{}.csv", self.stem())
    }

    /// Object key: `monitoring/<service>/<stem>/<stem>.csv`
    pub fn object_key(self, service: &str) -> String {
        format!("monitoring/{}/{}/{}", service, self.stem(), self.file_name())
    }
}

/// Outcome of publishing one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedReport {
    pub kind: ReportKind,
    pub rows: usize,
    pub local_path: PathBuf,
    /// `None` when the upload was skipped
    pub object_key: Option<String>,
}

/// Write rows as CSV with no header row and CRLF line endings.
///
/// The file handle lives only inside this function and is flushed before it
/// returns, so the file is complete once this succeeds.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(file);

    for (i, row) in rows.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("serialize CSV row #{}", i + 1))?;
    }

    let file = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush {}: {}", path.display(), e.error()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;

    Ok(rows.len())
}

/// Destination of the reports of one run
pub struct ReportSink<'a> {
    store: &'a dyn ObjectStore,
    bucket: String,
    service: String,
    scratch_dir: PathBuf,
    upload: bool,
}

impl<'a> ReportSink<'a> {
    pub fn new(
        store: &'a dyn ObjectStore,
        bucket: &str,
        service: &str,
        scratch_dir: &Path,
    ) -> Self {
        Self {
            store,
            bucket: bucket.to_string(),
            service: service.to_string(),
            scratch_dir: scratch_dir.to_path_buf(),
            upload: true,
        }
    }

    /// Write reports locally without uploading them
    pub fn dry_run(mut self) -> Self {
        self.upload = false;
        self
    }

    /// Write `rows` for `kind` and upload the file, overwriting the previous report
    pub async fn publish<T: Serialize>(
        &self,
        kind: ReportKind,
        rows: &[T],
    ) -> Result<PublishedReport> {
        let local_path = self.scratch_dir.join(kind.file_name());
        let written = write_csv(&local_path, rows)
            .with_context(|| format!("Failed to write {} report", kind.stem()))?;
        tracing::info!("Wrote {} rows to {}", written, local_path.display());

        if !self.upload {
            tracing::info!("Dry run, not uploading {}", local_path.display());
            return Ok(PublishedReport {
                kind,
                rows: written,
                local_path,
                object_key: None,
            });
        }

        let key = kind.object_key(&self.service);
        self.store
            .put_file(&self.bucket, &key, &local_path, CSV_CONTENT_TYPE)
            .await
            .with_context(|| format!("Failed to upload s3://{}/{}", self.bucket, key))?;
        tracing::info!("Uploaded s3://{}/{}", self.bucket, key);

        Ok(PublishedReport {
            kind,
            rows: written,
            local_path,
            object_key: Some(key),
        })
    }
}
