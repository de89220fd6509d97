//! Job entry point
//!
//! Resolves the account and the report bucket, then runs the membership and
//! access pipelines one after the other. The first fatal error aborts the run;
//! a report uploaded before that point stays in place.

use crate::aws::parameters::resolve_bucket;
use crate::aws::Services;
use crate::config::JobConfig;
use crate::report::{self, PublishedReport, ReportKind, ReportSink};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Instrument;

/// Per-run options that do not belong in the config file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Keep the CSV files here instead of a temporary directory
    pub output_dir: Option<PathBuf>,
    /// Write the CSV files but skip the upload
    pub dry_run: bool,
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub run_id: uuid::Uuid,
    pub account_id: String,
    pub bucket: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub reports: Vec<PublishedReport>,
}

/// Trigger-style entry point. The event payload is accepted and ignored.
pub async fn handle(
    event: &Value,
    services: &Services,
    config: &JobConfig,
    options: &RunOptions,
) -> Result<JobSummary> {
    if !event.is_null() {
        tracing::debug!("Ignoring trigger event payload");
    }

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("audit", run_id = %run_id);
    run(run_id, services, config, options).instrument(span).await
}

async fn run(
    run_id: uuid::Uuid,
    services: &Services,
    config: &JobConfig,
    options: &RunOptions,
) -> Result<JobSummary> {
    let started_at = Utc::now();
    tracing::info!("Audit started at {}", started_at.to_rfc3339());

    let account_id = services
        .identity
        .account_id()
        .await
        .context("Failed to resolve caller account")?;
    let bucket = resolve_bucket(services.parameters.as_ref(), &config.parameter_key).await?;
    tracing::info!("Account {}, report bucket {}", account_id, bucket);

    // Held until the end of the run; dropping it removes the scratch files.
    let temp_dir;
    let scratch_dir = match &options.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            dir.clone()
        }
        None => {
            if options.dry_run {
                tracing::warn!("Dry run without an output directory; reports are discarded");
            }
            temp_dir = tempfile::tempdir().context("Failed to create scratch directory")?;
            temp_dir.path().to_path_buf()
        }
    };

    let mut sink = ReportSink::new(
        services.storage.as_ref(),
        &bucket,
        &config.service,
        &scratch_dir,
    );
    if options.dry_run {
        sink = sink.dry_run();
    }

    let quicksight = services.quicksight.as_ref();
    let mut reports = Vec::with_capacity(2);

    let memberships = report::membership::build(quicksight, &account_id, &config.namespace)
        .await
        .context("Group membership report failed")?;
    reports.push(sink.publish(ReportKind::GroupMembership, &memberships).await?);

    let access = report::access::build(quicksight, &account_id, &config.excluded_datasets)
        .await
        .context("Object access report failed")?;
    reports.push(sink.publish(ReportKind::ObjectAccess, &access).await?);

    let finished_at = Utc::now();
    tracing::info!(
        "Audit finished in {}s: {} membership rows, {} access rows",
        (finished_at - started_at).num_seconds(),
        memberships.len(),
        access.len()
    );

    Ok(JobSummary {
        run_id,
        account_id,
        bucket,
        started_at,
        finished_at,
        reports,
    })
}
