//! Scheduled jobs: weekly column sync and weekly review export
//!
//! `JobRegistry` is the single owner of the cron scheduler. It is built once
//! in `main`, started after the startup sync, and shut down after the HTTP
//! server stops. Job failures are logged and recorded in `JobHistory`; the
//! next attempt is simply the next trigger.

pub mod export;
pub mod sync;

use chrono::{DateTime, Utc};
use review_common::config::DataPaths;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::Result;

/// Maximum history entries to keep
const HISTORY_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    ColumnSync,
    ReviewExport,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::ColumnSync => write!(f, "column sync"),
            JobKind::ReviewExport => write!(f, "review export"),
        }
    }
}

/// Outcome of one job run
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub job: JobKind,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success: bool,
    pub detail: String,
}

/// Recent job outcomes, most recent first
#[derive(Debug, Clone, Default)]
pub struct JobHistory {
    entries: Arc<RwLock<VecDeque<JobRecord>>>,
}

impl JobHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, record: JobRecord) {
        let mut entries = self.entries.write().await;
        entries.push_front(record);
        entries.truncate(HISTORY_SIZE);
    }

    pub async fn entries(&self) -> Vec<JobRecord> {
        self.entries.read().await.iter().cloned().collect()
    }

    /// Most recent outcome for `job`, if it has run
    pub async fn latest(&self, job: JobKind) -> Option<JobRecord> {
        self.entries
            .read()
            .await
            .iter()
            .find(|r| r.job == job)
            .cloned()
    }
}

/// Everything a job run needs; cloned into each scheduled closure
#[derive(Clone)]
pub struct JobContext {
    pub db: SqlitePool,
    pub paths: DataPaths,
    pub history: JobHistory,
}

impl JobContext {
    pub fn new(db: SqlitePool, paths: DataPaths, history: JobHistory) -> Self {
        Self { db, paths, history }
    }

    /// Run the column sync, log and record the outcome; never fails
    pub async fn run_column_sync(&self) -> bool {
        let started_at = Utc::now();
        info!("Column sync started");

        let outcome = sync::run_sync(&self.db, &self.paths.snapshot_path())
            .await
            .map(|count| format!("{} columns loaded", count));

        self.finish(JobKind::ColumnSync, started_at, outcome).await
    }

    /// Run the weekly export, log and record the outcome; never fails
    pub async fn run_weekly_export(&self) -> bool {
        let started_at = Utc::now();
        info!("Weekly review export started");

        let path = self.paths.weekly_export_path();
        let outcome = export::export_reviews(&self.db, &path)
            .await
            .map(|count| format!("{} reviews written to {}", count, path.display()));

        self.finish(JobKind::ReviewExport, started_at, outcome).await
    }

    async fn finish(
        &self,
        job: JobKind,
        started_at: DateTime<Utc>,
        outcome: Result<String>,
    ) -> bool {
        let (success, detail) = match outcome {
            Ok(detail) => {
                info!("{} finished: {}", job, detail);
                (true, detail)
            }
            Err(e) => {
                error!("{} failed: {}", job, e);
                (false, e.to_string())
            }
        };

        self.history
            .record(JobRecord {
                job,
                started_at,
                finished_at: Utc::now(),
                success,
                detail,
            })
            .await;

        success
    }
}

/// Process-wide scheduled-task registry
pub struct JobRegistry {
    scheduler: JobScheduler,
    job_ids: Vec<(JobKind, Uuid)>,
}

impl JobRegistry {
    /// Create the scheduler and register both weekly jobs
    ///
    /// Fails if either cron expression does not parse.
    pub async fn new(ctx: JobContext, sync_schedule: &str, export_schedule: &str) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        let mut job_ids = Vec::with_capacity(2);

        let sync_ctx = ctx.clone();
        let sync_job = Job::new_async(sync_schedule, move |_uuid, _lock| {
            let ctx = sync_ctx.clone();
            Box::pin(async move {
                ctx.run_column_sync().await;
            })
        })?;
        job_ids.push((JobKind::ColumnSync, scheduler.add(sync_job).await?));

        let export_ctx = ctx;
        let export_job = Job::new_async(export_schedule, move |_uuid, _lock| {
            let ctx = export_ctx.clone();
            Box::pin(async move {
                ctx.run_weekly_export().await;
            })
        })?;
        job_ids.push((JobKind::ReviewExport, scheduler.add(export_job).await?));

        info!(
            "Scheduled column sync '{}' and review export '{}' (UTC)",
            sync_schedule, export_schedule
        );

        Ok(Self { scheduler, job_ids })
    }

    /// Begin firing triggers
    pub async fn start(&self) -> Result<()> {
        self.scheduler.start().await?;
        info!("Job scheduler started ({} jobs)", self.job_ids.len());
        Ok(())
    }

    /// Remove all jobs and stop the scheduler
    pub async fn shutdown(mut self) -> Result<()> {
        for (kind, id) in &self.job_ids {
            if let Err(e) = self.scheduler.remove(id).await {
                error!("Failed to remove {} job: {}", kind, e);
            }
        }
        self.scheduler.shutdown().await?;
        info!("Job scheduler stopped");
        Ok(())
    }

    pub fn job_count(&self) -> usize {
        self.job_ids.len()
    }
}
