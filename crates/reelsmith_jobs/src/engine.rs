//! In-memory job queue and worker loop.

use chrono::Utc;
use reelsmith_core::{BackgroundJob, Insight, InsightKind, JobKind, JobParams, JobStatus, Stage};
use reelsmith_error::{JobError, JobErrorKind, ReelsmithResult};
use reelsmith_pipeline::{ContentPipeline, RunRequest};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::{Arc, RwLock};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Progress fraction reached when a stage boundary passes.
fn progress_after(stage: Stage) -> f32 {
    match stage {
        Stage::Research => 0.0,
        Stage::Ideation => 0.2,
        Stage::Scripting => 0.6,
        Stage::Visuals => 0.9,
        Stage::Output => 1.0,
    }
}

type JobMap = Arc<RwLock<HashMap<Uuid, BackgroundJob>>>;

/// Queue plus worker pool over a shared pipeline.
///
/// Enqueueing is synchronous and cheap; execution happens on spawned
/// worker tasks. Status reads return snapshot clones, so a caller never
/// observes a job mid-update.
pub struct JobEngine {
    pipeline: Arc<ContentPipeline>,
    jobs: JobMap,
    sender: mpsc::UnboundedSender<Uuid>,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Uuid>>>,
}

impl std::fmt::Debug for JobEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let jobs = self.jobs.read().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("JobEngine")
            .field("jobs", &jobs)
            .finish_non_exhaustive()
    }
}

impl JobEngine {
    /// Creates an engine over the given pipeline. No workers run until
    /// [`spawn_worker`](Self::spawn_worker) is called.
    pub fn new(pipeline: Arc<ContentPipeline>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            pipeline,
            jobs: Arc::new(RwLock::new(HashMap::new())),
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Enqueues a job and returns its id immediately.
    ///
    /// # Errors
    ///
    /// Fails with [`JobErrorKind::QueueClosed`] after [`close`](Self::close).
    #[instrument(skip(self, params), fields(persona_id = %params.persona_id))]
    pub fn enqueue(&self, kind: JobKind, params: JobParams) -> ReelsmithResult<Uuid> {
        let job = BackgroundJob::queued(kind, params);
        let job_id = job.job_id;
        self.jobs
            .write()
            .expect("job map lock poisoned")
            .insert(job_id, job);
        if self.sender.send(job_id).is_err() {
            self.jobs
                .write()
                .expect("job map lock poisoned")
                .remove(&job_id);
            return Err(JobError::new(JobErrorKind::QueueClosed).into());
        }
        info!(job_id = %job_id, kind = %kind, "Enqueued job");
        Ok(job_id)
    }

    /// A snapshot of the job record, if the id is known.
    pub fn status(&self, job_id: Uuid) -> Option<BackgroundJob> {
        self.jobs
            .read()
            .expect("job map lock poisoned")
            .get(&job_id)
            .cloned()
    }

    /// Snapshots of all known jobs, newest first.
    pub fn jobs(&self) -> Vec<BackgroundJob> {
        let mut all: Vec<BackgroundJob> = self
            .jobs
            .read()
            .expect("job map lock poisoned")
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| b.enqueued_at.cmp(&a.enqueued_at));
        all
    }

    /// Closes the queue. Workers finish the jobs already queued and then
    /// exit; further `enqueue` calls fail.
    pub async fn close(&self) {
        self.receiver.lock().await.close();
    }

    /// Spawns one worker task that pulls jobs until the queue closes.
    pub fn spawn_worker(&self) -> JoinHandle<()> {
        let pipeline = Arc::clone(&self.pipeline);
        let jobs = Arc::clone(&self.jobs);
        let receiver = Arc::clone(&self.receiver);
        tokio::spawn(async move {
            loop {
                let job_id = {
                    let mut rx = receiver.lock().await;
                    match rx.recv().await {
                        Some(id) => id,
                        None => break,
                    }
                };
                execute(&pipeline, &jobs, job_id).await;
            }
        })
    }

    /// Spawns `count` worker tasks.
    pub fn spawn_workers(&self, count: usize) -> Vec<JoinHandle<()>> {
        (0..count).map(|_| self.spawn_worker()).collect()
    }
}

/// Runs one job to a terminal state, updating its record along the way.
#[instrument(skip(pipeline, jobs))]
async fn execute(pipeline: &ContentPipeline, jobs: &JobMap, job_id: Uuid) {
    let Some(params) = update(jobs, job_id, |job| {
        job.status = JobStatus::Running;
        job.params.clone()
    }) else {
        warn!(job_id = %job_id, "Queued job vanished before execution");
        return;
    };

    let request = request_for(&params);
    let progress_jobs = Arc::clone(jobs);
    let result = pipeline
        .run_with_observer(&request, move |stage| {
            update(&progress_jobs, job_id, |job| {
                job.progress = progress_after(stage);
            });
        })
        .await;

    match result {
        Ok(run) => {
            update(jobs, job_id, |job| {
                job.status = JobStatus::Completed;
                job.progress = 1.0;
                job.run_id = Some(run.run_id);
            });
            info!(job_id = %job_id, run_id = %run.run_id, "Job completed");
        }
        Err(failure) => {
            // Progress stays frozen at the last completed boundary.
            error!(job_id = %job_id, stage = %failure.stage, error = %failure.error, "Job failed");
            update(jobs, job_id, |job| {
                job.status = JobStatus::Failed;
                job.error = Some(failure.to_string());
            });
        }
    }
}

/// Applies a mutation to a job record and stamps `updated_at`.
fn update<T>(jobs: &JobMap, job_id: Uuid, apply: impl FnOnce(&mut BackgroundJob) -> T) -> Option<T> {
    let mut map = jobs.write().expect("job map lock poisoned");
    let job = map.get_mut(&job_id)?;
    let out = apply(job);
    job.updated_at = Utc::now();
    Some(out)
}

/// Insight-driven jobs regenerate from the curated subset, not from live
/// research, so research is always skipped.
fn request_for(params: &JobParams) -> RunRequest {
    let mut request = RunRequest::new(&params.persona_id, params.ideas_count);
    request.skip_research = true;
    request.extra_context = render_insights(&params.insights);
    request.generate_scripts = params.generate_scripts;
    request.generate_visuals = params.generate_visuals;
    request
}

/// Formats selected insights as markdown grouped by kind, for the
/// ideation prompt's extra context.
fn render_insights(insights: &[Insight]) -> Option<String> {
    if insights.is_empty() {
        return None;
    }
    let mut grouped: BTreeMap<InsightKind, Vec<&str>> = BTreeMap::new();
    for insight in insights {
        grouped
            .entry(insight.kind)
            .or_default()
            .push(&insight.content);
    }
    let mut out = String::from("## Selected Insights\n");
    for (kind, contents) in grouped {
        let _ = writeln!(out, "### {kind}");
        for content in contents {
            let _ = writeln!(out, "- {content}");
        }
    }
    Some(out)
}
