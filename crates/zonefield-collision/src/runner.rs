//! Cancellable collision generation jobs.
//!
//! At most one job is live at a time. A new terrain-update request
//! flags the previous job's cancellation bit (cooperative — the pass
//! notices it at pixel granularity) and starts a fresh job over the
//! given snapshot without waiting. Results travel through a single
//! `mpsc` channel and are applied only by `drain_completed`, called
//! on the thread that owns the collision shapes; output from any job
//! whose flag was ever set is discarded there, so a stale pass can
//! never overwrite a fresher one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use zonefield_core::config::TerrainConfig;
use zonefield_core::constants::COLLISION_WORKER_THREAD_NAME;
use zonefield_core::error::TerrainError;
use zonefield_terrain::builder::{build_heightfields, BuildOutcome};
use zonefield_terrain::zones::ZoneGrid;

use crate::shapes::HeightfieldSink;

/// Lifecycle of the most recent generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// No job has run, or the last job failed.
    Idle,
    /// A job has started and its outcome has not been drained yet.
    Running,
    /// The last job's results were delivered.
    Completed,
    /// The last job was cancelled; nothing was delivered.
    Cancelled,
}

/// One in-flight generation pass.
struct ActiveJob {
    id: u64,
    cancel: Arc<AtomicBool>,
}

/// Outcome message marshaled back to the owner thread.
enum JobMessage {
    Finished {
        job_id: u64,
        cancel: Arc<AtomicBool>,
        outcome: BuildOutcome,
    },
    Failed {
        job_id: u64,
        error: TerrainError,
    },
}

/// Owns the single live generation job and the result channel.
///
/// The runner itself lives on the collision-shape owner's thread;
/// only the cancel flags and the channel sender cross threads.
pub struct CollisionJobRunner {
    config: TerrainConfig,
    next_job_id: u64,
    active: Option<ActiveJob>,
    state: JobState,
    done_tx: Sender<JobMessage>,
    done_rx: Receiver<JobMessage>,
    workers: Vec<JoinHandle<()>>,
}

impl CollisionJobRunner {
    pub fn new(config: TerrainConfig) -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            config,
            next_job_id: 0,
            active: None,
            state: JobState::Idle,
            done_tx,
            done_rx,
            workers: Vec::new(),
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// State of the most recent job.
    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn has_active_job(&self) -> bool {
        self.active.is_some()
    }

    /// Cancel and restart generation over a fresh snapshot.
    ///
    /// Validates the snapshot first so malformed zone data surfaces
    /// here, to the requester; nothing is started in that case and the
    /// previous job keeps running. Otherwise the previous job's cancel
    /// flag is set and the new job starts immediately, regardless of
    /// whether the old pass has noticed yet.
    pub fn request_update(&mut self, snapshot: ZoneGrid) -> Result<(), TerrainError> {
        snapshot.validate()?;

        if let Some(job) = &self.active {
            job.cancel.store(true, Ordering::Relaxed);
        }

        let job_id = self.next_job_id;
        self.next_job_id += 1;
        let cancel = Arc::new(AtomicBool::new(false));
        self.active = Some(ActiveJob {
            id: job_id,
            cancel: Arc::clone(&cancel),
        });
        self.state = JobState::Running;

        if self.config.create_collision_in_thread {
            // Synchronous mode still routes through the channel so
            // staleness filtering is uniform with background mode.
            run_generation_pass(&snapshot, self.config, job_id, cancel, &self.done_tx);
        } else {
            let config = self.config;
            let done_tx = self.done_tx.clone();
            let handle = std::thread::Builder::new()
                .name(COLLISION_WORKER_THREAD_NAME.into())
                .spawn(move || {
                    run_generation_pass(&snapshot, config, job_id, cancel, &done_tx);
                })
                .expect("Failed to spawn collision generation thread");
            self.workers.push(handle);
        }

        Ok(())
    }

    /// Flag the live job as cancelled without starting a new one.
    pub fn cancel_active(&mut self) {
        if let Some(job) = &self.active {
            job.cancel.store(true, Ordering::Relaxed);
        }
    }

    /// Apply finished jobs to the collision-shape owner. Must be
    /// called on the owner's thread.
    ///
    /// Only the newest job's output is ever delivered, and only if its
    /// cancel flag was never set; everything else is discarded
    /// silently. Returns the number of zones delivered. Build failures
    /// of the newest job surface here (background mode) or at
    /// `request_update` (validation).
    pub fn drain_completed(&mut self, sink: &mut dyn HeightfieldSink) -> Result<usize, TerrainError> {
        let mut delivered = 0;
        loop {
            match self.done_rx.try_recv() {
                Ok(JobMessage::Finished {
                    job_id,
                    cancel,
                    outcome,
                }) => {
                    let is_current = self.active.as_ref().is_some_and(|job| job.id == job_id);
                    if !is_current {
                        continue; // superseded job, discard
                    }
                    self.active = None;

                    if cancel.load(Ordering::Relaxed) {
                        self.state = JobState::Cancelled;
                        continue;
                    }
                    match outcome {
                        BuildOutcome::Cancelled => {
                            self.state = JobState::Cancelled;
                        }
                        BuildOutcome::Completed(heightfields) => {
                            for field in heightfields {
                                sink.accept_heightfield(
                                    field.zone_index,
                                    field.position,
                                    field.heights,
                                )?;
                                delivered += 1;
                            }
                            self.state = JobState::Completed;
                        }
                    }
                }
                Ok(JobMessage::Failed { job_id, error }) => {
                    let is_current = self.active.as_ref().is_some_and(|job| job.id == job_id);
                    if is_current {
                        self.active = None;
                        self.state = JobState::Idle;
                        return Err(error);
                    }
                    // A superseded job's failure is as moot as its result.
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(delivered)
    }

    /// Join all worker threads spawned so far. Flagged workers finish
    /// their bounded extra work and exit on their own; this only reaps
    /// them. Used at shutdown and by tests before draining.
    pub fn wait_for_workers(&mut self) {
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for CollisionJobRunner {
    fn drop(&mut self) {
        self.cancel_active();
        self.wait_for_workers();
    }
}

/// Run one pass and marshal the outcome onto the result channel.
fn run_generation_pass(
    snapshot: &ZoneGrid,
    config: TerrainConfig,
    job_id: u64,
    cancel: Arc<AtomicBool>,
    done_tx: &Sender<JobMessage>,
) {
    let message = match build_heightfields(snapshot, &config, &cancel) {
        Ok(outcome) => JobMessage::Finished {
            job_id,
            cancel,
            outcome,
        },
        Err(error) => JobMessage::Failed { job_id, error },
    };
    // The runner may already be gone at shutdown.
    let _ = done_tx.send(message);
}
