//! Single dedicated geometry thread fed by a FIFO queue.
//!
//! At most one job runs at a time; submission never blocks. Every job gets a
//! shared slot holding its `JobState` plus a cancel flag, both reachable from
//! its `JobHandle`.

use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use super::event::{AlgorithmEvent, JobFailure, JobId, JobState, Observer};
use super::job::{run_job, Job};

/// Worker configuration.
#[derive(Clone, Debug)]
pub struct WorkerCfg {
    /// Maximum number of queued (not yet running) jobs; `None` is unbounded.
    pub queue_capacity: Option<usize>,
    pub thread_name: String,
}

impl Default for WorkerCfg {
    fn default() -> Self {
        Self {
            queue_capacity: None,
            thread_name: "geometry-worker".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// Bounded queue is at capacity.
    QueueFull,
    /// The worker thread has shut down.
    WorkerGone,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::QueueFull => write!(f, "geometry queue is full"),
            SubmitError::WorkerGone => write!(f, "geometry worker is gone"),
        }
    }
}

impl std::error::Error for SubmitError {}

struct Slot {
    state: Mutex<JobState>,
    changed: Condvar,
}

impl Slot {
    fn new() -> Self {
        Self {
            state: Mutex::new(JobState::Pending),
            changed: Condvar::new(),
        }
    }

    fn set(&self, s: JobState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = s;
        self.changed.notify_all();
    }

    fn get(&self) -> JobState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn wait_terminal(&self) -> JobState {
        let mut g = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        while !g.is_terminal() {
            g = self
                .changed
                .wait(g)
                .unwrap_or_else(PoisonError::into_inner);
        }
        g.clone()
    }
}

/// Caller's view of a submitted job.
#[derive(Clone)]
pub struct JobHandle {
    id: JobId,
    slot: Arc<Slot>,
    cancel: Arc<AtomicBool>,
}

impl JobHandle {
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Current state; never blocks on the job.
    pub fn state(&self) -> JobState {
        self.slot.get()
    }

    /// Block until the job reaches `Completed` or `Failed`.
    pub fn wait(&self) -> JobState {
        self.slot.wait_terminal()
    }

    /// Request cooperative cancellation.
    ///
    /// A pending job fails with `Cancelled` without emitting `Started`; a
    /// running job fails at its next checkpoint. Finished jobs are unaffected.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}

struct Task {
    id: JobId,
    job: Job,
    observer: Box<dyn Observer>,
    slot: Arc<Slot>,
    cancel: Arc<AtomicBool>,
}

enum Queue {
    Unbounded(mpsc::Sender<Task>),
    Bounded(SyncSender<Task>),
}

/// Serialized executor for geometry jobs.
pub struct GeometryWorker {
    queue: Option<Queue>,
    thread: Option<JoinHandle<()>>,
    next_id: AtomicU64,
}

impl GeometryWorker {
    /// Spawn the worker thread. Fails only if the OS refuses the thread.
    pub fn spawn(cfg: WorkerCfg) -> io::Result<Self> {
        let (queue, rx) = match cfg.queue_capacity {
            None => {
                let (tx, rx) = mpsc::channel();
                (Queue::Unbounded(tx), rx)
            }
            Some(cap) => {
                let (tx, rx) = mpsc::sync_channel(cap);
                (Queue::Bounded(tx), rx)
            }
        };
        let thread = thread::Builder::new()
            .name(cfg.thread_name.clone())
            .spawn(move || serve(rx))?;
        tracing::debug!(
            thread = %cfg.thread_name,
            capacity = ?cfg.queue_capacity,
            "geometry worker started"
        );
        Ok(Self {
            queue: Some(queue),
            thread: Some(thread),
            next_id: AtomicU64::new(0),
        })
    }

    /// Enqueue `job`; its events go to `observer` on the worker thread.
    pub fn submit<O>(&self, job: Job, observer: O) -> Result<JobHandle, SubmitError>
    where
        O: Observer + 'static,
    {
        let queue = self.queue.as_ref().ok_or(SubmitError::WorkerGone)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let slot = Arc::new(Slot::new());
        let cancel = Arc::new(AtomicBool::new(false));
        let task = Task {
            id,
            job,
            observer: Box::new(observer),
            slot: Arc::clone(&slot),
            cancel: Arc::clone(&cancel),
        };
        match queue {
            Queue::Unbounded(tx) => tx.send(task).map_err(|_| SubmitError::WorkerGone)?,
            Queue::Bounded(tx) => tx.try_send(task).map_err(|e| match e {
                TrySendError::Full(_) => SubmitError::QueueFull,
                TrySendError::Disconnected(_) => SubmitError::WorkerGone,
            })?,
        }
        tracing::trace!(id, "job queued");
        Ok(JobHandle { id, slot, cancel })
    }

    /// Run every queued job, then stop the thread.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.queue.take();
        if let Some(t) = self.thread.take() {
            if t.join().is_err() {
                tracing::warn!("geometry worker thread panicked");
            }
            tracing::debug!("geometry worker stopped");
        }
    }
}

impl Drop for GeometryWorker {
    fn drop(&mut self) {
        self.close();
    }
}

fn serve(rx: Receiver<Task>) {
    while let Ok(task) = rx.recv() {
        execute(task);
    }
}

fn execute(task: Task) {
    let Task {
        id,
        job,
        mut observer,
        slot,
        cancel,
    } = task;
    let span = tracing::info_span!("job", id, kind = ?job.kind, n = job.polygon.len());
    let _enter = span.enter();

    slot.set(JobState::Running);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run_job(&job, observer.as_mut(), &cancel)
    }));
    let state = match outcome {
        Ok(s) => s,
        Err(payload) => {
            let failure = JobFailure::Panicked(panic_message(payload.as_ref()));
            // The observer may be what panicked; a second panic is dropped.
            let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                observer.on_event(AlgorithmEvent::Failed(failure.clone()))
            }));
            JobState::Failed(failure)
        }
    };
    match &state {
        JobState::Failed(f) => tracing::warn!(reason = %f, "job failed"),
        _ => tracing::info!("job completed"),
    }
    slot.set(state);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
