//! Job execution and the ordered event protocol.
//!
//! - `run_job`: run one job synchronously, streaming `AlgorithmEvent`s.
//! - `GeometryWorker`: one dedicated thread that runs submitted jobs in FIFO
//!   order, so no two jobs ever overlap.
//!
//! Observers are called on the worker thread, in algorithm order, with no
//! batching. Failures are values (`JobState::Failed`), never process aborts.

mod event;
mod job;
mod worker;

pub use event::{AlgorithmEvent, JobFailure, JobId, JobKind, JobState, Observer, Recorder};
pub use job::{run_job, Job};
pub use worker::{GeometryWorker, JobHandle, SubmitError, WorkerCfg};
