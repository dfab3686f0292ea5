//! Synchronous job execution: one polygon, one ordered event stream.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::kernel::Polygon;
use crate::monotone::{classify, triangulate, ClassifiedVertex, Diagonal, StepError, Steps, SweepCfg};

use super::event::{AlgorithmEvent, JobFailure, JobKind, JobState, Observer};

/// A unit of work. Owns its polygon for the lifetime of the run.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub polygon: Polygon,
    pub kind: JobKind,
    pub sweep: SweepCfg,
}

impl Job {
    pub fn new(polygon: Polygon) -> Self {
        Self {
            polygon,
            kind: JobKind::default(),
            sweep: SweepCfg::default(),
        }
    }

    pub fn with_kind(mut self, kind: JobKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_sweep(mut self, sweep: SweepCfg) -> Self {
        self.sweep = sweep;
        self
    }
}

/// Forwards algorithm steps as events and polls the cancel flag at checkpoints.
struct EventSink<'a, O: Observer + ?Sized> {
    observer: &'a mut O,
    cancel: &'a AtomicBool,
}

impl<O: Observer + ?Sized> Steps for EventSink<'_, O> {
    fn vertex_classified(&mut self, v: &ClassifiedVertex) {
        self.observer.on_event(AlgorithmEvent::VertexClassified(*v));
    }
    fn diagonal_added(&mut self, d: Diagonal) {
        self.observer.on_event(AlgorithmEvent::DiagonalAdded(d));
    }
    fn proceed(&mut self) -> bool {
        !self.cancel.load(Ordering::Acquire)
    }
}

/// Run `job` on the current thread and return its terminal state.
///
/// Event order: `Started`, then `VertexClassified` per vertex (index order),
/// then `DiagonalAdded` per chord (discovery order), then `Finished`. A failure
/// replaces the remainder with a single `Failed`. A job whose `cancel` flag is
/// already set emits only `Failed(Cancelled)`.
pub fn run_job(job: &Job, observer: &mut dyn Observer, cancel: &AtomicBool) -> JobState {
    if cancel.load(Ordering::Acquire) {
        observer.on_event(AlgorithmEvent::Failed(JobFailure::Cancelled));
        return JobState::Failed(JobFailure::Cancelled);
    }
    observer.on_event(AlgorithmEvent::Started);
    let outcome = {
        let mut sink = EventSink {
            observer: &mut *observer,
            cancel,
        };
        drive(job, &mut sink)
    };
    match outcome {
        Ok(()) => {
            observer.on_event(AlgorithmEvent::Finished);
            JobState::Completed
        }
        Err(e) => {
            let failure = JobFailure::from(e);
            observer.on_event(AlgorithmEvent::Failed(failure.clone()));
            JobState::Failed(failure)
        }
    }
}

fn drive<S: Steps>(job: &Job, sink: &mut S) -> Result<(), StepError> {
    if job.kind.classifies() {
        classify(&job.polygon, job.sweep, sink)?;
    }
    if job.kind.triangulates() {
        triangulate(&job.polygon, job.sweep, sink)?;
    }
    Ok(())
}
