//! Events, job states and observers.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::monotone::{ClassifiedVertex, Diagonal, StepError};

/// Sequential job identifier, unique per worker.
pub type JobId = u64;

/// One step of a job, delivered in algorithm order.
#[derive(Clone, Debug, PartialEq)]
pub enum AlgorithmEvent {
    Started,
    VertexClassified(ClassifiedVertex),
    DiagonalAdded(Diagonal),
    Finished,
    Failed(JobFailure),
}

impl AlgorithmEvent {
    /// `Finished` or `Failed`: nothing follows for this job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AlgorithmEvent::Finished | AlgorithmEvent::Failed(_))
    }
}

/// Why a job stopped before `Finished`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobFailure {
    TooFewVertices { found: usize },
    DiagonalCount { expected: usize, found: usize },
    StackUnderflow { vertex: usize },
    Cancelled,
    /// A panic escaped the job; carries the panic message when it was a string.
    Panicked(String),
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobFailure::TooFewVertices { found } => {
                write!(f, "precondition: polygon has {found} vertices, needs 3")
            }
            JobFailure::DiagonalCount { expected, found } => write!(
                f,
                "precondition: {found} diagonals instead of {expected}, input is not monotone"
            ),
            JobFailure::StackUnderflow { vertex } => {
                write!(f, "internal: stack underflow at vertex {vertex}")
            }
            JobFailure::Cancelled => write!(f, "cancelled"),
            JobFailure::Panicked(msg) => write!(f, "panicked: {msg}"),
        }
    }
}

impl std::error::Error for JobFailure {}

impl From<StepError> for JobFailure {
    fn from(e: StepError) -> Self {
        match e {
            StepError::TooFewVertices { found } => JobFailure::TooFewVertices { found },
            StepError::DiagonalCount { expected, found } => {
                JobFailure::DiagonalCount { expected, found }
            }
            StepError::StackUnderflow { vertex } => JobFailure::StackUnderflow { vertex },
            StepError::Interrupted => JobFailure::Cancelled,
        }
    }
}

/// `Pending → Running → {Completed | Failed}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed(JobFailure),
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed(_))
    }
}

/// What a job runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JobKind {
    Classify,
    Triangulate,
    #[default]
    ClassifyAndTriangulate,
}

impl JobKind {
    pub fn classifies(self) -> bool {
        matches!(self, JobKind::Classify | JobKind::ClassifyAndTriangulate)
    }
    pub fn triangulates(self) -> bool {
        matches!(self, JobKind::Triangulate | JobKind::ClassifyAndTriangulate)
    }
}

/// Receives every event of a job, synchronously on the thread running it.
///
/// Any `FnMut(AlgorithmEvent) + Send` closure is an observer.
pub trait Observer: Send {
    fn on_event(&mut self, event: AlgorithmEvent);
}

impl<F> Observer for F
where
    F: FnMut(AlgorithmEvent) + Send,
{
    fn on_event(&mut self, event: AlgorithmEvent) {
        self(event)
    }
}

/// Shared event log. Clones append to the same list, so one clone can go to
/// the worker while the caller keeps another for inspection.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<AlgorithmEvent>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events so far.
    pub fn events(&self) -> Vec<AlgorithmEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn diagonals(&self) -> Vec<Diagonal> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                AlgorithmEvent::DiagonalAdded(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn vertices(&self) -> Vec<ClassifiedVertex> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                AlgorithmEvent::VertexClassified(v) => Some(v),
                _ => None,
            })
            .collect()
    }
}

impl Observer for Recorder {
    fn on_event(&mut self, event: AlgorithmEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
