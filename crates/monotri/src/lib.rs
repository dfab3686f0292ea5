//! Geometry kernel and monotone-polygon triangulation.
//!
//! Layers
//! - `kernel`: points, segments, polygons, fast and exact orientation predicates.
//! - `monotone`: vertex classification and the two-chain triangulator.
//! - `exec`: jobs, the ordered `AlgorithmEvent` stream and the geometry worker.
//! - `shape`: closed set of drawable shapes feeding polygons into jobs.
//! - `sample`: reproducible random monotone polygons.
//!
//! API Policy
//! - There is no stable public API yet; `api` and `prelude` are the curated
//!   surfaces for callers (CLI, benches, examples).

pub mod api;
pub mod exec;
pub mod kernel;
pub mod monotone;
pub mod sample;
pub mod shape;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use kernel::{Point, Polygon};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::exec::{
        run_job, AlgorithmEvent, GeometryWorker, Job, JobKind, JobState, Observer, Recorder,
        WorkerCfg,
    };
    pub use crate::kernel::{orient2d, orient2d_exact, Point, Polygon, Segment};
    pub use crate::monotone::{Diagonal, SweepCfg, SweepOrder, VertexType};
    pub use crate::sample::{draw_y_monotone, MonotoneCfg, ReplayToken};
}
