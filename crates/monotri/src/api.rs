//! Curated API for callers (UNSTABLE).
//!
//! Breaking changes are allowed; prefer these re-exports over deep paths so
//! call sites stay stable while modules move.

// Kernel
pub use crate::kernel::{
    aabb, cmp_xy, cmp_yx, orient2d, orient2d_exact, orient2d_fast, orientation_exact,
    KernelError, Orientation, Point, Polygon, Rect, Segment,
};
// Classification and triangulation
pub use crate::monotone::{
    classify_vertices, triangles, triangulate_monotone, type_counts, ClassifiedVertex, Diagonal,
    StepError, SweepCfg, SweepOrder, Triangle, VertexType,
};
// Execution
pub use crate::exec::{
    run_job, AlgorithmEvent, GeometryWorker, Job, JobFailure, JobHandle, JobId, JobKind,
    JobState, Observer, Recorder, SubmitError, WorkerCfg,
};
// Shapes and sampling
pub use crate::sample::{
    draw_x_monotone, draw_y_monotone, MonotoneCfg, ReplayToken as MonotoneReplay,
};
pub use crate::shape::{extract_polygons, scene_bounds, Shape};
