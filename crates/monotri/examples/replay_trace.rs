//! Replay the event stream of one sampled monotone polygon.
//!
//! Usage:
//!   cargo run -p monotri --example replay_trace -- [vertices] [seed]
//!
//! Runs the job on the geometry worker and prints each event as it arrives,
//! the way a visualizer would animate classification colors and diagonals.

use monotri::exec::{AlgorithmEvent, GeometryWorker, Job, WorkerCfg};
use monotri::sample::{draw_y_monotone, MonotoneCfg, ReplayToken};

fn main() {
    let mut args = std::env::args().skip(1);
    let vertices = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let cfg = MonotoneCfg {
        vertices,
        ..MonotoneCfg::default()
    };
    let poly = draw_y_monotone(cfg, ReplayToken { seed, index: 0 });
    for (i, v) in poly.vs.iter().enumerate() {
        println!("v{i}: ({:.3}, {:.3})", v.x, v.y);
    }

    let worker = match GeometryWorker::spawn(WorkerCfg::default()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("cannot start worker: {e}");
            return;
        }
    };
    let printer = |e: AlgorithmEvent| match e {
        AlgorithmEvent::Started => println!("started"),
        AlgorithmEvent::VertexClassified(v) => println!("  v{} is {}", v.index, v.kind),
        AlgorithmEvent::DiagonalAdded(d) => println!("  diagonal {d}"),
        AlgorithmEvent::Finished => println!("finished"),
        AlgorithmEvent::Failed(f) => println!("failed: {f}"),
    };
    match worker.submit(Job::new(poly), printer) {
        Ok(h) => {
            let state = h.wait();
            println!("job {} -> {state:?}", h.id());
        }
        Err(e) => eprintln!("submit failed: {e}"),
    }
    worker.shutdown();
}
