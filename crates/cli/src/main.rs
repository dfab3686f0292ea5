use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use monotri::exec::{
    AlgorithmEvent, GeometryWorker, Job, JobKind, JobState, Observer, Recorder, SubmitError, WorkerCfg,
};
use monotri::monotone::{SweepCfg, SweepOrder};
use monotri::sample::{draw_y_monotone, MonotoneCfg, ReplayToken};
use monotri::shape::extract_polygons;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod scene;
mod trace;

use scene::Scene;
use trace::{JobTrace, TraceFile};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Headless driver for monotone polygon triangulation")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Classify and/or triangulate every polygon of a scene file
    Run(RunArgs),
    /// Write a random y-monotone polygon as a scene file
    Sample(SampleArgs),
    /// Print version and build info as JSON
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Classify,
    Triangulate,
    Both,
}

impl From<KindArg> for JobKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Classify => JobKind::Classify,
            KindArg::Triangulate => JobKind::Triangulate,
            KindArg::Both => JobKind::ClassifyAndTriangulate,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SweepArg {
    /// Horizontal sweep line, y-monotone input
    Y,
    /// Vertical sweep line, x-monotone input
    X,
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, value_enum, default_value_t = KindArg::Both)]
    kind: KindArg,
    #[arg(long, value_enum, default_value_t = SweepArg::Y)]
    sweep: SweepArg,
    /// Trace output; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
    /// Reverse clockwise polygons before submission
    #[arg(long)]
    ccw: bool,
    /// Bound on queued jobs (unbounded when omitted)
    #[arg(long)]
    queue: Option<usize>,
}

#[derive(Args, Clone, Debug)]
struct SampleArgs {
    #[arg(long, default_value_t = 16)]
    vertices: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    #[arg(long, default_value_t = 4.0)]
    half_width: f64,
    /// Scene output; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run(args) => {
            let out = args.out.clone();
            let file = run(&args)?;
            emit(out, &file)
        }
        Action::Sample(args) => {
            let out = args.out.clone();
            let scene = sample(&args);
            emit(out, &scene)
        }
        Action::Report => report(),
    }
}

fn emit<T: serde::Serialize>(out: Option<PathBuf>, value: &T) -> Result<()> {
    match out {
        Some(path) => {
            trace::write_json(&path, value)?;
            tracing::info!(out = %path.display(), "written");
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Logs each event at debug level and records it.
fn logging_observer(polygon: usize, mut rec: Recorder) -> impl Observer + 'static {
    move |e: AlgorithmEvent| {
        tracing::debug!(polygon, event = ?e, "event");
        rec.on_event(e);
    }
}

fn run(args: &RunArgs) -> Result<TraceFile> {
    tracing::info!(input = %args.input.display(), kind = ?args.kind, sweep = ?args.sweep, "run");
    let scene = scene::read_scene(&args.input)?;
    let polygons = extract_polygons(&scene.to_shapes());
    if polygons.is_empty() {
        bail!("{} contains no polygons", args.input.display());
    }

    let sweep = SweepCfg {
        order: match args.sweep {
            SweepArg::Y => SweepOrder::YThenX,
            SweepArg::X => SweepOrder::XThenY,
        },
    };
    let worker = GeometryWorker::spawn(WorkerCfg {
        queue_capacity: args.queue,
        ..WorkerCfg::default()
    })
    .context("starting geometry worker")?;

    let mut submitted: Vec<(monotri::exec::JobHandle, _, _)> = Vec::with_capacity(polygons.len());
    // Index of the oldest handle not yet waited on.
    let mut drained = 0;
    for (k, poly) in polygons.into_iter().enumerate() {
        let poly = if args.ccw { poly.to_ccw() } else { poly };
        let n = poly.len();
        let rec = Recorder::new();
        let job = Job::new(poly).with_kind(args.kind.into()).with_sweep(sweep);
        let handle = loop {
            match worker.submit(job.clone(), logging_observer(k, rec.clone())) {
                Err(SubmitError::QueueFull) => match submitted.get(drained) {
                    Some((oldest, _, _)) => {
                        tracing::debug!(polygon = k, waiting_on = oldest.id(), "queue full");
                        oldest.wait();
                        drained += 1;
                    }
                    // Everything submitted has finished; the worker is between tasks.
                    None => std::thread::yield_now(),
                },
                res => break res.with_context(|| format!("submitting polygon {k}"))?,
            }
        };
        submitted.push((handle, n, rec));
    }

    let jobs: Vec<JobTrace> = submitted
        .into_iter()
        .map(|(handle, n, rec)| {
            let state = handle.wait();
            match &state {
                JobState::Failed(f) => tracing::warn!(id = handle.id(), reason = %f, "job failed"),
                _ => tracing::info!(id = handle.id(), vertices = n, "job completed"),
            }
            JobTrace::new(handle.id(), n, &state, &rec.events())
        })
        .collect();
    worker.shutdown();

    Ok(TraceFile {
        version: monotri::VERSION.to_string(),
        code_rev: trace::code_rev(),
        jobs,
    })
}

fn sample(args: &SampleArgs) -> Scene {
    tracing::info!(vertices = args.vertices, seed = args.seed, index = args.index, "sample");
    let cfg = MonotoneCfg {
        vertices: args.vertices,
        half_width: args.half_width,
        ..MonotoneCfg::default()
    };
    let poly = draw_y_monotone(
        cfg,
        ReplayToken {
            seed: args.seed,
            index: args.index,
        },
    );
    Scene::from_polygons([&poly])
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "version": monotri::VERSION,
        "code_rev": trace::code_rev(),
        "worker": { "thread_name": WorkerCfg::default().thread_name },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
