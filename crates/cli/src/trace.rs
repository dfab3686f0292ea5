use anyhow::{Context, Result};
use monotri::exec::{AlgorithmEvent, JobId, JobState};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable mirror of `AlgorithmEvent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Started,
    VertexClassified {
        index: usize,
        x: f64,
        y: f64,
        kind: String,
    },
    DiagonalAdded {
        lo: usize,
        hi: usize,
    },
    Finished,
    Failed {
        reason: String,
    },
}

impl From<&AlgorithmEvent> for EventRecord {
    fn from(e: &AlgorithmEvent) -> Self {
        match e {
            AlgorithmEvent::Started => EventRecord::Started,
            AlgorithmEvent::VertexClassified(v) => EventRecord::VertexClassified {
                index: v.index,
                x: v.point.x,
                y: v.point.y,
                kind: v.kind.name().to_string(),
            },
            AlgorithmEvent::DiagonalAdded(d) => EventRecord::DiagonalAdded {
                lo: d.lo(),
                hi: d.hi(),
            },
            AlgorithmEvent::Finished => EventRecord::Finished,
            AlgorithmEvent::Failed(f) => EventRecord::Failed {
                reason: f.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobTrace {
    pub id: JobId,
    pub vertices: usize,
    pub state: String,
    pub events: Vec<EventRecord>,
}

impl JobTrace {
    pub fn new(id: JobId, vertices: usize, state: &JobState, events: &[AlgorithmEvent]) -> Self {
        let state = match state {
            JobState::Pending => "pending".to_string(),
            JobState::Running => "running".to_string(),
            JobState::Completed => "completed".to_string(),
            JobState::Failed(f) => format!("failed: {f}"),
        };
        Self {
            id,
            vertices,
            state,
            events: events.iter().map(EventRecord::from).collect(),
        }
    }

    pub fn diagonal_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, EventRecord::DiagonalAdded { .. }))
            .count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceFile {
    pub version: String,
    pub code_rev: String,
    pub jobs: Vec<JobTrace>,
}

pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use monotri::exec::JobFailure;
    use monotri::monotone::Diagonal;
    use tempfile::tempdir;

    #[test]
    fn records_are_tagged_by_event() {
        let d = Diagonal::new(3, 1).unwrap();
        let rec = EventRecord::from(&AlgorithmEvent::DiagonalAdded(d));
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["event"], "diagonal_added");
        assert_eq!(v["lo"], 1);
        assert_eq!(v["hi"], 3);
    }

    #[test]
    fn failed_state_keeps_reason() {
        let t = JobTrace::new(
            4,
            2,
            &JobState::Failed(JobFailure::TooFewVertices { found: 2 }),
            &[],
        );
        assert!(t.state.starts_with("failed: "));
        assert_eq!(t.diagonal_count(), 0);
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/trace.json");
        let file = TraceFile {
            version: "0".into(),
            code_rev: code_rev(),
            jobs: vec![],
        };
        write_json(&path, &file).unwrap();
        let back: TraceFile = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back, file);
    }
}
