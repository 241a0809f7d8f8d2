use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::trace::trace::GenerationEvent;

/// Append-only JSONL sink for generation events.
///
/// Failures never reach the caller: an unopenable path disables the sink and
/// write errors are reported through `tracing` and dropped.
pub struct TraceLogger {
    sink: Option<(PathBuf, Mutex<File>)>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some((path.to_path_buf(), Mutex::new(file))),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open trace file, tracing disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log(&self, event: &GenerationEvent) {
        let Some((path, file)) = &self.sink else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(stage = ?event.stage, error = %e, "could not serialize generation event");
                return;
            }
        };

        let Ok(mut file) = file.lock() else {
            warn!(path = %path.display(), "trace file lock poisoned, event dropped");
            return;
        };

        if let Err(e) = writeln!(file, "{line}") {
            warn!(path = %path.display(), error = %e, "could not append generation event");
        }
    }
}
