//! The native indexing boundary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{ClientError, ClientResult};

/// Consumes parallel path/tag sequences and returns an opaque summary.
///
/// Callers guarantee `paths.len() == tags.len() >= 1` and that `tags[i]` belongs to
/// `paths[i]`. The call blocks until the capability returns.
pub trait Indexer: Send + Sync {
    fn process_files(&self, paths: &[PathBuf], tags: &[i32]) -> ClientResult<String>;
}

#[derive(serde::Serialize)]
struct IndexRequest<'a> {
    paths: Vec<&'a str>,
    tags: &'a [i32],
}

/// Runs an external program as the indexer.
///
/// The request goes to stdin as `{"paths": [...], "tags": [...]}`; trimmed stdout is
/// the summary. A non-zero exit is an indexer failure carrying stderr.
pub struct ExternalIndexer {
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalIndexer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Indexer for ExternalIndexer {
    fn process_files(&self, paths: &[PathBuf], tags: &[i32]) -> ClientResult<String> {
        let mut path_strs = Vec::with_capacity(paths.len());
        for p in paths {
            let s = p
                .to_str()
                .ok_or_else(|| ClientError::Indexer(format!("non-utf8 path {}", p.display())))?;
            path_strs.push(s);
        }
        let request = serde_json::to_vec(&IndexRequest {
            paths: path_strs,
            tags,
        })?;

        tracing::info!(program = %self.program.display(), files = paths.len(), "invoking indexer");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ClientError::Indexer(format!("spawn {}: {}", self.program.display(), e))
            })?;

        // An early exit breaks the pipe. A failed exit status wins over the write error.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&request),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| ClientError::Indexer(format!("wait for indexer: {}", e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClientError::Indexer(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }
        if let Err(e) = written {
            return Err(ClientError::Indexer(format!("write request: {}", e)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
#[path = "tests/indexer_tests.rs"]
mod tests;
