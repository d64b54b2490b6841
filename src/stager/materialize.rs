use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::UpdateBatch;
use crate::error::{ClientError, ClientResult};
use crate::indexer::Indexer;

static STAGE_SEQ: AtomicU64 = AtomicU64::new(0);

/// File name for a staged copy: time, process and a process-wide sequence number
/// keep concurrent batches apart.
pub(super) fn staged_name(display_name: &str) -> String {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let seq = STAGE_SEQ.fetch_add(1, Ordering::Relaxed);
    let safe: String = display_name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c == '\0' { '_' } else { c })
        .collect();
    format!("temp_{}_{}_{}_{}", millis, std::process::id(), seq, safe)
}

/// Stream-copies `source` into a new file under `staging_dir`.
pub(super) fn materialize(
    source: &Path,
    display_name: &str,
    staging_dir: &Path,
) -> ClientResult<PathBuf> {
    fs::create_dir_all(staging_dir).map_err(|e| {
        ClientError::Io(format!("create staging dir {}: {}", staging_dir.display(), e))
    })?;
    let mut input = fs::File::open(source)
        .map_err(|e| ClientError::Io(format!("open {}: {}", source.display(), e)))?;

    let dest = staging_dir.join(staged_name(display_name));
    let mut output = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&dest)
        .map_err(|e| ClientError::Io(format!("create {}: {}", dest.display(), e)))?;

    let copied = io::copy(&mut input, &mut output)
        .map_err(|e| ClientError::Io(format!("copy {}: {}", source.display(), e)))?;
    output
        .sync_all()
        .map_err(|e| ClientError::Io(format!("sync {}: {}", dest.display(), e)))?;
    tracing::debug!(dest = %dest.display(), bytes = copied, "materialized");
    Ok(dest)
}

/// Worker side of a batch submit: materialize in order, then one indexer call.
///
/// Staged copies are removed once the indexer returns, whatever the outcome.
pub fn run_batch(
    batch: &UpdateBatch,
    staging_dir: &Path,
    indexer: &dyn Indexer,
) -> ClientResult<String> {
    let mut paths = Vec::with_capacity(batch.files.len());
    let mut tags = Vec::with_capacity(batch.files.len());

    for sel in &batch.files {
        match materialize(sel.source(), sel.display_name(), staging_dir) {
            Ok(path) => {
                paths.push(path);
                tags.push(sel.tag());
            }
            Err(err) => {
                remove_staged(&paths);
                return Err(err);
            }
        }
    }
    debug_assert_eq!(paths.len(), tags.len());

    let result = indexer.process_files(&paths, &tags);
    remove_staged(&paths);
    result
}

fn remove_staged(paths: &[PathBuf]) {
    for p in paths {
        if let Err(err) = fs::remove_file(p) {
            tracing::warn!(path = %p.display(), error = %err, "failed to remove staged file");
        }
    }
}
