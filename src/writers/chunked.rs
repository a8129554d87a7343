use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::models::RecArea;
use crate::utils::constants::DEFAULT_FILE_SIZE_LIMIT;

/// Writes the enriched recarea map as one JSON document split across
/// size-bounded files. Each chunk is a raw substring of the document; the
/// importing store concatenates the files in order before parsing.
pub struct ChunkedJsonWriter {
    size_limit: usize,
}

impl ChunkedJsonWriter {
    pub fn new() -> Self {
        Self {
            size_limit: DEFAULT_FILE_SIZE_LIMIT,
        }
    }

    pub fn with_size_limit(size_limit: usize) -> Self {
        Self { size_limit }
    }

    /// Serialize `recareas` keyed by id and write `recareas-{i}-of-{n}.json`
    /// files under `out_dir`. Returns the written paths in order.
    pub fn write(
        &self,
        recareas: &BTreeMap<String, RecArea>,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        if self.size_limit == 0 {
            return Err(PipelineError::Config(
                "chunk size limit must be positive".to_string(),
            ));
        }

        let output = serde_json::to_string(recareas)?;
        fs::create_dir_all(out_dir)?;

        let chunks = split_chunks(&output, self.size_limit);
        let total = chunks.len();
        let mut paths = Vec::with_capacity(total);

        for (index, chunk) in chunks.into_iter().enumerate() {
            let path = out_dir.join(format!("recareas-{}-of-{}.json", index + 1, total));
            fs::write(&path, chunk)?;
            paths.push(path);
        }

        info!(files = total, bytes = output.len(), "wrote output chunks");
        Ok(paths)
    }
}

impl Default for ChunkedJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split into `len / limit + 1` near-equal pieces, each of at most
/// `len / num_files + 1` bytes, shrunk where needed to keep UTF-8 character
/// boundaries intact.
fn split_chunks(output: &str, size_limit: usize) -> Vec<&str> {
    let num_files = output.len() / size_limit + 1;
    let target = output.len() / num_files + 1;

    let mut chunks = Vec::with_capacity(num_files);
    let mut start = 0;

    while start < output.len() {
        let mut end = (start + target).min(output.len());
        while end > start && !output.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // target smaller than one character; take the whole character
            end = (start + 1..=output.len())
                .find(|&i| output.is_char_boundary(i))
                .unwrap_or(output.len());
        }
        chunks.push(&output[start..end]);
        start = end;
    }

    chunks
}
