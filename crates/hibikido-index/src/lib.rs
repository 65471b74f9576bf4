//! Vector index (C2): an append-only store of unit vectors with a
//! monotonically assigned row id, supporting exact inner-product top-k
//! search.
//!
//! Unlike the teacher's `index` crate this does not offer a pluggable
//! storage backend or approximate (HNSW) search: spec.md §8 requires
//! deterministic rank-1 retrieval and a specific row-id tie-break that an
//! ANN index cannot guarantee, so the baseline here is exact brute force
//! over an in-memory `Vec`, persisted as a single file.

mod error;

pub use error::IndexError;

use std::cmp::Ordering;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::RwLock;

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};

/// On-disk representation of the index, compressed with zstd before being
/// written to the configured index file.
#[derive(Serialize, Deserialize)]
struct IndexFile {
    dim: usize,
    rows: Vec<Vec<f32>>,
}

/// A similarity hit: `(row, score)` with `score = dot(query, row)`.
pub type Hit = (usize, f32);

/// Append-only unit-vector index. Segments and presets share this one flat
/// store (spec.md §3's "row namespace"); `hibikido-index` has no opinion on
/// what a row means, that's `hibikido-store`'s job.
pub struct VectorIndex {
    dim: usize,
    rows: RwLock<Vec<Vec<f32>>>,
}

impl VectorIndex {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            rows: RwLock::new(Vec::new()),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Append `vector` and return its newly assigned row.
    pub fn add(&self, vector: Vec<f32>) -> Result<usize, IndexError> {
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }
        let mut rows = self.rows.write().map_err(|_| IndexError::Poisoned)?;
        rows.push(vector);
        Ok(rows.len() - 1)
    }

    /// Exact inner-product top-k search. Inputs are assumed unit-norm, so
    /// dot product *is* cosine similarity; no extra normalization pass is
    /// needed. Ties are broken by lower row id, as spec.md §4.2 requires.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Hit>, IndexError> {
        if query.len() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }
        let rows = self.rows.read().map_err(|_| IndexError::Poisoned)?;
        let mut scored: Vec<Hit> = rows
            .iter()
            .enumerate()
            .map(|(row, vector)| (row, dot(query, vector)))
            .collect();

        scored.sort_by(|(row_a, score_a), (row_b, score_b)| {
            match score_b.partial_cmp(score_a).unwrap_or(Ordering::Equal) {
                Ordering::Equal => row_a.cmp(row_b),
                other => other,
            }
        });
        scored.truncate(k);
        Ok(scored)
    }

    pub fn size(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Drops every row, resetting row assignment back to 0. Not part of the
    /// normal append-only contract; used exclusively by `rebuild_index`
    /// (spec.md §4.5), which re-embeds every document and reassigns rows
    /// from scratch.
    pub fn clear(&self) -> Result<(), IndexError> {
        self.rows.write().map_err(|_| IndexError::Poisoned)?.clear();
        Ok(())
    }

    /// Persist to `path`, overwriting atomically: write to a sibling `.tmp`
    /// file then rename over the destination, so a crash mid-write never
    /// leaves a corrupt index file behind.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let rows = self.rows.read().map_err(|_| IndexError::Poisoned)?.clone();
        let file = IndexFile {
            dim: self.dim,
            rows,
        };
        let encoded = encode_to_vec(&file, standard())?;
        let compressed = zstd::encode_all(encoded.as_slice(), 3)?;

        let tmp_path = path.with_extension("tmp");
        {
            let mut tmp = fs::File::create(&tmp_path)?;
            tmp.write_all(&compressed)?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Restore a previously saved index. The dimension on disk must match
    /// the caller's expectation (embedding dimensionality is wired once at
    /// startup, per spec.md §4.1).
    pub fn load(path: &Path, expected_dim: usize) -> Result<Self, IndexError> {
        let compressed = fs::read(path)?;
        let decoded = zstd::decode_all(compressed.as_slice())?;
        let (file, _): (IndexFile, usize) = decode_from_slice(&decoded, standard())?;
        if file.dim != expected_dim {
            return Err(IndexError::DimensionMismatch {
                expected: expected_dim,
                actual: file.dim,
            });
        }
        Ok(Self {
            dim: file.dim,
            rows: RwLock::new(file.rows),
        })
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
