//! The merged catalog table and its assembly.
//!
//! Partition files parse in `io_parquet`; this module owns the in-memory
//! table, schema-checked concatenation, and the shuffle that strips any
//! meaning from on-disk row order.

pub mod io_parquet;

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GalcatError;
use crate::store::Partition;

/// One table row: an explicit index plus cell values parallel to the
/// table's columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub index: u64,
    values: Vec<Value>,
}

impl CatalogRow {
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An in-memory relational table of sky objects: identifier, label columns,
/// and file-location metadata.
///
/// Row order carries no semantic meaning once assembled; the caller owns the
/// returned table outright.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogTable {
    columns: Vec<String>,
    rows: Vec<CatalogRow>,
}

impl CatalogTable {
    pub fn new(columns: Vec<String>) -> Self {
        CatalogTable {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its index continues the current sequence.
    pub fn push_row(&mut self, values: Vec<Value>) {
        let index = self.rows.len() as u64;
        self.rows.push(CatalogRow { index, values });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell at `row` in the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let column = self.column_index(column)?;
        self.rows.get(row)?.values.get(column)
    }

    /// Stack tables row-wise. Every table must carry the same column set;
    /// cells are re-aligned to the first table's column order. A divergent
    /// schema fails with [`GalcatError::SchemaMismatch`] rather than
    /// producing a table with missing cells.
    pub fn concat(
        parts: impl IntoIterator<Item = (String, CatalogTable)>,
    ) -> Result<CatalogTable, GalcatError> {
        let mut parts = parts.into_iter();
        let Some((_, mut merged)) = parts.next() else {
            return Ok(CatalogTable::default());
        };

        for (source, part) in parts {
            let mapping = column_mapping(&merged.columns, &part)
                .ok_or_else(|| GalcatError::SchemaMismatch {
                    partition: source,
                    expected: merged.columns.clone(),
                    found: part.columns.clone(),
                })?;

            for row in part.rows {
                let values = mapping.iter().map(|&from| row.values[from].clone()).collect();
                merged.rows.push(CatalogRow {
                    index: row.index,
                    values,
                });
            }
        }

        Ok(merged)
    }

    /// Shuffle rows uniformly at random without replacement, then renumber
    /// the index contiguously from zero. Seedable for reproducibility.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            let mut rng = StdRng::seed_from_u64(seed);
            self.rows.shuffle(&mut rng);
        } else {
            let mut rng = rand::rng();
            self.rows.shuffle(&mut rng);
        }
        self.reset_index();
    }

    /// Renumber the row index 0..n with no gaps.
    pub fn reset_index(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.index = index as u64;
        }
    }
}

/// For each column of `base` (by order), the position of the same-named
/// column in `part`. `None` when the column sets differ at all.
fn column_mapping(base: &[String], part: &CatalogTable) -> Option<Vec<usize>> {
    if base.len() != part.columns.len() {
        return None;
    }
    base.iter()
        .map(|column| part.column_index(column))
        .collect()
}

/// Load the resolved partitions from `root`, concatenate, and shuffle.
///
/// Image paths are left exactly as stored: this dataset's images cannot be
/// downloaded or relocated, so no path adjustment or dtype coercion happens
/// here, unlike dataset variants whose assets move with the catalog.
pub fn assemble(
    root: &Path,
    partitions: &[Partition],
    seed: Option<u64>,
) -> Result<CatalogTable, GalcatError> {
    let mut parts = Vec::with_capacity(partitions.len());
    for partition in partitions {
        let path = partition.local_path(root);
        let table = io_parquet::read_catalog(&path)?;
        parts.push((partition.file_name.clone(), table));
    }

    let mut table = CatalogTable::concat(parts)?;
    table.shuffle(seed);
    Ok(table)
}
