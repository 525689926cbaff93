//! Generic dataset wrapper over an assembled catalog table.
//!
//! Provides indexing and iteration for a training pipeline; it does not
//! decode images, it only hands out their locations alongside label vectors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::CatalogTable;
use crate::error::GalcatError;

/// Identifier column in catalog tables.
pub const ID_COLUMN: &str = "id_str";

/// Image location column in catalog tables.
pub const FILE_LOC_COLUMN: &str = "file_loc";

/// Hook applied to each example's file location.
pub type Transform = Box<dyn Fn(String) -> String + Send + Sync>;

/// Hook applied to each example's label vector.
pub type TargetTransform = Box<dyn Fn(Vec<f64>) -> Vec<f64> + Send + Sync>;

/// One example: identifier, image location, and labels in label-column
/// order. Unlabelled catalogs carry all-zero label cells, which read back
/// as zeros here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub id: Option<String>,
    pub file_loc: Option<String>,
    pub labels: Vec<f64>,
}

/// Indexable view of `(table, label_columns, transform, target_transform)`.
pub struct CatalogDataset {
    table: CatalogTable,
    label_cols: Vec<String>,
    label_idx: Vec<usize>,
    id_idx: Option<usize>,
    file_loc_idx: Option<usize>,
    transform: Option<Transform>,
    target_transform: Option<TargetTransform>,
}

impl std::fmt::Debug for CatalogDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogDataset")
            .field("table", &self.table)
            .field("label_cols", &self.label_cols)
            .field("label_idx", &self.label_idx)
            .field("id_idx", &self.id_idx)
            .field("file_loc_idx", &self.file_loc_idx)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .field("target_transform", &self.target_transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl CatalogDataset {
    /// Wrap an assembled table. Every label column must be present in the
    /// table schema, even for unlabelled rows.
    pub fn new(table: CatalogTable, label_cols: Vec<String>) -> Result<Self, GalcatError> {
        let label_idx = label_cols
            .iter()
            .map(|column| {
                table.column_index(column).ok_or_else(|| {
                    GalcatError::invalid_argument(format!(
                        "label column '{column}' is not present in the catalog table"
                    ))
                })
            })
            .collect::<Result<Vec<usize>, GalcatError>>()?;

        let id_idx = table.column_index(ID_COLUMN);
        let file_loc_idx = table.column_index(FILE_LOC_COLUMN);

        Ok(CatalogDataset {
            table,
            label_cols,
            label_idx,
            id_idx,
            file_loc_idx,
            transform: None,
            target_transform: None,
        })
    }

    /// Apply `transform` to each example's file location.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Apply `target_transform` to each example's label vector.
    pub fn with_target_transform(mut self, target_transform: TargetTransform) -> Self {
        self.target_transform = Some(target_transform);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn label_cols(&self) -> &[String] {
        &self.label_cols
    }

    pub fn table(&self) -> &CatalogTable {
        &self.table
    }

    /// The example at `index`, with any configured hooks applied.
    pub fn get(&self, index: usize) -> Option<Example> {
        let row = self.table.rows().get(index)?;
        let values = row.values();

        let id = self
            .id_idx
            .and_then(|idx| values.get(idx))
            .and_then(cell_string);
        let mut file_loc = self
            .file_loc_idx
            .and_then(|idx| values.get(idx))
            .and_then(cell_string);
        if let Some(transform) = self.transform.as_ref() {
            file_loc = file_loc.map(|loc| transform(loc));
        }

        let mut labels: Vec<f64> = self
            .label_idx
            .iter()
            .map(|&idx| values.get(idx).and_then(Value::as_f64).unwrap_or(0.0))
            .collect();
        if let Some(target_transform) = self.target_transform.as_ref() {
            labels = target_transform(labels);
        }

        Some(Example {
            id,
            file_loc,
            labels,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Example> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }
}

fn cell_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labelled_table() -> (CatalogTable, Vec<String>) {
        let label_cols = vec!["bar-dr5_strong".to_string(), "bar-dr5_no".to_string()];
        let mut table = CatalogTable::new(vec![
            "id_str".to_string(),
            "file_loc".to_string(),
            "bar-dr5_strong".to_string(),
            "bar-dr5_no".to_string(),
        ]);
        table.push_row(vec![
            json!("J001"),
            json!("imgs/J001.jpg"),
            json!(3.0),
            json!(17.0),
        ]);
        table.push_row(vec![
            json!("J002"),
            json!("imgs/J002.jpg"),
            json!(0.0),
            json!(0.0),
        ]);
        (table, label_cols)
    }

    #[test]
    fn indexes_examples_with_labels_in_column_order() {
        let (table, label_cols) = labelled_table();
        let dataset = CatalogDataset::new(table, label_cols).expect("dataset");

        assert_eq!(dataset.len(), 2);
        let example = dataset.get(0).expect("example");
        assert_eq!(example.id.as_deref(), Some("J001"));
        assert_eq!(example.file_loc.as_deref(), Some("imgs/J001.jpg"));
        assert_eq!(example.labels, [3.0, 17.0]);
        assert!(dataset.get(2).is_none());
    }

    #[test]
    fn unlabelled_rows_read_as_zeros() {
        let (table, label_cols) = labelled_table();
        let dataset = CatalogDataset::new(table, label_cols).expect("dataset");

        let example = dataset.get(1).expect("example");
        assert_eq!(example.labels, [0.0, 0.0]);
    }

    #[test]
    fn missing_label_column_is_rejected() {
        let (table, _) = labelled_table();
        let err = CatalogDataset::new(table, vec!["bar-dr8_strong".to_string()])
            .expect_err("should fail");
        assert!(matches!(err, GalcatError::InvalidArgument { .. }));
    }

    #[test]
    fn hooks_apply_to_location_and_labels() {
        let (table, label_cols) = labelled_table();
        let dataset = CatalogDataset::new(table, label_cols)
            .expect("dataset")
            .with_transform(Box::new(|loc| format!("/mnt/cache/{loc}")))
            .with_target_transform(Box::new(|labels| {
                let total: f64 = labels.iter().sum();
                labels.iter().map(|count| count / total.max(1.0)).collect()
            }));

        let example = dataset.get(0).expect("example");
        assert_eq!(example.file_loc.as_deref(), Some("/mnt/cache/imgs/J001.jpg"));
        assert_eq!(example.labels, [0.15, 0.85]);
    }

    #[test]
    fn iterates_every_row() {
        let (table, label_cols) = labelled_table();
        let dataset = CatalogDataset::new(table, label_cols).expect("dataset");
        assert_eq!(dataset.iter().count(), 2);
    }
}
