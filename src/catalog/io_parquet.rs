//! Parquet reading for catalog partitions.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value;

use crate::error::GalcatError;

use super::CatalogTable;

/// Read one persisted partition into a [`CatalogTable`].
///
/// A missing or unreadable file fails with
/// [`GalcatError::StorageUnavailable`]; the per-file row index starts at 0.
pub fn read_catalog(path: &Path) -> Result<CatalogTable, GalcatError> {
    let file = fs::File::open(path)
        .map_err(|source| storage_unavailable(path, source.to_string()))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|source| storage_unavailable(path, source.to_string()))?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|source| storage_unavailable(path, source.to_string()))?;

    let mut table = CatalogTable::new(columns);
    for batch_result in reader {
        let batch =
            batch_result.map_err(|source| storage_unavailable(path, source.to_string()))?;
        for row in 0..batch.num_rows() {
            let values = (0..batch.num_columns())
                .map(|column| cell_value(batch.column(column), row))
                .collect();
            table.push_row(values);
        }
    }

    Ok(table)
}

fn storage_unavailable(path: &Path, message: String) -> GalcatError {
    GalcatError::StorageUnavailable {
        path: path.to_path_buf(),
        message,
    }
}

/// Decode a single Arrow cell to a JSON value. Unsupported column types
/// degrade to their type name rather than failing the whole partition.
fn cell_value(column: &Arc<dyn Array>, row: usize) -> Value {
    if column.is_null(row) {
        return Value::Null;
    }

    match column.data_type() {
        DataType::Utf8 => column
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|array| Value::String(array.value(row).to_string()))
            .unwrap_or(Value::Null),
        DataType::LargeUtf8 => column
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|array| Value::String(array.value(row).to_string()))
            .unwrap_or(Value::Null),
        DataType::Int32 => column
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|array| Value::from(i64::from(array.value(row))))
            .unwrap_or(Value::Null),
        DataType::Int64 => column
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|array| Value::from(array.value(row)))
            .unwrap_or(Value::Null),
        DataType::Float32 => column
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|array| Value::from(f64::from(array.value(row))))
            .unwrap_or(Value::Null),
        DataType::Float64 => column
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|array| Value::from(array.value(row)))
            .unwrap_or(Value::Null),
        DataType::Boolean => column
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|array| Value::Bool(array.value(row)))
            .unwrap_or(Value::Null),
        other => Value::String(format!("{other:?}")),
    }
}
