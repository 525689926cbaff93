#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Label columns used by the small fixtures.
pub const LABEL_COLS: [&str; 2] = [
    "smooth-or-featured-dr8_smooth",
    "smooth-or-featured-dr8_featured-or-disk",
];

fn write_batch(path: &Path, schema: Arc<Schema>, arrays: Vec<ArrayRef>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    let batch = RecordBatch::try_new(schema.clone(), arrays).expect("record batch");
    let file = fs::File::create(path).expect("create parquet file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("arrow writer");
    writer.write(&batch).expect("write batch");
    writer.close().expect("close writer");
}

fn id_and_loc_arrays(ids: &[&str]) -> (ArrayRef, ArrayRef) {
    let file_locs: Vec<String> = ids.iter().map(|id| format!("imgs/{id}.jpg")).collect();
    (
        Arc::new(StringArray::from(ids.to_vec())) as ArrayRef,
        Arc::new(StringArray::from(file_locs)) as ArrayRef,
    )
}

/// Write a partition with columns `id_str`, `file_loc`, and [`LABEL_COLS`];
/// label cells default to zero (the unlabelled convention).
pub fn write_partition(path: &Path, ids: &[&str], labels: Option<&[[f64; 2]]>) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id_str", DataType::Utf8, false),
        Field::new("file_loc", DataType::Utf8, false),
        Field::new(LABEL_COLS[0], DataType::Float64, false),
        Field::new(LABEL_COLS[1], DataType::Float64, false),
    ]));

    let (id_array, loc_array) = id_and_loc_arrays(ids);
    let (first, second): (Vec<f64>, Vec<f64>) = match labels {
        Some(labels) => (
            labels.iter().map(|pair| pair[0]).collect(),
            labels.iter().map(|pair| pair[1]).collect(),
        ),
        None => (vec![0.0; ids.len()], vec![0.0; ids.len()]),
    };

    write_batch(
        path,
        schema,
        vec![
            id_array,
            loc_array,
            Arc::new(Float64Array::from(first)),
            Arc::new(Float64Array::from(second)),
        ],
    );
}

/// Write a partition missing the second label column, to provoke a schema
/// mismatch against [`write_partition`] output.
pub fn write_partition_missing_label(path: &Path, ids: &[&str]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id_str", DataType::Utf8, false),
        Field::new("file_loc", DataType::Utf8, false),
        Field::new(LABEL_COLS[0], DataType::Float64, false),
    ]));

    let (id_array, loc_array) = id_and_loc_arrays(ids);
    write_batch(
        path,
        schema,
        vec![
            id_array,
            loc_array,
            Arc::new(Float64Array::from(vec![0.0; ids.len()])),
        ],
    );
}

/// Write a partition carrying the complete all-campaigns label schema (all
/// zeros) plus `id_str` and `file_loc`.
pub fn write_partition_full_schema(path: &Path, ids: &[&str]) {
    let label_cols = galcat::schema::all_campaigns_label_cols();

    let mut fields = vec![
        Field::new("id_str", DataType::Utf8, false),
        Field::new("file_loc", DataType::Utf8, false),
    ];
    for column in &label_cols {
        fields.push(Field::new(column, DataType::Float64, false));
    }
    let schema = Arc::new(Schema::new(fields));

    let (id_array, loc_array) = id_and_loc_arrays(ids);
    let mut arrays = vec![id_array, loc_array];
    for _ in &label_cols {
        arrays.push(Arc::new(Float64Array::from(vec![0.0; ids.len()])) as ArrayRef);
    }

    write_batch(path, schema, arrays);
}
