use arrow::datatypes::Schema;
use arrow::ipc::reader::{FileReader, StreamReader};
use arrow::record_batch::{RecordBatch, RecordBatchReader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use std::fs::File;
use std::io::BufReader;

use super::{ColumnarFormat, QueryError};

/// a read-only columnar file. every scan opens its own handle, which is
/// released when the scan finishes or fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnarSource {
    path: String,
    format: ColumnarFormat,
}

impl ColumnarSource {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            format: ColumnarFormat::from_path(path),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// opens a batch reader over this source. the reader is guaranteed to
    /// carry each of `columns`; Parquet sources are projected down to them.
    pub fn open(&self, columns: &[&str]) -> Result<Box<dyn RecordBatchReader>, QueryError> {
        let file = File::open(&self.path).map_err(|e| QueryError::OpenError {
            path: self.path.clone(),
            source: e,
        })?;
        let reader: Box<dyn RecordBatchReader> = match self.format {
            ColumnarFormat::ArrowFile => {
                let reader = FileReader::try_new(file, None).map_err(|e| {
                    QueryError::ArrowReadError {
                        path: self.path.clone(),
                        source: e,
                    }
                })?;
                Box::new(reader)
            }
            ColumnarFormat::ArrowStream => {
                let reader = StreamReader::try_new(BufReader::new(file), None).map_err(|e| {
                    QueryError::ArrowReadError {
                        path: self.path.clone(),
                        source: e,
                    }
                })?;
                Box::new(reader)
            }
            ColumnarFormat::Parquet => {
                let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| {
                    QueryError::ParquetReadError {
                        path: self.path.clone(),
                        source: e,
                    }
                })?;
                let indices = columns
                    .iter()
                    .map(|c| self.column_index(builder.schema(), c))
                    .collect::<Result<Vec<_>, _>>()?;
                let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
                let reader = builder.with_projection(mask).build().map_err(|e| {
                    QueryError::ParquetReadError {
                        path: self.path.clone(),
                        source: e,
                    }
                })?;
                Box::new(reader)
            }
        };

        let schema = reader.schema();
        for column in columns {
            self.column_index(&schema, column)?;
        }
        Ok(reader)
    }

    /// runs `op` over every batch of this source, returning the number of rows seen.
    pub fn scan<F>(&self, columns: &[&str], mut op: F) -> Result<usize, QueryError>
    where
        F: FnMut(&RecordBatch) -> Result<(), QueryError>,
    {
        let reader = self.open(columns)?;
        let mut rows = 0;
        for batch_result in reader {
            let batch = batch_result.map_err(|e| QueryError::ArrowReadError {
                path: self.path.clone(),
                source: e,
            })?;
            rows += batch.num_rows();
            op(&batch)?;
        }
        log::debug!(
            "scanned {rows} rows of [{}] from {} file '{}'",
            columns.join(", "),
            self.format,
            self.path
        );
        Ok(rows)
    }

    fn column_index(&self, schema: &Schema, column: &str) -> Result<usize, QueryError> {
        schema
            .index_of(column)
            .map_err(|_| QueryError::ColumnNotFound {
                path: self.path.clone(),
                column: column.to_string(),
            })
    }
}
