//! scalar aggregations over a [`ColumnarSource`], following SQL null handling:
//! nulls never count as distinct values, never contribute to an average, and
//! never satisfy a range predicate, though they still count as rows.
use arrow::array::{Array, AsArray, Float64Array, StringArray};
use arrow::compute::{cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ColumnarSource, MeanAccumulator, QueryError};

/// rows of a column that fall within an inclusive range, alongside all rows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCount {
    pub within: usize,
    pub total: usize,
}

/// number of distinct non-null values in `column`, compared as strings.
pub fn count_distinct(source: &ColumnarSource, column: &str) -> Result<usize, QueryError> {
    let mut distinct: HashSet<String> = HashSet::new();
    source.scan(&[column], |batch| {
        let values = utf8_column(source, batch, column)?;
        for value in values.iter().flatten() {
            if !distinct.contains(value) {
                distinct.insert(value.to_string());
            }
        }
        Ok(())
    })?;
    Ok(distinct.len())
}

/// counts rows where `lower <= column <= upper`, along with the total row count.
pub fn count_within(
    source: &ColumnarSource,
    column: &str,
    lower: f64,
    upper: f64,
) -> Result<WindowCount, QueryError> {
    let mut within = 0;
    let total = source.scan(&[column], |batch| {
        let values = f64_column(source, batch, column)?;
        within += values
            .iter()
            .flatten()
            .filter(|v| lower <= *v && *v <= upper)
            .count();
        Ok(())
    })?;
    Ok(WindowCount { within, total })
}

/// averages `value_column` separately for each entry of `categories`, matched
/// against `category_column`. rows in any other category are skipped. the result
/// is aligned with `categories`, with None where a category had no values.
pub fn mean_by_category(
    source: &ColumnarSource,
    value_column: &str,
    category_column: &str,
    categories: &[&str],
) -> Result<Vec<Option<f64>>, QueryError> {
    let mut accumulators = vec![MeanAccumulator::default(); categories.len()];
    source.scan(&[category_column, value_column], |batch| {
        let labels = utf8_column(source, batch, category_column)?;
        let values = f64_column(source, batch, value_column)?;
        for (label, value) in labels.iter().zip(values.iter()) {
            if let (Some(label), Some(value)) = (label, value) {
                if let Some(idx) = categories.iter().position(|c| *c == label) {
                    accumulators[idx].add(value);
                }
            }
        }
        Ok(())
    })?;
    Ok(accumulators.iter().map(MeanAccumulator::mean).collect())
}

/// casts are strict: a value that cannot be converted is an error, not a null.
fn strict_cast_options() -> CastOptions<'static> {
    CastOptions {
        safe: false,
        ..Default::default()
    }
}

fn column_array<'a>(
    source: &ColumnarSource,
    batch: &'a RecordBatch,
    column: &str,
) -> Result<&'a dyn Array, QueryError> {
    batch
        .column_by_name(column)
        .map(|a| a.as_ref())
        .ok_or_else(|| QueryError::ColumnNotFound {
            path: source.path().to_string(),
            column: column.to_string(),
        })
}

fn utf8_column(
    source: &ColumnarSource,
    batch: &RecordBatch,
    column: &str,
) -> Result<StringArray, QueryError> {
    let array = column_array(source, batch, column)?;
    let cast_array = cast_with_options(array, &DataType::Utf8, &strict_cast_options()).map_err(
        |e| QueryError::ColumnTypeError {
            path: source.path().to_string(),
            column: column.to_string(),
            expected: "utf8",
            source: e,
        },
    )?;
    Ok(cast_array.as_string::<i32>().clone())
}

fn f64_column(
    source: &ColumnarSource,
    batch: &RecordBatch,
    column: &str,
) -> Result<Float64Array, QueryError> {
    let array = column_array(source, batch, column)?;
    let cast_array = cast_with_options(array, &DataType::Float64, &strict_cast_options())
        .map_err(|e| QueryError::ColumnTypeError {
            path: source.path().to_string(),
            column: column.to_string(),
            expected: "float64",
            source: e,
        })?;
    Ok(cast_array.as_primitive::<Float64Type>().clone())
}
