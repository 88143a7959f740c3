use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, AsArray};
use arrow::datatypes::{DataType, Field, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Column, ColumnData, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – Parquet file, one table column per Arrow column
/// * anything else       – comma-separated text with a header row
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        _ => load_csv(path)?,
    };
    log::debug!(
        "loaded {} rows x {} columns from {}",
        table.n_rows(),
        table.n_columns(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Cells read as missing, same set a dataframe reader uses by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// CSV layout: header row with column names, one record per row.
/// A column is numeric when every non-missing cell parses as a float,
/// otherwise it holds labels.
///
/// Records shorter than the header are padded with missing cells; longer
/// ones are an error.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("No columns to parse from file");
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() > headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, saw {}",
                headers.len(),
                record.len()
            );
        }
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| infer_column(name, raw))
        .collect();
    Ok(Table::new(columns)?)
}

fn infer_column(name: String, raw: Vec<String>) -> Column {
    let numeric: Option<Vec<f64>> = raw
        .iter()
        .map(|cell| {
            if is_missing(cell) {
                Some(f64::NAN)
            } else {
                cell.trim().parse::<f64>().ok()
            }
        })
        .collect();

    let data = match numeric {
        Some(values) => ColumnData::Numeric(values),
        None => ColumnData::Text(
            raw.into_iter()
                .map(|cell| (!is_missing(&cell)).then_some(cell))
                .collect(),
        ),
    };
    Column { name, data }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Numeric Arrow columns are widened to `f64`; `Utf8`, `LargeUtf8` and
/// dictionary-encoded strings (Pandas categoricals) become label columns.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let schema = builder.schema().clone();
    let reader = builder.build().context("building parquet reader")?;

    let mut columns = schema
        .fields()
        .iter()
        .map(|field| empty_column(field))
        .collect::<Result<Vec<_>>>()?;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (column, array) in columns.iter_mut().zip(batch.columns()) {
            append_array(column, array)
                .with_context(|| format!("reading column '{}'", column.name))?;
        }
    }

    Ok(Table::new(columns)?)
}

fn empty_column(field: &Field) -> Result<Column> {
    let data = match field.data_type() {
        t if t.is_numeric() => ColumnData::Numeric(Vec::new()),
        DataType::Utf8 | DataType::LargeUtf8 => ColumnData::Text(Vec::new()),
        DataType::Dictionary(_, value)
            if matches!(value.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            ColumnData::Text(Vec::new())
        }
        other => bail!("Column '{}' has unsupported type {other:?}", field.name()),
    };
    Ok(Column {
        name: field.name().clone(),
        data,
    })
}

fn append_array(column: &mut Column, array: &ArrayRef) -> Result<()> {
    match &mut column.data {
        ColumnData::Numeric(values) => {
            let floats = arrow::compute::cast(array, &DataType::Float64)?;
            values.extend(
                floats
                    .as_primitive::<Float64Type>()
                    .iter()
                    .map(|v| v.unwrap_or(f64::NAN)),
            );
        }
        ColumnData::Text(values) => {
            let strings = arrow::compute::cast(array, &DataType::Utf8)?;
            values.extend(
                strings
                    .as_string::<i32>()
                    .iter()
                    .map(|v| v.map(str::to_string)),
            );
        }
    }
    Ok(())
}
