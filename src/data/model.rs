use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

// ---------------------------------------------------------------------------
// ColumnData – the typed cells of one column
// ---------------------------------------------------------------------------

/// Cells of a single column, typed the way a dataframe would infer them.
///
/// Missing numeric cells are stored as `NaN`, missing labels as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fold `-0.0` into `0.0` and every NaN payload into one, so equal-looking
/// values hash the same.
fn canonical_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        (v + 0.0).to_bits()
    }
}

const PAIRWISE_BLOCK: usize = 128;

/// numpy's `pairwise_sum`: eight running accumulators inside a block,
/// halving recursion (on multiples of eight) above it.
fn pairwise_sum(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 8 {
        values.iter().fold(0.0, |acc, v| acc + v)
    } else if n <= PAIRWISE_BLOCK {
        let mut r = [0.0_f64; 8];
        r.copy_from_slice(&values[..8]);
        let whole = n - n % 8;
        for chunk in values[8..whole].chunks_exact(8) {
            for (acc, v) in r.iter_mut().zip(chunk) {
                *acc += v;
            }
        }
        let mut res = ((r[0] + r[1]) + (r[2] + r[3])) + ((r[4] + r[5]) + (r[6] + r[7]));
        for v in &values[whole..] {
            res += v;
        }
        res
    } else {
        let half = n / 2;
        let half = half - half % 8;
        pairwise_sum(&values[..half]) + pairwise_sum(&values[half..])
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Column {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(|s| Some(s.into())).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when no two cells hold the same value.  Two missing cells count
    /// as a duplicate.
    pub fn is_unique(&self) -> bool {
        match &self.data {
            ColumnData::Numeric(values) => {
                let mut seen = HashSet::with_capacity(values.len());
                values.iter().all(|v| seen.insert(canonical_bits(*v)))
            }
            ColumnData::Text(values) => {
                let mut seen = HashSet::with_capacity(values.len());
                values.iter().all(|v| seen.insert(v.as_deref()))
            }
        }
    }

    /// Mean of the non-missing values.  `None` for label columns and for
    /// columns without a single numeric value.
    ///
    /// Missing cells are summed as zero and left out of the count, with the
    /// same pairwise summation numpy uses.
    pub fn mean(&self) -> Option<f64> {
        let ColumnData::Numeric(values) = &self.data else {
            return None;
        };
        let n = values.iter().filter(|v| !v.is_nan()).count();
        if n == 0 {
            return None;
        }
        let filled: Vec<f64> = values
            .iter()
            .map(|v| if v.is_nan() { 0.0 } else { *v })
            .collect();
        Some(pairwise_sum(&filled) / n as f64)
    }

    /// Frequency of every distinct non-missing value, keyed by its label.
    /// Numeric cells are keyed by their shortest round-trip form.
    pub fn value_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        match &self.data {
            ColumnData::Numeric(values) => {
                for v in values.iter().filter(|v| !v.is_nan()) {
                    *counts.entry(format!("{}", v + 0.0)).or_insert(0) += 1;
                }
            }
            ColumnData::Text(values) => {
                for label in values.iter().flatten() {
                    *counts.entry(label.clone()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Number of cells equal to `label`; 0 when it never occurs.
    pub fn count_of(&self, label: &str) -> usize {
        match &self.data {
            ColumnData::Text(values) => values
                .iter()
                .filter(|v| v.as_deref() == Some(label))
                .count(),
            ColumnData::Numeric(_) => self.value_counts().get(label).copied().unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("column '{name}' has {found} rows but the table has {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Named columns in file order, all of the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(TableError::RaggedColumn {
                name: bad.name.clone(),
                expected: n_rows,
                found: bad.len(),
            });
        }
        Ok(Table { columns, n_rows })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// First column called `name`.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
