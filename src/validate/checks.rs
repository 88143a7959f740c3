use thiserror::Error;

use super::expected;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Check results
// ---------------------------------------------------------------------------

/// A violated expectation.  The message names what is off and hints at the
/// likely mistake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    #[error("⚠️ There are not exactly 3 columns, did you forget to exclude the index column?")]
    ColumnCount,
    #[error("⚠️ Columns are not the three columns we expect. Did you forget to exclude the index column?")]
    ColumnNames,
    #[error("⚠️ There are not the correct number of rows, did you save the filtered dataset?")]
    RowCount,
    #[error("⚠️ The \"HIP\" column is not unique, did you duplicate any rows somewhere?")]
    DuplicateHip,
    #[error("⚠️ The mean of the \"d_ly\" column looks off, did you compute the distance correctly?")]
    DistanceMean,
    #[error("⚠️ The number of unique values in the \"sp_class\" column is not 8, did you forget to include the \"Other\" class?")]
    ClassCardinality,
    #[error("⚠️ The number of stars in each spectral class is not correct")]
    ClassCounts,
}

/// A precondition a check needs before it can compare anything.  Reported
/// separately from [`Failure`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Abort {
    #[error("⚠️ The \"sp_class\" column does not contain an \"Other\" class, did you forget to include it?")]
    MissingOtherClass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    Pass,
    Fail(Failure),
    Aborted(Abort),
}

impl CheckResult {
    fn require(ok: bool, failure: Failure) -> Self {
        if ok {
            CheckResult::Pass
        } else {
            CheckResult::Fail(failure)
        }
    }
}

// ---------------------------------------------------------------------------
// The checks, in the order they run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Columns,
    RowCount,
    UniqueHip,
    DistanceMean,
    ClassCardinality,
    ClassCounts,
}

impl Check {
    pub const ALL: [Check; 6] = [
        Check::Columns,
        Check::RowCount,
        Check::UniqueHip,
        Check::DistanceMean,
        Check::ClassCardinality,
        Check::ClassCounts,
    ];

    /// 1-based position in [`Check::ALL`].
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Confirmation printed once the check passes.
    pub fn confirmation(self) -> &'static str {
        match self {
            Check::Columns => "Columns included look ok",
            Check::RowCount => "Number of rows look ok",
            Check::UniqueHip => "\"HIP\" column is unique",
            Check::DistanceMean => "\"d_ly\" column has a mean between 1100 and 1200",
            Check::ClassCardinality => "\"sp_class\" column has a value count of 8",
            Check::ClassCounts => "\"sp_class\" column has the right counts",
        }
    }

    pub fn evaluate(self, table: &Table) -> CheckResult {
        match self {
            Check::Columns => check_columns(table),
            Check::RowCount => {
                CheckResult::require(table.n_rows() == expected::ROWS, Failure::RowCount)
            }
            Check::UniqueHip => CheckResult::require(
                table.column(expected::HIP).is_some_and(|c| c.is_unique()),
                Failure::DuplicateHip,
            ),
            Check::DistanceMean => CheckResult::require(
                table
                    .column(expected::DISTANCE)
                    .and_then(|c| c.mean())
                    .is_some_and(|mean| expected::MEAN_DISTANCE.contains(&mean)),
                Failure::DistanceMean,
            ),
            Check::ClassCardinality => CheckResult::require(
                table
                    .column(expected::SPECTRAL_CLASS)
                    .is_some_and(|c| c.value_counts().len() == expected::DISTINCT_CLASSES),
                Failure::ClassCardinality,
            ),
            Check::ClassCounts => check_class_counts(table),
        }
    }
}

fn check_columns(table: &Table) -> CheckResult {
    if table.n_columns() != expected::COLUMNS.len() {
        return CheckResult::Fail(Failure::ColumnCount);
    }
    CheckResult::require(
        table.column_names() == expected::COLUMNS,
        Failure::ColumnNames,
    )
}

fn check_class_counts(table: &Table) -> CheckResult {
    let counts = table
        .column(expected::SPECTRAL_CLASS)
        .map(|c| c.value_counts())
        .unwrap_or_default();

    let Some(&other) = expected::OTHER_LABELS
        .iter()
        .find(|label| counts.contains_key(**label))
    else {
        return CheckResult::Aborted(Abort::MissingOtherClass);
    };
    log::debug!("catch-all class spelled {other:?}");

    let count = |label: &str| counts.get(label).copied().unwrap_or(0);
    CheckResult::require(
        count("A") == expected::CLASS_A
            && count("B") == expected::CLASS_B
            && count(other) == expected::CLASS_OTHER,
        Failure::ClassCounts,
    )
}
