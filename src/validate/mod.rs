/// Validation pipeline: six ordered checks against a loaded [`Table`].
///
/// ```text
///   Table ──▶ [1/6] columns ──▶ [2/6] rows ──▶ ... ──▶ [6/6] class counts
///                  │                │                        │
///                  ▼                ▼                        ▼
///               Rejected         Rejected              Rejected / Aborted
/// ```
///
/// The first check that does not pass ends the run; later checks never
/// execute and print nothing.
pub mod checks;
pub mod expected;

use std::io::{self, Write};

use crate::data::model::Table;
use checks::{Abort, Check, CheckResult, Failure};

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Every check passed.  Carries the number of `"O"`-class rows.
    Accepted { o_count: usize },
    Rejected { check: Check, failure: Failure },
    Aborted { check: Check, abort: Abort },
}

/// Run every check in order, writing a progress line for each one that
/// passes.  Failure messages are left to the caller.
pub fn validate<W: Write>(table: &Table, out: &mut W) -> io::Result<Verdict> {
    for check in Check::ALL {
        let result = check.evaluate(table);
        log::debug!("check {} ({check:?}): {result:?}", check.number());
        match result {
            CheckResult::Pass => writeln!(
                out,
                "✅ [{}/{}] {}",
                check.number(),
                Check::ALL.len(),
                check.confirmation()
            )?,
            CheckResult::Fail(failure) => return Ok(Verdict::Rejected { check, failure }),
            CheckResult::Aborted(abort) => return Ok(Verdict::Aborted { check, abort }),
        }
    }

    let o_count = table
        .column(expected::SPECTRAL_CLASS)
        .map_or(0, |c| c.count_of(expected::SHIFT_CLASS));
    Ok(Verdict::Accepted { o_count })
}
