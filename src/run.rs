use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::cli::ExitCodes;
use crate::data::loader;
use crate::exit_codes;
use crate::reward::{cipher, secret};
use crate::validate::checks::{Abort, Check, Failure};
use crate::validate::{self, Verdict};

/// The submitted file could not be turned into a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("⚠️ The file does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error("⚠️ Error reading the file: {0}")]
    Unreadable(String),
}

/// How a run ended.  Every variant has already been reported on the output.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// All checks passed; holds the decoded message.
    Revealed(String),
    Input(InputError),
    Rejected { check: Check, failure: Failure },
    Aborted { check: Check, abort: Abort },
}

impl Outcome {
    pub fn exit_code(&self, mode: ExitCodes) -> i32 {
        if mode == ExitCodes::Lenient {
            return exit_codes::SUCCESS;
        }
        match self {
            Outcome::Revealed(_) => exit_codes::SUCCESS,
            Outcome::Input(_) => exit_codes::INPUT_ERROR,
            Outcome::Rejected { .. } => exit_codes::CHECK_FAILED,
            Outcome::Aborted { .. } => exit_codes::ABORTED,
        }
    }
}

/// Load `file`, validate it and, when every check passes, decode the payload
/// at `secret_path`.
///
/// Status lines go to `out`.  Only a missing or malformed payload and write
/// failures are errors; everything the learner can fix is an [`Outcome`].
pub fn run<W: Write>(file: &Path, secret_path: &Path, out: &mut W) -> Result<Outcome> {
    writeln!(out, "🔭 Checking your solution...")?;

    if !file.exists() {
        return report(out, Outcome::Input(InputError::Missing(file.to_path_buf())));
    }

    let table = match loader::load_file(file) {
        Ok(table) => table,
        Err(e) => {
            log::debug!("loading {} failed: {e:?}", file.display());
            return report(out, Outcome::Input(InputError::Unreadable(format!("{e:#}"))));
        }
    };

    let outcome = match validate::validate(&table, out)? {
        Verdict::Accepted { o_count } => {
            let shift = cipher::shift_for(o_count);
            log::debug!("{o_count} \"O\" stars give shift {shift}");
            let payload = secret::load(secret_path)?;
            Outcome::Revealed(cipher::decode(&payload, shift))
        }
        Verdict::Rejected { check, failure } => Outcome::Rejected { check, failure },
        Verdict::Aborted { check, abort } => Outcome::Aborted { check, abort },
    };
    report(out, outcome)
}

/// Flush `out` and turn the run's result into a process exit code.  Errors,
/// including a failed flush, are reported on stderr.
pub fn finish<W: Write>(result: Result<Outcome>, out: &mut W, mode: ExitCodes) -> i32 {
    let result = result.and_then(|outcome| {
        out.flush().context("flushing output")?;
        Ok(outcome)
    });
    match result {
        Ok(outcome) => outcome.exit_code(mode),
        Err(e) => {
            eprintln!("fatal: {e:#}");
            exit_codes::FATAL
        }
    }
}

fn report<W: Write>(out: &mut W, outcome: Outcome) -> Result<Outcome> {
    match &outcome {
        Outcome::Revealed(message) => {
            writeln!(out, "\n\n✨💫🔭 Congrats 🔭💫✨\n")?;
            writeln!(out, "{message}")?;
        }
        Outcome::Input(err) => writeln!(out, "{err}")?,
        Outcome::Rejected { failure, .. } => writeln!(out, "{failure}")?,
        Outcome::Aborted { abort, .. } => writeln!(out, "{abort}")?,
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sample::{self, SampleOptions};

    const MESSAGE: &str = "Per aspera ad astra";

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                dir: TempDir::new().unwrap(),
            }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn csv(&self, options: &SampleOptions) -> PathBuf {
            let path = self.path("hipparcos.csv");
            sample::write_csv(&sample::reference_rows(options).unwrap(), &path).unwrap();
            path
        }

        fn secret(&self, o_count: usize) -> PathBuf {
            let path = self.path("secret-word.pkl");
            let encoded = cipher::encode(MESSAGE, cipher::shift_for(o_count)).unwrap();
            secret::save(&path, &encoded).unwrap();
            path
        }

        fn run(&self, file: &Path, secret: &Path) -> (Outcome, String) {
            let mut out = Vec::new();
            let outcome = run(file, secret, &mut out).unwrap();
            (outcome, String::from_utf8(out).unwrap())
        }
    }

    #[test]
    fn valid_export_reveals_the_message() {
        let fx = Fixture::new();
        let csv = fx.csv(&SampleOptions::default());
        let secret = fx.secret(100);

        let (outcome, output) = fx.run(&csv, &secret);
        assert_eq!(outcome, Outcome::Revealed(MESSAGE.to_string()));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "🔭 Checking your solution...");
        assert_eq!(lines[6], "✅ [6/6] \"sp_class\" column has the right counts");
        assert_eq!(lines[9], "✨💫🔭 Congrats 🔭💫✨");
        assert_eq!(lines.last(), Some(&MESSAGE));
    }

    #[test]
    fn o_count_drives_the_shift() {
        let fx = Fixture::new();
        let options = SampleOptions {
            o_count: 9,
            other_label: "other".into(),
            ..SampleOptions::default()
        };
        let csv = fx.csv(&options);
        let secret = fx.secret(9);

        let (outcome, _) = fx.run(&csv, &secret);
        assert_eq!(outcome, Outcome::Revealed(MESSAGE.to_string()));
    }

    #[test]
    fn missing_file_is_reported() {
        let fx = Fixture::new();
        let file = fx.path("nowhere.csv");

        let (outcome, output) = fx.run(&file, &fx.path("secret-word.pkl"));
        assert_eq!(outcome, Outcome::Input(InputError::Missing(file.clone())));
        assert_eq!(
            output,
            format!(
                "🔭 Checking your solution...\n⚠️ The file does not exist: {}\n",
                file.display()
            )
        );
    }

    #[test]
    fn unparseable_file_is_reported() {
        let fx = Fixture::new();
        let file = fx.path("broken.csv");
        std::fs::write(&file, "HIP,d_ly,sp_class\n1,2,A,B\n").unwrap();

        let (outcome, output) = fx.run(&file, &fx.path("secret-word.pkl"));
        assert!(matches!(outcome, Outcome::Input(InputError::Unreadable(_))));
        assert!(output.contains("⚠️ Error reading the file: CSV row 0: expected 3 fields, saw 4"));
    }

    #[test]
    fn short_row_is_loaded_and_checked() {
        let fx = Fixture::new();
        let file = fx.path("short.csv");
        std::fs::write(&file, "HIP,d_ly,sp_class\n1,1150,A\n2,1150\n").unwrap();

        let (outcome, output) = fx.run(&file, &fx.path("secret-word.pkl"));
        assert_eq!(
            outcome,
            Outcome::Rejected {
                check: Check::RowCount,
                failure: Failure::RowCount
            }
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "✅ [1/6] Columns included look ok");
        assert_eq!(lines[2], Failure::RowCount.to_string());
    }

    #[test]
    fn extra_column_stops_after_the_first_check() {
        let fx = Fixture::new();
        let csv = fx.csv(&SampleOptions::default());
        let widened: String = std::fs::read_to_string(&csv)
            .unwrap()
            .lines()
            .enumerate()
            .map(|(i, line)| if i == 0 { format!("{line},extra\n") } else { format!("{line},1\n") })
            .collect();
        std::fs::write(&csv, widened).unwrap();

        let (outcome, output) = fx.run(&csv, &fx.path("secret-word.pkl"));
        assert_eq!(
            outcome,
            Outcome::Rejected {
                check: Check::Columns,
                failure: Failure::ColumnCount
            }
        );
        assert_eq!(
            output,
            "🔭 Checking your solution...\n\
             ⚠️ There are not exactly 3 columns, did you forget to exclude the index column?\n"
        );
    }

    #[test]
    fn missing_secret_is_fatal() {
        let fx = Fixture::new();
        let csv = fx.csv(&SampleOptions::default());

        let mut out = Vec::new();
        assert!(run(&csv, &fx.path("secret-word.pkl"), &mut out).is_err());
    }

    #[test]
    fn failing_run_never_touches_the_secret() {
        let fx = Fixture::new();
        let file = fx.path("tiny.csv");
        std::fs::write(&file, "HIP,d_ly,sp_class\n1,1150,A\n").unwrap();

        let (outcome, output) = fx.run(&file, &fx.path("secret-word.pkl"));
        assert!(matches!(outcome, Outcome::Rejected { check: Check::RowCount, .. }));
        assert_eq!(output.lines().count(), 3);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn failed_flush_is_fatal() {
        let revealed = || Ok(Outcome::Revealed(MESSAGE.into()));
        assert_eq!(
            finish(revealed(), &mut Vec::new(), ExitCodes::Strict),
            exit_codes::SUCCESS
        );
        assert_eq!(
            finish(revealed(), &mut ClosedPipe, ExitCodes::Lenient),
            exit_codes::FATAL
        );
        assert_eq!(
            finish(revealed(), &mut ClosedPipe, ExitCodes::Strict),
            exit_codes::FATAL
        );
    }

    #[test]
    fn run_errors_are_fatal() {
        let failed = Err(anyhow::anyhow!("reading secret payload"));
        assert_eq!(
            finish(failed, &mut Vec::new(), ExitCodes::Lenient),
            exit_codes::FATAL
        );
    }

    #[test]
    fn exit_codes_depend_on_mode() {
        let rejected = Outcome::Rejected {
            check: Check::RowCount,
            failure: Failure::RowCount,
        };
        assert_eq!(rejected.exit_code(ExitCodes::Lenient), exit_codes::SUCCESS);
        assert_eq!(rejected.exit_code(ExitCodes::Strict), exit_codes::CHECK_FAILED);

        let aborted = Outcome::Aborted {
            check: Check::ClassCounts,
            abort: Abort::MissingOtherClass,
        };
        assert_eq!(aborted.exit_code(ExitCodes::Strict), exit_codes::ABORTED);

        let input = Outcome::Input(InputError::Unreadable("bad".into()));
        assert_eq!(input.exit_code(ExitCodes::Strict), exit_codes::INPUT_ERROR);

        let revealed = Outcome::Revealed(MESSAGE.into());
        assert_eq!(revealed.exit_code(ExitCodes::Strict), exit_codes::SUCCESS);
    }
}
