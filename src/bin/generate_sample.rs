use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hipparcos_check::reward::{cipher, secret};
use hipparcos_check::sample::{self, SampleOptions};

/// Write a catalogue export that passes every check, plus a secret payload
/// encoded for it.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version)]
struct Args {
    /// Directory receiving hipparcos.csv and the payload
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of "O" stars; sets the shift
    #[arg(long, default_value_t = 100)]
    o_count: usize,

    /// Spelling of the catch-all class ("Other" or "other")
    #[arg(long, default_value = "Other")]
    other_label: String,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Message to hide
    #[arg(long, default_value = "Clear skies!")]
    message: String,

    /// Payload file name; the extension picks the format
    #[arg(long, default_value = "secret-word.pkl")]
    secret_name: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let options = SampleOptions {
        o_count: args.o_count,
        other_label: args.other_label,
        seed: args.seed,
    };
    let rows = sample::reference_rows(&options)?;
    let csv_path = args.out_dir.join("hipparcos.csv");
    sample::write_csv(&rows, &csv_path)?;

    let shift = cipher::shift_for(options.o_count);
    let encoded = cipher::encode(&args.message, shift)?;
    let secret_path = args.out_dir.join(&args.secret_name);
    secret::save(&secret_path, &encoded)?;

    println!(
        "Wrote {} stars to {} and a payload shifted by {shift} to {}",
        rows.len(),
        csv_path.display(),
        secret_path.display()
    );
    Ok(())
}
