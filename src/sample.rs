//! Deterministic stand-in for the reference catalogue export.
//!
//! The generated rows satisfy every validation check: 113278 unique `HIP`
//! numbers, `d_ly` centred on 1150 and the expected class frequencies.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Serialize;

use crate::data::model::{Column, Table};
use crate::validate::expected;

/// Classes that absorb the rows not pinned by the checks.
const FILLER_CLASSES: [&str; 4] = ["F", "G", "K", "M"];

const MEAN_DISTANCE: f64 = 1150.0;

#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Rows labelled `"O"`; sets the decode shift.
    pub o_count: usize,
    /// Spelling of the catch-all class.
    pub other_label: String,
    pub seed: u64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            o_count: 100,
            other_label: "Other".to_string(),
            seed: 42,
        }
    }
}

/// One row of the export, serialized with the expected header names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarRow {
    #[serde(rename = "HIP")]
    pub hip: u32,
    pub d_ly: f64,
    pub sp_class: String,
}

pub fn reference_rows(options: &SampleOptions) -> Result<Vec<StarRow>> {
    ensure!(options.o_count > 0, "at least one \"O\" star is needed");
    ensure!(
        !["A", "B", expected::SHIFT_CLASS]
            .iter()
            .chain(FILLER_CLASSES.iter())
            .any(|c| *c == options.other_label),
        "catch-all label {:?} collides with a spectral class",
        options.other_label
    );

    let pinned = expected::CLASS_A + expected::CLASS_B + expected::CLASS_OTHER + options.o_count;
    let filler = expected::ROWS.saturating_sub(pinned);
    ensure!(
        filler >= FILLER_CLASSES.len(),
        "{} \"O\" stars leave no room for the other classes",
        options.o_count
    );

    let mut classes: Vec<&str> = Vec::with_capacity(expected::ROWS);
    let mut push = |label: &'static str, n: usize| classes.extend(std::iter::repeat(label).take(n));
    push("A", expected::CLASS_A);
    push("B", expected::CLASS_B);
    push(expected::SHIFT_CLASS, options.o_count);
    let share = filler * 3 / 10;
    for &label in &FILLER_CLASSES[..3] {
        push(label, share);
    }
    push(FILLER_CLASSES[3], filler - 3 * share);

    let mut rng = Splitmix::seeded(options.seed);
    let mut labels: Vec<String> = classes.into_iter().map(str::to_string).collect();
    labels.extend(std::iter::repeat(options.other_label.clone()).take(expected::CLASS_OTHER));
    rng.shuffle(&mut labels);

    // Pairs mirrored around the target keep the mean on it.
    let mut distances = Vec::with_capacity(expected::ROWS);
    while distances.len() + 1 < expected::ROWS {
        let offset = rng.unit() * 1000.0;
        distances.push(MEAN_DISTANCE + offset);
        distances.push(MEAN_DISTANCE - offset);
    }
    if distances.len() < expected::ROWS {
        distances.push(MEAN_DISTANCE);
    }

    Ok(labels
        .into_iter()
        .zip(distances)
        .enumerate()
        .map(|(i, (sp_class, d_ly))| StarRow {
            hip: i as u32 + 1,
            d_ly,
            sp_class,
        })
        .collect())
}

pub fn reference_table(options: &SampleOptions) -> Result<Table> {
    let rows = reference_rows(options)?;
    let table = Table::new(vec![
        Column::numeric(expected::HIP, rows.iter().map(|r| f64::from(r.hip)).collect()),
        Column::numeric(expected::DISTANCE, rows.iter().map(|r| r.d_ly).collect()),
        Column::text(expected::SPECTRAL_CLASS, rows.into_iter().map(|r| r.sp_class)),
    ])?;
    Ok(table)
}

pub fn write_csv(rows: &[StarRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// SplitMix64 stream; one seed always lays out the same catalogue.
struct Splitmix {
    state: u64,
}

impl Splitmix {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    fn seeded(seed: u64) -> Self {
        Splitmix { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 * f64::EPSILON / 2.0
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for last in (1..items.len()).rev() {
            let pick = self.below(last + 1);
            items.swap(last, pick);
        }
    }
}
