//! Properties of the reference catalogue export.

use std::ops::RangeInclusive;

pub const HIP: &str = "HIP";
pub const DISTANCE: &str = "d_ly";
pub const SPECTRAL_CLASS: &str = "sp_class";

/// Column names, in order.
pub const COLUMNS: [&str; 3] = [HIP, DISTANCE, SPECTRAL_CLASS];

pub const ROWS: usize = 113_278;

/// Inclusive bounds for the mean of `d_ly`.
pub const MEAN_DISTANCE: RangeInclusive<f64> = 1100.0..=1200.0;

pub const DISTINCT_CLASSES: usize = 8;

/// Accepted spellings of the catch-all class, in lookup order.
pub const OTHER_LABELS: [&str; 2] = ["other", "Other"];

pub const CLASS_A: usize = 18_191;
pub const CLASS_B: usize = 9_469;
pub const CLASS_OTHER: usize = 2_921;

/// Class whose frequency seeds the decode shift.
pub const SHIFT_CLASS: &str = "O";
