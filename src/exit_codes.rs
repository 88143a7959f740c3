//! Process exit codes.  Only [`FATAL`] is used in lenient mode; strict mode
//! maps every outcome to its own code.

pub const SUCCESS: i32 = 0;
pub const FATAL: i32 = 1; // Secret payload missing, stdout closed, ...
pub const CHECK_FAILED: i32 = 2; // One of the six checks did not pass
pub const INPUT_ERROR: i32 = 3; // File missing or not parseable
pub const ABORTED: i32 = 4; // No "Other" class to count
