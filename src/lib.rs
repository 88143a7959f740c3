pub mod cli;
pub mod data;
pub mod exit_codes;
pub mod reward;
pub mod run;
pub mod sample;
pub mod validate;
