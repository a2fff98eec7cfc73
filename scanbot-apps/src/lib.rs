#![warn(rust_2018_idioms)]
// buggy: https://github.com/rust-lang/rust-clippy/issues?q=is%3Aissue+derive_partial_eq_without_eq
#![allow(clippy::derive_partial_eq_without_eq)]

mod error;
pub mod report;
mod scenario_config;
pub mod utils;

pub use error::*;
pub use scenario_config::*;
