//! `obs-import` — reads OBS track CSV files into typed [`Sample`] rows and
//! fills in ego-motion where the device didn't record it itself.
//!
//! | Module        | Contents                                                |
//! |---------------|-----------------------------------------------------------|
//! | [`format`]     | format-version detection from metadata/header columns    |
//! | [`extractor`]  | per-column value lookup, sentinel handling                |
//! | [`reader`]     | gzip detection, row parsing, `import_csv`                 |
//! | [`egomotion`]  | `derive_egomotion` — finite-difference course/speed fill   |
//! | [`stats`]      | per-file aggregate statistics                              |

pub mod egomotion;
pub mod error;
pub mod extractor;
pub mod format;
pub mod reader;
pub mod stats;

#[cfg(test)]
mod tests;

pub use egomotion::derive_egomotion;
pub use error::{ImportError, ImportResult};
pub use format::CsvFormatVersion;
pub use obs_core::sample::Sample;
pub use reader::{import_csv, import_csv_reader, ImporterConfig};
pub use stats::ImportStats;
