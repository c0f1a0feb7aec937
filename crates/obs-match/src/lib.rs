//! `obs-match` — chain solver (C7) and annotator (C8).
//!
//! | Module      | Contents                                             |
//! |-------------|---------------------------------------------------------|
//! | [`chain`]    | `solve_chains` — max-a-posteriori way assignment        |
//! | [`annotate`] | `annotate` — tag copy-down and coordinate snapping       |
//! | [`error`]    | `MatchError`, `MatchResult`                              |

pub mod annotate;
pub mod chain;
pub mod error;

#[cfg(test)]
mod tests;

pub use annotate::{annotate, AnnotatorConfig};
pub use chain::solve_chains;
pub use error::{MatchError, MatchResult};
