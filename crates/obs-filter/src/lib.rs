//! `obs-filter` — composable, stateless sample filters (§4.9, C9).
//!
//! | Module       | Contents                                                |
//! |--------------|-------------------------------------------------------------|
//! | [`filter`]    | `Filter` trait, `RequiredFields`, `DistanceMeasured`, `Confirmed`, `Chain` |
//! | [`privacy`]   | `PrivacyZone`, `PrivacyZones`, deterministic jitter          |
//! | [`pseudonym`] | `Pseudonymization`, `AnonymizationMode`                      |
//! | [`error`]     | `FilterError`, `FilterResult`                                |

pub mod error;
pub mod filter;
pub mod privacy;
pub mod pseudonym;

#[cfg(test)]
mod tests;

pub use error::{FilterError, FilterResult};
pub use filter::{Chain, Confirmed, DistanceMeasured, Filter, RequiredFields};
pub use privacy::{PrivacyZone, PrivacyZones};
pub use pseudonym::{AnonymizationMode, Pseudonymization};
