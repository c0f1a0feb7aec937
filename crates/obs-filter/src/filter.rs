//! The filter trait and the unconditional ones (§4.9): `RequiredFields`,
//! `DistanceMeasured`, `Confirmed`. Grounded on the source's
//! `MeasurementFilter`/`DistanceMeasuredFilter`, which are themselves each a
//! one-method `list -> list` transform with a log line reporting the kept
//! count.

use obs_core::sample::Sample;

/// `list<Sample> -> list<Sample>`, with an optional log sink (§4.9). Here
/// the log sink is always `tracing`; a stage simply emits a debug event
/// instead of taking a writer argument.
pub trait Filter {
    fn name(&self) -> &'static str;
    fn apply(&self, samples: Vec<Sample>) -> Vec<Sample>;

    fn apply_logged(&self, samples: Vec<Sample>) -> Vec<Sample> {
        let before = samples.len();
        let kept = self.apply(samples);
        tracing::debug!(filter = self.name(), kept = kept.len(), dropped = before - kept.len(), "filter stage applied");
        kept
    }
}

/// Drops rows missing time, longitude, or latitude. Time is never actually
/// absent on a constructed `Sample` (it's not an `Option`), so in practice
/// this only screens out rows with no position.
pub struct RequiredFields;

impl Filter for RequiredFields {
    fn name(&self) -> &'static str {
        "RequiredFields"
    }

    fn apply(&self, samples: Vec<Sample>) -> Vec<Sample> {
        samples.into_iter().filter(|s| s.latitude.is_some() && s.longitude.is_some()).collect()
    }
}

/// Keeps rows where at least one of `distance_overtaker`, `distance_stationary` is present.
pub struct DistanceMeasured;

impl Filter for DistanceMeasured {
    fn name(&self) -> &'static str {
        "DistanceMeasured"
    }

    fn apply(&self, samples: Vec<Sample>) -> Vec<Sample> {
        samples.into_iter().filter(|s| s.distance_overtaker.is_some() || s.distance_stationary.is_some()).collect()
    }
}

/// Keeps rows with `confirmed == true`.
pub struct Confirmed;

impl Filter for Confirmed {
    fn name(&self) -> &'static str {
        "Confirmed"
    }

    fn apply(&self, samples: Vec<Sample>) -> Vec<Sample> {
        samples.into_iter().filter(|s| s.confirmed).collect()
    }
}

/// An explicit composite that applies its children in order and logs
/// per-stage counts (§4.9's `ChainFilter`).
pub struct Chain {
    stages: Vec<Box<dyn Filter>>,
}

impl Chain {
    pub fn new(stages: Vec<Box<dyn Filter>>) -> Self {
        Chain { stages }
    }
}

impl Filter for Chain {
    fn name(&self) -> &'static str {
        "Chain"
    }

    fn apply(&self, mut samples: Vec<Sample>) -> Vec<Sample> {
        for stage in &self.stages {
            samples = stage.apply_logged(samples);
        }
        samples
    }
}
