//! Annotator (§4.8, C8): copies tags from the chosen way onto the sample
//! and swaps in the snapped position, keeping the raw fix in the `_gps`
//! fields.

use obs_core::sample::{OsmTags, Sample};
use obs_geo::store::WayStore;

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AnnotatorConfig {
    /// When set, every sample with a chosen way gets annotated, not only
    /// confirmed ones (§4.8 "fully_annotate_unconfirmed" mode flag).
    pub fully_annotate_unconfirmed: bool,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        AnnotatorConfig {
            fully_annotate_unconfirmed: false,
        }
    }
}

/// Normalize `zone:traffic`, stripping a two-letter country prefix (`DE:`,
/// ...) from the recognized values; anything else passes through unchanged.
pub(crate) fn normalize_zone(raw: &str) -> String {
    let stripped = raw.split_once(':').map(|(_, rest)| rest).unwrap_or(raw);
    match stripped {
        "urban" | "rural" | "motorway" => stripped.to_string(),
        _ => raw.to_string(),
    }
}

pub fn annotate(samples: &mut [Sample], store: &WayStore, config: &AnnotatorConfig) {
    for sample in samples.iter_mut() {
        let Some(way_id) = sample.way_id else {
            sample.has_osm_annotations = false;
            continue;
        };
        let selected = config.fully_annotate_unconfirmed || sample.confirmed;
        if !selected {
            continue;
        }
        let Some(way) = store.get(way_id) else {
            continue;
        };

        sample.latitude_gps = sample.latitude;
        sample.longitude_gps = sample.longitude;
        if let (Some(lat), Some(lon)) = (sample.latitude_projected, sample.longitude_projected) {
            sample.latitude = Some(lat);
            sample.longitude = Some(lon);
        }

        let mut tags = OsmTags::new();
        if let Some(zone) = way.tags.get("zone:traffic") {
            tags.set("zone:traffic", normalize_zone(zone));
        }
        for key in ["maxspeed", "name", "oneway", "lanes", "highway"] {
            if let Some(value) = way.tags.get(key) {
                tags.set(key, value.clone());
            }
        }
        sample.osm_tags = tags;
        sample.has_osm_annotations = true;
    }
}
