//! Ego-motion derivation (§4.5, C5).
//!
//! Fills in a missing course or speed by a centered finite difference over
//! the sample's immediate neighbors, provided both are exactly one second
//! away and carry a position. Never overwrites a value that was already
//! present in the source row.

use obs_geo::projector::EquirectangularFast;

use crate::Sample;

fn exactly_one_second(a: chrono::DateTime<chrono::Utc>, b: chrono::DateTime<chrono::Utc>) -> bool {
    b - a == chrono::Duration::seconds(1)
}

pub fn derive_egomotion(samples: &mut [Sample]) {
    let len = samples.len();
    if len < 3 {
        return;
    }
    for i in 1..len - 1 {
        if samples[i].course.is_some() && samples[i].speed.is_some() {
            continue;
        }
        let Some((lat0, lon0)) = samples[i - 1].latitude.zip(samples[i - 1].longitude) else {
            continue;
        };
        let Some((lat1, lon1)) = samples[i].latitude.zip(samples[i].longitude) else {
            continue;
        };
        let Some((lat2, lon2)) = samples[i + 1].latitude.zip(samples[i + 1].longitude) else {
            continue;
        };
        if !exactly_one_second(samples[i - 1].time, samples[i].time) || !exactly_one_second(samples[i].time, samples[i + 1].time) {
            continue;
        }

        let projector = EquirectangularFast::new(lat1, lon1);
        let (x0, y0) = projector.to_local(lat0, lon0);
        let (x2, y2) = projector.to_local(lat2, lon2);
        let vx = 0.5 * (x2 - x0);
        let vy = 0.5 * (y2 - y0);
        let speed = (vx * vx + vy * vy).sqrt();
        let course = vy.atan2(vx);

        if samples[i].course.is_none() {
            samples[i].course = Some(course);
        }
        if samples[i].speed.is_none() {
            samples[i].speed = Some(speed);
        }
        samples[i].egomotion_is_derived = true;
    }
}
