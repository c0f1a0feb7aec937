//! Geo-subsystem error type.

use thiserror::Error;

use obs_core::WayId;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("way {0} already present in store")]
    DuplicateWay(WayId),

    #[error("way {0} has fewer than two vertices")]
    DegenerateWay(WayId),
}

pub type GeoResult<T> = Result<T, GeoError>;
