//! Errors raised while constructing or running a filter.

#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("pseudonymization mode is `hashed` but no salt was provided")]
    MissingSalt,
}

pub type FilterResult<T> = Result<T, FilterError>;
