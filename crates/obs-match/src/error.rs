//! Errors raised while solving or annotating a chain.

#[derive(thiserror::Error, Debug)]
pub enum MatchError {
    #[error("chain segment of length {0} has no candidates at any position")]
    EmptyChain(usize),
}

pub type MatchResult<T> = Result<T, MatchError>;
