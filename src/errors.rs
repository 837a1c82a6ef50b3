use thiserror::Error;

/// Validation failures while parsing tabular input.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("unknown surface '{0}', expected one of: Hard, Clay, Grass")]
    UnknownSurface(String),

    #[error("unknown tournament level code '{0}', expected one of: G, M, A, F, D")]
    UnknownLevel(String),

    #[error("match history row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// Domain failures while reconstructing a tournament draw.
#[derive(Debug, Error, PartialEq)]
pub enum DrawError {
    #[error(
        "'{0}' is not a Grand Slam; expected one of: Australian Open, French Open, Wimbledon, US Open"
    )]
    NotGrandSlam(String),

    #[error(
        "incomplete results for {tournament} {year}: a 128-player draw has 127 matches, found {found}"
    )]
    IncompleteDraw {
        tournament: String,
        year: i32,
        found: usize,
    },

    #[error("a bracket needs a power-of-two number of first-round matchups, got {0}")]
    UnevenBracket(usize),
}

/// Domain failures while evaluating the outcome model.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("no rating entry for player '{0}'")]
    UnknownPlayer(String),

    #[error("a match must have an odd number of sets, got {0}")]
    EvenSets(usize),
}
