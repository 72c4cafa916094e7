use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("End must be >= start")]
    EndBeforeStart { start: i64, end: i64 },
}
