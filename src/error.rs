use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("initial capacity {requested} is below the minimum of {minimum} slots")]
    CapacityTooSmall { requested: usize, minimum: usize },
    #[error("keys must not be empty")]
    EmptyKey,
    #[error("failed to allocate storage for {slots} slots")]
    AllocationFailed {
        slots: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("cannot grow a table of {capacity} slots without overflowing")]
    CapacityOverflow { capacity: usize },
}
