//! Error types for the simulations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The reasons a simulation refuses to start.
///
/// Outcomes such as an unallocated process, an unsafe state or a page
/// fault are part of the returned records and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sequence that needs at least one element was empty.
    #[error("{what} must not be empty")]
    EmptyInput {
        /// What was empty.
        what: &'static str,
    },

    /// Two parallel inputs disagree on their length.
    #[error("{what}: expected {expected} values, found {found}")]
    LengthMismatch {
        /// Which input has the wrong length.
        what: &'static str,
        /// The length implied by the other inputs.
        expected: usize,
        /// The length that was supplied.
        found: usize,
    },

    /// A scalar parameter has a value the simulation cannot work with.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// A value lies outside the range it is defined on.
    #[error("{what} {value} is outside 0..{limit}")]
    OutOfRange {
        /// What the value describes.
        what: &'static str,
        /// The rejected value.
        value: usize,
        /// The exclusive upper bound.
        limit: usize,
    },

    /// `Max - Allocation` would be negative.
    #[error("P{process} holds more of R{resource} than its declared maximum")]
    NeedExceedsMaximum {
        /// Process row.
        process: usize,
        /// Resource column.
        resource: usize,
    },

    /// A graph node is neither a process (`P..`) nor a resource (`R..`).
    #[error("node '{0}' is neither a process nor a resource")]
    MalformedNode(String),

    /// A graph edge joins two nodes of the same kind.
    #[error("edge {from} -> {to} must join a process and a resource")]
    MalformedEdge {
        /// Edge source.
        from: String,
        /// Edge target.
        to: String,
    },

    /// A process index that is not part of the state.
    #[error("unknown process P{0}")]
    UnknownProcess(usize),

    /// A total computed from the inputs does not fit in a `usize`.
    #[error("{what} overflows")]
    Overflow {
        /// The total that overflowed.
        what: &'static str,
    },

    /// A resource request larger than what the process declared it needs.
    #[error("P{process} requested more than its remaining need")]
    RequestExceedsClaim {
        /// Requesting process.
        process: usize,
    },
}

/// Sums `values`, failing with [`Error::Overflow`] instead of wrapping.
pub(crate) fn checked_sum<'a>(
    values: impl IntoIterator<Item = &'a usize>,
    what: &'static str,
) -> Result<usize> {
    values
        .into_iter()
        .try_fold(0usize, |total, &value| total.checked_add(value))
        .ok_or(Error::Overflow { what })
}

/// Fails with [`Error::EmptyInput`] if `values` is empty.
pub(crate) fn require_non_empty<T>(values: &[T], what: &'static str) -> Result<()> {
    if values.is_empty() {
        return Err(Error::EmptyInput { what });
    }
    Ok(())
}
