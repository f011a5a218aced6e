use thiserror::Error;

/// Error returned by indexed access when the index falls outside `[0, len)`.
///
/// Carries the offending index and the container length at the time of the
/// call. The operation that produced it made no change to the container.
///
/// # Examples
/// ```
/// use catena::DynArray;
/// let mut arr = DynArray::new();
/// arr.push(1);
/// let err = arr.get(3).unwrap_err();
/// assert_eq!(err.index, 3);
/// assert_eq!(err.len, 1);
/// assert_eq!(err.to_string(), "index 3 out of bounds for length 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of bounds for length {len}")]
pub struct OutOfBounds {
    /// The index that was requested.
    pub index: usize,
    /// The container length at the time of the call.
    pub len: usize,
}

impl OutOfBounds {
    pub(crate) fn check(index: usize, len: usize) -> Result<(), OutOfBounds> {
        if index >= len {
            Err(OutOfBounds { index, len })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_in_range() {
        assert_eq!(OutOfBounds::check(0, 1), Ok(()));
        assert_eq!(OutOfBounds::check(4, 5), Ok(()));
    }

    #[test]
    fn check_rejects_out_of_range() {
        assert_eq!(
            OutOfBounds::check(0, 0),
            Err(OutOfBounds { index: 0, len: 0 })
        );
        assert_eq!(
            OutOfBounds::check(5, 5),
            Err(OutOfBounds { index: 5, len: 5 })
        );
    }
}
