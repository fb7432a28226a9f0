use std::fmt;

/// Reasons a checked [`BlockDeque`](crate::BlockDeque) operation can refuse a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    /// A pop or an end access was attempted on a deque without elements.
    Empty,
    /// An element access used an index at or past the current length.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DequeError::Empty => f.write_str("deque is empty"),
            DequeError::IndexOutOfRange { index, len } => {
                write!(f, "index out of bounds: the len is {len} but the index is {index}")
            }
        }
    }
}

impl std::error::Error for DequeError {}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    pub fn display_messages() {
        assert_eq!(DequeError::Empty.to_string(), "deque is empty");
        assert_eq!(
            DequeError::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "index out of bounds: the len is 3 but the index is 7"
        );
    }
}
