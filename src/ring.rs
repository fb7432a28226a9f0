//! Wrapping index arithmetic over a fixed ring length.
//! Both helpers expect `index < len` and `offset <= len`, which lets a single comparison replace a modulo.

/// Moves `index` forward by `offset` positions on a ring of `len` slots.
/// # Examples
/// ```
/// # use blockdeque::ring::wrap_add;
/// assert_eq!(wrap_add(2, 1, 4), 3);
/// assert_eq!(wrap_add(3, 2, 4), 1);
/// ```
#[inline]
pub fn wrap_add(index: usize, offset: usize, len: usize) -> usize {
    debug_assert!(index < len && offset <= len, "ring offset out of range");
    if index + offset < len {
        index + offset
    } else {
        index + offset - len
    }
}

/// Moves `index` backward by `offset` positions on a ring of `len` slots.
/// # Examples
/// ```
/// # use blockdeque::ring::wrap_sub;
/// assert_eq!(wrap_sub(2, 1, 4), 1);
/// assert_eq!(wrap_sub(0, 1, 4), 3);
/// ```
#[inline]
pub fn wrap_sub(index: usize, offset: usize, len: usize) -> usize {
    debug_assert!(index < len && offset <= len, "ring offset out of range");
    if index < offset {
        len + index - offset
    } else {
        index - offset
    }
}

#[cfg(test)]
mod ring_tests {
    use super::*;

    #[test]
    pub fn single_slot_ring() {
        assert_eq!(wrap_add(0, 1, 1), 0);
        assert_eq!(wrap_sub(0, 1, 1), 0);
        assert_eq!(wrap_add(0, 0, 1), 0);
    }

    #[test]
    pub fn add_then_sub_is_identity() {
        let len = 8;
        for index in 0..len {
            for offset in 0..=len {
                let forward = wrap_add(index, offset, len);
                assert!(forward < len);
                assert_eq!(wrap_sub(forward, offset, len), index);
            }
        }
    }

    #[test]
    pub fn matches_modulo() {
        let len = 5;
        for index in 0..len {
            for offset in 0..=len {
                assert_eq!(wrap_add(index, offset, len), (index + offset) % len);
                assert_eq!(wrap_sub(index, offset, len), (index + len - offset) % len);
            }
        }
    }
}
