//! A [`Block`] is one fixed-capacity storage segment of a [`BlockDeque`](crate::BlockDeque).
//! It keeps a contiguous run of elements somewhere inside its buffer, with free margins on both sides,
//! so either end can be pushed or popped without moving the other elements.

use std::fmt::Debug;
use std::mem::MaybeUninit;

/// A fixed-capacity buffer holding a contiguous run of elements.
/// The buffer is allocated once in [`Block::new`] and never reallocated.
///
/// # Examples
/// ```
/// # use blockdeque::block::Block;
/// let mut block = Block::new(4);
/// block.push_back(2);
/// block.push_back(3);
/// assert!(!block.has_front_room());
/// assert_eq!(block.get(1), Some(&3));
/// assert_eq!(block.pop_front(), Some(2));
/// assert!(block.has_front_room());
/// ```
pub struct Block<T> {
    buf: Box<[MaybeUninit<T>]>,
    begin: usize,
    len: usize,
}

impl<T: Debug> Debug for Block<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("begin", &self.begin)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T> Block<T> {
    /// Allocates an empty block with room for `capacity` elements.
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity != 0, "a block must hold at least one element");
        let buf = std::iter::repeat_with(MaybeUninit::uninit)
            .take(capacity)
            .collect();
        #[cfg(test)]
        live_blocks::acquire();
        Block {
            buf,
            begin: 0,
            len: 0,
        }
    }

    /// Returns the number of elements in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of elements the block can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if [`push_back`](Block::push_back) can write without running off the end of the buffer.
    #[inline]
    pub fn has_back_room(&self) -> bool {
        self.begin + self.len < self.capacity()
    }

    /// Returns true if [`push_front`](Block::push_front) can write without running off the start of the buffer.
    /// An empty block always has front room because pushing to it restarts from the end of the buffer.
    #[inline]
    pub fn has_front_room(&self) -> bool {
        self.begin > 0 || self.len == 0
    }

    /// Writes an element after the last one. An empty block starts filling from the front of its buffer.
    /// # Panics
    /// Panics if the block has no back room.
    pub fn push_back(&mut self, elem: T) {
        assert!(self.has_back_room(), "no room at the back of the block");
        if self.len == 0 {
            self.begin = 0;
        }
        self.buf[self.begin + self.len].write(elem);
        self.len += 1;
    }

    /// Writes an element before the first one. An empty block starts filling from the back of its buffer.
    /// # Panics
    /// Panics if the block has no front room.
    pub fn push_front(&mut self, elem: T) {
        assert!(self.has_front_room(), "no room at the front of the block");
        if self.len == 0 {
            self.begin = self.capacity();
        }
        self.buf[self.begin - 1].write(elem);
        self.begin -= 1;
        self.len += 1;
    }

    /// Removes the last element, returning `None` if the block is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // the slot was initialized by a push and is no longer counted as live
        Some(unsafe { self.buf[self.begin + self.len].assume_init_read() })
    }

    /// Removes the first element, returning `None` if the block is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let elem = unsafe { self.buf[self.begin].assume_init_read() };
        self.begin += 1;
        self.len -= 1;
        Some(elem)
    }

    /// Returns the element `offset` positions after the first one.
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset < self.len {
            Some(unsafe { self.buf[self.begin + offset].assume_init_ref() })
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset < self.len {
            Some(unsafe { self.buf[self.begin + offset].assume_init_mut() })
        } else {
            None
        }
    }

    /// The live elements as one slice.
    pub fn as_slice(&self) -> &[T] {
        let live = &self.buf[self.begin..self.begin + self.len];
        // MaybeUninit<T> has the same layout as T and every slot in this range is initialized
        unsafe { std::slice::from_raw_parts(live.as_ptr() as *const T, live.len()) }
    }
}

impl<T> Drop for Block<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
        #[cfg(test)]
        live_blocks::release();
    }
}

impl<T: Clone> Clone for Block<T> {
    fn clone(&self) -> Self {
        let mut new = Block::new(self.capacity());
        new.begin = self.begin;
        for elem in self.as_slice() {
            // len only grows after each write, so a panicking clone leaves a droppable block
            new.buf[new.begin + new.len].write(elem.clone());
            new.len += 1;
        }
        new
    }
}
