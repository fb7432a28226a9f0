//! A [`BlockDeque`] is a double-ended queue assembled from fixed-size [`Block`]s.
//! The blocks are owned by a circular directory of slots. When the directory runs out of slots it doubles,
//! but only the block handles move; the elements themselves stay where they were first written.

use crate::block::Block;
use crate::error::DequeError;
use crate::ring::{wrap_add, wrap_sub};
use crate::settings::{block_capacity, seal_block_size, BlockSize, Bytes512, MIN_DIRECTORY_CAPACITY};
use std::fmt::Debug;

type Slot<T> = Option<Box<Block<T>>>;

/// A double-ended queue with amortized O(1) pushes and pops at both ends and O(1) indexing.
///
/// Elements live in blocks of `Size::BYTES` bytes. Blocks are created when a push finds no room at its end
/// and released as soon as a pop empties them. Only the first and last block may be partially filled,
/// which is what lets an index be turned into a block and offset with a single division.
///
/// # Examples
/// ```
/// use blockdeque::BlockDeque;
/// let mut deque = BlockDeque::new();
/// deque.push_back(2);
/// deque.push_front(1);
/// deque.push_back(3);
/// assert_eq!(deque, [1, 2, 3]);
/// assert_eq!(deque[1], 2);
/// ```
///
/// # Block Size
/// The default block size is [`Bytes512`], which holds 128 `i32`s per block.
/// A different size is picked through the second type parameter:
/// ```
/// use blockdeque::BlockDeque;
/// use blockdeque::settings::Bytes64;
/// let mut deque: BlockDeque<u32, Bytes64> = BlockDeque::new_with_block_size();
/// deque.extend(0..100);
/// assert_eq!(BlockDeque::<u32, Bytes64>::BLOCK_CAPACITY, 16);
/// assert_eq!(deque.block_count(), 7);
/// ```
pub struct BlockDeque<T, Size = Bytes512>
where
    Size: BlockSize,
{
    slots: Box<[Slot<T>]>,
    begin: usize,
    blocks: usize,
    len: usize,
    block_size: Size,
}

impl<T: Debug, Size> Debug for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries((0..self.len).filter_map(|index| self.get(index)))
            .finish()
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Slot<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> BlockDeque<T, Bytes512> {
    /// Creates a new, empty `BlockDeque` with the default block size.
    /// The directory starts with a single slot and no blocks.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque, [1, 2]);
    /// ```
    pub fn new() -> Self {
        BlockDeque::new_with_block_size()
    }
}

impl<T, Size> BlockDeque<T, Size>
where
    Size: BlockSize,
{
    /// Number of elements of `T` stored in each block.
    pub const BLOCK_CAPACITY: usize = block_capacity::<T>(<Size as seal_block_size::Sealed>::BYTES);

    /// Creates a new, empty `BlockDeque` whose block size is taken from the `Size` parameter.
    pub fn new_with_block_size() -> Self {
        BlockDeque::with_directory_capacity(MIN_DIRECTORY_CAPACITY)
    }

    fn with_directory_capacity(capacity: usize) -> Self {
        BlockDeque {
            slots: empty_slots(capacity.max(MIN_DIRECTORY_CAPACITY)),
            begin: 0,
            blocks: 0,
            len: 0,
            block_size: Size::default(),
        }
    }

    /// Creates a `BlockDeque` holding `len` default values.
    /// The directory is sized up front so filling it does not grow the directory.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque: BlockDeque<i32> = BlockDeque::with_len(300);
    /// assert_eq!(deque.len(), 300);
    /// assert_eq!(deque[299], 0);
    /// assert_eq!(deque.directory_capacity(), 3);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut deque = BlockDeque::with_directory_capacity(len / Self::BLOCK_CAPACITY + 1);
        for _ in 0..len {
            deque.push_back(T::default());
        }
        deque
    }

    /// Returns the number of elements in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the deque contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::new();
    /// assert!(deque.is_empty());
    /// deque.push_front(1);
    /// assert!(!deque.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of blocks currently allocated.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// Returns the number of slots in the block directory. This never shrinks.
    #[inline]
    pub fn directory_capacity(&self) -> usize {
        self.slots.len()
    }

    fn occupied(&self, slot: usize) -> &Block<T> {
        match self.slots[slot].as_deref() {
            Some(block) => block,
            None => unreachable!("slot {slot} is outside the occupied run"),
        }
    }

    fn occupied_mut(&mut self, slot: usize) -> &mut Block<T> {
        match self.slots[slot].as_deref_mut() {
            Some(block) => block,
            None => unreachable!("slot {slot} is outside the occupied run"),
        }
    }

    fn last_slot(&self) -> Option<usize> {
        if self.blocks == 0 {
            None
        } else {
            Some(wrap_add(self.begin, self.blocks - 1, self.slots.len()))
        }
    }

    fn first_slot(&self) -> Option<usize> {
        if self.blocks == 0 {
            None
        } else {
            Some(self.begin)
        }
    }

    // Doubles the directory. Block handles are moved into the new directory in logical order starting at slot 0.
    fn grow_directory(&mut self) {
        let new_capacity = self.slots.len() * 2;
        assert!(new_capacity >= self.slots.len(), "directory capacity overflow");
        _debug!(
            from = self.slots.len(),
            to = new_capacity,
            blocks = self.blocks,
            "growing block directory"
        );

        let old_capacity = self.slots.len();
        let mut new_slots = empty_slots(new_capacity);
        let mut slot = self.begin;
        for target in new_slots.iter_mut().take(self.blocks) {
            *target = self.slots[slot].take();
            slot = wrap_add(slot, 1, old_capacity);
        }
        self.slots = new_slots;
        self.begin = 0;
    }

    fn attach_back_block(&mut self) -> usize {
        if self.blocks == self.slots.len() {
            self.grow_directory();
        }
        let slot = wrap_add(self.begin, self.blocks, self.slots.len());
        self.slots[slot] = Some(Box::new(Block::new(Self::BLOCK_CAPACITY)));
        self.blocks += 1;
        _trace!(slot, blocks = self.blocks, "attached block at the back");
        slot
    }

    fn attach_front_block(&mut self) -> usize {
        if self.blocks == self.slots.len() {
            self.grow_directory();
        }
        self.begin = wrap_sub(self.begin, 1, self.slots.len());
        self.slots[self.begin] = Some(Box::new(Block::new(Self::BLOCK_CAPACITY)));
        self.blocks += 1;
        _trace!(slot = self.begin, blocks = self.blocks, "attached block at the front");
        self.begin
    }

    /// Pushes an element to the back of the deque.
    /// A new block is attached when the last block is full; the directory doubles when all its slots are taken.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque: BlockDeque<i32> = BlockDeque::from([42, 10]);
    /// deque.push_back(100);
    /// assert_eq!(deque.pop_back(), Some(100));
    /// ```
    pub fn push_back(&mut self, elem: T) {
        let slot = match self.last_slot() {
            Some(slot) if self.occupied(slot).has_back_room() => slot,
            _ => self.attach_back_block(),
        };
        self.occupied_mut(slot).push_back(elem);
        self.len += 1;
    }

    /// Pushes an element to the front of the deque.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque: BlockDeque<i32> = BlockDeque::from([42, 10]);
    /// deque.push_front(100);
    /// assert_eq!(deque.pop_front(), Some(100));
    /// ```
    pub fn push_front(&mut self, elem: T) {
        let slot = match self.first_slot() {
            None => self.attach_back_block(),
            Some(slot) if self.occupied(slot).has_front_room() => slot,
            Some(_) => self.attach_front_block(),
        };
        self.occupied_mut(slot).push_front(elem);
        self.len += 1;
    }

    /// Pops an element from the back of the deque, returning `None` if it is empty.
    /// The last block is released once it has no elements left.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque: BlockDeque<i32> = BlockDeque::from([42, 10]);
    /// assert_eq!(deque.pop_back(), Some(10));
    /// assert_eq!(deque.pop_back(), Some(42));
    /// assert_eq!(deque.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let slot = self.last_slot()?;
        let block = self.occupied_mut(slot);
        let elem = block.pop_back()?;
        if block.is_empty() {
            self.slots[slot] = None;
            self.blocks -= 1;
            _trace!(slot, blocks = self.blocks, "released block at the back");
        }
        self.len -= 1;
        Some(elem)
    }

    /// Pops an element from the front of the deque, returning `None` if it is empty.
    /// The first block is released once it has no elements left.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque: BlockDeque<i32> = BlockDeque::from([42, 10]);
    /// assert_eq!(deque.pop_front(), Some(42));
    /// assert_eq!(deque.pop_front(), Some(10));
    /// assert_eq!(deque.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let slot = self.first_slot()?;
        let block = self.occupied_mut(slot);
        let elem = block.pop_front()?;
        if block.is_empty() {
            self.slots[slot] = None;
            self.begin = wrap_add(self.begin, 1, self.slots.len());
            self.blocks -= 1;
            _trace!(slot, blocks = self.blocks, "released block at the front");
        }
        self.len -= 1;
        Some(elem)
    }

    /// Like [`pop_back`](BlockDeque::pop_back), but reports an empty deque as an error.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{BlockDeque, DequeError};
    /// let mut deque: BlockDeque<i32> = BlockDeque::from([1]);
    /// assert_eq!(deque.try_pop_back(), Ok(1));
    /// assert_eq!(deque.try_pop_back(), Err(DequeError::Empty));
    /// ```
    pub fn try_pop_back(&mut self) -> Result<T, DequeError> {
        self.pop_back().ok_or(DequeError::Empty)
    }

    /// Like [`pop_front`](BlockDeque::pop_front), but reports an empty deque as an error.
    pub fn try_pop_front(&mut self) -> Result<T, DequeError> {
        self.pop_front().ok_or(DequeError::Empty)
    }

    // Maps a logical index below `len` to its slot and the offset inside that slot's block.
    // Every block between the first and the last is full, so the block is found by division.
    fn locate(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.len);
        let first = self.occupied(self.begin).len();
        if index < first {
            return (self.begin, index);
        }
        let rest = index - first;
        let full_blocks = rest / Self::BLOCK_CAPACITY;
        let slot = wrap_add(self.begin, 1 + full_blocks, self.slots.len());
        (slot, rest - full_blocks * Self::BLOCK_CAPACITY)
    }

    /// Returns a reference to the element at `index`, or `None` if it is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque: BlockDeque<i32> = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.get(2), Some(&3));
    /// assert_eq!(deque.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let (slot, offset) = self.locate(index);
        self.occupied(slot).get(offset)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if it is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let (slot, offset) = self.locate(index);
        self.occupied_mut(slot).get_mut(offset)
    }

    /// Like [`get`](BlockDeque::get), but reports the index and length when out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{BlockDeque, DequeError};
    /// let deque: BlockDeque<i32> = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.try_get(0), Ok(&1));
    /// assert_eq!(deque.try_get(5), Err(DequeError::IndexOutOfRange { index: 5, len: 3 }));
    /// ```
    pub fn try_get(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.len;
        self.get(index)
            .ok_or(DequeError::IndexOutOfRange { index, len })
    }

    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let len = self.len;
        self.get_mut(index)
            .ok_or(DequeError::IndexOutOfRange { index, len })
    }

    /// Returns the first element, or `None` if the deque is empty.
    pub fn front(&self) -> Option<&T> {
        self.occupied(self.first_slot()?).get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let slot = self.first_slot()?;
        self.occupied_mut(slot).get_mut(0)
    }

    /// Returns the last element, or `None` if the deque is empty.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque: BlockDeque<i32> = BlockDeque::new();
    /// assert_eq!(deque.back(), None);
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.back(), Some(&2));
    /// assert_eq!(deque.front(), Some(&1));
    /// ```
    pub fn back(&self) -> Option<&T> {
        let block = self.occupied(self.last_slot()?);
        block.get(block.len().checked_sub(1)?)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let slot = self.last_slot()?;
        let block = self.occupied_mut(slot);
        let last = block.len().checked_sub(1)?;
        block.get_mut(last)
    }

    /// Removes all elements by popping from the back until the deque is empty.
    /// Every block is released, but the directory keeps its capacity.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque: BlockDeque<i32> = (0..1000).collect();
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.block_count(), 0);
    /// assert!(deque.directory_capacity() >= 8);
    /// ```
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {
            // drop the element
        }
    }

    /// Exchanges the contents of two deques in O(1). No element or block is moved.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut a: BlockDeque<i32> = BlockDeque::from([1, 2]);
    /// let mut b: BlockDeque<i32> = BlockDeque::from([3]);
    /// a.swap(&mut b);
    /// assert_eq!(a, [3]);
    /// assert_eq!(b, [1, 2]);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl<T, Size> Default for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    /// An empty deque. `std::mem::take` uses this to leave a moved-from deque empty.
    fn default() -> Self {
        BlockDeque::new_with_block_size()
    }
}

impl<T, Size> Clone for BlockDeque<T, Size>
where
    T: Clone,
    Size: BlockSize,
{
    /// Deep copy: every block is cloned element by element into a directory of the same capacity.
    fn clone(&self) -> Self {
        let mut new = BlockDeque::with_directory_capacity(self.slots.len());
        let mut slot = self.begin;
        for target in 0..self.blocks {
            let block = self.occupied(slot);
            new.slots[target] = Some(Box::new(block.clone()));
            new.blocks += 1;
            new.len += block.len();
            slot = wrap_add(slot, 1, self.slots.len());
        }
        new.block_size = self.block_size;
        new
    }

    /// Builds the full copy first and then swaps it in, so a panicking clone leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T, Size> std::ops::Index<usize> for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(elem) => elem,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len, index
            ),
        }
    }
}

impl<T, Size> std::ops::IndexMut<usize> for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T, Size> FromIterator<T> for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = BlockDeque::new_with_block_size();
        deque.extend(iter);
        deque
    }
}

impl<T, Size> Extend<T> for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

impl<T, Size, const N: usize> From<[T; N]> for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    fn from(array: [T; N]) -> Self {
        let mut deque = BlockDeque::with_directory_capacity(N / Self::BLOCK_CAPACITY + 1);
        deque.extend(array);
        deque
    }
}

impl<T, Size> From<Vec<T>> for BlockDeque<T, Size>
where
    Size: BlockSize,
{
    fn from(vec: Vec<T>) -> Self {
        let mut deque = BlockDeque::with_directory_capacity(vec.len() / Self::BLOCK_CAPACITY + 1);
        deque.extend(vec);
        deque
    }
}

impl<T, Size, OtherSize> PartialEq<BlockDeque<T, OtherSize>> for BlockDeque<T, Size>
where
    T: PartialEq,
    Size: BlockSize,
    OtherSize: BlockSize,
{
    fn eq(&self, other: &BlockDeque<T, OtherSize>) -> bool {
        self.len == other.len && (0..self.len).all(|index| self.get(index) == other.get(index))
    }
}

impl<T, Size> Eq for BlockDeque<T, Size>
where
    T: Eq,
    Size: BlockSize,
{
}

impl<T, Size> PartialEq<[T]> for BlockDeque<T, Size>
where
    T: PartialEq,
    Size: BlockSize,
{
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len()
            && other
                .iter()
                .enumerate()
                .all(|(index, elem)| self.get(index) == Some(elem))
    }
}

impl<T, Size, const N: usize> PartialEq<[T; N]> for BlockDeque<T, Size>
where
    T: PartialEq,
    Size: BlockSize,
{
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

#[cfg(test)]
impl<T, Size> BlockDeque<T, Size>
where
    Size: BlockSize,
{
    /// Panics if the directory or any block breaks the structural invariants.
    pub(crate) fn check_invariants(&self) {
        let capacity = self.slots.len();
        assert!(capacity >= MIN_DIRECTORY_CAPACITY);
        assert!(self.blocks <= capacity, "more blocks than slots");
        assert!(self.begin < capacity);

        let mut total = 0;
        for step in 0..capacity {
            let slot = wrap_add(self.begin, step, capacity);
            match &self.slots[slot] {
                Some(block) => {
                    assert!(step < self.blocks, "block outside the occupied run at slot {slot}");
                    assert!(!block.is_empty(), "empty block left at slot {slot}");
                    let interior = step != 0 && step + 1 != self.blocks;
                    if interior {
                        assert_eq!(block.len(), Self::BLOCK_CAPACITY, "partial interior block at slot {slot}");
                    }
                    total += block.len();
                }
                None => assert!(step >= self.blocks, "hole in the occupied run at slot {slot}"),
            }
        }
        assert_eq!(total, self.len);
    }

    /// Collects the elements in logical order.
    pub(crate) fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        (0..self.len).map(|index| self[index].clone()).collect()
    }
}
