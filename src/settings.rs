use std::fmt::Debug;

/// Number of slots a fresh block directory starts with.
pub const MIN_DIRECTORY_CAPACITY: usize = 1;

/// Blocks of 64 bytes. Mostly useful for exercising block boundaries with few elements.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bytes64;

/// Blocks of 512 bytes, which is 128 `i32`s per block.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bytes512;

/// Blocks of one 4 KiB page.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bytes4096;

/// How many bytes of element storage each block of a [`BlockDeque`](crate::BlockDeque) holds.
/// The number of elements per block is derived from this and the element width.
pub trait BlockSize: seal_block_size::Sealed + Debug + Copy + Default {}
pub(crate) mod seal_block_size {
    pub trait Sealed {
        const BYTES: usize;
    }
}

impl seal_block_size::Sealed for Bytes64 {
    const BYTES: usize = 64;
}
impl BlockSize for Bytes64 {}

impl seal_block_size::Sealed for Bytes512 {
    const BYTES: usize = 512;
}
impl BlockSize for Bytes512 {}

impl seal_block_size::Sealed for Bytes4096 {
    const BYTES: usize = 4096;
}
impl BlockSize for Bytes4096 {}

/// Elements of `T` that fit in `bytes`, never less than one.
/// Zero-sized types count as one byte wide.
pub(crate) const fn block_capacity<T>(bytes: usize) -> usize {
    let width = if std::mem::size_of::<T>() == 0 {
        1
    } else {
        std::mem::size_of::<T>()
    };
    let capacity = bytes / width;
    if capacity == 0 {
        1
    } else {
        capacity
    }
}
