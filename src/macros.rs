macro_rules! _debug {
    ($($tt:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($tt)+);
    };
}

macro_rules! _trace {
    ($($tt:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($tt)+);
    };
}

/// A version of the [`vec!`] macro but for [`BlockDeque`](crate::BlockDeque).
/// The deque uses the default block size of [`Bytes512`](crate::settings::Bytes512).
/// # Examples
/// ```
/// # use blockdeque::block_deque;
/// let deque = block_deque![1, 2, 3];
/// assert_eq!(deque, [1, 2, 3]);
/// ```
/// ```
/// # use blockdeque::block_deque;
/// let deque = block_deque![7; 4];
/// assert_eq!(deque, [7, 7, 7, 7]);
/// ```
/// ```
/// # use blockdeque::{block_deque, BlockDeque};
/// let deque: BlockDeque<i32> = block_deque![];
/// assert!(deque.is_empty());
/// ```
#[macro_export]
macro_rules! block_deque {
    () => {
        $crate::BlockDeque::<_, $crate::settings::Bytes512>::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::BlockDeque::<_, $crate::settings::Bytes512>::from_iter(std::iter::repeat($elem).take($n))
    };
    ($($x:expr),+ $(,)?) => {
        $crate::BlockDeque::<_, $crate::settings::Bytes512>::from([$($x),+])
    };
}
