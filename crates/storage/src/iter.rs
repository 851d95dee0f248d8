//! Query results.

use alloc::sync::Arc;
use arbor_index::RadixIterator;

/// Rows returned by [`Transaction::get`](crate::Transaction::get), in key
/// order.
///
/// The iterator owns its view of the index, so it stays valid after the
/// transaction that produced it writes, commits or aborts.
pub struct ResultIterator<R> {
    inner: RadixIterator<Arc<R>>,
}

impl<R> ResultIterator<R> {
    pub(crate) fn new(inner: RadixIterator<Arc<R>>) -> Self {
        Self { inner }
    }
}

impl<R> Iterator for ResultIterator<R> {
    type Item = Arc<R>;

    #[inline]
    fn next(&mut self) -> Option<Arc<R>> {
        self.inner.next().map(|leaf| Arc::clone(leaf.value()))
    }
}
