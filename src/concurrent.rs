use crate::error::CapacityError;
use crate::loom::{Mutex, MutexGuard};
use crate::ring::RingBuffer;
use std::fmt;
use std::sync::PoisonError;

/// A [`RingBuffer`] behind a mutex.
///
/// Each call takes the lock once; there is no waiting for elements. Use
/// [`BlockingQueue`](crate::BlockingQueue) when consumers need to block.
pub struct ConcurrentQueue<T> {
    ring: Mutex<RingBuffer<T>>,
}

impl<T> ConcurrentQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        Ok(Self {
            ring: Mutex::new(RingBuffer::new(capacity)?),
        })
    }

    pub fn offer(&self, item: T) -> bool {
        self.lock().offer(item)
    }

    pub fn poll(&self) -> Option<T> {
        self.lock().remove()
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().peek().cloned()
    }

    /// Inserts every element under a single lock acquisition. Returns
    /// whether anything was inserted.
    pub fn extend_from<I: IntoIterator<Item = T>>(&self, iter: I) -> bool {
        let mut ring = self.lock();
        let mut changed = false;
        for item in iter {
            ring.insert(item);
            changed = true;
        }
        changed
    }

    pub fn contains(&self, target: &T) -> bool
    where
        T: PartialEq,
    {
        self.lock().contains(target)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().iter().cloned().collect()
    }

    pub fn into_inner(self) -> RingBuffer<T> {
        self.ring
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, RingBuffer<T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> From<RingBuffer<T>> for ConcurrentQueue<T> {
    fn from(ring: RingBuffer<T>) -> Self {
        Self {
            ring: Mutex::new(ring),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConcurrentQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConcurrentQueue").field(&*self.lock()).finish()
    }
}
