mod iter;

pub use self::iter::{Drain, IntoIter, Iter};

use crate::error::CapacityError;
use log::trace;
use std::fmt;

/// A fixed-capacity FIFO that overwrites its oldest element when full.
///
/// Slots in the circular range `[head, head + len)` are occupied, every
/// other slot is empty, and `tail == (head + len) % capacity`.
///
/// The buffer does no synchronization of its own. Wrap it in a lock, or use
/// [`BlockingQueue`](crate::BlockingQueue) or
/// [`ConcurrentQueue`](crate::ConcurrentQueue), to share it between threads.
#[derive(Clone)]
pub struct RingBuffer<T> {
    buf: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }

        let buf = (0..capacity).map(|_| None).collect();
        Ok(Self {
            buf,
            head: 0,
            tail: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `item` at the tail.
    ///
    /// If the buffer is full the head is evicted first and handed back, so
    /// the insert itself always succeeds.
    pub fn insert(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            trace!("ring full (capacity {}), evicting head", self.capacity());
            self.remove()
        } else {
            None
        };

        debug_assert!(self.buf[self.tail].is_none());
        self.buf[self.tail] = Some(item);
        self.tail = self.advance(self.tail);
        self.len += 1;

        evicted
    }

    /// Queue-protocol form of [`insert`](Self::insert). Never fails.
    pub fn offer(&mut self, item: T) -> bool {
        self.insert(item);
        true
    }

    pub fn remove(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.buf[self.head].take();
        self.head = self.advance(self.head);
        self.len -= 1;
        item
    }

    pub fn poll(&mut self) -> Option<T> {
        self.remove()
    }

    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.buf[self.head].as_ref()
        }
    }

    pub fn contains(&self, target: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == target)
    }

    /// Iterates from the oldest element to the newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buf, self.head, self.len)
    }

    /// Removes elements oldest first. Whatever the iterator has not yielded
    /// when it is dropped is removed as well.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    pub fn clear(&mut self) {
        while self.remove().is_some() {}
    }

    fn advance(&self, idx: usize) -> usize {
        let next = idx + 1;
        if next == self.capacity() {
            0
        } else {
            next
        }
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        let cap = self.capacity();
        assert!(self.len <= cap);
        assert_eq!(self.tail, (self.head + self.len) % cap);
        for offset in 0..cap {
            let idx = (self.head + offset) % cap;
            assert_eq!(self.buf[idx].is_some(), offset < self.len, "slot {}", idx);
        }
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RingBuffer;

    fn ring(cap: usize) -> RingBuffer<u32> {
        RingBuffer::new(cap).unwrap()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(RingBuffer::<u32>::new(0).is_err());
    }

    #[test]
    fn invariants_hold_across_wraparound() {
        let mut r = ring(3);
        r.assert_invariants();

        for i in 0..10 {
            r.insert(i);
            r.assert_invariants();
            if i % 3 == 0 {
                r.remove();
                r.assert_invariants();
            }
        }

        while r.remove().is_some() {
            r.assert_invariants();
        }
        assert_eq!(r.head, r.tail);
    }

    #[test]
    fn insert_reports_evicted_head() {
        let mut r = ring(2);
        assert_eq!(r.insert(1), None);
        assert_eq!(r.insert(2), None);
        assert_eq!(r.insert(3), Some(1));
        assert_eq!(r.insert(4), Some(2));
        assert_eq!(r.len(), 2);
        r.assert_invariants();
    }

    #[test]
    fn iter_stops_at_empty_slot() {
        let mut r = ring(4);
        r.extend([1, 2, 3]);

        // an iterator over a stale length must not walk past the tail
        let iter = super::Iter::new(&r.buf, r.head, 4);
        assert_eq!(iter.copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        r.remove();
        r.assert_invariants();
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn dropped_drain_empties_the_ring() {
        let mut r = ring(4);
        r.extend([1, 2, 3, 4, 5]);

        let mut drain = r.drain();
        assert_eq!(drain.next(), Some(2));
        drop(drain);

        assert!(r.is_empty());
        r.assert_invariants();
    }

    #[test]
    fn clone_is_independent() {
        let mut a = ring(3);
        a.extend([1, 2]);
        let mut b = a.clone();
        b.insert(3);
        b.insert(4);

        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }
}
