use super::RingBuffer;
use std::iter::FusedIterator;

/// Borrowing iterator over a [`RingBuffer`], oldest element first.
pub struct Iter<'a, T> {
    buf: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(buf: &'a [Option<T>], head: usize, len: usize) -> Self {
        Self {
            buf,
            pos: head,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // An empty slot can only be the tail.
        let item = match self.buf[self.pos].as_ref() {
            Some(item) => item,
            None => {
                self.remaining = 0;
                return None;
            }
        };

        self.pos += 1;
        if self.pos == self.buf.len() {
            self.pos = 0;
        }
        self.remaining -= 1;

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf,
            pos: self.pos,
            remaining: self.remaining,
        }
    }
}

pub struct Drain<'a, T> {
    ring: &'a mut RingBuffer<T>,
}

impl<'a, T> Drain<'a, T> {
    pub(super) fn new(ring: &'a mut RingBuffer<T>) -> Self {
        Self { ring }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.remove()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.ring.clear();
    }
}

pub struct IntoIter<T> {
    ring: RingBuffer<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(ring: RingBuffer<T>) -> Self {
        Self { ring }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.remove()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
