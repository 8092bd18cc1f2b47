use crate::{BlockingQueue, ConcurrentQueue, RingBuffer};
use std::collections::VecDeque;

/// Identity of a queue's shared state, used to refuse draining a queue into
/// itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueueId(usize);

impl QueueId {
    pub(crate) fn of<S>(state: *const S) -> Self {
        QueueId(state as usize)
    }
}

/// A collection that [`BlockingQueue::drain_to`] can move elements into.
pub trait DrainTarget<T> {
    fn accept(&mut self, item: T);

    /// The queue behind this target, if it is one of this crate's queues.
    fn queue_id(&self) -> Option<QueueId> {
        None
    }
}

impl<T> DrainTarget<T> for Vec<T> {
    fn accept(&mut self, item: T) {
        self.push(item)
    }
}

impl<T> DrainTarget<T> for VecDeque<T> {
    fn accept(&mut self, item: T) {
        self.push_back(item)
    }
}

impl<T> DrainTarget<T> for RingBuffer<T> {
    fn accept(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T> DrainTarget<T> for BlockingQueue<T> {
    fn accept(&mut self, item: T) {
        self.offer(item);
    }

    fn queue_id(&self) -> Option<QueueId> {
        Some(self.id())
    }
}

impl<T> DrainTarget<T> for ConcurrentQueue<T> {
    fn accept(&mut self, item: T) {
        self.offer(item);
    }
}

impl<T, D: DrainTarget<T> + ?Sized> DrainTarget<T> for &mut D {
    fn accept(&mut self, item: T) {
        (**self).accept(item)
    }

    fn queue_id(&self) -> Option<QueueId> {
        (**self).queue_id()
    }
}
