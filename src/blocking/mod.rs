mod interrupt;
mod target;
pub mod wrapper;

pub use self::interrupt::Interrupt;
pub use self::target::{DrainTarget, QueueId};

use self::interrupt::Wake;
use crate::error::{CapacityError, DrainError, Interrupted};
use crate::loom::{Arc, Condvar, Mutex, MutexGuard};
use crate::ring::RingBuffer;
use event_listener::Event;
use log::debug;
use std::fmt;
use std::sync::PoisonError;
use std::time::{Duration, Instant};

struct Shared<T> {
    ring: Mutex<RingBuffer<T>>,
    /// Signaled once per inserted element.
    not_empty: Condvar,
    /// Async counterpart of `not_empty`.
    event: Event,
    capacity: usize,
}

#[derive(Clone, Copy)]
enum Deadline {
    Never,
    At(Instant),
}

impl Deadline {
    fn after(timeout: Duration) -> Self {
        // a timeout too large to represent waits forever
        Instant::now()
            .checked_add(timeout)
            .map_or(Deadline::Never, Deadline::At)
    }
}

/// A thread-safe most-recently-inserted queue.
///
/// Producers never block: inserting into a full queue evicts the oldest
/// element. Consumers can poll, wait with a timeout, or wait indefinitely.
/// Every operation runs under a single lock, so all of them observe one
/// total order.
///
/// Cloning the handle is cheap and every clone refers to the same queue.
pub struct BlockingQueue<T> {
    inner: Arc<Shared<T>>,
}

impl<T> Clone for BlockingQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> BlockingQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        let ring = RingBuffer::new(capacity)?;
        let shared = Shared {
            ring: Mutex::new(ring),
            not_empty: Condvar::new(),
            event: Event::new(),
            capacity,
        };
        Ok(Self {
            inner: Arc::new(shared),
        })
    }

    /// Inserts `item`, evicting the oldest element if the queue is full.
    ///
    /// Always returns `true`; the return value only exists for parity with
    /// capacity-rejecting queues.
    pub fn offer(&self, item: T) -> bool {
        self.offer_evicting(item);
        true
    }

    /// Like [`offer`](Self::offer), but hands back the element that was
    /// evicted to make room, if any.
    pub fn offer_evicting(&self, item: T) -> Option<T> {
        let mut ring = self.lock();
        let evicted = ring.insert(item);
        self.inner.not_empty.notify_one();
        drop(ring);

        self.inner.event.notify_additional(1);
        evicted
    }

    /// Same as [`offer`](Self::offer): inserting never waits for space.
    pub fn put(&self, item: T) {
        self.offer(item);
    }

    /// Same as [`offer`](Self::offer). The timeout is never used because
    /// inserting never waits for space.
    pub fn offer_timeout(&self, item: T, _timeout: Duration) -> bool {
        self.offer(item)
    }

    pub fn poll(&self) -> Option<T> {
        self.lock().remove()
    }

    /// Removes the head, waiting up to `timeout` for one to arrive.
    ///
    /// Returns `None` if the timeout elapses first. A zero timeout never
    /// blocks.
    pub fn poll_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Deadline::after(timeout);
        let mut ring = self.lock();
        loop {
            if let Some(item) = ring.remove() {
                return Some(item);
            }
            ring = self.wait_until(ring, deadline)?;
        }
    }

    /// Like [`poll_timeout`](Self::poll_timeout), but gives up with
    /// [`Interrupted`] once `interrupt` is raised.
    pub fn poll_timeout_interruptible(
        &self,
        timeout: Duration,
        interrupt: &Interrupt,
    ) -> Result<Option<T>, Interrupted>
    where
        T: Send + 'static,
    {
        let deadline = Deadline::after(timeout);
        // dropped after `ring`, so the token never waits on our lock
        let _registration = interrupt.register(self.id(), self.waker());
        let mut ring = self.lock();
        loop {
            if let Some(item) = ring.remove() {
                return Ok(Some(item));
            }
            if interrupt.consume() {
                return Err(self.interrupted());
            }
            ring = match self.wait_until(ring, deadline) {
                Some(ring) => ring,
                None => return Ok(None),
            };
        }
    }

    /// Removes the head, waiting as long as it takes for one to arrive.
    pub fn take(&self) -> T {
        let mut ring = self.lock();
        loop {
            if let Some(item) = ring.remove() {
                return item;
            }
            ring = self.wait(ring);
        }
    }

    /// Like [`take`](Self::take), but gives up with [`Interrupted`] once
    /// `interrupt` is raised. An element that is already available is
    /// returned even if the interrupt is pending.
    pub fn take_interruptible(&self, interrupt: &Interrupt) -> Result<T, Interrupted>
    where
        T: Send + 'static,
    {
        let _registration = interrupt.register(self.id(), self.waker());
        let mut ring = self.lock();
        loop {
            if let Some(item) = ring.remove() {
                return Ok(item);
            }
            if interrupt.consume() {
                return Err(self.interrupted());
            }
            ring = self.wait(ring);
        }
    }

    /// Removes the head, waiting asynchronously for one to arrive.
    ///
    /// Dropping the future before it completes loses no element, and a
    /// wakeup it had already received is passed on to another waiter.
    pub async fn recv(&self) -> T {
        loop {
            let listener = self.inner.event.listen();
            if let Some(item) = self.poll() {
                return item;
            }
            listener.await;
        }
    }

    /// Moves every element into `target`, oldest first.
    pub fn drain_to<D>(&self, target: &mut D) -> Result<usize, DrainError>
    where
        D: DrainTarget<T> + ?Sized,
    {
        self.drain_to_max(target, usize::MAX)
    }

    /// Moves at most `max` elements into `target`, oldest first.
    ///
    /// Fails without removing anything if `target` is this queue.
    ///
    /// The elements are removed under the lock and handed to `target` after
    /// it is released. If [`DrainTarget::accept`] panics, the elements not
    /// yet handed over are dropped; they are not returned to the queue.
    pub fn drain_to_max<D>(&self, target: &mut D, max: usize) -> Result<usize, DrainError>
    where
        D: DrainTarget<T> + ?Sized,
    {
        if target.queue_id() == Some(self.id()) {
            return Err(DrainError::SelfDrain);
        }
        if max == 0 {
            return Ok(0);
        }

        let drained: Vec<T> = {
            let mut ring = self.lock();
            let n = max.min(ring.len());
            (0..n).filter_map(|_| ring.remove()).collect()
        };

        // handed over after unlocking so draining into another queue
        // never holds both locks
        let transferred = drained.len();
        for item in drained {
            target.accept(item);
        }

        debug!("drained {} elements", transferred);
        Ok(transferred)
    }

    /// Always `usize::MAX`: inserting never blocks, so there is no
    /// remaining capacity to wait for.
    pub fn remaining_capacity(&self) -> usize {
        usize::MAX
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().peek().cloned()
    }

    /// Runs `f` on the head under the lock, for element types that are not
    /// `Clone`.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.lock().peek().map(f)
    }

    pub fn contains(&self, target: &T) -> bool
    where
        T: PartialEq,
    {
        self.lock().contains(target)
    }

    pub fn clear(&self) {
        let mut ring = self.lock();
        while ring.remove().is_some() {}
    }

    /// Copies the current elements, oldest first.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().iter().cloned().collect()
    }

    /// Iterates over a [`snapshot`](Self::snapshot). The lock is only held
    /// while the snapshot is taken, so later inserts and removals are not
    /// reflected.
    pub fn iter(&self) -> std::vec::IntoIter<T>
    where
        T: Clone,
    {
        self.snapshot().into_iter()
    }

    pub fn id(&self) -> QueueId {
        QueueId::of(&*self.inner as *const Shared<T>)
    }

    fn lock(&self) -> MutexGuard<'_, RingBuffer<T>> {
        // every mutation of the ring completes before any user code runs,
        // so a poisoned ring is still consistent
        self.inner
            .ring
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, ring: MutexGuard<'a, RingBuffer<T>>) -> MutexGuard<'a, RingBuffer<T>> {
        self.inner
            .not_empty
            .wait(ring)
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits until woken or `deadline` passes. Returns `None` once the
    /// deadline has passed.
    fn wait_until<'a>(
        &self,
        ring: MutexGuard<'a, RingBuffer<T>>,
        deadline: Deadline,
    ) -> Option<MutexGuard<'a, RingBuffer<T>>> {
        match deadline {
            Deadline::Never => Some(self.wait(ring)),
            Deadline::At(at) => {
                let remaining = at.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    debug!("timed wait expired");
                    return None;
                }
                let (ring, _) = self
                    .inner
                    .not_empty
                    .wait_timeout(ring, remaining)
                    .unwrap_or_else(PoisonError::into_inner);
                Some(ring)
            }
        }
    }

    /// Wakes every blocked consumer so interrupted ones can see their flag.
    /// Consumers waiting on other tokens go back to sleep.
    fn waker(&self) -> Wake
    where
        T: Send + 'static,
    {
        let queue = self.clone();
        Box::new(move || {
            // taking the lock orders the raised flag before a consumer's
            // next check, so none can miss the wakeup
            let _ring = queue.lock();
            queue.inner.not_empty.notify_all();
        })
    }

    fn interrupted(&self) -> Interrupted {
        // the wakeup that reached this consumer may have been meant for
        // another one
        self.inner.not_empty.notify_one();
        debug!("blocked consumer interrupted");
        Interrupted
    }
}

impl<T> Extend<T> for BlockingQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.offer(item);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingQueue")
            .field("capacity", &self.inner.capacity)
            .field("items", &*self.lock())
            .finish()
    }
}
