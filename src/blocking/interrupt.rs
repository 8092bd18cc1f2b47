use super::target::QueueId;
use crate::loom::{Arc, AtomicBool, Mutex, MutexGuard, Ordering};
use std::fmt;
use std::sync::PoisonError;

/// Wakes every consumer blocked on one queue.
pub(crate) type Wake = Box<dyn Fn() + Send + Sync>;

struct Inner {
    flag: AtomicBool,
    /// Queues that a holder of this token is currently blocked on.
    waiters: Mutex<Vec<(QueueId, Wake)>>,
}

/// Cancellation handle for a blocked consumer.
///
/// Pass it to [`take_interruptible`] or [`poll_timeout_interruptible`] and
/// raise it from any thread with [`interrupt`](Self::interrupt). While a
/// wait is in progress the token knows which queue it is blocked on, so
/// raising it needs no queue handle. The flag is cleared when a wait
/// consumes it, so one token can be reused for successive waits.
///
/// [`take_interruptible`]: crate::BlockingQueue::take_interruptible
/// [`poll_timeout_interruptible`]: crate::BlockingQueue::poll_timeout_interruptible
#[derive(Clone)]
pub struct Interrupt {
    inner: Arc<Inner>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                flag: AtomicBool::new(false),
                waiters: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.inner.flag.load(Ordering::Acquire)
    }

    /// Raises the flag and wakes the queues its holders are blocked on.
    ///
    /// A holder that is not waiting yet sees the flag when its next wait
    /// begins.
    pub fn interrupt(&self) {
        let waiters = self.waiters();
        self.inner.flag.store(true, Ordering::Release);
        for (_, wake) in waiters.iter() {
            wake();
        }
    }

    /// Clears the flag, returning whether it was raised.
    pub(crate) fn consume(&self) -> bool {
        self.inner.flag.swap(false, Ordering::AcqRel)
    }

    /// Records that a holder is about to block on queue `id`. The record is
    /// removed when the returned guard drops, which must happen after the
    /// queue's lock is released.
    pub(crate) fn register(&self, id: QueueId, wake: Wake) -> Registration<'_> {
        self.waiters().push((id, wake));
        Registration {
            interrupt: self,
            id,
        }
    }

    fn waiters(&self) -> MutexGuard<'_, Vec<(QueueId, Wake)>> {
        self.inner
            .waiters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interrupt")
            .field("interrupted", &self.is_interrupted())
            .finish()
    }
}

pub(crate) struct Registration<'a> {
    interrupt: &'a Interrupt,
    id: QueueId,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let mut waiters = self.interrupt.waiters();
        if let Some(pos) = waiters.iter().position(|(id, _)| *id == self.id) {
            waiters.swap_remove(pos);
        }
    }
}
