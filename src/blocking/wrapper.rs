use crate::blocking::BlockingQueue;
use crate::error::SendError;
use event_listener::EventListener;
use futures_sink::Sink;
use futures_util::{ready, Stream};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// [`Sink`] adapter over a [`BlockingQueue`].
///
/// The sink is always ready because inserting never waits for space.
pub struct QueueSink<T> {
    inner: Option<BlockingQueue<T>>,
}

impl<T> QueueSink<T> {
    pub fn new(queue: BlockingQueue<T>) -> Self {
        Self { inner: Some(queue) }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<T> Sink<T> for QueueSink<T> {
    type Error = SendError;

    fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.poll_open()
    }

    fn start_send(self: Pin<&mut Self>, item: T) -> Result<(), Self::Error> {
        self.inner
            .as_ref()
            .map(|queue| {
                queue.offer(item);
            })
            .ok_or(SendError::Closed)
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.poll_open()
    }

    fn poll_close(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner = None;
        Poll::Ready(Ok(()))
    }
}

impl<T> QueueSink<T> {
    fn poll_open(&self) -> Poll<Result<(), SendError>> {
        if self.is_closed() {
            Poll::Ready(Err(SendError::Closed))
        } else {
            Poll::Ready(Ok(()))
        }
    }
}

/// [`Stream`] of elements taken from a [`BlockingQueue`].
///
/// The queue has no closed state, so the stream never ends.
pub struct QueueStream<T> {
    queue: BlockingQueue<T>,
    listener: Option<EventListener>,
}

impl<T> QueueStream<T> {
    pub fn new(queue: BlockingQueue<T>) -> Self {
        Self {
            queue,
            listener: None,
        }
    }
}

impl<T> Stream for QueueStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(item) = this.queue.poll() {
                this.listener = None;
                return Poll::Ready(Some(item));
            }

            match this.listener.as_mut() {
                // register first, then look again before sleeping
                None => this.listener = Some(this.queue.inner.event.listen()),
                Some(listener) => {
                    ready!(Pin::new(listener).poll(cx));
                    this.listener = None;
                }
            }
        }
    }
}

impl<T> BlockingQueue<T> {
    pub fn sink(&self) -> QueueSink<T> {
        QueueSink::new(self.clone())
    }

    pub fn stream(&self) -> QueueStream<T> {
        QueueStream::new(self.clone())
    }
}
