use criterion::{criterion_group, criterion_main, Criterion};
use mri_queue::BlockingQueue;
use std::sync::mpsc;
use std::thread;
use tokio::runtime::Runtime;

const COUNT: usize = 4096;

fn rt() -> Runtime {
    tokio::runtime::Builder::new_multi_thread().build().unwrap()
}

fn no_contention_blocking(c: &mut Criterion) {
    c.bench_function("blocking queue offer/poll", |b| {
        b.iter(|| {
            let queue = BlockingQueue::new(COUNT).unwrap();
            for i in 0..COUNT {
                queue.offer(i);
            }
            for _ in 0..COUNT {
                queue.poll();
            }
        })
    });
}

fn contention_blocking(c: &mut Criterion) {
    c.bench_function("contention blocking queue", |b| {
        b.iter(|| {
            let queue = BlockingQueue::new(COUNT).unwrap();
            let producer = {
                let queue = queue.clone();
                thread::spawn(move || {
                    for i in 0..COUNT {
                        queue.put(i);
                    }
                })
            };

            for _ in 0..COUNT {
                queue.take();
            }
            producer.join().unwrap();
        })
    });
}

fn contention_std_mpsc(c: &mut Criterion) {
    c.bench_function("contention std sync_channel", |b| {
        b.iter(|| {
            let (tx, rx) = mpsc::sync_channel(COUNT);
            let producer = thread::spawn(move || {
                for i in 0..COUNT {
                    tx.send(i).unwrap();
                }
            });

            for _ in 0..COUNT {
                rx.recv().unwrap();
            }
            producer.join().unwrap();
        })
    });
}

fn contention_async(c: &mut Criterion) {
    c.bench_function("contention blocking queue recv", |b| {
        b.to_async(rt()).iter(|| async move {
            let queue = BlockingQueue::new(COUNT).unwrap();

            let producer = queue.clone();
            tokio::spawn(async move {
                for i in 0..COUNT {
                    producer.offer(i);
                }
            });

            for _ in 0..COUNT {
                queue.recv().await;
            }
        })
    });
}

criterion_group!(uncontention, no_contention_blocking);
criterion_group!(contention, contention_blocking, contention_std_mpsc, contention_async);
criterion_main!(uncontention, contention);
