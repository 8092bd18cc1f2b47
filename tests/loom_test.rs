#![cfg(loom)]

use loom::thread;
use mri_queue::error::Interrupted;
use mri_queue::{BlockingQueue, Interrupt};

#[test]
fn offer_take() {
    loom::model(|| {
        let queue = BlockingQueue::new(1).unwrap();

        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                queue.offer(0);
            })
        };

        assert_eq!(queue.take(), 0);
        producer.join().unwrap();
        assert!(queue.is_empty());
    })
}

#[test]
fn eviction_under_race() {
    loom::model(|| {
        let queue = BlockingQueue::new(1).unwrap();

        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                queue.offer(1);
                queue.offer(2);
            })
        };

        let first = queue.take();
        producer.join().unwrap();

        match first {
            1 => assert!(queue.len() <= 1),
            2 => assert!(queue.is_empty()),
            other => panic!("unexpected element {}", other),
        }
    })
}

#[test]
fn interrupt_wakes_consumer() {
    loom::model(|| {
        let queue = BlockingQueue::<u32>::new(2).unwrap();
        let interrupt = Interrupt::new();

        let consumer = {
            let queue = queue.clone();
            let interrupt = interrupt.clone();
            thread::spawn(move || queue.take_interruptible(&interrupt))
        };

        interrupt.interrupt();
        assert_eq!(consumer.join().unwrap(), Err(Interrupted));
    })
}

#[test]
fn interrupt_keeps_wakeup_for_other_consumer() {
    loom::model(|| {
        let queue = BlockingQueue::new(2).unwrap();
        let first = Interrupt::new();
        let second = Interrupt::new();

        let a = {
            let queue = queue.clone();
            let first = first.clone();
            thread::spawn(move || queue.take_interruptible(&first))
        };
        let b = {
            let queue = queue.clone();
            let second = second.clone();
            thread::spawn(move || queue.take_interruptible(&second))
        };

        first.interrupt();
        queue.offer(7);

        let a = a.join().unwrap();
        if a.is_ok() {
            // an available element wins over a pending interrupt
            second.interrupt();
        }
        let b = b.join().unwrap();

        match (a, b) {
            (Ok(7), Err(Interrupted)) | (Err(Interrupted), Ok(7)) => {}
            other => panic!("unexpected outcome {:?}", other),
        }
    })
}
