use mri_queue::BlockingQueue;
use std::thread;
use std::time::Duration;

fn main() {
    let queue = BlockingQueue::new(16).unwrap();

    let producer = {
        let queue = queue.clone();
        thread::spawn(move || {
            for i in 0..10 {
                queue.put(i);
                thread::sleep(Duration::from_millis(10));
            }
        })
    };

    while let Some(i) = queue.poll_timeout(Duration::from_millis(200)) {
        println!("got = {}", i);
    }

    producer.join().unwrap();
}
