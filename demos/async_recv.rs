use mri_queue::BlockingQueue;

#[tokio::main]
async fn main() {
    let queue = BlockingQueue::new(128).unwrap();

    let producer = queue.clone();
    tokio::spawn(async move {
        for i in 0..10 {
            producer.offer(i);
        }
    });

    for _ in 0..10 {
        println!("got = {}", queue.recv().await);
    }
}
