use mri_queue::RingBuffer;

fn main() {
    let mut ring = RingBuffer::new(5).unwrap();

    for i in 0..7 {
        if let Some(evicted) = ring.insert(i) {
            println!("evicted = {}", evicted);
        }
    }

    println!("kept = {:?}", ring);

    while let Some(i) = ring.remove() {
        println!("got = {}", i);
    }
}
