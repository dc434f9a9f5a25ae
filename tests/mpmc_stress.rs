//! Multi-threaded stress scenarios: wide producer/consumer fan-out on a
//! large ring, and a tight single-slot ping-pong that forces every
//! operation through the pairing/blocking path on every call.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use theta_queue::MpmcQueue;

#[test]
fn scenario_3_four_producers_four_consumers_no_loss_no_duplication() {
    const PRODUCERS: u32 = 4;
    const PER_PRODUCER: u32 = 1000;

    let q: Arc<MpmcQueue<u32, 128>> = Arc::new(MpmcQueue::new());
    let mut handles = Vec::new();

    for p in 0..PRODUCERS {
        let q = Arc::clone(&q);
        handles.push(thread::spawn(move || {
            let base = p * PER_PRODUCER;
            for i in 0..PER_PRODUCER {
                q.push(base + i);
            }
        }));
    }

    let popped = Arc::new(Mutex::new(Vec::new()));
    for _ in 0..PRODUCERS {
        let q = Arc::clone(&q);
        let popped = Arc::clone(&popped);
        handles.push(thread::spawn(move || {
            let mut local = Vec::with_capacity(PER_PRODUCER as usize);
            for _ in 0..PER_PRODUCER {
                local.push(q.pop());
            }
            popped.lock().unwrap().extend(local);
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    let got: HashSet<u32> = popped.lock().unwrap().iter().copied().collect();
    let expected: HashSet<u32> = (0..PRODUCERS * PER_PRODUCER).collect();
    assert_eq!(got, expected, "no value may be lost or duplicated");
    assert_eq!(popped.lock().unwrap().len() as u32, PRODUCERS * PER_PRODUCER);
}

#[test]
fn scenario_4_single_slot_ring_ping_pong_ten_thousand_iterations() {
    let q: Arc<MpmcQueue<u32, 1>> = Arc::new(MpmcQueue::new());
    let q_producer = Arc::clone(&q);

    let producer = thread::spawn(move || {
        for i in 0..10_000u32 {
            q_producer.push(i);
        }
    });

    for i in 0..10_000u32 {
        assert_eq!(q.pop(), i);
    }

    producer.join().unwrap();
}

#[test]
fn heavy_contention_many_to_many_preserves_total_count() {
    const PRODUCERS: usize = 8;
    const CONSUMERS: usize = 8;
    const PER_PRODUCER: u64 = 5_000;

    let q: Arc<MpmcQueue<u64, 256>> = Arc::new(MpmcQueue::new());
    let mut handles = Vec::new();

    for p in 0..PRODUCERS {
        let q = Arc::clone(&q);
        handles.push(thread::spawn(move || {
            let base = p as u64 * PER_PRODUCER;
            for i in 0..PER_PRODUCER {
                q.push(base + i);
            }
        }));
    }

    let total = PRODUCERS as u64 * PER_PRODUCER;
    let per_consumer = total / CONSUMERS as u64;
    let received_count = Arc::new(std::sync::atomic::AtomicU64::new(0));

    for c in 0..CONSUMERS {
        let q = Arc::clone(&q);
        let received_count = Arc::clone(&received_count);
        let share = if c == CONSUMERS - 1 {
            total - per_consumer * (CONSUMERS as u64 - 1)
        } else {
            per_consumer
        };
        handles.push(thread::spawn(move || {
            for _ in 0..share {
                q.pop();
                received_count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(
        received_count.load(std::sync::atomic::Ordering::Relaxed),
        total
    );
}
