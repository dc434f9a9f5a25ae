//! Single-threaded end-to-end scenarios, literal from the queue's public
//! contract: capacity-4 mixed push/pop, capacity-2 round trip with a
//! rejected `try_push`, and capacity-8 fullness.

use theta_queue::MpmcQueue;

#[test]
fn scenario_1_mixed_try_and_blocking_calls() {
    let q: MpmcQueue<u32, 4> = MpmcQueue::new();

    assert_eq!(q.try_pop(), None);
    assert!(q.try_push(10));
    assert!(q.try_push(20));
    assert_eq!(q.size(), 2);
    assert_eq!(q.pop(), 10);
    assert_eq!(q.pop(), 20);
    assert_eq!(q.try_pop(), None);
}

#[test]
fn scenario_2_full_queue_round_trip() {
    let q: MpmcQueue<u32, 2> = MpmcQueue::new();

    q.push(1);
    q.push(2);
    assert!(!q.try_push(3));
    assert_eq!(q.pop(), 1);
    assert!(q.try_push(3));
    assert_eq!(q.pop(), 2);
    assert_eq!(q.pop(), 3);
}

#[test]
fn scenario_6_fullness_eight_refusals_then_recovery() {
    let q: MpmcQueue<u32, 8> = MpmcQueue::new();

    for i in 0..8 {
        assert!(q.try_push(i));
    }
    for _ in 0..8 {
        assert!(!q.try_push(999));
    }

    assert_eq!(q.pop(), 0);
    assert!(q.try_push(999));
}

#[test]
fn round_trip_law_preserves_single_producer_order() {
    let q: MpmcQueue<u32, 16> = MpmcQueue::new();
    let values: Vec<u32> = (0..16).collect();

    for &v in &values {
        q.push(v);
    }
    for &v in &values {
        assert_eq!(q.pop(), v);
    }
}

#[test]
fn try_push_on_full_queue_is_idempotent() {
    let q: MpmcQueue<u8, 2> = MpmcQueue::new();
    q.push(1);
    q.push(2);
    assert!(!q.try_push(3));
    assert!(!q.try_push(3));
    assert_eq!(q.size(), 2);
}

#[test]
fn try_pop_on_empty_queue_is_idempotent() {
    let q: MpmcQueue<u8, 4> = MpmcQueue::new();
    assert_eq!(q.try_pop(), None);
    assert_eq!(q.try_pop(), None);
    assert_eq!(q.size(), 0);
}

#[test]
fn capacity_is_constant_and_matches_the_const_generic() {
    let q: MpmcQueue<u8, 32> = MpmcQueue::new();
    assert_eq!(q.capacity(), 32);
    q.push(1);
    assert_eq!(q.capacity(), 32);
}
