use prio_heap::{Collection, Error, Heap, PriorityQueue};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(0x5eed_1234)
}

#[test]
fn test_insert_then_remove_all() {
    init_logger();
    let mut heap = Heap::new();
    for x in [4, 6, 2, 8, 5, 9, 1] {
        heap.insert(x);
        assert!(heap.check_integrity());
    }
    assert_eq!(heap.get_root_item(), Ok(&1));

    let mut out = Vec::new();
    for _ in 0..7 {
        out.push(heap.remove_root_item().unwrap());
        assert!(heap.check_integrity());
    }
    assert_eq!(out, [1, 2, 4, 5, 6, 8, 9]);
    assert!(heap.is_empty());
}

#[test]
fn test_display_tracks_storage() {
    let mut heap = Heap::new();
    heap.insert(4);
    heap.insert(6);
    assert_eq!(heap.to_string(), "[_, 4, 6]");
    heap.insert(2);
    assert_eq!(heap.to_string(), "[_, 2, 6, 4]");
    heap.insert(8);
    assert_eq!(heap.to_string(), "[_, 2, 6, 4, 8]");
    heap.insert(5);
    heap.insert(9);
    assert_eq!(heap.to_string(), "[_, 2, 5, 4, 8, 6, 9]");
    heap.insert(1);
    assert_eq!(heap.to_string(), "[_, 1, 5, 2, 8, 6, 9, 4]");

    assert_eq!(heap.remove_root_item(), Ok(1));
    assert_eq!(heap.to_string(), "[_, 2, 5, 4, 8, 6, 9]");
    assert_eq!(heap.remove_root_item(), Ok(2));
    assert_eq!(heap.to_string(), "[_, 4, 5, 9, 8, 6]");
}

#[test]
fn test_round_trip_single() {
    let mut heap = Heap::new();
    heap.insert("only");
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.remove_root_item(), Ok("only"));
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
}

#[test]
fn test_empty_get_root_item() {
    let heap = Heap::<i32>::new();
    assert_eq!(
        heap.get_root_item(),
        Err(Error::EmptyCollection(Collection::Heap))
    );
    assert!(heap.is_empty());
}

#[test]
fn test_empty_remove_root_item() {
    let mut heap = Heap::<i32>::new();
    assert_eq!(
        heap.remove_root_item(),
        Err(Error::EmptyCollection(Collection::Heap))
    );
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);

    heap.insert(7);
    assert_eq!(heap.remove_root_item(), Ok(7));
    assert!(heap.remove_root_item().is_err());
    assert!(heap.is_empty());
}

#[test]
fn test_is_empty_does_not_mutate() {
    let mut heap = Heap::from([3, 1, 2]);
    let before = heap.clone().into_vec();
    for _ in 0..10 {
        assert!(!heap.is_empty());
    }
    assert_eq!(heap.clone().into_vec(), before);
    heap.clear();
    for _ in 0..10 {
        assert!(heap.is_empty());
    }
}

#[test]
fn test_duplicates() {
    let data = vec![9, 11, 9, 9, 9, 9, 11, 2, 3, 4, 11, 9, 0, 0, 0, 0];
    let mut sorted = data.clone();
    sorted.sort();

    let mut heap = Heap::new();
    heap.extend(data);
    assert!(heap.check_integrity());
    assert_eq!(heap.into_sorted_vec(), sorted);
}

fn check_to_vec(mut data: Vec<i32>) {
    let heap = Heap::from(data.clone());
    assert!(heap.check_integrity());
    let mut v: Vec<i32> = heap.clone().into_vec();
    v.sort();
    data.sort();

    assert_eq!(v, data);
    assert_eq!(heap.into_sorted_vec(), data);
}

#[test]
fn test_to_vec() {
    check_to_vec(vec![]);
    check_to_vec(vec![5]);
    check_to_vec(vec![3, 2]);
    check_to_vec(vec![2, 3]);
    check_to_vec(vec![5, 1, 2]);
    check_to_vec(vec![1, 100, 2, 3]);
    check_to_vec(vec![1, 3, 5, 7, 9, 2, 4, 6, 8, 0]);
    check_to_vec(vec![2, 4, 6, 2, 1, 8, 10, 3, 5, 7, 0, 9, 1]);
    check_to_vec(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    check_to_vec(vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    check_to_vec(vec![5, 4, 3, 2, 1, 5, 4, 3, 2, 1, 5, 4, 3, 2, 1]);
}

#[test]
fn test_peek_and_remove() {
    let data = vec![2, 4, 6, 2, 1, 8, 10, 3, 5, 7, 0, 9, 1];
    let mut sorted = data.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    let mut heap: Heap<_> = data.into_iter().collect();
    while !heap.is_empty() {
        assert_eq!(heap.get_root_item().ok(), sorted.last());
        assert_eq!(heap.remove_root_item().ok(), sorted.pop());
    }
}

#[test]
fn test_into_iter_sorted_size_hint() {
    let heap = Heap::from(vec![2, 4, 6, 2, 1, 8, 10, 3, 5, 7, 0, 9, 1]);
    let mut it = heap.into_iter_sorted();
    let mut expected = 13;
    while expected > 0 {
        assert_eq!(it.len(), expected);
        assert!(it.next().is_some());
        expected -= 1;
    }
    assert_eq!(it.size_hint(), (0, Some(0)));
    assert_eq!(it.next(), None);
}

#[test]
fn test_iter_visits_everything() {
    let heap = Heap::from([5, 9, 3]);
    assert_eq!(heap.iter().len(), 3);
    let mut seen: Vec<_> = (&heap).into_iter().copied().collect();
    seen.sort();
    assert_eq!(seen, [3, 5, 9]);
    assert_eq!(heap.iter().next(), Some(&3));
}

#[test]
fn test_random_operations_keep_invariants() {
    init_logger();
    let mut rng = rng();
    let mut heap = Heap::new();
    let mut model: Vec<u32> = Vec::new();

    for _ in 0..5_000 {
        if rng.gen::<bool>() || model.is_empty() {
            let x = rng.gen_range(0, 100);
            heap.insert(x);
            model.push(x);
        } else {
            let min = *model.iter().min().unwrap();
            let idx = model.iter().position(|&x| x == min).unwrap();
            model.swap_remove(idx);
            assert_eq!(heap.remove_root_item(), Ok(min));
        }
        assert_eq!(heap.len(), model.len());
        assert!(heap.check_integrity());
    }
}

#[test]
fn test_random_min_extraction_order() {
    let mut rng = rng();
    for n in [0usize, 1, 2, 3, 7, 8, 31, 100, 1000] {
        let data: Vec<i64> = (0..n).map(|_| rng.gen_range(-500, 500)).collect();
        let mut heap = Heap::with_capacity(n);
        for &x in &data {
            heap.insert(x);
        }

        let mut out = Vec::with_capacity(n);
        while let Ok(x) = heap.remove_root_item() {
            out.push(x);
        }

        let mut sorted = data;
        sorted.sort();
        assert_eq!(out, sorted);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Patient {
    priority: u8,
    complaint: &'static str,
}

fn patient(priority: u8, complaint: &'static str) -> Patient {
    Patient {
        priority,
        complaint,
    }
}

#[test]
fn test_queue_priority_order() {
    init_logger();
    let mut queue = PriorityQueue::new();
    queue.enqueue(patient(3, "chronic"));
    queue.enqueue(patient(1, "life-threatening"));
    queue.enqueue(patient(2, "major fracture"));

    assert_eq!(queue.len(), 3);
    assert_eq!(queue.peek().map(|p| p.priority), Ok(1));
    assert_eq!(queue.dequeue().map(|p| p.priority), Ok(1));
    assert_eq!(queue.dequeue().map(|p| p.priority), Ok(2));
    assert_eq!(queue.dequeue().map(|p| p.priority), Ok(3));
    assert!(queue.is_empty());
}

#[test]
fn test_queue_empty_errors() {
    let mut queue = PriorityQueue::<Patient>::new();
    let err = queue.dequeue().unwrap_err();
    assert_eq!(err, Error::EmptyCollection(Collection::PriorityQueue));
    assert_eq!(err.to_string(), "the priority queue is empty");
    assert!(queue.peek().is_err());
    assert!(queue.is_empty());
}

#[test]
fn test_queue_triage() {
    let complaints = [
        (4, "walk-in"),
        (1, "life-threatening"),
        (4, "walk-in"),
        (3, "chronic"),
        (2, "major fracture"),
        (4, "walk-in"),
        (3, "chronic"),
        (1, "life-threatening"),
    ];
    let mut queue: PriorityQueue<_> = complaints
        .iter()
        .map(|&(p, c)| patient(p, c))
        .collect();
    queue.extend([patient(5, "paperwork")]);
    assert_eq!(queue.len(), 9);

    let mut order = Vec::new();
    while let Ok(p) = queue.dequeue() {
        order.push(p.priority);
    }
    assert_eq!(order, [1, 1, 2, 3, 3, 4, 4, 4, 5]);
}

#[test]
fn test_queue_into_sorted_vec() {
    let mut queue = PriorityQueue::with_capacity(4);
    queue.extend([8, 3, 5, 1]);
    assert_eq!(queue.iter().count(), 4);
    assert_eq!(queue.clone().into_sorted_vec(), [1, 3, 5, 8]);
    queue.clear();
    assert!(queue.is_empty());
    assert!(queue.peek().is_err());
}
