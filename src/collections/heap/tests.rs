#![cfg(test)]

use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;
use crate::collections::compare::{ComparatorExt, NaturalOrder};
use crate::collections::traits::{Buffer, BufferCursor, Container};
use crate::util::alloc::CountedDrop;
use crate::util::error::{BufferUnderflow, InvalidArgument};

fn sorted<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    values.sort();
    values
}

#[test]
fn test_removal_order() {
    let mut heap = PriorityBuffer::with_cap(2).unwrap();
    for i in [5, 3, 8, 1, 4] {
        heap.add(i).unwrap();
    }

    for expected in [1, 3, 4, 5, 8] {
        assert_eq!(heap.remove(), Ok(expected));
    }
    assert_eq!(heap.len(), 0);
    assert_eq!(
        heap.remove(),
        Err(BufferUnderflow),
        "Removing from an empty heap should underflow."
    );
    assert_eq!(heap.get(), Err(BufferUnderflow));
}

#[test]
fn test_descending() {
    let mut heap = PriorityBuffer::with_order(Order::Descending);
    heap.extend([5, 3, 8, 1, 4, 8]);
    assert!(heap.is_heap());
    assert_eq!(heap.peek(), Ok(&8));
    assert_eq!(heap.into_sorted_vec(), [8, 8, 5, 4, 3, 1]);
}

#[test]
fn test_comparator() {
    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    let mut heap = PriorityBuffer::with_comparator(4, Order::Ascending, by_len.then(NaturalOrder))
        .unwrap();
    heap.extend(["ccc", "a", "bb", "b", "aaaa"]);

    assert_eq!(heap.into_sorted_vec(), ["a", "b", "bb", "ccc", "aaaa"]);

    let mut heap =
        PriorityBuffer::with_comparator(4, Order::Descending, NaturalOrder.reversed()).unwrap();
    heap.extend([2, 9, 4]);
    assert_eq!(
        heap.pop(),
        Ok(2),
        "A descending heap with a reversed comparator should act as a min-heap."
    );
}

#[test]
fn test_invalid_cap() {
    assert_eq!(
        PriorityBuffer::<u8>::with_cap(0).err(),
        Some(InvalidArgument {
            message: "the capacity of a PriorityBuffer must be greater than 0",
        })
    );
    assert!(
        PriorityBuffer::<u8, _>::with_comparator(0, Order::Descending, |a: &u8, b: &u8| a.cmp(b))
            .is_err()
    );
}

#[test]
fn test_growth() {
    let mut heap = PriorityBuffer::with_cap(3).unwrap();
    let values: Vec<u32> = (0..20).map(|i| (i * 7919) % 31).collect();

    heap.extend(values.iter().copied());
    assert_eq!(heap.cap(), 24, "Capacity should have doubled three times.");
    assert_eq!(heap.len(), values.len());
    assert!(heap.is_heap());

    assert_eq!(
        sorted(heap.iter().copied().collect()),
        sorted(values.clone()),
        "No element should be lost or duplicated by growth."
    );
    assert_eq!(heap.into_sorted_vec(), sorted(values));
}

#[test]
fn test_clear() {
    let counter = CountedDrop::new(0);
    let mut heap =
        PriorityBuffer::with_comparator(2, Order::Ascending, |_: &CountedDrop, _: &CountedDrop| {
            Ordering::Equal
        })
        .unwrap();

    for _ in 0..5 {
        heap.push(counter.clone());
    }
    let cap = heap.cap();

    heap.clear();
    assert_eq!(counter.take(), 5, "Clearing should drop every element.");
    assert!(heap.is_empty());
    assert_eq!(heap.cap(), cap, "Clearing should keep the current capacity.");
    assert_eq!(heap.get().err(), Some(BufferUnderflow));
}

#[test]
fn test_cursor_remove() {
    let mut heap: PriorityBuffer<u32> = [10, 20, 30, 40, 50, 60, 70, 35].into_iter().collect();
    assert!(heap.is_heap());

    let mut cursor = heap.cursor();
    assert!(
        cursor.remove().is_err(),
        "Removing before the first call to next should be an illegal state."
    );

    let mut removed = Vec::new();
    while let Some(value) = cursor.next() {
        let hit = *value == 60 || *value == 20;
        if hit {
            removed.push(cursor.remove().unwrap());
            assert!(
                cursor.remove().is_err(),
                "Removing twice for the same element should be an illegal state."
            );
        }
    }

    assert_eq!(sorted(removed), [20, 60]);
    assert_eq!(heap.len(), 6);
    assert!(heap.is_heap(), "Cursor removal should repair the heap.");
    assert_eq!(heap.into_sorted_vec(), [10, 30, 35, 40, 50, 70]);
}

#[test]
fn test_cursor_remove_percolates_up() {
    // Removing 90 moves 6 into its slot, where it must rise above 50.
    let mut heap = PriorityBuffer::with_cap(8).unwrap();
    heap.extend([1, 50, 2, 90, 60, 3, 4, 95, 96, 61, 62, 5, 6]);
    assert!(heap.is_heap());

    let mut cursor = heap.cursor();
    while let Some(value) = cursor.next() {
        let hit = *value == 90;
        if hit {
            assert_eq!(cursor.remove(), Ok(90));
            break;
        }
    }

    assert!(heap.is_heap());
    assert_eq!(
        heap.into_sorted_vec(),
        [1, 2, 3, 4, 5, 6, 50, 60, 61, 62, 95, 96]
    );
}

#[test]
fn test_cursor_remove_all() {
    let mut heap: PriorityBuffer<i32> = (0..50).rev().collect();
    let mut cursor = heap.cursor();
    let mut count = 0;
    while cursor.next().is_some() {
        cursor.remove().unwrap();
        count += 1;
    }

    assert_eq!(count, 50, "Every element should be visited when removing as we go.");
    assert!(Container::is_empty(&heap));
}

#[test]
fn test_iterators_are_independent() {
    let heap: PriorityBuffer<u8> = (1..=5).collect();
    let mut first = heap.iter();
    first.next();
    assert_eq!(heap.iter().count(), 5);
    assert_eq!(first.count(), 4);
    assert_eq!(sorted(heap.into_iter().collect()), [1, 2, 3, 4, 5]);
}

#[derive(Debug, Clone)]
enum Op {
    Add(i16),
    Remove,
    CursorRemove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i16>().prop_map(Op::Add),
        1 => Just(Op::Remove),
        1 => (0_usize..64).prop_map(Op::CursorRemove),
    ]
}

proptest! {
    #[test]
    fn prop_heap_order_and_size(
        ops in prop::collection::vec(op(), 0..200),
        descending in any::<bool>(),
    ) {
        let order = if descending { Order::Descending } else { Order::Ascending };
        let mut heap = PriorityBuffer::with_order(order);
        let mut model: Vec<i16> = Vec::new();

        for op in ops {
            match op {
                Op::Add(value) => {
                    heap.push(value);
                    model.push(value);
                }
                Op::Remove => match heap.pop() {
                    Ok(value) => {
                        let expected = if descending {
                            model.iter().max().copied()
                        } else {
                            model.iter().min().copied()
                        };
                        prop_assert_eq!(Some(value), expected);
                        let index = model.iter().position(|v| *v == value).unwrap();
                        model.swap_remove(index);
                    }
                    Err(_) => {
                        prop_assert!(model.is_empty());
                    }
                },
                Op::CursorRemove(target) => {
                    let mut cursor = heap.cursor();
                    let mut step = 0;
                    while cursor.next().is_some() {
                        if step == target {
                            let value = cursor.remove().unwrap();
                            let index = model.iter().position(|v| *v == value).unwrap();
                            model.swap_remove(index);
                            break;
                        }
                        step += 1;
                    }
                }
            }

            prop_assert!(heap.is_heap());
            prop_assert_eq!(heap.len(), model.len());
        }

        let drained = heap.into_sorted_vec();
        let mut expected = model;
        expected.sort();
        if descending {
            expected.reverse();
        }
        prop_assert_eq!(drained, expected);
    }
}
