use super::*;

#[test]
fn insert_value_at_each_position() {
    let _trace = trace_init();

    let mut list = List::from_iter([1, 3]);

    // front
    let zero = list.insert_value(list.begin(), 0).unwrap();
    assert_eq!(list.begin(), zero);
    assert_list!(list, [0, 1, 3]);

    // middle
    let three = list.advance(list.begin(), 2).unwrap();
    let two = list.insert_value(three, 2).unwrap();
    assert_eq!(list.get(two), Some(&2));
    assert_eq!(list.next(two), Ok(three));
    assert_list!(list, [0, 1, 2, 3]);

    // back
    let four = list.insert_value(list.end(), 4).unwrap();
    assert_eq!(list.prev(list.end()), Ok(four));
    assert_list!(list, [0, 1, 2, 3, 4]);
}

#[test]
fn insert_into_empty_list() {
    let mut list = List::new();
    let first = list.insert_iter(list.end(), [1, 2, 3]).unwrap();
    assert_eq!(first, list.begin());
    assert_list!(list, [1, 2, 3]);
}

#[test]
fn insert_repeated() {
    let mut list = List::from_iter([1, 2]);
    let two = list.next(list.begin()).unwrap();

    let first = list.insert_repeated(two, 3, 9).unwrap();
    assert_eq!(list.get(first), Some(&9));
    assert_eq!(list.prev(first), Ok(list.begin()));
    assert_list!(list, [1, 9, 9, 9, 2]);
}

#[test]
fn insert_nothing_returns_position() {
    let mut list = List::from_iter([1, 2]);
    let two = list.next(list.begin()).unwrap();
    let before = link_fingerprint(&list);

    assert_eq!(list.insert_repeated(two, 0, 7), Ok(two));
    assert_eq!(list.insert_iter(list.begin(), None), Ok(list.begin()));
    assert_eq!(list.insert_iter(list.end(), Vec::new()), Ok(list.end()));

    assert_eq!(link_fingerprint(&list), before);
    assert_list!(list, [1, 2]);
}

#[test]
fn insert_preserves_order_and_grows_by_count() {
    let mut list = List::from_iter([1, 5]);
    let five = list.next(list.begin()).unwrap();

    let first = list.insert_iter(five, 2..=4).unwrap();
    assert_eq!(list.get(first), Some(&2));
    assert_eq!(list.distance(first, five), Ok(3));
    assert_list!(list, [1, 2, 3, 4, 5]);
}

#[test]
fn insert_keeps_other_cursors_valid() {
    let mut list = List::from_iter([1, 2, 3]);
    let cursors = list.cursors().collect::<Vec<_>>();
    let end = list.end();

    list.insert_iter(cursors[1], [10, 11]).unwrap();
    list.push_front(0);
    list.push_back(4);

    let vals = cursors
        .iter()
        .map(|&c| list.get(c).copied())
        .collect::<Vec<_>>();
    assert_eq!(vals, [Some(1), Some(2), Some(3)]);
    assert_eq!(list.end(), end);
    assert_list!(list, [0, 1, 10, 11, 2, 3, 4]);
}

#[test]
fn insert_range_from_other_list() {
    let source = List::from_iter([10, 20, 30, 40]);
    let first = source.next(source.begin()).unwrap();
    let last = source.prev(source.end()).unwrap();

    let mut list = List::from_iter([1, 2]);
    let two = list.prev(list.end()).unwrap();
    let inserted = list.insert_range(two, &source, first, last).unwrap();
    assert_eq!(list.get(inserted), Some(&20));
    assert_list!(list, [1, 20, 30, 2]);

    // the source is untouched
    assert_list!(source, [10, 20, 30, 40]);
}

#[test]
fn range_covers_first_to_last() {
    let list = List::from_iter([1, 2, 3]);
    let two = list.next(list.begin()).unwrap();

    let all = list.range(list.begin(), list.end()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all.copied().collect::<Vec<_>>(), [1, 2, 3]);

    let tail = list.range(two, list.end()).unwrap();
    assert_eq!(tail.copied().collect::<Vec<_>>(), [2, 3]);

    let empty = list.range(two, two).unwrap();
    assert_eq!(empty.count(), 0);
}

#[test]
fn unordered_range_is_rejected() {
    let list = List::from_iter([1, 2, 3]);
    let last = list.prev(list.end()).unwrap();

    let err = list.range(last, list.begin()).unwrap_err();
    assert_eq!(err.reason(), crate::error::Reason::Unordered);

    // inserting from an unordered range leaves the destination untouched
    let mut dest = List::from_iter([7, 8]);
    let before = link_fingerprint(&dest);
    let err = dest
        .insert_range(dest.end(), &list, last, list.begin())
        .unwrap_err();
    assert_eq!(err.reason(), crate::error::Reason::Unordered);
    assert_eq!(link_fingerprint(&dest), before);
    assert_list!(dest, [7, 8]);
}

#[test]
fn foreign_position_is_rejected() {
    let _trace = trace_init();

    let mut a = List::from_iter([1, 2, 3]);
    let mut b = List::from_iter([4, 5]);
    let a_before = link_fingerprint(&a);
    let b_before = link_fingerprint(&b);

    for position in [b.begin(), b.end(), b.prev(b.end()).unwrap()] {
        let err = a.insert_value(position, 9).unwrap_err();
        assert_eq!(err.reason(), crate::error::Reason::Foreign);
        let err = a.insert_iter(position, [7, 8]).unwrap_err();
        assert_eq!(err.reason(), crate::error::Reason::Foreign);
        assert!(a.insert_repeated(position, 2, 6).is_err());
    }

    // a range from `a` is fine as a source, but not as a position in `b`
    let a_begin = a.begin();
    let a_end = a.end();
    assert!(b.insert_range(a_begin, &a, a_begin, a_end).is_err());
    // and `b`'s cursors cannot describe a range of `a`
    let b_end = b.end();
    assert!(b.insert_range(b_end, &a, b.begin(), b_end).is_err());

    assert_eq!(link_fingerprint(&a), a_before);
    assert_eq!(link_fingerprint(&b), b_before);
    assert_list!(a, [1, 2, 3]);
    assert_list!(b, [4, 5]);
}

#[test]
fn stale_position_is_rejected() {
    let mut list = List::from_iter([1, 2, 3]);
    let two = list.next(list.begin()).unwrap();
    list.erase(two).unwrap();

    // the freed slot is reused, but the old cursor still goes stale
    let new = list.insert_value(list.end(), 4).unwrap();
    assert_ne!(new, two);

    let err = list.insert_value(two, 9).unwrap_err();
    assert_eq!(err.reason(), crate::error::Reason::Stale);
    assert_list!(list, [1, 3, 4]);
}

#[test]
fn panicking_source_leaves_a_valid_list() {
    use std::panic::{self, AssertUnwindSafe};

    let mut list = List::from_iter([1, 5]);
    let five = list.next(list.begin()).unwrap();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let values = (2..).map(|i| if i == 4 { panic!("source failed") } else { i });
        let _ = list.insert_iter(five, values);
    }));
    assert!(result.is_err());

    // the values produced before the panic were linked in
    assert_list!(list, [1, 2, 3, 5]);
}
