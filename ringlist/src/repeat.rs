//! A lazy producer of repeated values.
use core::iter::FusedIterator;

/// An iterator that yields a value a fixed number of times.
///
/// This is the source used by [`List::insert_repeated`] and
/// [`List::assign_repeated`]. Every item but the last is a clone; the last
/// item moves the original value out, so repeating a value once never clones
/// it at all. Once exhausted, a `Repeat` cannot be restarted.
///
/// [`List::insert_repeated`]: crate::List::insert_repeated
/// [`List::assign_repeated`]: crate::List::assign_repeated
///
/// # Examples
///
/// ```
/// use ringlist::Repeat;
///
/// let words: Vec<String> = Repeat::new(String::from("hi"), 3).collect();
/// assert_eq!(words, ["hi", "hi", "hi"]);
///
/// assert_eq!(Repeat::new(1, 0).next(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: Option<T>,
    remaining: usize,
}

impl<T> Repeat<T> {
    /// Returns a producer that yields `value` exactly `count` times.
    #[must_use]
    pub fn new(value: T, count: usize) -> Self {
        Self {
            value: if count == 0 { None } else { Some(value) },
            remaining: count,
        }
    }

    /// Returns a producer that yields `value` once.
    #[must_use]
    pub fn once(value: T) -> Self {
        Self::new(value, 1)
    }
}

impl<T: Clone> Iterator for Repeat<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.remaining {
            0 => None,
            1 => {
                self.remaining = 0;
                self.value.take()
            }
            _ => {
                self.remaining -= 1;
                self.value.clone()
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Repeat<T> {}

impl<T: Clone> FusedIterator for Repeat<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{rc::Rc, vec::Vec};

    #[test]
    fn yields_count_items() {
        let items = Repeat::new(7, 4).collect::<Vec<_>>();
        assert_eq!(items, [7, 7, 7, 7]);
    }

    #[test]
    fn zero_count_drops_value_immediately() {
        let value = Rc::new(());
        let mut repeat = Repeat::new(value.clone(), 0);
        assert_eq!(Rc::strong_count(&value), 1);
        assert!(repeat.next().is_none());
    }

    #[test]
    fn last_item_is_moved() {
        let value = Rc::new(());
        let mut repeat = Repeat::new(value.clone(), 2);
        assert_eq!(Rc::strong_count(&value), 2);

        let first = repeat.next().expect("first item");
        assert_eq!(Rc::strong_count(&value), 3);

        let second = repeat.next().expect("second item");
        // the original clone was handed out rather than cloned again
        assert_eq!(Rc::strong_count(&value), 3);
        assert!(repeat.next().is_none());
        assert_eq!(repeat.len(), 0);

        drop((first, second));
        assert_eq!(Rc::strong_count(&value), 1);
    }

    #[test]
    fn exact_size() {
        let mut repeat = Repeat::new('x', 3);
        assert_eq!(repeat.len(), 3);
        repeat.next();
        assert_eq!(repeat.len(), 2);
        assert_eq!(Repeat::once('y').len(), 1);
    }
}
