use core::iter::FusedIterator;

use super::cursor::Cursor;
use super::node::{Key, Node};

/// An ascending iterator over a [`CoupledSet`](super::coupled::CoupledSet).
///
/// No lock is held between calls to `next`. Each step locks the last
/// yielded node, then its successor, and releases them in that order, so the
/// iterator never blocks writers while the caller processes an item. Values
/// inserted behind the iterator's position are not seen; values inserted
/// ahead of it are.
pub struct Iter<'l, T> {
    current: Option<&'l Node<T>>,
}

impl<'l, T> Iter<'l, T> {
    pub(crate) fn new(head: &'l Node<T>) -> Self {
        Self {
            current: Some(head),
        }
    }
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut cursor = Cursor::new(self.current?);
        let step = match cursor.successor().map(Node::key) {
            Some(Key::Value(_)) if cursor.advance() => cursor.node(),
            _ => {
                self.current = None;
                return None;
            }
        };
        drop(cursor);

        self.current = Some(step);
        step.key().value()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
