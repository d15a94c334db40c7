use core::borrow::Borrow;
use core::cmp::Ordering;
use std::time::Instant;

use parking_lot::MutexGuard;

use super::node::{Key, Link, Node};

/// A hand-over-hand position in the list.
///
/// The cursor always holds the lock of the node it sits on. Moving forward
/// locks the successor first and only then releases the current node, so at
/// most two node locks are ever held and no node is skipped. Dropping the
/// cursor (including during unwinding) releases the lock it holds.
pub(crate) struct Cursor<'l, T> {
    node: &'l Node<T>,
    guard: MutexGuard<'l, Link<T>>,
    hops: usize,
}

impl<'l, T> Cursor<'l, T> {
    /// Lock `node` and place the cursor on it.
    pub(crate) fn new(node: &'l Node<T>) -> Self {
        let guard = node.lock();
        Self {
            node,
            guard,
            hops: 0,
        }
    }

    /// The node the cursor is locked on.
    #[inline]
    pub(crate) fn node(&self) -> &'l Node<T> {
        self.node
    }

    /// Number of nodes this cursor has moved past.
    #[inline]
    pub(crate) fn hops(&self) -> usize {
        self.hops
    }

    /// The current successor. Only the tail has none.
    #[inline]
    pub(crate) fn successor(&self) -> Option<&'l Node<T>> {
        // SAFETY: nodes are freed only when the owning set is dropped, and the
        // set is borrowed for 'l. The link is read under the current lock.
        (*self.guard).map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Compare the successor's key against `probe`. A missing successor
    /// compares as the tail.
    #[inline]
    pub(crate) fn successor_cmp<Q>(&self, probe: &Q) -> Ordering
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.successor()
            .map_or(Ordering::Greater, |next| next.key().cmp_probe(probe))
    }

    /// Lock the successor, then release the current node.
    ///
    /// Returns `false` without moving when sitting on the tail.
    pub(crate) fn advance(&mut self) -> bool {
        let Some(next) = self.successor() else {
            return false;
        };
        // The new guard is taken before the assignment drops the old one.
        self.guard = next.lock();
        self.node = next;
        self.hops += 1;
        true
    }

    /// Move forward while the successor sorts before `probe`.
    ///
    /// On return the cursor sits on the predecessor of the gap where `probe`
    /// belongs, and the result tells how the successor compares to `probe`
    /// (`Equal` means it is present, `Greater` means absent).
    pub(crate) fn seek<Q>(&mut self, probe: &Q) -> Ordering
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        loop {
            match self.successor_cmp(probe) {
                Ordering::Less => {
                    self.advance();
                }
                ordering => return ordering,
            }
        }
    }

    /// Link a new node holding `value` right after the current node and wake
    /// everyone parked on it. Returns the number of woken waiters.
    pub(crate) fn splice(&mut self, value: T) -> usize {
        let rest = *self.guard;
        *self.guard = Some(Node::alloc(Key::Value(value), rest));
        self.node.notify_changed()
    }

    /// Release the current lock and park until the successor changes.
    /// The lock is held again on return.
    #[inline]
    pub(crate) fn park(&mut self) {
        self.node.wait_changed(&mut self.guard);
    }

    /// Like [`Cursor::park`] with a deadline. Returns `true` on timeout.
    #[inline]
    pub(crate) fn park_until(&mut self, deadline: Instant) -> bool {
        self.node.wait_changed_until(&mut self.guard, deadline)
    }
}
