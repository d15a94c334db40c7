use core::borrow::Borrow;
use core::cmp::Ordering;
use core::ptr::NonNull;
use std::time::Instant;

use parking_lot::{Condvar, Mutex, MutexGuard};

/// The successor slot of a node.
///
/// A `Some` link owns the node it points to. It is only read or replaced
/// while the lock of the node holding it is taken.
pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// Ordering key of a node.
///
/// The sentinels are variants rather than reserved values, so the derived
/// ordering puts `Head` before and `Tail` after every real value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Key<T> {
    Head,
    Value(T),
    Tail,
}

impl<T> Key<T> {
    /// Compare this key against a probe value.
    #[inline]
    pub(crate) fn cmp_probe<Q>(&self, probe: &Q) -> Ordering
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self {
            Key::Head => Ordering::Less,
            Key::Value(value) => value.borrow().cmp(probe),
            Key::Tail => Ordering::Greater,
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&T> {
        match self {
            Key::Value(value) => Some(value),
            Key::Head | Key::Tail => None,
        }
    }
}

/// A node of the lock-coupled list.
///
/// `key` never changes after construction. `next` is guarded by the node's
/// mutex and `changed` is the condition variable tied to that mutex; it is
/// broadcast every time `next` is replaced.
pub(crate) struct Node<T> {
    key: Key<T>,
    next: Mutex<Link<T>>,
    changed: Condvar,
}

impl<T> Node<T> {
    fn new(key: Key<T>, next: Link<T>) -> Self {
        Self {
            key,
            next: Mutex::new(next),
            changed: Condvar::new(),
        }
    }

    /// Create a head sentinel already linked to a fresh tail sentinel.
    pub(crate) fn head() -> Self {
        let tail = Self::alloc(Key::Tail, None);
        Self::new(Key::Head, Some(tail))
    }

    /// Heap-allocate a node and hand out the owning pointer.
    pub(crate) fn alloc(key: Key<T>, next: Link<T>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Self::new(key, next))))
    }

    #[inline]
    pub(crate) fn key(&self) -> &Key<T> {
        &self.key
    }

    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, Link<T>> {
        self.next.lock()
    }

    /// Wake every thread parked on this node.
    ///
    /// Must be called with this node's lock held, right after `next` changed.
    #[inline]
    pub(crate) fn notify_changed(&self) -> usize {
        self.changed.notify_all()
    }

    /// Park on this node until `next` changes or a spurious wakeup happens.
    #[inline]
    pub(crate) fn wait_changed(&self, guard: &mut MutexGuard<'_, Link<T>>) {
        self.changed.wait(guard);
    }

    /// Like [`Node::wait_changed`], but gives up at `deadline`.
    ///
    /// Returns `true` if the wait timed out.
    #[inline]
    pub(crate) fn wait_changed_until(
        &self,
        guard: &mut MutexGuard<'_, Link<T>>,
        deadline: Instant,
    ) -> bool {
        self.changed.wait_until(guard, deadline).timed_out()
    }
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        // Unlink the chain one node at a time so dropping a long list does
        // not recurse once per node.
        let mut next = self.next.get_mut().take();
        while let Some(ptr) = next {
            // SAFETY: a link owns its pointee, which came from `Node::alloc`,
            // and `&mut self` means no other thread can reach the chain.
            let mut node = unsafe { Box::from_raw(ptr.as_ptr()) };
            next = node.next.get_mut().take();
        }
    }
}

// Safety: links are raw pointers, but each one is owned by exactly one node
// and only touched under that node's lock.
unsafe impl<T: Send> Send for Node<T> {}

// Safety: shared access reads `key` and moves owned links under the lock.
unsafe impl<T: Send + Sync> Sync for Node<T> {}
