use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::sync::atomic::{self, AtomicUsize};
use core::time::Duration;
use std::time::Instant;

use crossbeam_utils::CachePadded;
use tracing::{debug, trace, warn};

use super::cursor::Cursor;
use super::error::FindError;
use super::iter::Iter;
use super::node::Node;
use super::traits::{BlockingOrderedSet, OrderedSet};

/// A sorted set stored as a singly linked list with one lock per node.
///
/// Every operation walks the list hand over hand: it locks a node before
/// looking at its successor and releases the previous node only once the
/// next one is locked. Inserts into different gaps of the list therefore
/// proceed in parallel, and two inserts aimed at the same gap are serialized
/// by the lock of the node in front of it.
///
/// The list always starts with a head sentinel and ends with a tail sentinel.
/// Nodes are never removed; they are freed when the set is dropped.
pub struct CoupledSet<T> {
    /// Every operation starts by locking the head, so it gets its own cache line.
    head: CachePadded<Node<T>>,
    count: AtomicUsize,
    stall_threshold: Option<Duration>,
}

impl<T> CoupledSet<T> {
    /// Create an empty set with default settings.
    pub fn new() -> Self {
        Self::with_stall_threshold(None)
    }

    pub(crate) fn with_stall_threshold(stall_threshold: Option<Duration>) -> Self {
        Self {
            head: CachePadded::new(Node::head()),
            count: AtomicUsize::new(0),
            stall_threshold,
        }
    }

    #[cfg(test)]
    pub(crate) fn head_node(&self) -> &Node<T> {
        &self.head
    }

    /// How long a blocking lookup stays parked before it logs a warning.
    pub fn stall_threshold(&self) -> Option<Duration> {
        self.stall_threshold
    }

    /// Iterate over the values in ascending order.
    ///
    /// The iterator is lazy and holds no lock between items; call `iter`
    /// again to restart from the smallest value.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.head)
    }

    /// Collect the current values in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: Ord> CoupledSet<T> {
    fn probe<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::new(&self.head).seek(value) == Ordering::Equal
    }

    /// Wait on the gap where `value` belongs until it shows up.
    ///
    /// After every wakeup the cursor searches forward again from the node it
    /// is parked on: a smaller value may have been spliced into the gap, in
    /// which case the gap now sits further down the list.
    fn wait_until_present<Q>(
        &self,
        value: &Q,
        started: Instant,
        deadline: Option<Instant>,
    ) -> Result<(), FindError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // A threshold too large to add to an `Instant` never fires.
        let mut report_at = self
            .stall_threshold
            .and_then(|threshold| started.checked_add(threshold));
        let mut cursor = Cursor::new(&self.head);
        let mut parked = false;

        loop {
            let hops = cursor.hops();
            if cursor.seek(value) == Ordering::Equal {
                if parked {
                    debug!(waited = ?started.elapsed(), "blocking find satisfied");
                }
                return Ok(());
            }
            if parked && cursor.hops() != hops {
                debug!(moved = cursor.hops() - hops, "blocking find moved to a later gap");
            }

            let now = Instant::now();
            if deadline.is_some_and(|deadline| now >= deadline) {
                let waited = now - started;
                debug!(?waited, "blocking find timed out");
                return Err(FindError::TimedOut { waited });
            }
            if let Some(threshold) = self.stall_threshold
                && let Some(at) = report_at
                && now >= at
            {
                warn!(
                    waited = ?(now - started),
                    ?threshold,
                    position = cursor.hops(),
                    "blocking find still waiting for its value"
                );
                report_at = now.checked_add(threshold);
            }

            if !parked {
                debug!(position = cursor.hops(), "blocking find parked");
                parked = true;
            }
            match earliest(deadline, report_at) {
                Some(wake_at) => {
                    cursor.park_until(wake_at);
                }
                None => cursor.park(),
            }
        }
    }
}

fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

impl<T> OrderedSet<T> for CoupledSet<T>
where
    T: Ord + Send + Sync,
{
    fn insert<V>(&self, value: V) -> bool
    where
        V: Into<T>,
    {
        let value = value.into();
        let mut cursor = Cursor::new(&self.head);

        if cursor.seek(&value) == Ordering::Equal {
            trace!(position = cursor.hops(), "insert found an existing value");
            return false;
        }

        let woken = cursor.splice(value);
        let len = self.count.fetch_add(1, atomic::Ordering::AcqRel) + 1;
        trace!(position = cursor.hops(), woken, len, "inserted value");
        true
    }

    fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.probe(value)
    }

    fn len(&self) -> usize {
        self.count.load(atomic::Ordering::Acquire)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> BlockingOrderedSet<T> for CoupledSet<T>
where
    T: Ord + Send + Sync,
{
    fn find<Q>(&self, value: &Q, block: bool) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if !block {
            return self.probe(value);
        }
        self.wait_until_present(value, Instant::now(), None).is_ok()
    }

    fn find_timeout<Q>(&self, value: &Q, timeout: Duration) -> Result<(), FindError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let started = Instant::now();
        // An unrepresentable deadline is as good as none.
        let deadline = started.checked_add(timeout);
        self.wait_until_present(value, started, deadline)
    }
}

impl<T> Default for CoupledSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CoupledSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One value per line, ascending.
impl<T: fmt::Display> fmt::Display for CoupledSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            writeln!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<'l, T> IntoIterator for &'l CoupledSet<T> {
    type Item = &'l T;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, V> FromIterator<V> for CoupledSet<T>
where
    T: Ord + Send + Sync,
    V: Into<T>,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let set = Self::new();
        set.extend_from(iter);
        set
    }
}

impl<T, V> Extend<V> for CoupledSet<T>
where
    T: Ord + Send + Sync,
    V: Into<T>,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.extend_from(iter);
    }
}

impl<T> CoupledSet<T>
where
    T: Ord + Send + Sync,
{
    fn extend_from<V, I>(&self, iter: I)
    where
        V: Into<T>,
        I: IntoIterator<Item = V>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Builder for [`CoupledSet`].
#[derive(Debug, Clone, Default)]
pub struct CoupledSetBuilder {
    stall_threshold: Option<Duration>,
}

impl CoupledSetBuilder {
    /// Create a new builder with default settings.
    ///
    /// # Returns
    /// A new builder instance
    pub fn new() -> Self {
        Self {
            stall_threshold: None,
        }
    }

    /// Log a warning whenever a blocking lookup has been parked this long,
    /// repeating once per `threshold` while it keeps waiting.
    ///
    /// # Arguments
    /// * `threshold` - How long a lookup may wait before it is reported
    ///
    /// # Returns
    /// The builder instance for method chaining
    ///
    /// # Panics
    /// Panics if `threshold` is zero
    pub fn with_stall_threshold(mut self, threshold: Duration) -> Self {
        assert!(!threshold.is_zero(), "Stall threshold must be non-zero");
        self.stall_threshold = Some(threshold);
        self
    }

    /// Build the set with the specified parameters.
    ///
    /// # Returns
    /// A new, empty set
    pub fn build<T>(self) -> CoupledSet<T> {
        CoupledSet::with_stall_threshold(self.stall_threshold)
    }
}
