use core::borrow::Borrow;
use core::time::Duration;

use super::error::FindError;

/// A trait defining the core operations of a concurrent ordered set.
///
/// All operations take `&self`; implementations synchronize internally.
pub trait OrderedSet<T>: Send + Sync {
    /// Insert a value into the set.
    ///
    /// # Arguments
    /// * `value` - The value to insert
    ///
    /// # Returns
    /// True if the value was absent and has been inserted, false if it was
    /// already present (the set is left unchanged)
    fn insert<V>(&self, value: V) -> bool
    where
        V: Into<T>;

    /// Check if a value is currently in the set, without blocking.
    fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord;

    /// Get the number of values in the set.
    fn len(&self) -> usize;

    /// Check if the set is empty.
    fn is_empty(&self) -> bool;
}

/// A trait for ordered sets whose lookups can wait for a value to appear.
pub trait BlockingOrderedSet<T>: OrderedSet<T> {
    /// Look up a value.
    ///
    /// # Arguments
    /// * `value` - The value to look for
    /// * `block` - Wait until the value is inserted instead of reporting
    ///   its absence
    ///
    /// # Returns
    /// True if the value is present. With `block` set this only returns once
    /// the value is present, which may be never.
    fn find<Q>(&self, value: &Q, block: bool) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord;

    /// Block until `value` is in the set.
    fn wait_for<Q>(&self, value: &Q)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(value, true);
    }

    /// Block until `value` is in the set or `timeout` elapses.
    ///
    /// # Errors
    /// [`FindError::TimedOut`] if the value is still absent at the deadline
    fn find_timeout<Q>(&self, value: &Q, timeout: Duration) -> Result<(), FindError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord;
}
