//! Concurrent ordered collections built on hand-over-hand locking.
//!
//! The main type is [`linked_list::concurrent::coupled::CoupledSet`], a sorted
//! singly linked set where every node carries its own lock and condition
//! variable. See [`linked_list`] for an overview.

pub mod linked_list;
