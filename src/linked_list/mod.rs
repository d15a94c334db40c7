//! Linked list based collections.
//!
//! The [`concurrent`] module holds a sorted set whose nodes are locked one at a
//! time while traversing (lock coupling). Threads working on different parts of
//! the list do not contend with each other, and lookups can block until a
//! missing value gets inserted.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use coupled_set::linked_list::concurrent::{prelude::*, StringSet};
//!
//! let set = Arc::new(StringSet::new());
//!
//! let waiter = {
//!     let set = Arc::clone(&set);
//!     thread::spawn(move || set.find("y", true))
//! };
//!
//! set.insert("b");
//! set.insert("a");
//! set.insert("a");
//! set.insert("y");
//!
//! assert!(waiter.join().unwrap());
//! assert!(!set.find("q", false));
//!
//! let values: Vec<&str> = set.iter().map(|v| &**v).collect();
//! assert_eq!(values, vec!["a", "b", "y"]);
//! ```
pub mod concurrent;
