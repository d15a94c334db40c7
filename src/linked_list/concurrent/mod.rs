use std::sync::Arc;

mod coupled_impl;
mod cursor;
mod error;
mod iter;
mod node;
mod traits;

#[cfg(test)]
mod tests;

pub mod coupled {
    pub use super::coupled_impl::*;
    pub use super::iter::Iter;
}

pub mod prelude {
    pub use super::error::FindError;
    pub use super::traits::*;
}

/// A set of shared strings. Iterating clones `Arc`s rather than string data.
pub type StringSet = coupled_impl::CoupledSet<Arc<str>>;
