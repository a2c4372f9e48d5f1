//! Handles through which the block store is read and written.
//!
//! - [`internal::BlockStore`] owns the key-value store and is the only way to write into it.
//! - [`public::BlockStoreCamera`] is a read-only handle that can be cloned and shared.

pub mod internal;

pub mod public;
