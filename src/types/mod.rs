//! Types that are shared between the block store and its callers.
//!
//! These are split between plain byte-holding [`data_types`], the [`block`] type itself, and the
//! [`crypto_primitives`] used to hash blocks.

pub mod block;

pub mod crypto_primitives;

pub mod data_types;
