//! The persistent, fork-aware store of blocks.
//!
//! # The Block Tree
//!
//! Blocks form a tree rooted at one or more Genesis Blocks. Every other block extends exactly one
//! parent, sitting one height above it. Most of the time the tree is a single chain, but competing
//! blocks may extend the same parent, in which case the tree forks into branches that coexist until
//! one of them is abandoned.
//!
//! The block store answers three questions about this tree:
//! 1. **What is the block with this identity?** ([`get_block`](accessors::internal::BlockStore::get_block)).
//! 2. **Which blocks extend this block?** ([`children`](accessors::internal::BlockStore::children)),
//!    which is how forks are discovered.
//! 3. **Which blocks are not extended by any block?** ([`leaves`](accessors::internal::BlockStore::leaves)),
//!    the tips of every branch.
//!
//! Alongside the tree, it keeps a single **finality pointer**, the identity of the block that the
//! caller has accepted as irrevocable ([`finalize`](accessors::internal::BlockStore::finalize),
//! [`last_finalized`](accessors::internal::BlockStore::last_finalized)). The block store does not
//! decide which block to finalize, and does not prune branches that conflict with it.
//!
//! # No index beyond the key
//!
//! No parent-to-children mapping or leaf set is maintained. All three questions are answered by the
//! layout of keys in the key-value store alone, which is described in [`variables`]. Key order
//! (height ascending, then hash ascending) is what makes "all blocks at height `h`" a single range
//! scan, and what makes a single forward pass enough to find every leaf.
//!
//! # Pluggable persistence
//!
//! - The block store is kept in persistent storage chosen by the library user.
//! - The block store merely requires that whatever the user provides implements the abstract
//!   functionality of an ordered key-value store with point reads, prefix iteration, and atomic,
//!   batched writes.
//! - This abstract functionality is made concrete by the traits defined in the [`pluggables`] module.
//!
//! # Accessing the Block Store
//!
//! Implementations of the pluggable persistence traits get wrapped inside block store
//! [`accessors`], which put the block store variables in the right places in the key-value store.

pub mod accessors;

pub mod pluggables;

pub mod variables;
