/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Byte-prefixes and key constructors that specify where each Block Store variable is stored in the
//! user-provided key-value store.
//!
//! # List of State Variables
//!
//! |Variable|Type|Description|
//! |---|---|---|
//! |Blocks|[`BlockID`] -> [`Block`](crate::types::block::Block)|Every block that has been appended to the block store, across every branch.|
//! |Last Finalized Block|[`BlockID`]|The identity of the block most recently passed to [`finalize`](super::accessors::internal::BlockStore::finalize).|
//!
//! # Persistence of state variables
//!
//! ## Blocks
//!
//! Each block is stored as a **Borsh-serialized value** under a key formed by concatenating:
//! 1. The [`BLOCKS`] constant.
//! 2. The block's [`BlockID`] in its [ordered encoding](BlockID::bytes), that is, the big-endian
//!    height followed by the hash.
//!
//! ```text
//! [0] ++ height (8 bytes, big-endian) ++ hash (32 bytes)
//! ```
//!
//! Every block key is therefore exactly [`BLOCK_KEY_LEN`] bytes long. Since all block keys share the
//! `BLOCKS` prefix and the height bytes sort numerically, the keys of all blocks at one height form a
//! single contiguous range ([`blocks_at_height_prefix`]), and iterating the whole `BLOCKS` prefix
//! visits blocks in ascending height, then ascending hash.
//!
//! ## Last Finalized Block
//!
//! A single value stored under the one-byte [`LAST_FINALIZED_BLOCK`] key. The value is the encoded
//! `BlockID` of the finalized block (not the block itself). The key differs from every block key in
//! its first byte and its length, so no block can ever be stored over it, and it is never visited by
//! a scan of the `BLOCKS` prefix.

use crate::types::data_types::{BlockHeight, BlockID};

// State variables
pub const BLOCKS: [u8; 1] = [0];
pub const LAST_FINALIZED_BLOCK: [u8; 1] = [1];

/// Length in bytes of every key in the Blocks variable.
pub const BLOCK_KEY_LEN: usize = BLOCKS.len() + BlockID::ENCODED_LEN;

/// Key under which the block identified by `block` is stored.
pub fn block_key(block: &BlockID) -> Vec<u8> {
    concat(&BLOCKS, &block.bytes())
}

/// Prefix shared by the keys of every block at `height`, and by no other key.
pub fn blocks_at_height_prefix(height: BlockHeight) -> Vec<u8> {
    concat(&BLOCKS, &height.to_be_bytes())
}

/// Recover the `BlockID` from a key produced by [`block_key`].
///
/// Returns `None` if `key` is not a block key.
pub fn block_id_from_key(key: &[u8]) -> Option<BlockID> {
    match key.split_first() {
        Some((prefix, rest)) if *prefix == BLOCKS[0] => BlockID::from_bytes(rest),
        _ => None,
    }
}

/// Concatenate two byteslices into one vector.
pub fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut res = Vec::with_capacity(a.len() + b.len());
    res.extend_from_slice(a);
    res.extend_from_slice(b);
    res
}
