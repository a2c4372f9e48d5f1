/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions for the 'block' type and its associated methods.

use borsh::{BorshDeserialize, BorshSerialize};

use super::crypto_primitives::{CryptoHasher, Digest};
use super::data_types::{BlockHeight, BlockID, CryptoHash, Data};

/// A single, immutable unit of the block tree.
///
/// A block extends exactly one other block, its parent, which sits one [height](BlockHeight) below
/// it. The only exceptions are Genesis Blocks, which sit at height 0 and whose `parent` is
/// [`CryptoHash::zero`].
///
/// The block store treats [`data`](Self::data) as opaque. What it needs from a block is its
/// [`id`](Self::id) (to key it) and its `parent` (to find its children and leaves).
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Block {
    pub height: BlockHeight,
    pub hash: CryptoHash,
    pub parent: CryptoHash,
    pub data: Data,
}

impl Block {
    pub fn new(height: BlockHeight, parent: CryptoHash, data: Data) -> Block {
        Block {
            height,
            hash: Block::hash(height, &parent, &data),
            parent,
            data,
        }
    }

    /// Create a Genesis Block carrying `data`.
    pub fn genesis(data: Data) -> Block {
        Block::new(BlockHeight::new(0), CryptoHash::zero(), data)
    }

    /// Create a block that extends `parent`.
    ///
    /// Returns `None` if `parent` is at the maximum height, since no block can sit above it.
    pub fn child_of(parent: &Block, data: Data) -> Option<Block> {
        parent
            .height
            .checked_next()
            .map(|height| Block::new(height, parent.hash, data))
    }

    pub fn hash(height: BlockHeight, parent: &CryptoHash, data: &Data) -> CryptoHash {
        let mut hasher = CryptoHasher::new();
        hasher.update(height.to_be_bytes());
        hasher.update(parent.bytes());
        hasher.update(data.bytes());
        CryptoHash::new(hasher.finalize().into())
    }

    pub fn id(&self) -> BlockID {
        BlockID::new(self.height, self.hash)
    }

    /// Get the `BlockID` of this block's parent, or `None` if this block is at height 0.
    pub fn parent_id(&self) -> Option<BlockID> {
        self.height
            .checked_prev()
            .map(|height| BlockID::new(height, self.parent))
    }

    /// Checks if `hash` matches the rest of the block.
    pub fn is_correct(&self) -> bool {
        self.hash == Block::hash(self.height, &self.parent, &self.data)
    }

    /// Serialize this block into the bytes stored as its value in the block store.
    pub fn encode(&self) -> std::io::Result<Vec<u8>> {
        self.try_to_vec()
    }

    /// Deserialize a block from bytes produced by [`encode`](Self::encode).
    ///
    /// Fails if `bytes` is not exactly one Borsh-encoded `Block`.
    pub fn decode(bytes: &[u8]) -> std::io::Result<Block> {
        Block::try_from_slice(bytes)
    }
}
