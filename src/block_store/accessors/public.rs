//! General purpose, read-only interface for querying the Block Store.

use crate::types::{
    block::Block,
    data_types::{BlockHeight, BlockID, FinalityPointer},
};

use super::super::pluggables::{BlockStoreError, KVStore, Key};

/// A cloneable, read-only handle into the block store.
///
/// Cameras are obtained from [`BlockStore::camera`](super::internal::BlockStore::camera) and can be
/// handed to threads that need to query the block tree without being able to change it. A camera sees
/// writes made through the `BlockStore` with whatever consistency the underlying key-value store
/// provides.
#[derive(Clone)]
pub struct BlockStoreCamera<K: KVStore>(K);

impl<K: KVStore> BlockStoreCamera<K> {
    pub(crate) fn new(kv_store: K) -> Self {
        BlockStoreCamera(kv_store)
    }

    /* ↓↓↓ Basic state getters ↓↓↓ */

    pub fn get_block(&self, block: &BlockID) -> Result<Block, BlockStoreError> {
        self.0.block(block)?.ok_or(BlockStoreError::NotFound {
            key: Key::Block { block: *block },
        })
    }

    pub fn blocks_at_height(&self, height: BlockHeight) -> Result<Vec<Block>, BlockStoreError> {
        self.0.blocks_at_height(height)
    }

    pub fn children(&self, parent: &BlockID) -> Result<Vec<Block>, BlockStoreError> {
        self.0.children(parent)
    }

    pub fn leaves(&self) -> Result<Vec<Block>, BlockStoreError> {
        self.0.leaves()
    }

    pub fn finality_pointer(&self) -> Result<FinalityPointer, BlockStoreError> {
        self.0.finality_pointer()
    }

    pub fn last_finalized(&self) -> Result<Block, BlockStoreError> {
        self.0
            .last_finalized_block()?
            .ok_or(BlockStoreError::NotFound {
                key: Key::LastFinalizedBlock,
            })
    }
}
