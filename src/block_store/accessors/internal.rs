/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Read-and-write handle into the Block Store.
//!
//! # Writing to the Block Store
//!
//! Exactly two operations write into the key-value store:
//!
//! |Operation|Variable written|Behavior on an existing value|
//! |---|---|---|
//! |[`append`](BlockStore::append)|[Blocks](super::super::variables#blocks)|Silently overwritten.|
//! |[`finalize`](BlockStore::finalize)|[Last Finalized Block](super::super::variables#last-finalized-block)|Overwritten.|
//!
//! Neither operation checks the block tree's invariants. `append` does not check that the block is
//! new or that its parent exists, and `finalize` does not check that the block it points to exists.
//! Maintaining these invariants is the caller's responsibility.
//!
//! Nothing is ever deleted, so once the finality pointer is set, it can never become unset again.

use std::time::SystemTime;

use crate::{
    config::Configuration,
    event_handlers::EventHandlers,
    events::{AppendBlockEvent, Event, FinalizeBlockEvent},
    types::{
        block::Block,
        data_types::{BlockHeight, BlockID, FinalityPointer},
    },
};

use super::super::{
    pluggables::{BlockStoreError, KVStore, Key, WriteBatch},
    variables::{self, block_key},
};

use super::public::BlockStoreCamera;

/// Read and write handle into the block store.
///
/// ## Categories of methods
///
/// Methods are grouped into three categories, with methods in each separate category being defined
/// in a separate `impl` block:
/// 1. [Lifecycle methods](#impl-BlockStore<K>).
/// 2. [State updaters](#impl-BlockStore<K>-1).
/// 3. [State getters](#impl-BlockStore<K>-2).
pub struct BlockStore<K: KVStore> {
    kv_store: K,
    event_handlers: EventHandlers,
}

/// Lifecycle methods.
impl<K: KVStore> BlockStore<K> {
    /// Create a new instance of `BlockStore` on top of `kv_store`.
    ///
    /// `kv_store` may be empty, or may already contain a block store written by a previous instance.
    pub fn new(kv_store: K, config: Configuration) -> Self {
        BlockStore {
            kv_store,
            event_handlers: EventHandlers::new(config),
        }
    }

    /// Create a read-only [`BlockStoreCamera`] over the same key-value store.
    pub fn camera(&self) -> BlockStoreCamera<K> {
        BlockStoreCamera::new(self.kv_store.clone())
    }

    /// Atomically write the changes in `write_batch` into the key-value store.
    pub(crate) fn write(
        &mut self,
        write_batch: BlockStoreWriteBatch<K::WriteBatch>,
    ) -> Result<(), BlockStoreError> {
        Ok(self.kv_store.write(write_batch.0)?)
    }
}

/// State updaters.
impl<K: KVStore> BlockStore<K> {
    /// Store `block` under its [`BlockID`].
    ///
    /// ## Precondition
    ///
    /// No block with the same `BlockID` has been appended before. If one has, it is overwritten.
    pub fn append(&mut self, block: &Block) -> Result<(), BlockStoreError> {
        let mut wb = BlockStoreWriteBatch::new();
        wb.set_block(block)?;
        self.write(wb)?;

        self.event_handlers
            .fire_handlers(Event::AppendBlock(AppendBlockEvent {
                timestamp: SystemTime::now(),
                block: block.id(),
                parent: block.parent,
            }));

        Ok(())
    }

    /// Point the finality pointer at `block`.
    ///
    /// Calling this again with the same `block` leaves the block store unchanged.
    pub fn finalize(&mut self, block: &BlockID) -> Result<(), BlockStoreError> {
        let mut wb = BlockStoreWriteBatch::new();
        wb.set_last_finalized_block(block);
        self.write(wb)?;

        self.event_handlers
            .fire_handlers(Event::FinalizeBlock(FinalizeBlockEvent {
                timestamp: SystemTime::now(),
                block: *block,
            }));

        Ok(())
    }
}

/// State getters.
impl<K: KVStore> BlockStore<K> {
    /// Get the block identified by `block`.
    ///
    /// Returns [`NotFound`](BlockStoreError::NotFound) if no such block has been appended.
    pub fn get_block(&self, block: &BlockID) -> Result<Block, BlockStoreError> {
        self.kv_store
            .block(block)?
            .ok_or(BlockStoreError::NotFound {
                key: Key::Block { block: *block },
            })
    }

    pub fn blocks_at_height(&self, height: BlockHeight) -> Result<Vec<Block>, BlockStoreError> {
        self.kv_store.blocks_at_height(height)
    }

    pub fn children(&self, parent: &BlockID) -> Result<Vec<Block>, BlockStoreError> {
        self.kv_store.children(parent)
    }

    pub fn leaves(&self) -> Result<Vec<Block>, BlockStoreError> {
        self.kv_store.leaves()
    }

    pub fn finality_pointer(&self) -> Result<FinalityPointer, BlockStoreError> {
        self.kv_store.finality_pointer()
    }

    /// Get the block most recently passed to [`finalize`](Self::finalize).
    ///
    /// Returns [`NotFound`](BlockStoreError::NotFound) with key
    /// [`LastFinalizedBlock`](Key::LastFinalizedBlock) if `finalize` has never been called, or with
    /// the block's key if the finalized block itself is missing.
    pub fn last_finalized(&self) -> Result<Block, BlockStoreError> {
        self.kv_store
            .last_finalized_block()?
            .ok_or(BlockStoreError::NotFound {
                key: Key::LastFinalizedBlock,
            })
    }
}

/// Set of writes that [`BlockStore::write`] applies atomically.
pub(crate) struct BlockStoreWriteBatch<W: WriteBatch>(pub(super) W);

impl<W: WriteBatch> BlockStoreWriteBatch<W> {
    pub(crate) fn new() -> BlockStoreWriteBatch<W> {
        BlockStoreWriteBatch(W::new())
    }

    /* ↓↓↓ Blocks ↓↓↓ */

    pub(crate) fn set_block(&mut self, block: &Block) -> Result<(), BlockStoreError> {
        let id = block.id();
        let value = block
            .encode()
            .map_err(|err| BlockStoreError::SerializeValue {
                key: Key::Block { block: id },
                source: err,
            })?;
        self.0.set(&block_key(&id), &value);
        Ok(())
    }

    /* ↓↓↓ Last Finalized Block ↓↓↓ */

    pub(crate) fn set_last_finalized_block(&mut self, block: &BlockID) {
        self.0.set(&variables::LAST_FINALIZED_BLOCK, &block.bytes());
    }
}
