/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Traits for pluggable Block Store persistence.
//!
//! The block store asks very little of the library user's persistence mechanism:
//! 1. Point reads through [`KVGet::get`], which tell "not found" apart from a failure.
//! 2. Forward iteration in ascending key order over every key sharing a prefix, through
//!    [`KVGet::prefix_iter`].
//! 3. Atomic writes of a [`WriteBatch`] through [`KVStore::write`].
//!
//! Everything the block store reads is built out of these primitives as default methods of
//! [`KVGet`], so any handle that can `get` and `prefix_iter` can also read blocks, children, leaves,
//! and the finality pointer.

use std::{
    collections::BTreeMap,
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

use crate::types::{
    block::Block,
    data_types::{BlockHeight, BlockID, FinalityPointer},
};

use super::variables::{self, block_id_from_key, block_key, blocks_at_height_prefix};

/// Item yielded by a [`KVGet::prefix_iter`] iterator.
pub type KVPair = (Vec<u8>, Vec<u8>);

pub trait KVStore: KVGet + Clone + Send + 'static {
    type WriteBatch: WriteBatch;

    /// Atomically apply every write in `wb`.
    fn write(&mut self, wb: Self::WriteBatch) -> Result<(), KVError>;
}

pub trait KVGet {
    /// Iterator over the entries under a prefix. Dropping it releases whatever resources it holds in
    /// the underlying store.
    type PrefixIter<'a>: Iterator<Item = Result<KVPair, KVError>> + 'a
    where
        Self: 'a;

    /// Get the value stored at `key`, or `None` if nothing is stored there.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVError>;

    /// Iterate, in ascending byte order of keys, over every entry whose key starts with `prefix`.
    fn prefix_iter(&self, prefix: &[u8]) -> Result<Self::PrefixIter<'_>, KVError>;

    /* ↓↓↓ Blocks ↓↓↓ */

    fn block(&self, block: &BlockID) -> Result<Option<Block>, BlockStoreError> {
        match self.get(&block_key(block))? {
            Some(bytes) => Ok(Some(decode_block(Key::Block { block: *block }, block, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Get every block at `height`, ordered by ascending hash.
    fn blocks_at_height(&self, height: BlockHeight) -> Result<Vec<Block>, BlockStoreError> {
        let mut blocks = Vec::new();
        for entry in self.prefix_iter(&blocks_at_height_prefix(height))? {
            let (key, value) = entry?;
            blocks.push(decode_block_entry(&key, &value)?);
        }
        Ok(blocks)
    }

    /// Get every block that directly extends `parent`, ordered by ascending hash.
    ///
    /// Only the blocks at `parent.height + 1` are scanned, and of these, only the ones whose
    /// [`parent`](Block::parent) is `parent.hash` are returned.
    fn children(&self, parent: &BlockID) -> Result<Vec<Block>, BlockStoreError> {
        let child_height = match parent.height.checked_next() {
            Some(height) => height,
            None => return Ok(Vec::new()),
        };

        Ok(self
            .blocks_at_height(child_height)?
            .into_iter()
            .filter(|block| block.parent == parent.hash)
            .collect())
    }

    /// Get every block that has no children, ordered by ascending height, then ascending hash.
    ///
    /// This makes a single pass over every stored block, starting from the lowest height. Because
    /// a child is always visited after its parent, keeping a frontier of blocks that have not yet
    /// been seen to have a child is enough: by the end of the pass, the frontier is exactly the set
    /// of leaves.
    ///
    /// Blocks are not checked for connectivity to a Genesis Block. A block whose parent was never
    /// stored is still a leaf if nothing extends it.
    fn leaves(&self) -> Result<Vec<Block>, BlockStoreError> {
        let mut frontier: BTreeMap<BlockID, Block> = BTreeMap::new();
        for entry in self.prefix_iter(&variables::BLOCKS)? {
            let (key, value) = entry?;
            let block = decode_block_entry(&key, &value)?;
            if let Some(parent) = block.parent_id() {
                frontier.remove(&parent);
            }
            frontier.insert(block.id(), block);
        }
        Ok(frontier.into_values().collect())
    }

    /* ↓↓↓ Last Finalized Block ↓↓↓ */

    fn finality_pointer(&self) -> Result<FinalityPointer, BlockStoreError> {
        match self.get(&variables::LAST_FINALIZED_BLOCK)? {
            None => Ok(FinalityPointer::Unset),
            Some(bytes) => BlockID::from_bytes(&bytes).map(FinalityPointer::Set).ok_or_else(|| {
                BlockStoreError::CorruptData {
                    key: Key::LastFinalizedBlock,
                    source: invalid_data(format!(
                        "expected a {}-byte block id, found {} bytes",
                        BlockID::ENCODED_LEN,
                        bytes.len()
                    )),
                }
            }),
        }
    }

    /// Get the block the finality pointer points to.
    ///
    /// Returns `Ok(None)` if the finality pointer is unset, and
    /// [`NotFound`](BlockStoreError::NotFound) if it is set but the block it points to is missing.
    fn last_finalized_block(&self) -> Result<Option<Block>, BlockStoreError> {
        match self.finality_pointer()? {
            FinalityPointer::Unset => Ok(None),
            FinalityPointer::Set(block) => self
                .block(&block)?
                .map(Some)
                .ok_or(BlockStoreError::NotFound {
                    key: Key::Block { block },
                }),
        }
    }
}

pub trait WriteBatch {
    fn new() -> Self;
    fn set(&mut self, key: &[u8], value: &[u8]);
}

/// Decode an entry visited while scanning the Blocks variable.
fn decode_block_entry(key: &[u8], value: &[u8]) -> Result<Block, BlockStoreError> {
    let block = block_id_from_key(key).ok_or_else(|| BlockStoreError::CorruptData {
        key: Key::Unrecognized { key: key.to_vec() },
        source: invalid_data(format!(
            "expected a {}-byte block key, found {} bytes",
            variables::BLOCK_KEY_LEN,
            key.len()
        )),
    })?;
    decode_block(Key::Block { block }, &block, value)
}

/// Decode the value stored under `block`'s key, checking that it really is the block `block`.
fn decode_block(key: Key, block: &BlockID, bytes: &[u8]) -> Result<Block, BlockStoreError> {
    let decoded = Block::decode(bytes).map_err(|err| BlockStoreError::CorruptData {
        key: key.clone(),
        source: err,
    })?;
    if decoded.id() != *block {
        return Err(BlockStoreError::CorruptData {
            key,
            source: invalid_data(format!("value decodes into block {}", decoded.id())),
        });
    }
    Ok(decoded)
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Error returned by the user-provided key-value store.
///
/// The block store never inspects or retries these. They are surfaced to callers unchanged inside
/// [`BlockStoreError::StorageFailure`].
#[derive(Debug)]
pub struct KVError(Box<dyn Error + Send + Sync>);

impl KVError {
    pub fn new(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        KVError(source.into())
    }

    /// Get the error returned by the key-value store.
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }
}

impl Display for KVError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "key-value store error: {}", self.0)
    }
}

impl Error for KVError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.0)
    }
}

/// Errors that may be encountered when reading from or writing to the block store.
///
/// No error is ever recovered from locally. In particular, a scan that hits a value it cannot
/// decode fails as a whole instead of returning the blocks it decoded before.
#[derive(Debug)]
pub enum BlockStoreError {
    /// Nothing is stored at a key that the operation needs.
    NotFound { key: Key },

    /// The bytes stored at a key cannot be decoded into the value the key should hold.
    CorruptData { key: Key, source: io::Error },

    /// A value could not be serialized before being written.
    SerializeValue { key: Key, source: io::Error },

    /// The key-value store failed.
    StorageFailure(KVError),
}

impl From<KVError> for BlockStoreError {
    fn from(value: KVError) -> Self {
        BlockStoreError::StorageFailure(value)
    }
}

impl Display for BlockStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BlockStoreError::NotFound { key } => write!(f, "{} not found", key),
            BlockStoreError::CorruptData { key, source } => {
                write!(f, "corrupt data at {}: {}", key, source)
            }
            BlockStoreError::SerializeValue { key, source } => {
                write!(f, "failed to serialize value for {}: {}", key, source)
            }
            BlockStoreError::StorageFailure(err) => Display::fmt(err, f),
        }
    }
}

impl Error for BlockStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BlockStoreError::NotFound { .. } => None,
            BlockStoreError::CorruptData { source, .. } => Some(source),
            BlockStoreError::SerializeValue { source, .. } => Some(source),
            BlockStoreError::StorageFailure(err) => Some(err),
        }
    }
}

/// The location in the key-value store that a [`BlockStoreError`] is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Block { block: BlockID },
    LastFinalizedBlock,
    /// A key found under the `BLOCKS` prefix that is not a valid block key.
    Unrecognized { key: Vec<u8> },
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::Block { block } => write!(f, "Block {}", block),
            Key::LastFinalizedBlock => write!(f, "Last Finalized Block"),
            Key::Unrecognized { key } => write!(f, "Unrecognized key {:?}", key),
        }
    }
}
