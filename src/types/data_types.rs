/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types that exist only to store bytes, and do not have any major "active" behavior.

use std::{
    fmt::{self, Debug, Display, Formatter},
    hash::Hash,
};

use borsh::{BorshDeserialize, BorshSerialize};

/// Height of a block in the block tree, also known as its sequence number.
///
/// Starts at 0 for Genesis Blocks, and increases by 1 for every subsequent "level" of blocks
/// connected by [`parent`](crate::types::block::Block::parent) links. Blocks on different branches
/// of a fork share the same height.
///
/// # Byte ordering
///
/// Heights are placed into keys using [`to_be_bytes`](Self::to_be_bytes). Big-endian, fixed-width
/// encoding makes byte-lexicographic order equal numeric order, which is what lets all blocks of a
/// given height sit in one contiguous key range.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize,
)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Create a new `BlockHeight` with an `int` inner value.
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    /// Get the inner `u64` value of this `BlockHeight`.
    pub const fn int(&self) -> u64 {
        self.0
    }

    /// Get the big-endian representation of the inner `u64` value of this `BlockHeight`.
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Create a `BlockHeight` from its big-endian representation.
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }

    /// The height directly above this one, or `None` if this is `u64::MAX`.
    pub fn checked_next(&self) -> Option<BlockHeight> {
        self.0.checked_add(1).map(BlockHeight)
    }

    /// The height directly below this one, or `None` if this is the genesis height.
    pub fn checked_prev(&self) -> Option<BlockHeight> {
        self.0.checked_sub(1).map(BlockHeight)
    }
}

impl Display for BlockHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// 32-byte cryptographic hash.
///
/// Within this crate, `CryptoHash`-es are produced by [`Block::hash`](super::block::Block::hash),
/// which is always a SHA256 hash over the block's contents.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize)]
pub struct CryptoHash([u8; 32]);

impl CryptoHash {
    /// Create a new `CryptoHash` wrapping `bytes`.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the inner `[u8; 32]` value of this `CryptoHash`.
    pub const fn bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The all-zero hash, used as the parent of Genesis Blocks.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl Display for CryptoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Debug for CryptoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Arbitrary, opaque bytes carried by a [`Block`](super::block::Block).
///
/// The block store never interprets `Data`. It is hashed into the block's
/// [`hash`](super::block::Block::hash) and stored alongside the rest of the block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct Data(Vec<u8>);

impl Data {
    /// Create a new `Data` wrapping `bytes`.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get a reference to the inner bytes of this `Data`.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get how many bytes are in this `Data`.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Identity of a block: its [height](BlockHeight) together with its [hash](CryptoHash).
///
/// # Encoding
///
/// A `BlockID` is encoded into exactly [`BlockID::ENCODED_LEN`] bytes:
///
/// ```text
/// height.to_be_bytes() (8 bytes) ++ hash.bytes() (32 bytes)
/// ```
///
/// Because the height comes first and is big-endian, comparing two encodings byte by byte gives the
/// same result as comparing the `(height, hash)` pairs, which is also the derived [`Ord`] of this
/// type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockID {
    pub height: BlockHeight,
    pub hash: CryptoHash,
}

impl BlockID {
    /// Number of bytes in an encoded `BlockID`.
    pub const ENCODED_LEN: usize = 8 + 32;

    pub const fn new(height: BlockHeight, hash: CryptoHash) -> Self {
        Self { height, hash }
    }

    /// Encode this `BlockID` into its ordered byte form.
    pub fn bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut bytes = [0u8; Self::ENCODED_LEN];
        bytes[..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8..].copy_from_slice(&self.hash.bytes());
        bytes
    }

    /// Decode a `BlockID` from bytes produced by [`bytes`](Self::bytes).
    ///
    /// Returns `None` if `bytes` is not exactly [`ENCODED_LEN`](Self::ENCODED_LEN) long.
    pub fn from_bytes(bytes: &[u8]) -> Option<BlockID> {
        if bytes.len() != Self::ENCODED_LEN {
            return None;
        }

        let mut height = [0u8; 8];
        height.copy_from_slice(&bytes[..8]);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[8..]);

        Some(BlockID {
            height: BlockHeight::from_be_bytes(height),
            hash: CryptoHash::new(hash),
        })
    }
}

impl Display for BlockID {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.height, self.hash)
    }
}

/// State of the persisted finality pointer.
///
/// The pointer starts out [`Unset`](Self::Unset) and becomes [`Set`](Self::Set) the first time
/// [`finalize`](crate::block_store::accessors::internal::BlockStore::finalize) is called. After that
/// it can only move from one `Set` value to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalityPointer {
    Unset,
    Set(BlockID),
}

impl FinalityPointer {
    /// Get the finalized `BlockID`, if any.
    pub const fn block(&self) -> Option<BlockID> {
        match self {
            FinalityPointer::Unset => None,
            FinalityPointer::Set(block) => Some(*block),
        }
    }
}
