/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions of events emitted by the block store.
//!
//! An event for a given action indicates that the action has been completed, that is, that the
//! corresponding write has been accepted by the key-value store.
//!
//! Library users can register handlers for these events through
//! [`Configuration`](crate::config::Configuration). Handlers are called synchronously, on the thread
//! that performed the write, right before the write operation returns.

use std::time::SystemTime;

use crate::types::data_types::{BlockID, CryptoHash};

/// Pointer to a function that handles events of type `T`.
pub type HandlerPtr<T> = Box<dyn Fn(&T) + Send>;

pub enum Event {
    AppendBlock(AppendBlockEvent),
    FinalizeBlock(FinalizeBlockEvent),
}

/// A block was written into the block store.
#[derive(Clone, Debug)]
pub struct AppendBlockEvent {
    pub timestamp: SystemTime,
    pub block: BlockID,
    pub parent: CryptoHash,
}

/// The finality pointer was set to `block`.
#[derive(Clone, Debug)]
pub struct FinalizeBlockEvent {
    pub timestamp: SystemTime,
    pub block: BlockID,
}
