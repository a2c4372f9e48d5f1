/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! A fork-aware, append-only store of blocks on top of a pluggable ordered key-value store.
//!
//! ## Getting started
//!
//! 1. Implement the [pluggable persistence traits](block_store::pluggables) for your key-value store.
//! 2. Build a [`Configuration`](config::Configuration).
//! 3. Create a [`BlockStore`](block_store::accessors::internal::BlockStore) and
//!    [`append`](block_store::accessors::internal::BlockStore::append) blocks to it.
//!
//! The [`block_store`] module documents how blocks are laid out in the key-value store and how
//! children, leaves, and the finality pointer are found.

pub mod block_store;

pub mod config;

pub(crate) mod event_handlers;

pub mod events;

pub mod logging;

pub mod types;
