/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Configuration of a [`BlockStore`](crate::block_store::accessors::internal::BlockStore).

use typed_builder::TypedBuilder;

use crate::events::*;

/// Stores the user-defined parameters of a block store, that is:
/// 1. Whether to [log](crate::logging) the events the block store emits.
/// 2. Optional handlers to be invoked on each kind of [event](crate::events).
///
/// ## Usage
///
/// ```
/// # use chain_store::config::Configuration;
/// # use chain_store::events::AppendBlockEvent;
/// let config = Configuration::builder()
///     .log_events(true)
///     .on_append_block(|event: &AppendBlockEvent| println!("appended {}", event.block))
///     .build();
/// ```
#[derive(TypedBuilder)]
#[builder(builder_method(doc = "
    Create a builder for building a [Configuration]. On the builder call the following methods to construct a valid [Configuration].

    Required:
    - `.log_events(...)`

    Optional:
    - `.on_append_block(...)`
    - `.on_finalize_block(...)`
"))]
pub struct Configuration {
    // Required parameters
    #[builder(setter(doc = "Set whether the block store should log its events using the default loggers. Required."))]
    pub log_events: bool,
    // Optional parameters
    #[builder(default, setter(transform = |handler: impl Fn(&AppendBlockEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<AppendBlockEvent>),
    doc = "Register a handler closure to be invoked after a block is appended to the block store. Optional."))]
    pub on_append_block: Option<HandlerPtr<AppendBlockEvent>>,
    #[builder(default, setter(transform = |handler: impl Fn(&FinalizeBlockEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<FinalizeBlockEvent>),
    doc = "Register a handler closure to be invoked after the finality pointer is set. Optional."))]
    pub on_finalize_block: Option<HandlerPtr<FinalizeBlockEvent>>,
}
