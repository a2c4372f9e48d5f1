/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Functions that log out events.
//!
//! The logs defined in this module are printed if the user enabled them via the block store's
//! [configuration](crate::config::Configuration).
//!
//! The block store logs using the [log](https://docs.rs/log/latest/log/) crate. To get these messages
//! printed onto a terminal or to a file, set up a
//! [logging implementation](https://docs.rs/log/latest/log/#available-logging-implementations).
//!
//! ## Log message format
//!
//! Log messages are CSVs (Comma Separated Values) with at least two values. The first two values are
//! always:
//! 1. The name of the [event](crate::events) in PascalCase (defined in this module as constants).
//! 2. The time the event was emitted (as number of seconds since the Unix Epoch).
//!
//! The rest of the values differ depending on the kind of event. For example, the following snippet
//! is how an [AppendBlock](crate::events::AppendBlockEvent) is printed:
//!
//! ```text
//! AppendBlock, 1701329264, fNGCJyk, 3, Id5u7f6
//! ```
//!
//! In the snippet:
//! - The third value is the first seven characters of the Base64 encoding of the hash of the
//!   appended block.
//! - The fourth value is the height of the appended block.
//! - The fifth value is the first seven characters of the Base64 encoding of the hash of its parent.

use crate::events::*;
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use std::time::SystemTime;

// Names of each event in PascalCase for printing:
pub const APPEND_BLOCK: &str = "AppendBlock";
pub const FINALIZE_BLOCK: &str = "FinalizeBlock";

/// Implemented by event types. Used to get a closure that logs the event.
pub(crate) trait Logger {
    /// Returns a pointer to the default logging handler for a given event type.
    fn get_logger() -> Box<dyn Fn(&Self) + Send>;
}

impl Logger for AppendBlockEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |append_block_event: &AppendBlockEvent| {
            log::info!(
                "{}, {}, {}, {}, {}",
                APPEND_BLOCK,
                secs_since_unix_epoch(append_block_event.timestamp),
                first_seven_base64_chars(&append_block_event.block.hash.bytes()),
                append_block_event.block.height,
                first_seven_base64_chars(&append_block_event.parent.bytes())
            )
        };
        Box::new(logger)
    }
}

impl Logger for FinalizeBlockEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |finalize_block_event: &FinalizeBlockEvent| {
            log::info!(
                "{}, {}, {}, {}",
                FINALIZE_BLOCK,
                secs_since_unix_epoch(finalize_block_event.timestamp),
                first_seven_base64_chars(&finalize_block_event.block.hash.bytes()),
                finalize_block_event.block.height
            )
        };
        Box::new(logger)
    }
}

// Get a more readable representation of a bytesequence by base64-encoding it and taking the first 7 characters.
pub(crate) fn first_seven_base64_chars(bytes: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(bytes);
    if encoded.len() > 7 {
        encoded[0..7].to_string()
    } else {
        encoded
    }
}

// Events whose timestamps predate the Unix Epoch are logged with a timestamp of 0.
pub(crate) fn secs_since_unix_epoch(timestamp: SystemTime) -> u64 {
    timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
