use crate::config::Configuration;
use crate::events::*;
use crate::logging::Logger;

/// Every handler registered for each kind of [`Event`], including the default loggers if
/// [`log_events`](Configuration::log_events) is set.
pub(crate) struct EventHandlers {
    pub(crate) append_block_handlers: Vec<HandlerPtr<AppendBlockEvent>>,
    pub(crate) finalize_block_handlers: Vec<HandlerPtr<FinalizeBlockEvent>>,
}

impl EventHandlers {
    pub(crate) fn new(config: Configuration) -> EventHandlers {
        let Configuration {
            log_events,
            on_append_block,
            on_finalize_block,
        } = config;

        let mut append_block_handlers = Vec::new();
        let mut finalize_block_handlers = Vec::new();

        if log_events {
            append_block_handlers.push(AppendBlockEvent::get_logger());
            finalize_block_handlers.push(FinalizeBlockEvent::get_logger());
        }

        append_block_handlers.extend(on_append_block);
        finalize_block_handlers.extend(on_finalize_block);

        EventHandlers {
            append_block_handlers,
            finalize_block_handlers,
        }
    }

    pub(crate) fn fire_handlers(&self, event: Event) {
        match event {
            Event::AppendBlock(append_block_event) => self
                .append_block_handlers
                .iter()
                .for_each(|handler| handler(&append_block_event)),

            Event::FinalizeBlock(finalize_block_event) => self
                .finalize_block_handlers
                .iter()
                .for_each(|handler| handler(&finalize_block_event)),
        }
    }
}
