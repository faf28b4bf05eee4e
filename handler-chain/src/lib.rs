//! # Handler chain
//!
//! Runs middleware `before` hooks in order, then handlers until one returns Stop or Reply, then
//! middleware `after` hooks in reverse order with the final response.

use dbot_core::{Handler, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered middleware and handlers. Cheap to clone; the runner clones it into every message task.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Returns the first Stop or Reply produced by a handler, Stop if a middleware vetoed the
    /// message, or Continue if no handler claimed it.
    #[instrument(skip(self, message), fields(user_id = ?message.sender_id(), message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(chat_id = message.chat.id, "step: handler_chain started");

        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            if !mw.before(message).await? {
                info!(middleware = %mw_name, "step: middleware before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
            debug!(middleware = %mw_name, "step: middleware before done");
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            debug!(handler = %handler_name, response = ?response, "step: handler done");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(handler = %handler_name, "step: handler chain stopped by handler");
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for mw in self.middleware.iter().rev() {
            mw.after(message, &final_response).await?;
        }

        info!(chat_id = message.chat.id, "step: handler_chain finished");
        Ok(final_response)
    }
}

// Tests live in tests/handler_chain_test.rs
