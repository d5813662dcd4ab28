//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound message. Every handler's `before` runs in order (any
//! `false` stops the chain); `handle` runs in order until one returns Stop or Reply; `after` runs in
//! reverse order with the final response, also when a handler's `handle` failed.

use dbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Ordered list of handlers shared across update tasks.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the handle phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs before → handle → after for one message. Returns the first Stop or Reply, else Continue.
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_type = %message.message_type,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            if !h.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = %name,
                    "step: before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let outcome = self.run_handle_phase(message).await;
        let final_response = match &outcome {
            Ok(response) => response.clone(),
            Err(_) => HandlerResponse::Stop,
        };

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        match &outcome {
            Ok(response) => info!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                response = ?response,
                "step: handler_chain finished"
            ),
            Err(e) => error!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                error = %e,
                "step: handler_chain failed"
            ),
        }

        outcome
    }

    async fn run_handle_phase(&self, message: &Message) -> Result<HandlerResponse> {
        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(message).await?;
            debug!(handler = %name, response = ?response, "Handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        user_id = message.user.id,
                        handler = %name,
                        "step: handler chain stopped by handler"
                    );
                    return Ok(response);
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }
        Ok(HandlerResponse::Continue)
    }
}

// Integration tests live in tests/handler_chain_test.rs
