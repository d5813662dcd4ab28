//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Starts long polling with the given teloxide Bot and HandlerChain. Runs until Ctrl-C.
///
/// Calls get_me() first so a bad token is reported before polling starts. Each update is converted to
/// core::Message and handled in its own task so slow detections do not block the REPL.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or(""),
            "Bot identity confirmed, starting polling"
        ),
        Err(e) => warn!(error = %e, "get_me failed; polling anyway"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                "Received message"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
