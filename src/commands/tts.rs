//! Text-to-speech command

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::messaging::Context;
use crate::domain::entities::{
    Category, CommandDescriptor, CommandHandler, Permission, Scope, SendOptions,
};

/// Sends the given text back to the channel with the TTS flag set
pub struct TtsCommand;

#[async_trait]
impl CommandHandler for TtsCommand {
    async fn execute(&self, ctx: Context, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            ctx.reply("Please provide a query.")?;
            return Ok(());
        }

        ctx.send(args.join(" "), SendOptions::tts())?;
        Ok(())
    }
}

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("tts", Arc::new(TtsCommand))
        .with_usage("(string)")
        .with_description("Text to speech fun.")
        .with_category(Category::Fun)
        .with_scope(Scope::Text)
        .with_permission(Permission::SendTtsMessages)
}
