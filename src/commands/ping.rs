//! Ping command

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::messaging::Context;
use crate::domain::entities::{Category, CommandDescriptor, CommandHandler, Scope};

pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn execute(&self, ctx: Context, _args: &[String]) -> Result<(), CommandError> {
        ctx.reply("Pong!")?;
        Ok(())
    }
}

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("ping", Arc::new(PingCommand))
        .with_alias("pong")
        .with_description("Check that the bot is alive.")
        .with_category(Category::Utility)
        .with_scope(Scope::Both)
}
