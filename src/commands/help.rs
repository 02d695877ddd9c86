//! Help command - lists registered commands from the shared registry

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::messaging::Context;
use crate::domain::entities::{Category, CommandDescriptor, CommandHandler, Scope};

pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(&self, ctx: Context, args: &[String]) -> Result<(), CommandError> {
        let text = match args.first() {
            Some(alias) => command_help(&ctx, alias),
            None => overview(&ctx),
        };
        ctx.reply(text)?;
        Ok(())
    }
}

fn command_help(ctx: &Context, alias: &str) -> String {
    let Some(cmd) = ctx.registry().resolve(alias) else {
        return format!("Command '{}' not found.", alias);
    };

    let mut help = format!(
        "{} - {}",
        cmd.name(),
        cmd.description.as_deref().unwrap_or("No description")
    );
    if let Some(usage) = &cmd.usage {
        help.push_str(&format!("\nUsage: {} {}", cmd.name(), usage));
    }
    if cmd.aliases.len() > 1 {
        help.push_str(&format!("\nAliases: {}", cmd.aliases.join(", ")));
    }
    help
}

fn overview(ctx: &Context) -> String {
    let mut help = "Available commands:\n".to_string();
    for category in [Category::Fun, Category::Utility, Category::Moderation] {
        let commands: Vec<&Arc<CommandDescriptor>> = ctx
            .registry()
            .commands()
            .filter(|c| c.category == category)
            .collect();
        if commands.is_empty() {
            continue;
        }

        help.push_str(&format!("\n{}:\n", category.as_str()));
        for cmd in commands {
            help.push_str(&format!(
                "  {} - {}\n",
                cmd.name(),
                cmd.description.as_deref().unwrap_or("")
            ));
        }
    }
    help
}

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("help", Arc::new(HelpCommand))
        .with_alias("commands")
        .with_usage("[command]")
        .with_description("List commands or show one command's usage.")
        .with_category(Category::Utility)
        .with_scope(Scope::Both)
}
