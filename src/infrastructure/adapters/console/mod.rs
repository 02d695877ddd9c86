//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::GatewayError;
use crate::domain::entities::{Channel, OutgoingMessage, Permission, User};
use crate::domain::traits::{Gateway, PermissionResolver};

/// Console gateway for local development
///
/// Prints outbound messages to stdout, marking TTS-flagged ones.
pub struct ConsoleAdapter {
    bot_user: User,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            bot_user: User::new("console-bot").with_username(name).as_bot(),
        }
    }

    /// Read one line from stdin; `None` on EOF
    pub async fn read_line(prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        let n = std::io::stdin().read_line(&mut input).ok()?;
        if n == 0 {
            return None;
        }
        Some(input.trim().to_string())
    }
}

#[async_trait]
impl Gateway for ConsoleAdapter {
    async fn send(&self, message: &OutgoingMessage) -> Result<String, GatewayError> {
        if message.tts {
            println!("[BOT/TTS] {}", message.content);
        } else {
            println!("[BOT] {}", message.content);
        }
        Ok("console_msg".to_string())
    }

    fn bot_user(&self) -> User {
        self.bot_user.clone()
    }
}

/// Dev-mode permission resolver; the console user is granted everything
pub struct GrantAll;

impl PermissionResolver for GrantAll {
    fn has_permission(
        &self,
        _user: &User,
        _channel: &Channel,
        _permission: Permission,
    ) -> Option<bool> {
        Some(true)
    }
}
