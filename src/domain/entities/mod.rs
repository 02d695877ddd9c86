//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod channel;
pub mod message;
pub mod command;

pub use user::User;
pub use channel::{Channel, ChannelKind, Guild};
pub use message::{Message, OutgoingMessage, SendOptions};
pub use command::{Category, CommandDescriptor, CommandHandler, CommandRegistry, Permission, Scope};
