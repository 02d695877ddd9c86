use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::{CommandError, RegistryError};
use crate::application::messaging::Context;

/// Category a command is listed under in help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Fun,
    Utility,
    Moderation,
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Fun => "Fun",
            Category::Utility => "Utility",
            Category::Moderation => "Moderation",
        }
    }
}

/// Restricts where a command may be invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Text,
    Voice,
    Both,
}

/// Platform permission flags a command may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    SendTtsMessages,
    ManageMessages,
    KickMembers,
    BanMembers,
    Administrator,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::SendTtsMessages => "Send TTS Messages",
            Permission::ManageMessages => "Manage Messages",
            Permission::KickMembers => "Kick Members",
            Permission::BanMembers => "Ban Members",
            Permission::Administrator => "Administrator",
        };
        write!(f, "{}", name)
    }
}

/// Command handler contract
///
/// Handlers produce side effects through the context's reply capability and
/// report faults as `Err`; the dispatcher turns those into a generic error
/// reply at its boundary. Arguments have already passed the scope and
/// permission gates, but each handler still validates its own argument
/// shape.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, ctx: Context, args: &[String]) -> Result<(), CommandError>;
}

/// Immutable metadata describing one registrable command
pub struct CommandDescriptor {
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    pub description: Option<String>,
    pub category: Category,
    pub scope: Scope,
    pub required_permission: Option<Permission>,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    pub fn new(alias: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            aliases: vec![alias.into()],
            usage: None,
            description: None,
            category: Category::Utility,
            scope: Scope::Both,
            required_permission: None,
            handler,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    /// Primary alias, used when referring to the command in messages
    pub fn name(&self) -> &str {
        &self.aliases[0]
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("scope", &self.scope)
            .field("required_permission", &self.required_permission)
            .finish()
    }
}

/// Command registry for resolving aliases to descriptors
///
/// Built once at startup and read-only afterwards, so it can be shared
/// across concurrent dispatches behind an `Arc` without locking.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<CommandDescriptor>>,
    order: Vec<Arc<CommandDescriptor>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under all of its aliases.
    ///
    /// Aliases are compared case-insensitively. On any failure the registry
    /// is left unchanged: every alias is validated before the first insert.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        if descriptor.aliases.is_empty() {
            return Err(RegistryError::NoAliases);
        }

        let mut keys = Vec::with_capacity(descriptor.aliases.len());
        for alias in &descriptor.aliases {
            let key = alias.to_lowercase();
            if key.is_empty() {
                return Err(RegistryError::EmptyAlias);
            }
            if self.commands.contains_key(&key) || keys.contains(&key) {
                return Err(RegistryError::DuplicateAlias(key));
            }
            keys.push(key);
        }

        let descriptor = Arc::new(descriptor);
        for key in keys {
            self.commands.insert(key, Arc::clone(&descriptor));
        }
        self.order.push(descriptor);
        Ok(())
    }

    /// Resolve an alias token to its descriptor, case-insensitively.
    ///
    /// Absence is a normal outcome, not an error.
    pub fn resolve(&self, token: &str) -> Option<&Arc<CommandDescriptor>> {
        self.commands.get(&token.to_lowercase())
    }

    /// Descriptors in registration order, one entry per command
    pub fn commands(&self) -> impl Iterator<Item = &Arc<CommandDescriptor>> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
