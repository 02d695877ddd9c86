//! Concrete command handlers registered at startup

pub mod help;
pub mod ping;
pub mod tts;


use crate::application::errors::RegistryError;
use crate::domain::entities::CommandRegistry;

/// Build the default command set
pub fn register_defaults(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(tts::descriptor())?;
    registry.register(ping::descriptor())?;
    registry.register(help::descriptor())?;
    Ok(())
}
