//! The command registry.

use super::definitions::CommandDescriptor;
use std::collections::HashMap;
use tracing::debug;

/// Insertion-ordered mapping from lowercase name to command descriptor.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command. A command with the same name is replaced in place.
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        match self.index.get(&descriptor.name) {
            Some(&slot) => {
                debug!(name = %descriptor.name, "Replacing registered command");
                self.commands[slot] = descriptor;
            }
            None => {
                debug!(name = %descriptor.name, "Registering command");
                self.index
                    .insert(descriptor.name.clone(), self.commands.len());
                self.commands.push(descriptor);
            }
        }
    }

    /// Finds a command by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.index
            .get(&name.to_lowercase())
            .map(|&slot| &self.commands[slot])
    }

    /// All commands in registration order.
    pub fn all(&self) -> std::slice::Iter<'_, CommandDescriptor> {
        self.commands.iter()
    }

    /// Commands whose name starts with `prefix` (lowercased), in registration order.
    pub fn complete<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = &'a CommandDescriptor> + Clone + 'a {
        let prefix = prefix.to_lowercase();
        self.commands
            .iter()
            .filter(move |c| c.name.starts_with(&prefix))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
