//! Immutable command table.

use std::{collections::BTreeMap, rc::Rc};

use futures::future::LocalBoxFuture;
use terminal_contract::{CommandDescriptor, CompletionItem, ShellError};
use thiserror::Error;

use crate::CommandContext;

/// Pending result of one command execution.
pub type CommandFuture = LocalBoxFuture<'static, Result<(), ShellError>>;

/// Async command handler.
pub type CommandHandler = Rc<dyn Fn(CommandContext) -> CommandFuture>;

/// Argument completion provider: receives the arguments before the cursor and the partial word.
pub type ArgCompletion = Rc<dyn Fn(&[String], &str) -> Vec<CompletionItem>>;

/// Registry construction failure. These are programming errors in the command table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two registrations used the same name.
    #[error("command `{0}` is already registered")]
    Duplicate(String),
    /// An alias points at a name nothing registered.
    #[error("alias `{alias}` targets unknown command `{target}`")]
    UnknownAliasTarget {
        /// Alias name.
        alias: String,
        /// Missing target name.
        target: String,
    },
}

/// One registry entry.
pub struct RegisteredCommand {
    /// Help metadata.
    pub descriptor: CommandDescriptor,
    /// Execution entry point.
    pub handler: CommandHandler,
    /// Optional argument completion.
    pub completion: Option<ArgCompletion>,
}

/// A command ready to be added to a [`CommandRegistryBuilder`].
pub struct CommandRegistration {
    /// Help metadata.
    pub descriptor: CommandDescriptor,
    /// Optional argument completion.
    pub completion: Option<ArgCompletion>,
    /// Execution entry point.
    pub handler: CommandHandler,
}

/// Builder for [`CommandRegistry`]. The registry cannot change once built.
#[derive(Default)]
pub struct CommandRegistryBuilder {
    commands: BTreeMap<String, Rc<RegisteredCommand>>,
    order: Vec<String>,
    aliases: Vec<(String, String)>,
}

impl CommandRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one command.
    pub fn register(
        &mut self,
        descriptor: CommandDescriptor,
        handler: CommandHandler,
    ) -> Result<&mut Self, RegistryError> {
        self.insert(descriptor, handler, None)
    }

    /// Registers one command with argument completion.
    pub fn register_with_completion(
        &mut self,
        descriptor: CommandDescriptor,
        handler: CommandHandler,
        completion: ArgCompletion,
    ) -> Result<&mut Self, RegistryError> {
        self.insert(descriptor, handler, Some(completion))
    }

    /// Registers a prepared [`CommandRegistration`].
    pub fn add(&mut self, registration: CommandRegistration) -> Result<&mut Self, RegistryError> {
        self.insert(
            registration.descriptor,
            registration.handler,
            registration.completion,
        )
    }

    /// Registers `descriptor` as a thin alias of `target`.
    ///
    /// The target is looked up on every call, not now, so the alias always runs whatever the
    /// finished registry holds under that name.
    pub fn alias(
        &mut self,
        descriptor: CommandDescriptor,
        target: impl Into<String>,
    ) -> Result<&mut Self, RegistryError> {
        let target = target.into();
        self.aliases.push((descriptor.name.clone(), target.clone()));
        let handler: CommandHandler = Rc::new(move |context: CommandContext| {
            let resolved = context.registry().lookup(&target);
            match resolved {
                Some(command) => (command.handler)(context),
                None => {
                    let err = ShellError::not_found(&target);
                    Box::pin(async move { Err(err) })
                }
            }
        });
        self.insert(descriptor, handler, None)
    }

    fn insert(
        &mut self,
        descriptor: CommandDescriptor,
        handler: CommandHandler,
        completion: Option<ArgCompletion>,
    ) -> Result<&mut Self, RegistryError> {
        if self.commands.contains_key(&descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name));
        }
        let name = descriptor.name.clone();
        self.commands.insert(
            name.clone(),
            Rc::new(RegisteredCommand {
                descriptor,
                handler,
                completion,
            }),
        );
        self.order.push(name);
        Ok(self)
    }

    /// Freezes the table.
    pub fn build(self) -> Result<CommandRegistry, RegistryError> {
        for (alias, target) in &self.aliases {
            if !self.commands.contains_key(target) {
                return Err(RegistryError::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(CommandRegistry {
            commands: Rc::new(self.commands),
            order: Rc::new(self.order),
        })
    }
}

/// Shared, immutable command table. Clones share the same entries.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: Rc<BTreeMap<String, Rc<RegisteredCommand>>>,
    order: Rc<Vec<String>>,
}

impl CommandRegistry {
    /// Case-sensitive exact-name lookup.
    pub fn lookup(&self, name: &str) -> Option<Rc<RegisteredCommand>> {
        self.commands.get(name).cloned()
    }

    /// All descriptors in registration order, hidden ones included.
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .map(|registered| registered.descriptor.clone())
            .collect()
    }

    /// Descriptors that help and completion may list.
    pub fn public_descriptors(&self) -> Vec<CommandDescriptor> {
        self.descriptors()
            .into_iter()
            .filter(CommandDescriptor::is_public)
            .collect()
    }

    /// Number of registered names, aliases included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
