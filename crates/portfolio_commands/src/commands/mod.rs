use std::rc::Rc;

use terminal_contract::{CommandCategory, CommandDescriptor, CompletionItem};
use terminal_shell::{
    ArgCompletion, CommandHandler, CommandRegistration, CommandRegistry, CommandRegistryBuilder,
    RegistryError,
};

use crate::{config::SiteConfig, content};

mod challenge;
mod info;
mod navigation;
mod pranks;
mod system;

/// Builds the full built-in command table.
pub fn builtin_registry(config: Rc<SiteConfig>) -> Result<CommandRegistry, RegistryError> {
    let mut builder = CommandRegistryBuilder::new();
    let mut registrations = Vec::new();
    registrations.extend(info::registrations(config.clone()));
    registrations.extend(navigation::registrations(config.clone()));
    registrations.extend(system::registrations());
    registrations.extend(pranks::registrations(config));
    registrations.extend(challenge::registrations());
    for registration in registrations {
        builder.add(registration)?;
    }
    builder.alias(
        utility("cls", "Alias of clear.", "cls").hidden(),
        "clear",
    )?;
    builder.alias(
        utility("top", "Alias of htop.", "top").hidden(),
        "htop",
    )?;
    builder.build()
}

fn navigation(name: &str, description: &str, usage: &str) -> CommandDescriptor {
    CommandDescriptor::new(name, description, CommandCategory::Navigation, usage)
}

fn utility(name: &str, description: &str, usage: &str) -> CommandDescriptor {
    CommandDescriptor::new(name, description, CommandCategory::Utility, usage)
}

fn registration(descriptor: CommandDescriptor, handler: CommandHandler) -> CommandRegistration {
    CommandRegistration {
        descriptor,
        completion: None,
        handler,
    }
}

/// Completes the first argument against virtual directory names.
fn directory_completion() -> ArgCompletion {
    Rc::new(|args, prefix| {
        if !args.is_empty() {
            return Vec::new();
        }
        content::DIRECTORIES
            .iter()
            .filter(|directory| directory.name.starts_with(prefix))
            .map(|directory| CompletionItem {
                value: directory.name.to_string(),
                detail: Some(directory.route.to_string()),
            })
            .collect()
    })
}
