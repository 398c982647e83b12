use std::rc::Rc;

use terminal_contract::{CommandCategory, ShellError};
use terminal_shell::{CommandContext, CommandRegistration};

use crate::{config::SiteConfig, content};

pub(super) fn registrations(config: Rc<SiteConfig>) -> Vec<CommandRegistration> {
    vec![
        help_registration(),
        whoami_registration(config.clone()),
        contact_registration(config.clone()),
        skills_registration(config.clone()),
        neofetch_registration(config),
        history_registration(),
    ]
}

fn help_registration() -> CommandRegistration {
    super::registration(
        super::utility("help", "List available commands.", "help"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                let descriptors = ctx.registry().public_descriptors();
                let width = descriptors
                    .iter()
                    .map(|descriptor| descriptor.usage.len())
                    .max()
                    .unwrap_or(0);
                let mut lines = Vec::new();
                for category in [CommandCategory::Navigation, CommandCategory::Utility] {
                    lines.push(format!("{}:", category.heading()));
                    lines.extend(
                        descriptors
                            .iter()
                            .filter(|descriptor| descriptor.category == category)
                            .map(|descriptor| {
                                format!(
                                    "  {:<width$}  {}",
                                    descriptor.usage, descriptor.description
                                )
                            }),
                    );
                    lines.push(String::new());
                }
                lines.push("Pipe output between commands with `|`, e.g. `echo hi | base64`.".into());
                ctx.print_lines(lines);
                Ok(())
            })
        }),
    )
}

fn whoami_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::utility("whoami", "Who runs this site.", "whoami"),
        Rc::new(move |ctx: CommandContext| {
            let lines = content::profile_lines(&config);
            Box::pin(async move {
                ctx.print_lines(lines);
                Ok(())
            })
        }),
    )
}

fn contact_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::utility("contact", "How to reach me.", "contact"),
        Rc::new(move |ctx: CommandContext| {
            let lines = content::contact_lines(&config);
            Box::pin(async move {
                ctx.print_lines(lines);
                Ok(())
            })
        }),
    )
}

fn skills_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::utility("skills", "Languages and tools I work with.", "skills"),
        Rc::new(move |ctx: CommandContext| {
            let lines = config
                .profile
                .skills
                .iter()
                .map(|group| format!("{}: {}", group.name, group.items.join(", ")))
                .collect::<Vec<_>>();
            Box::pin(async move {
                ctx.print_lines(lines);
                Ok(())
            })
        }),
    )
}

fn neofetch_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::utility("neofetch", "System information.", "neofetch"),
        Rc::new(move |ctx: CommandContext| {
            let config = config.clone();
            Box::pin(async move {
                let title = format!("{}@{}", config.prompt.user, config.prompt.host);
                let matrix = if ctx.matrix_enabled() {
                    "enabled"
                } else {
                    "disabled"
                };
                ctx.print_lines([
                    title.clone(),
                    "-".repeat(title.len()),
                    "OS: PortfolioOS (wasm32)".to_string(),
                    format!("Host: {}", ctx.host_label()),
                    format!("Owner: {}", config.profile.name),
                    "Shell: portfolio-sh".to_string(),
                    format!("Commands: {}", ctx.registry().public_descriptors().len()),
                    format!("Matrix: {matrix}"),
                ]);
                Ok(())
            })
        }),
    )
}

fn history_registration() -> CommandRegistration {
    super::registration(
        super::utility(
            "history",
            "Show command history; -e loads an entry into the prompt.",
            "history [-e <n>]",
        ),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                let history = ctx.history();
                match ctx.args.as_slice() {
                    [] => {
                        ctx.print_lines(
                            history
                                .iter()
                                .enumerate()
                                .map(|(index, command)| format!("{:>4}  {command}", index + 1)),
                        );
                        Ok(())
                    }
                    [flag, number] if flag == "-e" => {
                        let entry = number
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .and_then(|index| history.get(index));
                        match entry {
                            Some(command) => {
                                ctx.set_input(command);
                                Ok(())
                            }
                            None => Err(ShellError::usage(format!(
                                "history: no such entry: {number}"
                            ))),
                        }
                    }
                    _ => Err(ShellError::usage("usage: history [-e <n>]")),
                }
            })
        }),
    )
}
