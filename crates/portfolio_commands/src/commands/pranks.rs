use std::rc::Rc;

use terminal_contract::ShellError;
use terminal_shell::{CommandContext, CommandRegistration};

use crate::{config::SiteConfig, content};

pub(super) fn registrations(config: Rc<SiteConfig>) -> Vec<CommandRegistration> {
    vec![sudo_registration(config.clone()), rm_registration(config)]
}

fn sudo_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::utility("sudo", "Run a command as root.", "sudo [command]"),
        Rc::new(move |ctx: CommandContext| {
            let user = config.prompt.user.clone();
            let delay_ms = config.terminal.sudo_delay_ms;
            Box::pin(async move {
                ctx.print(format!("[sudo] password for {user}:"));
                ctx.set_password_mode(true);
                ctx.delay(delay_ms).await;
                ctx.set_password_mode(false);
                ctx.print(format!(
                    "{user} is not in the sudoers file. This incident will be reported."
                ));
                Ok(())
            })
        }),
    )
}

fn rm_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::utility("rm", "Remove files.", "rm [-rf] <path>"),
        Rc::new(move |ctx: CommandContext| {
            let step_ms = config.terminal.panic_step_delay_ms;
            Box::pin(async move {
                match ctx.args.iter().rev().find(|arg| !arg.starts_with('-')) {
                    Some(target) if target == "/" => {}
                    Some(target) => {
                        return Err(ShellError::permission_denied(format!(
                            "rm: cannot remove '{target}': Permission denied"
                        )));
                    }
                    None => return Err(ShellError::permission_denied("rm: Permission denied")),
                }
                for line in content::KERNEL_PANIC_LINES {
                    ctx.print(*line);
                    ctx.delay(step_ms).await;
                }
                ctx.reload();
                Ok(())
            })
        }),
    )
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::{content, testing::TestTerminal};

    #[test]
    fn sudo_denies_after_masking_input() {
        let terminal = TestTerminal::new();
        let masked = std::rc::Rc::new(std::cell::Cell::new(false));
        let seen = masked.clone();
        let _watch = terminal.store.watch(
            |state| state.terminal.password_mode,
            move |enabled| {
                if *enabled {
                    seen.set(true);
                }
            },
        );

        block_on(terminal.run("sudo make me a sandwich"));

        assert!(masked.get());
        assert!(!terminal.store.read(|state| state.terminal.password_mode));
        assert_eq!(
            terminal.lines(),
            vec![
                "[sudo] password for guest:",
                "guest is not in the sudoers file. This incident will be reported.",
            ]
        );
    }

    #[test]
    fn bare_sudo_still_gets_the_denial() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("sudo"));
        assert_eq!(
            terminal.lines(),
            vec![
                "[sudo] password for guest:",
                "guest is not in the sudoers file. This incident will be reported.",
            ]
        );
    }

    #[test]
    fn rm_root_panics_then_reloads() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("rm -rf /"));
        assert_eq!(terminal.lines(), content::KERNEL_PANIC_LINES.to_vec());
        assert_eq!(terminal.navigation.reload_count(), 1);
    }

    #[test]
    fn rm_anything_else_is_denied() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("rm resume.pdf"));
        block_on(terminal.run("rm"));
        assert_eq!(
            terminal.lines(),
            vec![
                "rm: cannot remove 'resume.pdf': Permission denied",
                "rm: Permission denied",
            ]
        );
        assert_eq!(terminal.navigation.reload_count(), 0);
    }
}
