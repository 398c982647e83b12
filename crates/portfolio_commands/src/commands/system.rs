use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use terminal_contract::{ShellError, ThemeMode};
use terminal_shell::{CommandContext, CommandRegistration};

pub(super) fn registrations() -> Vec<CommandRegistration> {
    vec![
        clear_registration(),
        theme_registration(),
        matrix_registration(),
        htop_registration(),
        echo_registration(),
        base64_registration(),
    ]
}

fn clear_registration() -> CommandRegistration {
    super::registration(
        super::utility("clear", "Clear the terminal.", "clear"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                ctx.clear();
                Ok(())
            })
        }),
    )
}

fn theme_registration() -> CommandRegistration {
    CommandRegistration {
        completion: Some(Rc::new(|args, prefix| {
            if !args.is_empty() {
                return Vec::new();
            }
            [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
                .into_iter()
                .map(ThemeMode::as_str)
                .filter(|mode| mode.starts_with(prefix))
                .map(|mode| terminal_contract::CompletionItem {
                    value: mode.to_string(),
                    detail: None,
                })
                .collect()
        })),
        ..super::registration(
            super::utility("theme", "Switch the color scheme.", "theme <light|dark|system>"),
            Rc::new(|ctx: CommandContext| {
                Box::pin(async move {
                    let Some(raw) = ctx.args.first() else {
                        return Err(ShellError::usage("usage: theme <light|dark|system>"));
                    };
                    let Some(mode) = ThemeMode::parse(raw) else {
                        return Err(ShellError::usage(format!(
                            "theme: invalid theme '{raw}' (expected light, dark, or system)"
                        )));
                    };
                    ctx.set_theme(mode);
                    ctx.print(format!("Theme set to {mode}."));
                    Ok(())
                })
            }),
        )
    }
}

fn matrix_registration() -> CommandRegistration {
    super::registration(
        super::utility("matrix", "Toggle the matrix rain.", "matrix"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                if ctx.toggle_matrix() {
                    ctx.print("Matrix rain enabled. Wake up, Neo...");
                } else {
                    ctx.print("Matrix rain disabled.");
                }
                Ok(())
            })
        }),
    )
}

fn htop_registration() -> CommandRegistration {
    super::registration(
        super::utility("htop", "Toggle the system monitor.", "htop"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                if ctx.toggle_system_monitor() {
                    ctx.print("System monitor opened.");
                } else {
                    ctx.print("System monitor closed.");
                }
                Ok(())
            })
        }),
    )
}

fn echo_registration() -> CommandRegistration {
    super::registration(
        super::utility("echo", "Print text, or pass piped input through.", "echo [text]"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                let text = ctx.input_text();
                ctx.print_lines(text.split('\n'));
                Ok(())
            })
        }),
    )
}

fn base64_registration() -> CommandRegistration {
    super::registration(
        super::utility("base64", "Encode or decode (-d) base64.", "base64 [-d] [text]"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                let decode = ctx
                    .args
                    .first()
                    .is_some_and(|flag| flag == "-d" || flag == "--decode");
                let text = match &ctx.raw_input {
                    Some(raw) => raw.clone(),
                    None => ctx.args[usize::from(decode)..].join(" "),
                };
                if text.is_empty() && ctx.raw_input.is_none() {
                    return Err(ShellError::usage("usage: base64 [-d] <text>"));
                }

                if !decode {
                    ctx.print(STANDARD.encode(text.as_bytes()));
                    return Ok(());
                }
                let decoded = STANDARD
                    .decode(text.trim())
                    .ok()
                    .and_then(|bytes| String::from_utf8(bytes).ok())
                    .ok_or_else(|| ShellError::usage("base64: invalid input"))?;
                ctx.print_lines(decoded.split('\n'));
                Ok(())
            })
        }),
    )
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::testing::TestTerminal;

    #[test]
    fn base64_encodes_arguments_and_decodes_with_flag() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("base64 hello world"));
        block_on(terminal.run("base64 -d aGVsbG8gd29ybGQ="));
        assert_eq!(terminal.lines(), vec!["aGVsbG8gd29ybGQ=", "hello world"]);
    }

    #[test]
    fn base64_rejects_garbage() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("base64 -d !!!"));
        assert_eq!(terminal.lines(), vec!["base64: invalid input"]);
    }

    #[test]
    fn theme_applies_valid_modes_only() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("theme light"));
        block_on(terminal.run("theme Light"));
        assert_eq!(terminal.theme.applied(), vec![terminal_contract::ThemeMode::Light]);
        assert_eq!(
            terminal.lines(),
            vec![
                "Theme set to light.",
                "theme: invalid theme 'Light' (expected light, dark, or system)",
            ]
        );
    }

    #[test]
    fn matrix_toggles_store_flag() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("matrix"));
        assert!(terminal.store.read(|state| state.ui.matrix_enabled));
        block_on(terminal.run("matrix"));
        assert!(!terminal.store.read(|state| state.ui.matrix_enabled));
    }

    #[test]
    fn cls_is_a_hidden_alias_of_clear() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("echo one"));
        block_on(terminal.run("cls"));
        assert!(terminal.lines().is_empty());
        block_on(terminal.run("help"));
        assert!(!terminal.lines().iter().any(|line| line.contains("cls")));
    }
}
