use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use terminal_contract::ShellError;
use terminal_shell::{CommandContext, CommandRegistration};

use crate::content;

pub(super) fn registrations() -> Vec<CommandRegistration> {
    vec![decode_registration(), hint_registration()]
}

fn decode_registration() -> CommandRegistration {
    super::registration(
        super::utility("decode", "Decode a base64 string.", "decode <base64>"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                let input = ctx.input_text();
                let input = input.trim();
                if input.is_empty() {
                    return Err(ShellError::usage("usage: decode <base64>"));
                }
                let decoded = STANDARD
                    .decode(input)
                    .ok()
                    .and_then(|bytes| String::from_utf8(bytes).ok())
                    .ok_or_else(|| ShellError::usage("decode: invalid base64 input"))?;
                if decoded.trim() == content::FLAG {
                    ctx.print_lines(content::REWARD_LINES.iter().copied());
                } else {
                    ctx.print(format!("decoded: {decoded}"));
                }
                Ok(())
            })
        }),
    )
}

fn hint_registration() -> CommandRegistration {
    super::registration(
        super::utility("hint", "Hints for the hidden challenge.", "hint [n]"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                let numbered = |index: usize| format!("Hint {}: {}", index + 1, content::HINTS[index]);
                let Some(raw) = ctx.args.first() else {
                    ctx.print_lines((0..content::HINTS.len()).map(numbered));
                    return Ok(());
                };
                match raw.parse::<usize>() {
                    Ok(n) if (1..=content::HINTS.len()).contains(&n) => {
                        ctx.print(numbered(n - 1));
                        Ok(())
                    }
                    _ => Err(ShellError::usage(format!(
                        "hint: choose a number between 1 and {}",
                        content::HINTS.len()
                    ))),
                }
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
    fn hint_prints_one_or_all() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("hint 2"));
        assert_eq!(
            terminal.lines(),
            vec![format!("Hint 2: {}", content::HINTS[1])]
        );

        block_on(terminal.run("hint"));
        assert_eq!(terminal.lines().len(), 1 + content::HINTS.len());
    }

    #[test]
    fn hint_out_of_range_is_a_usage_line() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("hint 9"));
        assert_eq!(terminal.lines(), vec!["hint: choose a number between 1 and 3"]);
    }

    #[test]
    fn decode_prints_other_valid_text() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("decode aGVsbG8gd29ybGQ="));
        assert_eq!(terminal.lines(), vec!["decoded: hello world"]);
    }

    #[test]
    fn piped_secret_unlocks_the_reward() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("cat .secret | decode"));
        assert_eq!(terminal.lines(), content::REWARD_LINES.to_vec());
    }
}
