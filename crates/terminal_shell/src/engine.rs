//! Pipeline executor.

use std::{
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use futures::FutureExt;
use leptos::logging;
use terminal_contract::{CompletionItem, ExecutionSummary, ShellError, ShellExit};
use terminal_lexer::{parse_command_line, split_words};

use crate::{
    context::{CommandContext, OutputSink, ShellHost},
    CommandRegistry, RegisteredCommand,
};

/// Root interpreter: one registry, one host.
#[derive(Clone)]
pub struct ShellEngine {
    registry: CommandRegistry,
    host: Rc<dyn ShellHost>,
}

impl ShellEngine {
    /// Creates an engine over a finished registry.
    pub fn new(registry: CommandRegistry, host: Rc<dyn ShellHost>) -> Self {
        Self { registry, host }
    }

    /// Returns the command table.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Parses and runs `line` to completion.
    ///
    /// Every stage is resolved before any stage runs. Stages run one after another; each one's
    /// asynchronous tail finishes before the next starts. Only the last stage writes to the
    /// terminal. A failure at any point ends the pipeline with exactly one terminal line.
    pub async fn run_line(&self, line: &str) -> ExecutionSummary {
        let parsed = match parse_command_line(line) {
            Ok(parsed) => parsed,
            Err(err) => return self.fail(None, 0, err),
        };
        if parsed.is_empty() {
            return ExecutionSummary::empty();
        }

        let stage_count = parsed.stages.len();
        let mut resolved: Vec<(terminal_lexer::ParsedStage, Rc<RegisteredCommand>)> =
            Vec::with_capacity(stage_count);
        for stage in parsed.stages {
            match self.registry.lookup(&stage.name) {
                Some(command) => resolved.push((stage, command)),
                None => {
                    let err = ShellError::not_found(&stage.name);
                    return self.fail(None, stage_count, err);
                }
            }
        }

        let last_index = stage_count - 1;
        let mut raw_input = None;
        let mut last_name = None;
        for (index, (stage, command)) in resolved.into_iter().enumerate() {
            let output = if index == last_index {
                OutputSink::Terminal
            } else {
                OutputSink::buffer()
            };
            let context = CommandContext {
                name: stage.name.clone(),
                args: stage.args,
                raw_input: raw_input.take(),
                output: output.clone(),
                host: self.host.clone(),
                registry: self.registry.clone(),
            };
            let handler = command.handler.clone();
            // The handler is called inside the guarded future so a panic while building the
            // future is caught too. On wasm32 panics abort, so there this only catches errors
            // that handlers return.
            let outcome = AssertUnwindSafe(async move { handler(context).await })
                .catch_unwind()
                .await;
            match outcome {
                Ok(Ok(())) => {
                    raw_input = output.take_buffered().map(|lines| lines.join("\n"));
                    last_name = Some(stage.name);
                }
                Ok(Err(err)) => return self.fail(Some(stage.name), stage_count, err),
                Err(_) => {
                    logging::warn!("terminal command `{}` panicked", stage.name);
                    let err = ShellError::internal(format!("{}: command failed", stage.name));
                    return self.fail(Some(stage.name), stage_count, err);
                }
            }
        }

        ExecutionSummary {
            command: last_name,
            stages: stage_count,
            exit: ShellExit::success(),
        }
    }

    /// Runs `line` on the host scheduler.
    ///
    /// `on_sync_complete` fires once the execution first yields or finishes, whichever comes
    /// first; the terminal uses it to unlock input while an asynchronous tail keeps running.
    pub fn submit(&self, line: impl Into<String>, on_sync_complete: impl FnOnce() + 'static) {
        let engine = self.clone();
        let line = line.into();
        let task = async move {
            engine.run_line(&line).await;
        };
        self.host.scheduler().spawn_local(Box::pin(ReleaseAfterFirstPoll {
            inner: Box::pin(task),
            release: Some(Box::new(on_sync_complete)),
        }));
    }

    /// Completion candidates for the stage under the cursor.
    ///
    /// The first word completes against public command names; later words use the command's own
    /// completion provider, if it has one.
    pub fn complete(&self, line: &str) -> Vec<CompletionItem> {
        let Ok(words) = split_words(line) else {
            return Vec::new();
        };
        let stage_start = words
            .iter()
            .rposition(|word| word == "|")
            .map(|index| index + 1)
            .unwrap_or(0);
        let mut stage = words[stage_start..].to_vec();
        let ends_with_space = line.chars().last().is_some_and(char::is_whitespace);
        let prefix = if ends_with_space {
            String::new()
        } else {
            stage.pop().unwrap_or_default()
        };

        let mut items = if stage.is_empty() {
            self.registry
                .public_descriptors()
                .into_iter()
                .filter(|descriptor| descriptor.name.starts_with(&prefix))
                .map(|descriptor| CompletionItem {
                    value: descriptor.name,
                    detail: Some(descriptor.description),
                })
                .collect::<Vec<_>>()
        } else {
            let command = self.registry.lookup(&stage[0]);
            match command.as_ref().and_then(|command| command.completion.as_ref()) {
                Some(completion) => completion(&stage[1..], &prefix),
                None => Vec::new(),
            }
        };
        items.sort_by(|left, right| left.value.cmp(&right.value));
        items.dedup_by(|left, right| left.value == right.value);
        items
    }

    fn fail(&self, command: Option<String>, stages: usize, err: ShellError) -> ExecutionSummary {
        self.host.append_lines(vec![err.message.clone()]);
        ExecutionSummary {
            command,
            stages,
            exit: ShellExit::from_error(&err),
        }
    }
}

struct ReleaseAfterFirstPoll<F> {
    inner: F,
    release: Option<Box<dyn FnOnce()>>,
}

impl<F> Future for ReleaseAfterFirstPoll<F>
where
    F: Future<Output = ()> + Unpin,
{
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = &mut *self;
        let poll = Pin::new(&mut this.inner).poll(cx);
        if let Some(release) = this.release.take() {
            release();
        }
        poll
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::{channel::oneshot, executor::block_on, future::LocalBoxFuture};
    use platform_host::{LocalPoolScheduler, TaskScheduler};
    use pretty_assertions::assert_eq;
    use terminal_contract::{CommandCategory, CommandDescriptor, ThemeMode};

    use super::*;
    use crate::{ArgCompletion, CommandHandler, CommandRegistryBuilder};

    #[derive(Default)]
    struct MemoryHost {
        lines: RefCell<Vec<String>>,
        scheduler: LocalPoolScheduler,
    }

    impl ShellHost for MemoryHost {
        fn append_lines(&self, lines: Vec<String>) {
            self.lines.borrow_mut().extend(lines);
        }

        fn clear(&self) {
            self.lines.borrow_mut().clear();
        }

        fn set_password_mode(&self, _enabled: bool) {}

        fn navigate(&self, _path: &str) {}

        fn reload(&self) {}

        fn set_theme(&self, _mode: ThemeMode) {}

        fn toggle_matrix(&self) -> bool {
            false
        }

        fn matrix_enabled(&self) -> bool {
            false
        }

        fn toggle_system_monitor(&self) -> bool {
            false
        }

        fn set_input(&self, _input: &str) {}

        fn history(&self) -> Vec<String> {
            Vec::new()
        }

        fn open_external(&self, _url: &str) -> LocalBoxFuture<'static, Result<(), String>> {
            Box::pin(async { Ok(()) })
        }

        fn scheduler(&self) -> Rc<dyn TaskScheduler> {
            Rc::new(self.scheduler.clone())
        }
    }

    fn descriptor(name: &str) -> CommandDescriptor {
        CommandDescriptor::new(name, format!("{name} command"), CommandCategory::Utility, name)
    }

    fn echo() -> CommandHandler {
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                ctx.print(ctx.input_text());
                Ok(())
            })
        })
    }

    fn upper() -> CommandHandler {
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                ctx.print(ctx.input_text().to_uppercase());
                Ok(())
            })
        })
    }

    fn engine_with(
        extra: impl FnOnce(&mut CommandRegistryBuilder),
    ) -> (ShellEngine, Rc<MemoryHost>) {
        let mut builder = CommandRegistryBuilder::new();
        builder.register(descriptor("echo"), echo()).expect("echo");
        builder.register(descriptor("upper"), upper()).expect("upper");
        extra(&mut builder);
        let host = Rc::new(MemoryHost::default());
        let engine = ShellEngine::new(builder.build().expect("build"), host.clone());
        (engine, host)
    }

    fn lines(host: &MemoryHost) -> Vec<String> {
        host.lines.borrow().clone()
    }

    #[test]
    fn unknown_command_prints_one_line() {
        let (engine, host) = engine_with(|_| {});
        let summary = block_on(engine.run_line("frobnicate --now"));
        assert_eq!(lines(&host), vec!["frobnicate: command not found"]);
        assert_eq!(summary.exit.code, 127);
    }

    #[test]
    fn only_the_last_stage_reaches_the_terminal() {
        let (engine, host) = engine_with(|_| {});
        let summary = block_on(engine.run_line("echo hello world | upper"));
        assert_eq!(lines(&host), vec!["HELLO WORLD"]);
        assert_eq!(summary.command.as_deref(), Some("upper"));
        assert_eq!(summary.stages, 2);
    }

    #[test]
    fn unresolved_later_stage_prevents_earlier_stages_from_running() {
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let (engine, host) = engine_with(move |builder| {
            let handler: CommandHandler = Rc::new(move |_ctx| {
                flag.set(true);
                Box::pin(async { Ok(()) })
            });
            builder.register(descriptor("touch"), handler).expect("touch");
        });
        block_on(engine.run_line("touch | nope | upper"));
        assert!(!ran.get());
        assert_eq!(lines(&host), vec!["nope: command not found"]);
    }

    #[test]
    fn parse_errors_become_one_line() {
        let (engine, host) = engine_with(|_| {});
        let summary = block_on(engine.run_line("echo hi |"));
        assert_eq!(lines(&host), vec!["parse error: pipeline cannot end with '|'"]);
        assert_eq!(summary.exit.code, 2);
    }

    #[test]
    fn handler_errors_stop_the_pipeline() {
        let (engine, host) = engine_with(|builder| {
            let handler: CommandHandler = Rc::new(|_ctx| {
                Box::pin(async { Err(ShellError::usage("usage: fail <thing>")) })
            });
            builder.register(descriptor("fail"), handler).expect("fail");
        });
        block_on(engine.run_line("fail | upper"));
        assert_eq!(lines(&host), vec!["usage: fail <thing>"]);
    }

    #[test]
    fn panicking_handler_is_contained() {
        let (engine, host) = engine_with(|builder| {
            let handler: CommandHandler = Rc::new(|_ctx| panic!("boom"));
            builder.register(descriptor("boom"), handler).expect("boom");
        });
        let summary = block_on(engine.run_line("boom"));
        assert_eq!(lines(&host), vec!["boom: command failed"]);
        assert_eq!(summary.exit.code, 1);

        block_on(engine.run_line("echo still alive"));
        assert_eq!(lines(&host).last().map(String::as_str), Some("still alive"));
    }

    #[test]
    fn alias_runs_its_target() {
        let (engine, host) = engine_with(|builder| {
            builder.alias(descriptor("say").hidden(), "echo").expect("alias");
        });
        block_on(engine.run_line("say hi"));
        assert_eq!(lines(&host), vec!["hi"]);
    }

    #[test]
    fn submit_releases_input_before_the_async_tail_finishes() {
        let (sender, receiver) = oneshot::channel::<()>();
        let receiver = Rc::new(RefCell::new(Some(receiver)));
        let (engine, host) = engine_with(move |builder| {
            let handler: CommandHandler = Rc::new(move |ctx| {
                let receiver = receiver.borrow_mut().take();
                Box::pin(async move {
                    ctx.print("working");
                    if let Some(receiver) = receiver {
                        let _ = receiver.await;
                    }
                    ctx.print("done");
                    Ok(())
                })
            });
            builder.register(descriptor("slow"), handler).expect("slow");
        });

        let released = Rc::new(Cell::new(false));
        let flag = released.clone();
        engine.submit("slow", move || flag.set(true));
        assert!(!released.get());

        host.scheduler.run_until_stalled();
        assert!(released.get());
        assert_eq!(lines(&host), vec!["working"]);

        sender.send(()).expect("send");
        host.scheduler.run_until_stalled();
        assert_eq!(lines(&host), vec!["working", "done"]);
    }

    #[test]
    fn async_stage_finishes_before_the_next_stage_starts() {
        let (sender, receiver) = oneshot::channel::<()>();
        let receiver = Rc::new(RefCell::new(Some(receiver)));
        let (engine, host) = engine_with(move |builder| {
            let handler: CommandHandler = Rc::new(move |ctx| {
                let receiver = receiver.borrow_mut().take();
                Box::pin(async move {
                    ctx.print("first");
                    if let Some(receiver) = receiver {
                        let _ = receiver.await;
                    }
                    ctx.print("second");
                    Ok(())
                })
            });
            builder.register(descriptor("wait"), handler).expect("wait");
        });

        engine.submit("wait | upper", || {});
        host.scheduler.run_until_stalled();
        assert!(lines(&host).is_empty());

        sender.send(()).expect("send");
        host.scheduler.run_until_stalled();
        assert_eq!(lines(&host), vec!["FIRST\nSECOND"]);
    }

    #[test]
    fn completes_command_names_and_arguments() {
        let (engine, _host) = engine_with(|builder| {
            let completion: ArgCompletion = Rc::new(|_args, prefix| {
                ["blogs", "books"]
                    .into_iter()
                    .filter(|dir| dir.starts_with(prefix))
                    .map(|dir| CompletionItem {
                        value: dir.to_string(),
                        detail: None,
                    })
                    .collect()
            });
            builder
                .register_with_completion(descriptor("cd"), echo(), completion)
                .expect("cd");
            builder.alias(descriptor("ee").hidden(), "echo").expect("ee");
        });

        let values = |items: Vec<CompletionItem>| {
            items.into_iter().map(|item| item.value).collect::<Vec<_>>()
        };
        assert_eq!(values(engine.complete("e")), vec!["echo"]);
        assert_eq!(values(engine.complete("echo x | u")), vec!["upper"]);
        assert_eq!(values(engine.complete("cd bl")), vec!["blogs"]);
        assert_eq!(values(engine.complete("cd ")), vec!["blogs", "books"]);
        assert!(engine.complete("upper ").is_empty());
    }
}
