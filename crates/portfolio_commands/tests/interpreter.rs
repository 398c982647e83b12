use std::rc::Rc;

use futures::executor::block_on;
use platform_host::{
    HostServices, HostStrategy, LocalPoolScheduler, RecordingExternalUrlService,
    RecordingNavigationService, RecordingThemeService,
};
use portfolio_commands::{build_engine, builtin_registry, content, SiteConfig};
use portfolio_store::Store;
use pretty_assertions::assert_eq;
use terminal_contract::ThemeMode;
use terminal_shell::ShellEngine;

struct Harness {
    store: Store,
    navigation: RecordingNavigationService,
    theme: RecordingThemeService,
    external_urls: RecordingExternalUrlService,
    engine: ShellEngine,
}

impl Harness {
    /// Fresh interpreter over a reset store, so several harnesses can share one test thread.
    fn new() -> Self {
        let store = Store::global();
        store.reset();
        let navigation = RecordingNavigationService::default();
        let theme = RecordingThemeService::default();
        let external_urls = RecordingExternalUrlService::default();
        let services = HostServices {
            navigation: Rc::new(navigation.clone()),
            theme: Rc::new(theme.clone()),
            external_urls: Rc::new(external_urls.clone()),
            scheduler: Rc::new(LocalPoolScheduler::new()),
            host_strategy: HostStrategy::Headless,
        };
        let engine = build_engine(store.clone(), services, Rc::new(SiteConfig::embedded()))
            .expect("builtin registry");
        Self {
            store,
            navigation,
            theme,
            external_urls,
            engine,
        }
    }

    fn run(&self, line: &str) {
        block_on(self.engine.run_line(line));
    }

    fn lines(&self) -> Vec<String> {
        self.store.read(|state| state.terminal.lines.clone())
    }
}

#[test]
fn registry_lookup_is_stable_for_every_command() {
    let registry = builtin_registry(Rc::new(SiteConfig::default())).expect("registry");
    for descriptor in registry.descriptors() {
        let first = registry.lookup(&descriptor.name).expect("registered");
        let second = registry.lookup(&descriptor.name).expect("registered");
        assert!(Rc::ptr_eq(&first, &second), "{}", descriptor.name);
        assert_eq!(first.descriptor, descriptor);
    }
}

#[test]
fn every_spec_command_is_registered() {
    let registry = builtin_registry(Rc::new(SiteConfig::default())).expect("registry");
    for name in [
        "help", "clear", "cls", "ls", "cd", "pwd", "cat", "whoami", "contact", "skills", "theme",
        "matrix", "neofetch", "open", "sudo", "rm", "decode", "hint", "echo", "base64", "history",
        "htop", "top",
    ] {
        assert!(registry.lookup(name).is_some(), "{name}");
    }
}

#[test]
fn unknown_commands_produce_one_not_found_line() {
    for name in ["frobnicate", "LS", "hel", "x"] {
        let harness = Harness::new();
        harness.run(&format!("{name} --flag value"));
        let lines = harness.lines();
        assert_eq!(lines.len(), 1, "{name}");
        assert!(lines[0].contains(name));
        assert!(lines[0].contains("not found"));
    }
}

#[test]
fn harness_starts_from_an_empty_terminal() {
    let first = Harness::new();
    first.run("whoami");
    first.store.push_history("whoami");
    assert!(!first.lines().is_empty());

    let second = Harness::new();
    assert!(second.lines().is_empty());
    assert!(second.store.snapshot().terminal.history.is_empty());
}

#[test]
fn echo_into_base64_encodes_the_text() {
    let harness = Harness::new();
    harness.run("echo hello world | base64");
    assert_eq!(harness.lines(), vec!["aGVsbG8gd29ybGQ="]);
}

#[test]
fn base64_round_trip_through_a_pipeline() {
    for text in ["hello", "portfolio shell 2024", "ünïcödé"] {
        let harness = Harness::new();
        harness.run(&format!("echo {text} | base64 | base64 -d"));
        assert_eq!(harness.lines(), vec![text.to_string()]);
    }
}

#[test]
fn decode_of_the_flag_prints_the_reward() {
    let harness = Harness::new();
    harness.run(&format!("decode {}", content::FLAG_BASE64));
    assert_eq!(harness.lines(), content::REWARD_LINES.to_vec());
}

#[test]
fn decode_of_garbage_prints_only_the_error() {
    let harness = Harness::new();
    harness.run("decode not*base64");
    assert_eq!(harness.lines(), vec!["decode: invalid base64 input"]);
}

#[test]
fn clear_always_empties_lines_and_input() {
    let harness = Harness::new();
    harness.run("help");
    harness.store.set_input("half typed");
    harness.run("clear");
    let state = harness.store.snapshot();
    assert!(state.terminal.lines.is_empty());
    assert!(state.terminal.input.is_empty());

    harness.run("clear");
    assert!(harness.lines().is_empty());
}

#[test]
fn theme_dark_applies_and_confirms() {
    let harness = Harness::new();
    harness.run("theme dark");
    assert_eq!(harness.theme.applied(), vec![ThemeMode::Dark]);
    assert_eq!(harness.lines().len(), 1);
    assert_eq!(harness.store.snapshot().ui.theme, ThemeMode::Dark);
}

#[test]
fn theme_neon_is_rejected_without_a_setter_call() {
    let harness = Harness::new();
    harness.run("theme neon");
    assert!(harness.theme.applied().is_empty());
    let lines = harness.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("invalid theme"));
}

#[test]
fn cd_blogs_pushes_the_route() {
    let harness = Harness::new();
    harness.run("cd blogs");
    assert_eq!(harness.navigation.pushed(), vec!["/blogs"]);
}

#[test]
fn cd_nowhere_reports_and_does_not_navigate() {
    let harness = Harness::new();
    harness.run("cd nowhere");
    assert!(harness.navigation.pushed().is_empty());
    assert_eq!(harness.lines(), vec!["cd: no such directory: nowhere"]);
}

#[test]
fn open_url_uses_the_external_service() {
    let harness = Harness::new();
    harness.run("open https://github.com");
    assert_eq!(harness.external_urls.opened(), vec!["https://github.com"]);
    assert!(harness.navigation.pushed().is_empty());
}

#[test]
fn intermediate_stage_output_is_not_displayed() {
    let harness = Harness::new();
    harness.run("whoami | echo");
    let whoami_lines = harness.lines();

    let harness = Harness::new();
    harness.run("whoami");
    assert_eq!(whoami_lines, harness.lines());
}

#[test]
fn parse_errors_leave_the_interpreter_usable() {
    let harness = Harness::new();
    harness.run("| ls");
    harness.run("echo ok");
    assert_eq!(
        harness.lines(),
        vec!["parse error: empty pipeline stage", "ok"]
    );
}

#[test]
fn history_lists_and_recalls_entries() {
    let harness = Harness::new();
    harness.store.push_history("ls");
    harness.store.push_history("theme dark");
    harness.run("history");
    harness.run("history -e 2");
    assert_eq!(harness.lines(), vec!["   1  ls", "   2  theme dark"]);
    assert_eq!(harness.store.snapshot().terminal.input, "theme dark");
}

#[test]
fn neofetch_reflects_matrix_state() {
    let harness = Harness::new();
    harness.run("matrix");
    harness.run("neofetch");
    assert!(harness.lines().iter().any(|line| line == "Matrix: enabled"));
    assert!(harness.lines().iter().any(|line| line == "Host: headless"));
}

#[test]
fn completion_lists_commands_and_directories() {
    let harness = Harness::new();
    let values = |line: &str| {
        harness
            .engine
            .complete(line)
            .into_iter()
            .map(|item| item.value)
            .collect::<Vec<_>>()
    };
    assert_eq!(values("he"), vec!["help"]);
    assert_eq!(values("cd b"), vec!["blogs", "books"]);
    assert_eq!(values("theme s"), vec!["system"]);
    assert!(values("cl").contains(&"clear".to_string()));
    assert!(!values("cl").contains(&"cls".to_string()));
}
