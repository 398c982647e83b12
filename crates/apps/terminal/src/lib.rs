//! Terminal widget backed by the shared store and the portfolio command table.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod controller;

use leptos::ev::{self, KeyboardEvent};
use leptos::*;
use terminal_contract::CompletionItem;

pub use controller::{HistoryDirection, TerminalController};

#[component]
/// Terminal window contents.
///
/// Renders the store's terminal lines and forwards keystrokes to `controller`. The intro sequence
/// starts when the widget mounts for the first time.
pub fn TerminalApp(
    /// Behavior shared with headless callers.
    controller: TerminalController,
) -> impl IntoView {
    let store = controller.store().clone();
    let terminal = create_rw_signal(store.read(|state| state.terminal.clone()));
    let subscription = store.watch(
        |state| state.terminal.clone(),
        move |next| terminal.set(next.clone()),
    );
    on_cleanup(move || drop(subscription));
    let suggestions = create_rw_signal(Vec::<CompletionItem>::new());

    controller.run_intro();

    let prompt = controller.prompt().to_string();
    let on_input = {
        let controller = controller.clone();
        move |ev: ev::Event| controller.set_input(event_target_value(&ev))
    };
    let on_keydown = {
        let controller = controller.clone();
        move |ev: KeyboardEvent| match ev.key().as_str() {
            "Enter" => {
                suggestions.set(Vec::new());
                let line = terminal.get_untracked().input;
                controller.submit(&line);
            }
            "ArrowUp" => {
                ev.prevent_default();
                controller.navigate_history(HistoryDirection::Older);
            }
            "ArrowDown" => {
                ev.prevent_default();
                controller.navigate_history(HistoryDirection::Newer);
            }
            "Tab" => {
                ev.prevent_default();
                suggestions.set(controller.complete());
            }
            "Escape" => suggestions.set(Vec::new()),
            "l" | "L" if ev.ctrl_key() => {
                ev.prevent_default();
                controller.store().clear_terminal();
            }
            _ => {}
        }
    };
    let pick_suggestion = Callback::new({
        let controller = controller.clone();
        move |value: String| {
            let input = terminal.get_untracked().input;
            let head = input.trim_end_matches(|c: char| !c.is_whitespace());
            controller.set_input(format!("{head}{value} "));
            suggestions.set(Vec::new());
        }
    });

    let indexed_lines = move || {
        terminal
            .get()
            .lines
            .into_iter()
            .enumerate()
            .collect::<Vec<_>>()
    };

    view! {
        <div class="app-shell app-terminal-shell">
            <div class="terminal-screen" role="log" aria-live="polite">
                <For each=indexed_lines key=|(idx, line)| (*idx, line.clone()) let:entry>
                    <div class="terminal-line">{entry.1}</div>
                </For>
            </div>

            <Show when=move || !suggestions.get().is_empty() fallback=|| ()>
                <div class="terminal-completions" role="listbox" aria-label="Completions">
                    <For each=move || suggestions.get() key=|item| item.value.clone() let:item>
                        <button
                            type="button"
                            class="terminal-completion"
                            on:click={
                                let value = item.value.clone();
                                move |_| pick_suggestion.call(value.clone())
                            }
                        >
                            {item.value.clone()}
                        </button>
                    </For>
                </div>
            </Show>

            <div class="terminal-input-row">
                <label class="terminal-prompt" for="terminal-input">{prompt}</label>
                <input
                    id="terminal-input"
                    class="terminal-input app-field"
                    type=move || if terminal.get().password_mode { "password" } else { "text" }
                    prop:value=move || terminal.get().input
                    disabled=move || {
                        let state = terminal.get();
                        state.busy || !state.intro_done
                    }
                    on:input=on_input
                    on:keydown=on_keydown
                    placeholder="Try: help"
                    autocomplete="off"
                    spellcheck="false"
                />
            </div>

            <div class="app-statusbar">
                <span>
                    {move || {
                        let state = terminal.get();
                        if !state.intro_done {
                            "Booting"
                        } else if state.busy {
                            "Running command"
                        } else {
                            "Ready"
                        }
                    }}
                </span>
                <span>{move || format!("{} line(s)", terminal.get().lines.len())}</span>
            </div>
        </div>
    }
}
