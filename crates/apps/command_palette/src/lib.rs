//! Command palette: a fuzzy search box over site sections and terminal commands, shown while the
//! store's search modal is open.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod filter;

use std::{cell::RefCell, rc::Rc};

use leptos::ev::{self, KeyboardEvent};
use leptos::*;
use platform_host::NavigationService;
use portfolio_store::{ModalId, Store};

pub use filter::{activate, default_entries, PaletteAction, PaletteEntry, PaletteFilter};

#[component]
/// Search palette bound to the store's search query and search-modal flag.
pub fn CommandPalette(
    /// Entries in declaration order.
    entries: Vec<PaletteEntry>,
    /// Router used by navigation entries.
    navigation: Rc<dyn NavigationService>,
) -> impl IntoView {
    let store = Store::global();
    let query = create_rw_signal(store.read(|state| state.search_query.clone()));
    let open = create_rw_signal(store.read(|state| state.ui.modals.search));
    let subscriptions = vec![
        store.watch(
            |state| state.search_query.clone(),
            move |next| query.set(next.clone()),
        ),
        store.watch(
            |state| state.ui.modals.search,
            move |next| open.set(*next),
        ),
    ];
    on_cleanup(move || drop(subscriptions));

    let entries = Rc::new(entries);
    let filter = Rc::new(RefCell::new(PaletteFilter::new()));
    let matches = create_memo({
        let entries = entries.clone();
        move |_| {
            let query = query.get();
            filter
                .borrow_mut()
                .filter(&entries, &query)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        }
    });

    let choose = Callback::new({
        let store = store.clone();
        move |entry: PaletteEntry| activate(&store, navigation.as_ref(), &entry)
    });
    let on_input = {
        let store = store.clone();
        move |ev: ev::Event| {
            store.set_search_query(event_target_value(&ev));
        }
    };
    let on_keydown = {
        let store = store.clone();
        move |ev: KeyboardEvent| match ev.key().as_str() {
            "Escape" => {
                store.set_modal_open(ModalId::Search, false);
            }
            "Enter" => {
                if let Some(first) = matches.get_untracked().into_iter().next() {
                    choose.call(first);
                }
            }
            _ => {}
        }
    };

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div class="command-palette" role="dialog" aria-label="Search">
                <input
                    class="command-palette-input app-field"
                    type="search"
                    placeholder="Jump to a section or command"
                    prop:value=move || query.get()
                    on:input=on_input.clone()
                    on:keydown=on_keydown.clone()
                    autofocus
                />
                <ul class="command-palette-results" role="listbox">
                    <For
                        each={move || matches.get().into_iter().enumerate().collect::<Vec<_>>()}
                        key=|(idx, entry)| (*idx, entry.label.clone())
                        let:row
                    >
                        <li
                            class="command-palette-item"
                            role="option"
                            on:click={
                                let entry = row.1.clone();
                                move |_| choose.call(entry.clone())
                            }
                        >
                            <span class="command-palette-label">{row.1.label.clone()}</span>
                            <span class="command-palette-detail">{row.1.detail.clone()}</span>
                        </li>
                    </For>
                </ul>
            </div>
        </Show>
    }
}
