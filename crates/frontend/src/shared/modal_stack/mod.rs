//! Stack of open dialogs (edit / delete forms, scan dialogs, stock operations).
//!
//! Dialogs are pushed from event handlers through `ModalStackService` and
//! rendered by the single `ModalHost` mounted at the app root. Escape closes
//! only the topmost dialog.

use crate::shared::modal_frame::{ModalFrame, ModalSize};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

/// Returns false while the dialog must not be dismissed (e.g. a request is in flight)
pub type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    title: String,
    size: ModalSize,
    builder: ModalBuilder,
    can_close: Option<CloseGuard>,
}

impl ModalEntry {
    fn closable(&self) -> bool {
        self.can_close.as_ref().map(|f| f()).unwrap_or(true)
    }
}

/// Handle given to a dialog's content so it can close itself.
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: RwSignal<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    // Removal runs on the next tick: the dialog's own click handler may still
    // be dispatching when it asks to close.
    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.stack.with(|s| s.len())
    }

    pub fn push<F>(&self, title: impl Into<String>, size: ModalSize, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_guarded(title, size, None, builder)
    }

    /// Push a dialog whose overlay click / Escape dismissal is gated by `can_close`.
    pub fn push_guarded<F>(
        &self,
        title: impl Into<String>,
        size: ModalSize,
        can_close: Option<CloseGuard>,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        let title = title.into();
        log::debug!("modal #{} opened: {}", id, title);
        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                title,
                size,
                builder: Arc::new(builder),
                can_close,
            })
        });

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    /// Closes the topmost dialog unless its guard refuses
    pub fn dismiss_top(&self) {
        let closable = self
            .stack
            .with_untracked(|s| s.last().map(|e| e.closable()).unwrap_or(false));
        if closable {
            self.defer(|svc| {
                svc.stack.update(|s| {
                    s.pop();
                })
            });
        }
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_modal_stack() -> ModalStackService {
    use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)")
}

/// Renders the open dialogs. Mounted once, at the application root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_modal_stack();

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" {
                    svc.dismiss_top();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // The host lives as long as the app.
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(_, entry)| entry.id
                children=move |(idx, entry)| {
                    let on_close = {
                        let entry = entry.clone();
                        Callback::new(move |_| {
                            if entry.closable() {
                                svc.close_deferred(entry.id);
                            }
                        })
                    };
                    let content = (entry.builder)(ModalHandle { id: entry.id, svc });

                    view! {
                        <ModalFrame
                            title=entry.title.clone()
                            size=entry.size
                            z_index=1000 + idx as i32
                            on_close=on_close
                        >
                            {content}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
