use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;
use futures::StreamExt;
use futures::channel::mpsc;

use flash_core::model::Slot;
use services::host::DEFAULT_READY_TEXT;
use services::{HostMode, SessionSnapshot, buzz, handshake};

use super::scripts::{focus_script, restart_animation_script};
use crate::context::AppContext;
use crate::vm::{FlashIntent, intent_for_key, map_flash, start_flash};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const ROOT_ID: &str = "flash-root";
const WRAP_ID: &str = "flash-wrap";
const EQUATION_ID: &str = "flash-eq";

/// Work for the session task, handled strictly in arrival order.
enum FlashMsg {
    Intent(FlashIntent),
    /// The feedback pause after an answer is over.
    Advance,
}

fn show_toast(mut toast: Signal<String>, text: &str) {
    toast.set(text.to_string());
    let _ = eval(&restart_animation_script(WRAP_ID, "pop"));
}

#[component]
pub fn FlashView() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_signal(|| None::<SessionSnapshot>);
    let toast = use_signal(|| DEFAULT_READY_TEXT.to_string());
    let host_mode = use_signal(HostMode::default);

    let counters = ctx.counters();
    let difficulty = ctx.launch_difficulty();
    let haptics = ctx.haptics();
    let flash = use_coroutine(move |inbox: UnboundedReceiver<FlashMsg>| {
        let counters = Arc::clone(&counters);
        let haptics = Arc::clone(&haptics);
        let mut snapshot = snapshot;
        async move {
            // Pause timers feed back into the same queue as the player's intents.
            let (advance_tx, advance_rx) = mpsc::unbounded::<FlashMsg>();
            let mut inbox = futures::stream::select(inbox, advance_rx);

            let mut vm = start_flash(counters, difficulty).await;
            snapshot.set(Some(vm.snapshot()));

            while let Some(msg) = inbox.next().await {
                match msg {
                    FlashMsg::Intent(FlashIntent::Pick(slot)) => {
                        let Some(outcome) = vm.answer(slot).await else {
                            tracing::debug!(?slot, "pick ignored, no live problem");
                            continue;
                        };
                        show_toast(toast, outcome.feedback.toast);
                        if outcome.feedback.shake {
                            let _ = eval(&restart_animation_script(EQUATION_ID, "shake"));
                        }
                        buzz(haptics.as_ref(), &outcome.feedback);

                        let advance_tx = advance_tx.clone();
                        let pause = outcome.feedback.pause;
                        spawn(async move {
                            tokio::time::sleep(pause).await;
                            let _ = advance_tx.unbounded_send(FlashMsg::Advance);
                        });
                    }
                    FlashMsg::Intent(FlashIntent::Reset) => {
                        let text = vm.reset().await;
                        show_toast(toast, text);
                    }
                    FlashMsg::Intent(FlashIntent::ToggleDifficulty) => {
                        let text = vm.toggle_difficulty();
                        show_toast(toast, text);
                    }
                    FlashMsg::Advance => {
                        vm.advance();
                    }
                }
                snapshot.set(Some(vm.snapshot()));
            }
        }
    });

    let host = ctx.host();
    use_hook(move || {
        let mut host_mode = host_mode;
        spawn(async move {
            let mode = handshake(host.as_ref()).await;
            host_mode.set(mode);
            show_toast(toast, mode.ready_text());
        })
    });

    use_effect(move || {
        let _ = eval(&focus_script(ROOT_ID));
    });

    let dispatch_intent = use_callback(move |intent: FlashIntent| {
        flash.send(FlashMsg::Intent(intent));
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if let Some(intent) = intent_for_key(&evt.data.key()) {
            evt.prevent_default();
            dispatch_intent.call(intent);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<FlashTestHandles>() {
                handles.register(dispatch_intent, on_key, snapshot);
            }
        }
    }

    let screen = map_flash(snapshot.read().as_ref());
    let mode = host_mode();
    let pill_class = if mode.is_mini() { "pill mini" } else { "pill" };

    rsx! {
        div { class: "page flash-page", id: ROOT_ID, tabindex: "0", onkeydown: on_key,
            div { class: "wrap", id: WRAP_ID,
                header { class: "top",
                    div { class: "brand",
                        div { class: "name", "Flash Math" }
                        div { class: "sub", "two taps \u{2022} one answer \u{2022} go" }
                    }
                    div { class: "{pill_class}", "{mode.pill_label()}" }
                }

                main { class: "panel",
                    div { class: "hud",
                        Stat { label: "STREAK", value: screen.hud.streak.clone() }
                        Stat { label: "BEST", value: screen.hud.best.clone() }
                        Stat { label: "ACC", value: screen.hud.accuracy.clone() }
                    }

                    div { class: "equation", id: EQUATION_ID, "{screen.equation}" }

                    div { class: "choices",
                        button {
                            class: "choice",
                            id: "flash-left",
                            r#type: "button",
                            disabled: !screen.choices_enabled,
                            onclick: move |_| dispatch_intent.call(FlashIntent::Pick(Slot::Left)),
                            "{screen.left}"
                        }
                        button {
                            class: "choice",
                            id: "flash-right",
                            r#type: "button",
                            disabled: !screen.choices_enabled,
                            onclick: move |_| dispatch_intent.call(FlashIntent::Pick(Slot::Right)),
                            "{screen.right}"
                        }
                    }

                    div { class: "row",
                        button {
                            class: "ghost",
                            id: "flash-reset",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(FlashIntent::Reset),
                            "reset"
                        }
                        div { class: "toast", id: "flash-toast", "{toast}" }
                        button {
                            class: "ghost",
                            id: "flash-hard",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(FlashIntent::ToggleDifficulty),
                            "{screen.hard_label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Stat(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat",
            div { class: "k", "{label}" }
            div { class: "v", "{value}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct FlashTestHandles {
    dispatch: Rc<RefCell<Option<Callback<FlashIntent>>>>,
    on_key: Rc<RefCell<Option<Callback<KeyboardEvent>>>>,
    snapshot: Rc<RefCell<Option<Signal<Option<SessionSnapshot>>>>>,
}

#[cfg(test)]
impl FlashTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<FlashIntent>,
        on_key: Callback<KeyboardEvent>,
        snapshot: Signal<Option<SessionSnapshot>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.on_key.borrow_mut() = Some(on_key);
        *self.snapshot.borrow_mut() = Some(snapshot);
    }

    pub(crate) fn dispatch(&self) -> Callback<FlashIntent> {
        (*self.dispatch.borrow()).expect("flash dispatch registered")
    }

    pub(crate) fn on_key(&self) -> Callback<KeyboardEvent> {
        (*self.on_key.borrow()).expect("flash key handler registered")
    }

    pub(crate) fn snapshot(&self) -> Signal<Option<SessionSnapshot>> {
        (*self.snapshot.borrow()).expect("flash snapshot registered")
    }
}
