//! Browser side of the host handshake.
//!
//! Embedded: registers a `message` listener, posts `IFRAME_READY` to the
//! parent and arms a timeout. The first message carrying `app` settles the
//! handshake; later ones are ignored. Both the listener and the timer are owned
//! by [`HostSubscription`] and released when it is dropped.

use contracts::system::host::{
    Handshake, HandshakeOutcome, HostMessage, HostMode, ReadyMessage, HANDSHAKE_TIMEOUT_MS,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MessageEvent, Window};

/// Embedded iff the current window differs from its parent.
pub fn detect_mode() -> HostMode {
    let Some(window) = web_sys::window() else {
        return HostMode::Standalone;
    };
    let is_parent = match window.parent() {
        Ok(Some(parent)) => parent == window,
        _ => true,
    };
    HostMode::detect(is_parent)
}

/// Message listener + timeout for one handshake. Dropping it unsubscribes.
pub struct HostSubscription {
    window: Window,
    listener: Closure<dyn FnMut(MessageEvent)>,
    _timeout: Timeout,
}

impl Drop for HostSubscription {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("message", self.listener.as_ref().unchecked_ref());
        log::debug!("Host handshake listener released");
    }
}

/// Starts listening for the host context.
///
/// Returns `None` in standalone mode, where nothing is registered.
pub fn connect(handshake: RwSignal<Handshake>) -> Option<HostSubscription> {
    if handshake.with_untracked(Handshake::mode) != HostMode::Embedded {
        return None;
    }
    let window = web_sys::window()?;

    let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let Some(ctx) = context_from_event(&event) else {
            return;
        };
        match handshake.try_update(|hs| hs.accept(ctx)) {
            Some(HandshakeOutcome::Accepted) => {
                log::info!("Host context received");
            }
            Some(_) => log::debug!("Ignoring repeated host context message"),
            None => {}
        }
    });

    if let Err(e) =
        window.add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
    {
        log::error!("Failed to register host message listener: {:?}", e);
    }

    post_ready(&window);

    let timeout = Timeout::new(HANDSHAKE_TIMEOUT_MS, move || {
        if let Some(HandshakeOutcome::TimedOut) = handshake.try_update(|hs| hs.time_out()) {
            log::warn!(
                "No host context after {} ms, continuing without it",
                HANDSHAKE_TIMEOUT_MS
            );
        }
    });

    Some(HostSubscription {
        window,
        listener,
        _timeout: timeout,
    })
}

fn post_ready(window: &Window) {
    let parent = match window.parent() {
        Ok(Some(parent)) => parent,
        _ => return,
    };
    let message = match ReadyMessage::default().serialize(&Serializer::json_compatible()) {
        Ok(value) => value,
        Err(e) => {
            log::error!("Failed to encode ready message: {}", e);
            return;
        }
    };
    // The host origin is not known up front.
    match parent.post_message(&message, "*") {
        Ok(()) => log::debug!("Posted IFRAME_READY to parent"),
        Err(e) => log::error!("Failed to post ready message: {:?}", e),
    }
}

fn context_from_event(event: &MessageEvent) -> Option<contracts::system::host::AppContext> {
    let data: JsValue = event.data();
    let value: serde_json::Value = serde_wasm_bindgen::from_value(data).ok()?;
    HostMessage::context_from_json(&value)
}
