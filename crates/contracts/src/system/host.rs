//! Host application context and the iframe handshake state machine.
//!
//! The widget is either embedded in the host (window != parent) or opened
//! standalone. Embedded, it posts [`IFRAME_READY`] to the parent and waits for
//! the first message carrying `{ app: AppContext }`, for at most
//! [`HANDSHAKE_TIMEOUT_MS`]. The browser bindings live in the frontend crate;
//! this module only decides what each event means.

use serde::{Deserialize, Serialize};

/// Message type posted to the parent frame once the widget is mounted.
pub const IFRAME_READY: &str = "IFRAME_READY";

/// How long an embedded widget waits for the host before giving up.
pub const HANDSHAKE_TIMEOUT_MS: u32 = 3000;

/// Session credentials handed over by the host. Constant for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppContext {
    /// Opaque bearer credential, sent verbatim as `Authorization`
    pub access_token: String,
    /// Accounting period
    pub bookyear: i32,
    #[serde(default, rename = "dossier", alias = "dossierId")]
    pub dossier_id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub socket_id: String,
}

/// Outbound notification posted to the parent frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyMessage {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for ReadyMessage {
    fn default() -> Self {
        Self {
            kind: IFRAME_READY.to_string(),
        }
    }
}

/// Inbound host message. Only `app` is inspected, `type` is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostMessage {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub app: Option<AppContext>,
}

impl HostMessage {
    /// Extracts the context from a raw message payload.
    ///
    /// Returns `None` for anything without a well-formed `app` member, so
    /// unrelated `postMessage` traffic is simply ignored.
    pub fn context_from_json(data: &serde_json::Value) -> Option<AppContext> {
        let app = data.get("app")?;
        if app.is_null() {
            return None;
        }
        serde_json::from_value::<AppContext>(app.clone()).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Embedded,
    Standalone,
}

impl HostMode {
    /// Embedded iff the current window is not its own parent.
    pub fn detect(window_is_parent: bool) -> Self {
        if window_is_parent {
            HostMode::Standalone
        } else {
            HostMode::Embedded
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeState {
    /// Embedded and still waiting for the host.
    Waiting,
    /// Done waiting, with or without a context.
    Settled(Option<AppContext>),
}

/// What happened when an event was fed into the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeOutcome {
    Accepted,
    Ignored,
    TimedOut,
}

/// Single-shot handshake: the first accepted context wins, later messages
/// and a late timeout are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    mode: HostMode,
    state: HandshakeState,
}

impl Handshake {
    pub fn start(mode: HostMode) -> Self {
        let state = match mode {
            HostMode::Embedded => HandshakeState::Waiting,
            // Standalone never receives a context through the message channel.
            HostMode::Standalone => HandshakeState::Settled(None),
        };
        Self { mode, state }
    }

    pub fn mode(&self) -> HostMode {
        self.mode
    }

    pub fn state(&self) -> &HandshakeState {
        &self.state
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, HandshakeState::Waiting)
    }

    pub fn context(&self) -> Option<&AppContext> {
        match &self.state {
            HandshakeState::Settled(ctx) => ctx.as_ref(),
            HandshakeState::Waiting => None,
        }
    }

    pub fn accept(&mut self, ctx: AppContext) -> HandshakeOutcome {
        if self.mode == HostMode::Standalone || !self.is_waiting() {
            return HandshakeOutcome::Ignored;
        }
        self.state = HandshakeState::Settled(Some(ctx));
        HandshakeOutcome::Accepted
    }

    pub fn time_out(&mut self) -> HandshakeOutcome {
        if !self.is_waiting() {
            return HandshakeOutcome::Ignored;
        }
        self.state = HandshakeState::Settled(None);
        HandshakeOutcome::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(token: &str) -> AppContext {
        AppContext {
            access_token: token.to_string(),
            bookyear: 2024,
            dossier_id: 7,
            user_id: 3,
            socket_id: "s1".to_string(),
        }
    }

    #[test]
    fn test_detect_mode() {
        assert_eq!(HostMode::detect(true), HostMode::Standalone);
        assert_eq!(HostMode::detect(false), HostMode::Embedded);
    }

    #[test]
    fn test_standalone_settles_immediately_without_context() {
        let mut hs = Handshake::start(HostMode::Standalone);
        assert!(!hs.is_waiting());
        assert_eq!(hs.context(), None);
        assert_eq!(hs.accept(ctx("t1")), HandshakeOutcome::Ignored);
        assert_eq!(hs.context(), None);
    }

    #[test]
    fn test_first_context_wins() {
        let mut hs = Handshake::start(HostMode::Embedded);
        assert!(hs.is_waiting());
        assert_eq!(hs.accept(ctx("t1")), HandshakeOutcome::Accepted);
        assert_eq!(hs.accept(ctx("t2")), HandshakeOutcome::Ignored);
        assert_eq!(hs.context().map(|c| c.access_token.as_str()), Some("t1"));
        // Timer firing after acceptance changes nothing
        assert_eq!(hs.time_out(), HandshakeOutcome::Ignored);
        assert_eq!(hs.context().map(|c| c.access_token.as_str()), Some("t1"));
    }

    #[test]
    fn test_timeout_settles_without_context() {
        let mut hs = Handshake::start(HostMode::Embedded);
        assert_eq!(hs.time_out(), HandshakeOutcome::TimedOut);
        assert_eq!(hs.state(), &HandshakeState::Settled(None));
        assert_eq!(hs.accept(ctx("late")), HandshakeOutcome::Ignored);
        assert_eq!(hs.context(), None);
    }

    #[test]
    fn test_context_from_host_payload() {
        let data = json!({
            "type": "data",
            "app": {
                "accessToken": "t1",
                "bookyear": 2024,
                "dossier": 12,
                "userId": 5,
                "socketId": "s1"
            }
        });
        let parsed = HostMessage::context_from_json(&data).unwrap();
        assert_eq!(parsed.access_token, "t1");
        assert_eq!(parsed.bookyear, 2024);
        assert_eq!(parsed.dossier_id, 12);
        assert_eq!(parsed.socket_id, "s1");
    }

    #[test]
    fn test_type_is_not_validated() {
        let data = json!({
            "type": "whatever",
            "app": { "accessToken": "t1", "bookyear": 2023, "socketId": "s9" }
        });
        let parsed = HostMessage::context_from_json(&data).unwrap();
        assert_eq!(parsed.dossier_id, 0);
        assert_eq!(parsed.user_id, 0);
    }

    #[test]
    fn test_messages_without_app_are_ignored() {
        assert!(HostMessage::context_from_json(&json!({ "type": "ping" })).is_none());
        assert!(HostMessage::context_from_json(&json!({ "app": null })).is_none());
        assert!(HostMessage::context_from_json(&json!({ "app": { "bookyear": 1 } })).is_none());
        assert!(HostMessage::context_from_json(&json!("IFRAME_READY")).is_none());
    }

    #[test]
    fn test_ready_message_shape() {
        let value = serde_json::to_value(ReadyMessage::default()).unwrap();
        assert_eq!(value, json!({ "type": "IFRAME_READY" }));
    }
}
