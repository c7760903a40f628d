//! Test doubles for the runtime: a scriptable [`RemoteClient`] and a [`ContextFactory`] that
//! counts constructions.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use reelbot_core::{
    BotIdentity, Chat, Handler, HandlerError, InitializationError, RemoteClient, RemoteError,
    ReplyContext, UpdateEnvelope, WebhookOptions, WebhookRegistration,
};
use reelbot_router::Router;
use reelbot_runtime::ContextFactory;

/// Max connections the mock platform accepts; larger hints are clamped like the real API may do.
pub const PLATFORM_MAX_CONNECTIONS: u32 = 50;

pub struct MockRemoteClient {
    pub handshake_delay: Duration,
    pub fail_self_info: AtomicBool,
    pub self_info_error: Mutex<RemoteError>,
    pub fail_send: AtomicBool,
    pub close_count: AtomicUsize,
    /// Number of replies recorded when `close` was first called.
    pub sent_at_close: Mutex<Option<usize>>,
    pub register_calls: Mutex<Vec<(String, WebhookOptions)>>,
    pub sent: Mutex<Vec<(i64, String)>>,
    registration: Mutex<WebhookRegistration>,
}

impl MockRemoteClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            handshake_delay: Duration::from_millis(50),
            fail_self_info: AtomicBool::new(false),
            self_info_error: Mutex::new(RemoteError::Timeout),
            fail_send: AtomicBool::new(false),
            close_count: AtomicUsize::new(0),
            sent_at_close: Mutex::new(None),
            register_calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            registration: Mutex::new(WebhookRegistration {
                url: String::new(),
                max_connections: None,
                pending_update_count: 0,
                last_error: None,
            }),
        })
    }

    pub fn fail_handshake_with(&self, error: RemoteError) {
        *self.self_info_error.lock().unwrap() = error;
        self.fail_self_info.store(true, Ordering::SeqCst);
    }

    pub fn heal_handshake(&self) {
        self.fail_self_info.store(false, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

pub fn identity() -> BotIdentity {
    BotIdentity {
        id: 123456789,
        is_bot: true,
        first_name: "ReelBot".to_string(),
        username: Some("reel_bot".to_string()),
    }
}

#[async_trait]
impl RemoteClient for MockRemoteClient {
    async fn register_webhook(&self, url: &str, opts: &WebhookOptions) -> Result<(), RemoteError> {
        self.register_calls
            .lock()
            .unwrap()
            .push((url.to_string(), opts.clone()));
        let mut reg = self.registration.lock().unwrap();
        reg.url = url.to_string();
        reg.max_connections = Some(u32::from(opts.max_connections).min(PLATFORM_MAX_CONNECTIONS));
        Ok(())
    }

    async fn get_webhook_status(&self) -> Result<WebhookRegistration, RemoteError> {
        Ok(self.registration.lock().unwrap().clone())
    }

    async fn get_self_info(&self) -> Result<BotIdentity, RemoteError> {
        tokio::time::sleep(self.handshake_delay).await;
        if self.fail_self_info.load(Ordering::SeqCst) {
            return Err(self.self_info_error.lock().unwrap().clone());
        }
        Ok(identity())
    }

    async fn send(&self, chat_id: i64, text: &str) -> Result<(), RemoteError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("connection reset".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }

    async fn close(&self) {
        let sent = self.sent.lock().unwrap().len();
        self.sent_at_close.lock().unwrap().get_or_insert(sent);
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Replies with a fixed text and counts invocations.
pub struct CountingHandler {
    pub reply: &'static str,
    pub calls: AtomicUsize,
}

impl CountingHandler {
    pub fn new(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _update: &UpdateEnvelope, reply: &ReplyContext) -> reelbot_core::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        reply.send(self.reply).await
    }
}

pub struct FailingHandler;

#[async_trait]
impl Handler for FailingHandler {
    async fn handle(&self, _update: &UpdateEnvelope, _reply: &ReplyContext) -> reelbot_core::Result<()> {
        Err(HandlerError::Other("boom".to_string()))
    }
}

pub struct PanickingHandler;

#[async_trait]
impl Handler for PanickingHandler {
    async fn handle(&self, _update: &UpdateEnvelope, _reply: &ReplyContext) -> reelbot_core::Result<()> {
        panic!("handler bug");
    }
}

/// Signals `entered`, then waits for `release` before replying.
pub struct ParkedHandler {
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait]
impl Handler for ParkedHandler {
    async fn handle(&self, _update: &UpdateEnvelope, reply: &ReplyContext) -> reelbot_core::Result<()> {
        self.entered.notify_one();
        self.release.notified().await;
        reply.send("Done waiting.").await
    }
}

/// Handlers registered by [`CountingFactory`], kept so tests can inspect call counts.
pub struct TestHandlers {
    pub start: Arc<CountingHandler>,
    pub text: Arc<CountingHandler>,
    pub unrecognized: Arc<CountingHandler>,
    pub parked: Arc<ParkedHandler>,
}

pub struct CountingFactory {
    pub client: Arc<MockRemoteClient>,
    pub constructions: AtomicUsize,
    pub fail_create: AtomicBool,
    /// When set, the next `build_router` panics (and clears the flag).
    pub panic_build: AtomicBool,
    pub handlers: TestHandlers,
}

impl CountingFactory {
    pub fn new(client: Arc<MockRemoteClient>) -> Arc<Self> {
        Arc::new(Self {
            client,
            constructions: AtomicUsize::new(0),
            fail_create: AtomicBool::new(false),
            panic_build: AtomicBool::new(false),
            handlers: TestHandlers {
                start: CountingHandler::new("Welcome!"),
                text: CountingHandler::new("Send me a link."),
                unrecognized: CountingHandler::new("Unknown command."),
                parked: Arc::new(ParkedHandler {
                    entered: Notify::new(),
                    release: Notify::new(),
                }),
            },
        })
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

impl ContextFactory for CountingFactory {
    fn create_client(&self) -> Result<Arc<dyn RemoteClient>, InitializationError> {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(InitializationError("client construction failed".to_string()));
        }
        Ok(self.client.clone())
    }

    fn build_router(&self, identity: &BotIdentity) -> Router {
        if self.panic_build.swap(false, Ordering::SeqCst) {
            panic!("handler registration bug");
        }
        Router::new()
            .add_command("start", self.handlers.start.clone())
            .add_command("boom", Arc::new(FailingHandler))
            .add_command("panic", Arc::new(PanickingHandler))
            .add_command("park", self.handlers.parked.clone())
            .with_text(self.handlers.text.clone())
            .with_unrecognized(self.handlers.unrecognized.clone())
            .with_bot_username(identity.username.clone())
    }
}

pub fn envelope(update_id: i64, text: Option<&str>) -> UpdateEnvelope {
    UpdateEnvelope::new(
        update_id,
        text.map(str::to_string),
        Some(Chat {
            id: 456,
            chat_type: "private".to_string(),
        }),
        None,
    )
}
