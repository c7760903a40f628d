//! Test doubles for the HTTP boundary: an in-memory [`RemoteClient`] and a factory that wires it
//! to the production handler registry.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reelbot::{build_app, build_router, AppConfig, AppState};
use reelbot_core::{
    BotIdentity, InitializationError, RemoteClient, RemoteError, WebhookOptions,
    WebhookRegistration,
};
use reelbot_router::Router;
use reelbot_runtime::{ContextFactory, LifecycleManager};
use reelbot_telegram::TelegramConfig;

pub const CHAT_ID: i64 = 456;

pub struct MockRemoteClient {
    pub fail_self_info: AtomicBool,
    pub fail_send: AtomicBool,
    pub close_count: AtomicUsize,
    pub self_info_calls: AtomicUsize,
    pub sent: Mutex<Vec<(i64, String)>>,
    registration: Mutex<WebhookRegistration>,
}

impl MockRemoteClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail_self_info: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
            close_count: AtomicUsize::new(0),
            self_info_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            registration: Mutex::new(WebhookRegistration {
                url: String::new(),
                max_connections: None,
                pending_update_count: 0,
                last_error: None,
            }),
        })
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteClient for MockRemoteClient {
    async fn register_webhook(&self, url: &str, opts: &WebhookOptions) -> Result<(), RemoteError> {
        let mut reg = self.registration.lock().unwrap();
        reg.url = url.to_string();
        reg.max_connections = Some(u32::from(opts.max_connections));
        Ok(())
    }

    async fn get_webhook_status(&self) -> Result<WebhookRegistration, RemoteError> {
        Ok(self.registration.lock().unwrap().clone())
    }

    async fn get_self_info(&self) -> Result<BotIdentity, RemoteError> {
        self.self_info_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_self_info.load(Ordering::SeqCst) {
            return Err(RemoteError::Timeout);
        }
        Ok(BotIdentity {
            id: 123456789,
            is_bot: true,
            first_name: "ReelBot".to_string(),
            username: Some("reel_bot".to_string()),
        })
    }

    async fn send(&self, chat_id: i64, text: &str) -> Result<(), RemoteError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("connection reset".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }

    async fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockFactory {
    pub client: Arc<MockRemoteClient>,
}

impl ContextFactory for MockFactory {
    fn create_client(&self) -> Result<Arc<dyn RemoteClient>, InitializationError> {
        Ok(self.client.clone())
    }

    fn build_router(&self, identity: &BotIdentity) -> Router {
        build_router(identity)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        telegram: TelegramConfig::with_token("123456:test".to_string()),
        webhook_url: Some("https://bot.example.com/".to_string()),
        webhook_secret: None,
        webhook_max_connections: 40,
        bind_addr: "127.0.0.1:0".to_string(),
        log_file: None,
        dedup_ttl_secs: 600,
    }
}

pub struct TestApp {
    pub app: axum::Router,
    pub manager: Arc<LifecycleManager>,
    pub client: Arc<MockRemoteClient>,
}

pub fn test_app(config: AppConfig) -> TestApp {
    let client = MockRemoteClient::new();
    let manager = Arc::new(LifecycleManager::new(Arc::new(MockFactory {
        client: client.clone(),
    })));
    let app = build_app(AppState::new(manager.clone(), &config));
    TestApp {
        app,
        manager,
        client,
    }
}

pub fn update_json(update_id: i64, text: &str) -> String {
    serde_json::json!({
        "update_id": update_id,
        "message": {
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": CHAT_ID, "type": "private"},
            "from": {"id": 789, "is_bot": false, "first_name": "Ann"},
            "text": text
        }
    })
    .to_string()
}
