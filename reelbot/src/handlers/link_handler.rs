//! Default text handler: picks the first Instagram post/reel link out of the message.

use async_trait::async_trait;
use reelbot_core::{Handler, ReplyContext, Result, UpdateEnvelope};
use reqwest::Url;
use tracing::info;

const INSTAGRAM_HOSTS: [&str; 3] = ["instagram.com", "www.instagram.com", "m.instagram.com"];
const MEDIA_PATH_PREFIXES: [&str; 4] = ["/p/", "/reel/", "/reels/", "/tv/"];

/// Returns the first whitespace-separated token that is an http(s) Instagram media URL.
pub fn find_instagram_link(text: &str) -> Option<Url> {
    text.split_whitespace().find_map(|token| {
        let url = Url::parse(token).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let host = url.host_str()?.to_ascii_lowercase();
        if !INSTAGRAM_HOSTS.contains(&host.as_str()) {
            return None;
        }
        let path = url.path();
        let media_id = MEDIA_PATH_PREFIXES
            .iter()
            .find_map(|prefix| path.strip_prefix(prefix))?;
        if media_id.trim_matches('/').is_empty() {
            return None;
        }
        Some(url)
    })
}

#[derive(Clone, Default)]
pub struct LinkHandler;

impl LinkHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LinkHandler {
    async fn handle(&self, update: &UpdateEnvelope, reply: &ReplyContext) -> Result<()> {
        match find_instagram_link(update.text()) {
            Some(url) => {
                info!(chat_id = ?update.chat_id(), link = %url, "Instagram link received");
                reply
                    .send(&format!("Got it! Processing {}", url))
                    .await
            }
            None => {
                reply
                    .send("Please send a link to an Instagram post or reel.")
                    .await
            }
        }
    }
}
