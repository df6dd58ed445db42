//! Shared fixtures for integration tests.

#![allow(dead_code)]

use anime_tts::messaging::{Message, MessageReceipt, MessagingBackend, MessagingError};
use anime_tts::{TtsClient, TtsConfig};
use anime_tts::tts::FixedSeed;
use async_trait::async_trait;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::{Arc, Mutex};

/// Test fixture that manages a mock HTTP server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// TTS client pointed at the mock server, with a fixed seed.
    pub fn tts_client(&self, seed: u64) -> TtsClient {
        TtsClient::builder()
            .config(TtsConfig::default().with_api_url(&self.base_url))
            .seed_source(Arc::new(FixedSeed(seed)))
            .build()
            .expect("Failed to build TTS client")
    }

    /// JSON reply to a POST whose body matches `body`.
    pub async fn mock_json_post(
        &mut self,
        path: &str,
        body: Matcher,
        status: usize,
        reply: &str,
    ) -> Mock {
        self.server
            .mock("POST", path)
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(body)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(reply)
            .create_async()
            .await
    }
}

/// One send recorded by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Private(u64, Message),
    Group(u64, Message),
}

/// In-process messaging backend that records sends and can be told to fail.
#[derive(Default)]
pub struct RecordingBackend {
    sent: Mutex<Vec<Sent>>,
    fail_with: Option<MessagingError>,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(err: MessagingError) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(err),
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, s: Sent) -> Result<MessageReceipt, MessagingError> {
        self.sent.lock().unwrap().push(s);
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(MessageReceipt {
                message_id: Some(1),
            }),
        }
    }
}

#[async_trait]
impl MessagingBackend for RecordingBackend {
    async fn send_private_msg(
        &self,
        user_id: u64,
        message: &Message,
    ) -> Result<MessageReceipt, MessagingError> {
        self.record(Sent::Private(user_id, message.clone()))
    }

    async fn send_group_msg(
        &self,
        group_id: u64,
        message: &Message,
    ) -> Result<MessageReceipt, MessagingError> {
        self.record(Sent::Group(group_id, message.clone()))
    }
}
