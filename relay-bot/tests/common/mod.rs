//! Test doubles shared by the relay-bot integration tests: recording bot, scripted LLM, counting store.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, Message, User};
use llm_client::LlmClient;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use storage::{StorageError, UserStore};

pub const ADMIN_ID: i64 = 1000;
pub const THINKING: &str = "⏳ thinking";

/// Records every send attempt; fails or hangs for configured recipients.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<(i64, String)>>,
    pub failing: HashSet<i64>,
    pub hanging: HashSet<i64>,
}

impl MockBot {
    pub fn failing(ids: &[i64]) -> Self {
        Self {
            failing: ids.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(id, _)| *id == chat_id)
            .map(|(_, text)| text)
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> dbot_core::Result<()> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        if self.hanging.contains(&chat_id) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        if self.failing.contains(&chat_id) {
            return Err(DbotError::Bot("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(())
    }
}

/// Returns a fixed answer (or error) and records prompts.
pub struct MockLlm {
    pub answer: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            answer: Err(error.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

/// In-memory user store counting enumeration calls; `broken` makes every call fail.
#[derive(Default)]
pub struct MockStore {
    pub ids: Mutex<BTreeSet<i64>>,
    pub all_ids_calls: AtomicUsize,
    pub broken: bool,
}

impl MockStore {
    pub fn with_ids(ids: &[i64]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn ids(&self) -> Vec<i64> {
        self.ids.lock().unwrap().iter().copied().collect()
    }

    pub fn all_ids_calls(&self) -> usize {
        self.all_ids_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MockStore {
    async fn ensure_registered(&self, user_id: i64) -> Result<(), StorageError> {
        if self.broken {
            return Err(StorageError::Database("database is locked".to_string()));
        }
        self.ids.lock().unwrap().insert(user_id);
        Ok(())
    }

    async fn all_ids(&self) -> Result<Vec<i64>, StorageError> {
        self.all_ids_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(StorageError::Database("database is locked".to_string()));
        }
        Ok(self.ids())
    }
}

/// Private-chat text message from `user_id` (chat id equals user id).
pub fn text_message(user_id: i64, content: &str) -> Message {
    Message {
        id: format!("msg-{}", user_id),
        user: Some(User {
            id: user_id,
            username: Some(format!("user{}", user_id)),
            first_name: Some("Alice".to_string()),
            last_name: None,
        }),
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
        via_bot: false,
    }
}
