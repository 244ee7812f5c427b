//! Message bus abstraction
//!
//! The coordinator and workers only ever publish to and subscribe on named
//! topics; the transport behind those topics is somebody else's problem. The
//! trait is narrow on purpose: fire-and-forget publish, and subscribe as a
//! channel of raw payload strings.
//!
//! `InMemoryBus` is the in-process implementation used by the demo binary
//! and the tests: a topic map fanning every publish out to all current
//! subscribers over unbounded tokio channels.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::ClusterResult;

/// Publish/subscribe primitives consumed by the coordinator and workers
#[async_trait]
pub trait MessageBus: Send + Sync + 'static {
    /// Fire-and-forget publish of a payload string to a topic
    async fn publish(&self, topic: &str, payload: String) -> ClusterResult<()>;

    /// Subscribe to a topic; every subsequent publish is delivered on the
    /// returned channel until the receiver is dropped
    async fn subscribe(&self, topic: &str) -> ClusterResult<UnboundedReceiver<String>>;
}

/// In-process bus: topic name -> live subscriber senders
#[derive(Clone, Default)]
pub struct InMemoryBus {
    topics: Arc<Mutex<HashMap<String, Vec<UnboundedSender<String>>>>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(&self, topic: &str, payload: String) -> ClusterResult<()> {
        let mut topics = self.topics.lock().await;
        if let Some(subscribers) = topics.get_mut(topic) {
            // Drop subscribers whose receiving side has gone away.
            subscribers.retain(|sender| sender.send(payload.clone()).is_ok());
        } else {
            debug!(topic, "publish to topic without subscribers");
        }
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> ClusterResult<UnboundedReceiver<String>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.topics
            .lock()
            .await
            .entry(topic.to_string())
            .or_default()
            .push(sender);
        Ok(receiver)
    }
}
