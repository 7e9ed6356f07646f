//! Domain events emitted by the engine, and the UI-facing notification log.
//!
//! Events describe what happened; the UI decides how to present them. The
//! notification log only handles age-based expiry, driven by an explicit
//! `expire(now)` call from the host loop rather than wall-clock timers, so
//! behavior stays deterministic in tests.

use serde::Serialize;
use skyisle_logic::economy::ResourceMap;

/// Discrete outcomes surfaced to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ResourceCollected { resource: String, amount: u64 },
    NpcInteracted { npc_id: String },
    RewardGranted { rewards: ResourceMap },
    CraftSucceeded { recipe_id: String, name: String },
    CraftFailed { recipe_id: String, reason: String },
    QuestCompleted { quest_id: String, name: String },
    QuestFailed { quest_id: String, reason: String },
}

/// A message queued for on-screen display.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub raised_at: f64,
}

/// Bounded-lifetime notification queue. The host pushes formatted
/// messages and calls [`NotificationLog::expire`] with its own clock.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: Vec<Notification>,
    ttl_seconds: f64,
}

impl NotificationLog {
    pub fn new(ttl_seconds: f64) -> Self {
        Self {
            entries: Vec::new(),
            ttl_seconds,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: f64) {
        self.entries.push(Notification {
            message: message.into(),
            raised_at: now,
        });
    }

    /// Drop entries older than the TTL.
    pub fn expire(&mut self, now: f64) {
        let ttl = self.ttl_seconds;
        self.entries.retain(|n| now - n.raised_at < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        // 3-second toast lifetime.
        Self::new(3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_age_based() {
        let mut log = NotificationLog::new(3.0);
        log.push("Crafted Wooden Axe!", 10.0);
        log.push("Quest completed!", 11.5);

        log.expire(12.0);
        assert_eq!(log.len(), 2);

        log.expire(13.5);
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().message, "Quest completed!");

        log.expire(20.0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_expire_is_idempotent_for_same_now() {
        let mut log = NotificationLog::new(3.0);
        log.push("hello", 0.0);
        log.expire(1.0);
        log.expire(1.0);
        assert_eq!(log.len(), 1);
    }
}
