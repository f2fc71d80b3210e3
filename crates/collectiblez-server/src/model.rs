//! Off-chain records shared between the storefront and the server.
//!
//! Timestamps are milliseconds since the Unix epoch. Prices are in the
//! payment token's smallest unit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("raffle title must not be empty")]
    EmptyTitle,
    #[error("raffle start time {start_time} must be before end time {end_time}")]
    InvalidWindow { start_time: i64, end_time: i64 },
    #[error("raffle status cannot move from {from} to {to}")]
    InvalidTransition { from: RaffleStatus, to: RaffleStatus },
    #[error("entry count must be positive")]
    EmptyEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub wallet_address: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaffleStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl RaffleStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// pending → active → completed, with cancellation allowed before completion.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active)
                | (Self::Pending, Self::Cancelled)
                | (Self::Active, Self::Completed)
                | (Self::Active, Self::Cancelled)
        )
    }
}

impl std::fmt::Display for RaffleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Raffle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub entry_price: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub status: RaffleStatus,
}

impl Raffle {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        if self.start_time >= self.end_time {
            return Err(ModelError::InvalidWindow {
                start_time: self.start_time,
                end_time: self.end_time,
            });
        }
        Ok(())
    }

    pub fn transition(&mut self, next: RaffleStatus) -> Result<(), ModelError> {
        if !self.status.can_transition_to(next) {
            return Err(ModelError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Whether entries may be accepted at `now_ms`.
    #[must_use]
    pub fn accepts_entries_at(&self, now_ms: i64) -> bool {
        self.status == RaffleStatus::Active && self.start_time <= now_ms && now_ms < self.end_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleEntry {
    pub id: String,
    pub raffle_id: String,
    pub user_id: String,
    pub entry_count: u32,
    pub created_at: i64,
}

impl RaffleEntry {
    pub fn new(
        id: impl Into<String>,
        raffle_id: impl Into<String>,
        user_id: impl Into<String>,
        entry_count: u32,
        created_at: i64,
    ) -> Result<Self, ModelError> {
        if entry_count == 0 {
            return Err(ModelError::EmptyEntry);
        }
        Ok(Self {
            id: id.into(),
            raffle_id: raffle_id.into(),
            user_id: user_id.into(),
            entry_count,
            created_at,
        })
    }
}
