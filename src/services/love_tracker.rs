//! Love tracking service
//!
//! Provides the anonymous engagement operations: toggle the current
//! visitor's love state, read it back, and count active loves.
//!
//! This service is the degradation boundary. Storage errors never leave it:
//! every public operation catches internally, logs, and returns an inert
//! default so callers always get a usable value. `success: false` with
//! `is_loved: false` is the universal "nothing happened" answer.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::errors::{LovemeterError, Result};
use crate::storage::SeaOrmStorage;

// ============ Request/Response DTOs ============

/// Identity and request context for one visitor interaction
///
/// `visitor_key` is the already-derived identity string (an IP, or the
/// shared `unknown` sentinel). The optional fields are only persisted on
/// the visitor's first activation.
#[derive(Debug, Clone)]
pub struct VisitorContext {
    pub visitor_key: String,
    pub client_hint: Option<String>,
    pub referrer: Option<String>,
}

impl VisitorContext {
    /// Context carrying only an identity, no request metadata
    pub fn bare<K: Into<String>>(visitor_key: K) -> Self {
        Self {
            visitor_key: visitor_key.into(),
            client_hint: None,
            referrer: None,
        }
    }
}

/// Result of a toggle operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Whether the toggle was persisted
    pub success: bool,
    /// The visitor's love state after the toggle
    pub is_loved: bool,
    /// Fresh active-love count, absent when the count could not be read
    pub total_loves: Option<u64>,
}

impl ToggleOutcome {
    /// The degraded outcome: nothing persisted, nothing claimed
    pub fn inert() -> Self {
        Self {
            success: false,
            is_loved: false,
            total_loves: None,
        }
    }
}

/// Combined per-visitor view used by the read endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoveStatus {
    pub is_loved: bool,
    pub total_loves: u64,
}

// ============ LoveTracker Implementation ============

/// Service for anonymous love tracking
///
/// Encapsulates the toggle algorithm and the fail-soft policy, ensuring
/// consistent behavior across HTTP and CLI interfaces.
pub struct LoveTracker {
    storage: Arc<SeaOrmStorage>,
}

impl LoveTracker {
    /// Create a new LoveTracker instance
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    // ============ Public Operations ============

    /// Toggle the visitor's love state
    ///
    /// Never fails from the caller's perspective: on any storage error the
    /// inert outcome is returned and the error is logged here.
    pub async fn toggle(&self, ctx: &VisitorContext) -> ToggleOutcome {
        match self.try_toggle(ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("LoveTracker: toggle failed, returning inert outcome: {}", e);
                ToggleOutcome::inert()
            }
        }
    }

    /// Whether the given visitor currently has an active love
    ///
    /// Missing record and storage failure both read as `false`.
    pub async fn is_active_for(&self, visitor_key: &str) -> bool {
        match self.storage.find_love(visitor_key).await {
            Ok(record) => record.map(|r| r.is_active).unwrap_or(false),
            Err(e) => {
                error!("LoveTracker: state lookup failed, reporting false: {}", e);
                false
            }
        }
    }

    /// Fresh count of active loves
    ///
    /// Always a direct COUNT against storage, never cached. Failure reads
    /// as zero.
    pub async fn count_active(&self) -> u64 {
        match self.storage.count_active().await {
            Ok(count) => count,
            Err(e) => {
                error!("LoveTracker: count failed, reporting zero: {}", e);
                0
            }
        }
    }

    /// Combined status for the read endpoint: own state plus fresh count
    pub async fn status_for(&self, visitor_key: &str) -> LoveStatus {
        LoveStatus {
            is_loved: self.is_active_for(visitor_key).await,
            total_loves: self.count_active().await,
        }
    }

    // ============ Toggle Algorithm ============

    /// The fallible toggle path
    ///
    /// 1. Atomically flip the existing row. Concurrent toggles serialize in
    ///    the database, so n toggles always net to flipping n times.
    /// 2. No row yet: create it active and append the first-activation
    ///    event in one transaction. The conditional insert makes the event
    ///    at-most-once per visitor key.
    /// 3. Lost the creation race to a concurrent request: the row exists
    ///    now, flip it like any other.
    ///
    /// Afterwards the state is read back and the count re-queried, so the
    /// outcome reflects the latest committed write (last-write-wins).
    async fn try_toggle(&self, ctx: &VisitorContext) -> Result<ToggleOutcome> {
        // 空键不落库；身份推导失败时应当走 "unknown" 哨兵而不是空串
        if ctx.visitor_key.is_empty() {
            return Err(LovemeterError::validation("visitor key must not be empty"));
        }

        let now = Utc::now();
        let mut changed = self.storage.flip_active(&ctx.visitor_key, now).await? > 0;

        if !changed {
            let created = self
                .storage
                .create_active(
                    &ctx.visitor_key,
                    ctx.client_hint.clone(),
                    ctx.referrer.clone(),
                    now,
                )
                .await?;
            if created {
                info!("LoveTracker: first love recorded for a new visitor");
                changed = true;
            } else {
                changed = self.storage.flip_active(&ctx.visitor_key, now).await? > 0;
            }
        }

        let is_loved = self
            .storage
            .find_love(&ctx.visitor_key)
            .await?
            .map(|r| r.is_active)
            .unwrap_or(false);
        let total_loves = self.storage.count_active().await?;

        Ok(ToggleOutcome {
            success: changed,
            is_loved,
            total_loves: Some(total_loves),
        })
    }
}
