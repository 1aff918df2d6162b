//! Insight cache policy.
//!
//! Flow: get_insight → fresh? return it : generate → parse strictly →
//!       create (absent) or replace (stale) with next_update = now + 7 days.
//!
//! Concurrent misses for the same industry inside this process wait on a
//! per-industry lock and re-check the store once they hold it, so only the
//! first caller reaches the generator. Separate processes can still race;
//! the later write overwrites the earlier one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::errors::AppError;
use crate::insights::prompts::build_insight_prompt;
use crate::llm_client::{parse_structured, TextGenerator};
use crate::models::insight::{IndustryInsight, InsightReport};
use crate::store::Store;

/// How long a generated insight stays fresh.
pub const INSIGHT_TTL_DAYS: i64 = 7;

type KeyLock = Arc<tokio::sync::Mutex<()>>;

pub struct InsightCache {
    store: Arc<dyn Store>,
    llm: Arc<dyn TextGenerator>,
    in_flight: Mutex<HashMap<String, KeyLock>>,
}

impl InsightCache {
    pub fn new(store: Arc<dyn Store>, llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            store,
            llm,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the insight for `industry`, regenerating it when absent or stale.
    pub async fn get(&self, industry: &str) -> Result<IndustryInsight, AppError> {
        self.get_at(industry, Utc::now()).await
    }

    /// `get` with an explicit clock reading.
    pub async fn get_at(
        &self,
        industry: &str,
        now: DateTime<Utc>,
    ) -> Result<IndustryInsight, AppError> {
        if let Some(existing) = self.store.get_insight(industry).await? {
            if existing.is_fresh_at(now) {
                info!("Insight cache hit for '{industry}'");
                return Ok(existing);
            }
        }

        let slot = self.acquire_slot(industry);
        let _held = slot.lock.lock().await;

        // Another request may have refreshed the row while we waited.
        let existing = self.store.get_insight(industry).await?;
        if let Some(existing) = &existing {
            if existing.is_fresh_at(now) {
                info!("Insight for '{industry}' refreshed by a concurrent request");
                return Ok(existing.clone());
            }
        }

        info!(
            "Insight cache miss for '{industry}' ({}), generating",
            if existing.is_some() { "stale" } else { "absent" }
        );
        let report = self.generate_report(industry).await?;
        let next_update = now + Duration::days(INSIGHT_TTL_DAYS);

        let saved = match existing {
            Some(_) => {
                self.store
                    .replace_insight(industry, &report, now, next_update)
                    .await?
            }
            None => {
                self.store
                    .create_insight(industry, &report, now, next_update)
                    .await?
            }
        };

        info!("Stored insight for '{industry}', next update {next_update}");
        Ok(saved)
    }

    /// One generation call, parsed and validated. Any mismatch is `DataCorrupt`.
    async fn generate_report(&self, industry: &str) -> Result<InsightReport, AppError> {
        let text = self.llm.generate(&build_insight_prompt(industry)).await?;
        parse_report(&text)
    }

    fn acquire_slot(&self, industry: &str) -> Slot<'_> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let lock = in_flight.entry(industry.to_string()).or_default().clone();
        Slot {
            cache: self,
            industry: industry.to_string(),
            lock,
        }
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.lock().unwrap().len()
    }
}

pub fn parse_report(text: &str) -> Result<InsightReport, AppError> {
    let report: InsightReport = parse_structured(text)
        .map_err(|e| AppError::DataCorrupt(format!("insight response is not valid JSON: {e}")))?;
    report
        .validate()
        .map_err(|e| AppError::DataCorrupt(format!("insight response failed validation: {e}")))?;
    Ok(report)
}

/// A claim on an industry's refresh lock. Dropping the last claim removes
/// the map entry, including when the request future is cancelled.
struct Slot<'a> {
    cache: &'a InsightCache,
    industry: String,
    lock: KeyLock,
}

impl Drop for Slot<'_> {
    fn drop(&mut self) {
        let mut in_flight = self
            .cache
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        // The map and this slot are the only holders: nobody else is waiting.
        if Arc::strong_count(&self.lock) <= 2 {
            in_flight.remove(&self.industry);
        }
    }
}
