use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl DemandLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Medium => "Medium",
            DemandLevel::Low => "Low",
        }
    }
}

impl FromStr for DemandLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(DemandLevel::High),
            "Medium" => Ok(DemandLevel::Medium),
            "Low" => Ok(DemandLevel::Low),
            other => Err(format!("unknown demand level '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

impl MarketOutlook {
    pub fn as_str(self) -> &'static str {
        match self {
            MarketOutlook::Positive => "Positive",
            MarketOutlook::Neutral => "Neutral",
            MarketOutlook::Negative => "Negative",
        }
    }
}

impl FromStr for MarketOutlook {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(MarketOutlook::Positive),
            "Neutral" => Ok(MarketOutlook::Neutral),
            "Negative" => Ok(MarketOutlook::Negative),
            other => Err(format!("unknown market outlook '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

/// The generated portion of an industry insight. Parsed strictly from
/// model output: unknown keys are rejected, then `validate` checks values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsightReport {
    pub salary_ranges: Vec<SalaryRange>,
    /// Year-over-year growth, in percent.
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct InvalidReport(pub String);

impl InsightReport {
    pub fn validate(&self) -> Result<(), InvalidReport> {
        if self.salary_ranges.is_empty() {
            return Err(InvalidReport("salary_ranges is empty".to_string()));
        }
        for range in &self.salary_ranges {
            if range.role.trim().is_empty() {
                return Err(InvalidReport("salary range has a blank role".to_string()));
            }
            let ordered = 0.0 <= range.min && range.min <= range.median && range.median <= range.max;
            if !ordered || !range.max.is_finite() {
                return Err(InvalidReport(format!(
                    "salary range for '{}' is not ordered 0 <= min <= median <= max",
                    range.role
                )));
            }
        }
        if !self.growth_rate.is_finite() {
            return Err(InvalidReport("growth_rate is not a finite number".to_string()));
        }
        for (name, list) in [
            ("top_skills", &self.top_skills),
            ("key_trends", &self.key_trends),
            ("recommended_skills", &self.recommended_skills),
        ] {
            if list.is_empty() || list.iter().any(|s| s.trim().is_empty()) {
                return Err(InvalidReport(format!("{name} is empty or has blank items")));
            }
        }
        Ok(())
    }
}

/// A cached per-industry report. At most one exists per industry label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryInsight {
    pub id: Uuid,
    pub industry: String,
    #[serde(flatten)]
    pub report: InsightReport,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl IndustryInsight {
    /// Fresh while the due timestamp is strictly in the future.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.next_update > now
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct IndustryInsightRow {
    pub id: Uuid,
    pub industry: String,
    pub salary_ranges: Json<Vec<SalaryRange>>,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub market_outlook: String,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl TryFrom<IndustryInsightRow> for IndustryInsight {
    type Error = String;

    fn try_from(row: IndustryInsightRow) -> Result<Self, Self::Error> {
        Ok(IndustryInsight {
            id: row.id,
            industry: row.industry,
            report: InsightReport {
                salary_ranges: row.salary_ranges.0,
                growth_rate: row.growth_rate,
                demand_level: row.demand_level.parse()?,
                top_skills: row.top_skills,
                market_outlook: row.market_outlook.parse()?,
                key_trends: row.key_trends,
                recommended_skills: row.recommended_skills,
            },
            last_updated: row.last_updated,
            next_update: row.next_update,
        })
    }
}
