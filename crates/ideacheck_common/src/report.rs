//! Validation report schema
//!
//! Field names follow the JSON contract consumed by the web client, so every
//! struct is serialized in camelCase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed notice attached to every report's SEO section
pub const SEO_DISCLAIMER: &str =
    "SEO insights are derived from SerpApi related searches and may vary over time.";

/// Complete validation report returned to the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub overview: Overview,
    pub potential_challenges: Vec<String>,
    pub sample_competitors: Vec<Competitor>,
    pub the_market: Market,
    pub validation_metrics: ValidationMetrics,
    pub overall_score: String,
    pub seo_insights: SeoInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub value_proposition: String,
    pub key_benefits: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub target_audience: Vec<String>,
    pub market_dynamics: String,
    pub market_size_estimate: String,
    /// Copied from model output; expected to be one of [`MarketTrend`]
    pub market_trend: String,
}

/// Four viability scores, nominally 1-10. Zero means the model gave nothing usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetrics {
    pub vitamin_or_painkiller: i64,
    pub ready_to_spend: i64,
    pub easy_to_connect: i64,
    pub easy_to_market: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoInsights {
    pub related_searches: Vec<String>,
    pub disclaimer: String,
}

/// Market direction labels the model is asked to choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketTrend {
    Growing,
    Stable,
    Declining,
}

impl MarketTrend {
    pub const ALL: [MarketTrend; 3] = [
        MarketTrend::Growing,
        MarketTrend::Stable,
        MarketTrend::Declining,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Growing => "Growing",
            MarketTrend::Stable => "Stable",
            MarketTrend::Declining => "Declining",
        }
    }
}

impl fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
