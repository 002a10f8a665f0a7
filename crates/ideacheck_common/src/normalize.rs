//! Report normalization
//!
//! Maps whatever the model produced onto the fixed report schema. Total over
//! any `Value`: a missing or mistyped field becomes its zero value, never an
//! error.

use crate::report::{
    Competitor, Market, Overview, SeoInsights, ValidationMetrics, ValidationReport,
    SEO_DISCLAIMER,
};
use serde_json::Value;

/// Build a report from raw model output and related searches
pub fn normalize(raw: &Value, related_searches: Vec<String>) -> ValidationReport {
    let overview = raw.get("overview");
    let market = raw.get("theMarket");
    let metrics = raw.get("validationMetrics");

    ValidationReport {
        overview: Overview {
            value_proposition: string_at(overview, "valueProposition"),
            key_benefits: strings_at(overview, "keyBenefits"),
        },
        potential_challenges: strings_at(Some(raw), "potentialChallenges"),
        sample_competitors: competitors(raw.get("sampleCompetitors")),
        the_market: Market {
            target_audience: strings_at(market, "targetAudience"),
            market_dynamics: string_at(market, "marketDynamics"),
            market_size_estimate: string_at(market, "marketSizeEstimate"),
            market_trend: string_at(market, "marketTrend"),
        },
        validation_metrics: ValidationMetrics {
            vitamin_or_painkiller: score_at(metrics, "vitaminOrPainkiller"),
            ready_to_spend: score_at(metrics, "readyToSpend"),
            easy_to_connect: score_at(metrics, "easyToConnect"),
            easy_to_market: score_at(metrics, "easyToMarket"),
        },
        overall_score: string_at(Some(raw), "overallScore"),
        seo_insights: SeoInsights {
            related_searches,
            disclaimer: SEO_DISCLAIMER.to_string(),
        },
    }
}

fn string_at(parent: Option<&Value>, key: &str) -> String {
    parent
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// String elements of an array field; non-string elements are dropped
fn strings_at(parent: Option<&Value>, key: &str) -> Vec<String> {
    parent
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|x| x.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn competitors(v: Option<&Value>) -> Vec<Competitor> {
    v.and_then(|arr| arr.as_array())
        .map(|arr| {
            arr.iter()
                .map(|c| Competitor {
                    name: string_at(Some(c), "name"),
                    description: string_at(Some(c), "description"),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn score_at(parent: Option<&Value>, key: &str) -> i64 {
    parent.and_then(|p| p.get(key)).map(coerce_score).unwrap_or(0)
}

/// Numeric coercion: integers as-is, floats and numeric strings rounded
fn coerce_score(v: &Value) -> i64 {
    let n = match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i;
            }
            n.as_f64()
        }
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match n {
        Some(f) if f.is_finite() => f.round() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::fallback_report;
    use serde_json::json;

    fn assert_empty(report: &ValidationReport) {
        assert_eq!(report.overview, Overview::default());
        assert!(report.potential_challenges.is_empty());
        assert!(report.sample_competitors.is_empty());
        assert_eq!(report.the_market, Market::default());
        assert_eq!(report.validation_metrics, ValidationMetrics::default());
        assert_eq!(report.overall_score, "");
        assert_eq!(report.seo_insights.disclaimer, SEO_DISCLAIMER);
    }

    #[test]
    fn test_empty_object() {
        let report = normalize(&json!({}), vec![]);
        assert_empty(&report);
        assert!(report.seo_insights.related_searches.is_empty());
    }

    #[test]
    fn test_null_and_scalars() {
        assert_empty(&normalize(&Value::Null, vec![]));
        assert_empty(&normalize(&json!(42), vec![]));
        assert_empty(&normalize(&json!("text"), vec![]));
        assert_empty(&normalize(&json!([1, 2]), vec![]));
    }

    #[test]
    fn test_wrong_field_types() {
        let raw = json!({
            "overview": "not an object",
            "potentialChallenges": "should be a list",
            "sampleCompetitors": {"name": "x"},
            "theMarket": {
                "targetAudience": "devs",
                "marketDynamics": 12,
                "marketSizeEstimate": null,
                "marketTrend": ["Growing"]
            },
            "validationMetrics": [7, 7, 7, 7],
            "overallScore": 68
        });

        assert_empty(&normalize(&raw, vec![]));
    }

    #[test]
    fn test_full_report_copied() {
        let raw = json!({
            "overview": {
                "valueProposition": "Walk dogs on demand",
                "keyBenefits": ["a", "b", "c", "d"]
            },
            "potentialChallenges": ["w", "x", "y", "z"],
            "sampleCompetitors": [
                {"name": "Rover", "description": "Pet care marketplace"},
                {"name": "Wag", "description": "Dog walking app"}
            ],
            "theMarket": {
                "targetAudience": ["Busy professionals"],
                "marketDynamics": "Fragmented",
                "marketSizeEstimate": "$1B",
                "marketTrend": "Growing"
            },
            "validationMetrics": {
                "vitaminOrPainkiller": 8,
                "readyToSpend": 6,
                "easyToConnect": 7,
                "easyToMarket": 5
            },
            "overallScore": "68%"
        });

        let report = normalize(&raw, vec!["dog walking app".to_string()]);
        assert_eq!(report.overview.value_proposition, "Walk dogs on demand");
        assert_eq!(report.overview.key_benefits.len(), 4);
        assert_eq!(report.potential_challenges, vec!["w", "x", "y", "z"]);
        assert_eq!(report.sample_competitors[1].name, "Wag");
        assert_eq!(report.the_market.market_size_estimate, "$1B");
        assert_eq!(report.validation_metrics.vitamin_or_painkiller, 8);
        assert_eq!(report.validation_metrics.easy_to_market, 5);
        assert_eq!(report.overall_score, "68%");
        assert_eq!(report.seo_insights.related_searches, vec!["dog walking app"]);
    }

    #[test]
    fn test_list_elements_filtered_by_type() {
        let raw = json!({"potentialChallenges": ["cost", 3, null, "churn", {"x": 1}]});
        let report = normalize(&raw, vec![]);
        assert_eq!(report.potential_challenges, vec!["cost", "churn"]);
    }

    #[test]
    fn test_competitor_fields_defaulted() {
        let raw = json!({
            "sampleCompetitors": [
                {"name": "Acme"},
                "just a string",
                {"name": 5, "description": "Desc"}
            ]
        });
        let report = normalize(&raw, vec![]);
        assert_eq!(report.sample_competitors.len(), 3);
        assert_eq!(report.sample_competitors[0].name, "Acme");
        assert_eq!(report.sample_competitors[0].description, "");
        assert_eq!(report.sample_competitors[1], Competitor::default());
        assert_eq!(report.sample_competitors[2].name, "");
        assert_eq!(report.sample_competitors[2].description, "Desc");
    }

    #[test]
    fn test_metric_coercion() {
        let raw = json!({
            "validationMetrics": {
                "vitaminOrPainkiller": "8",
                "readyToSpend": 6.6,
                "easyToConnect": "not a number",
                "easyToMarket": true
            }
        });
        let m = normalize(&raw, vec![]).validation_metrics;
        assert_eq!(m.vitamin_or_painkiller, 8);
        assert_eq!(m.ready_to_spend, 7);
        assert_eq!(m.easy_to_connect, 0);
        assert_eq!(m.easy_to_market, 0);
    }

    #[test]
    fn test_disclaimer_always_overwritten() {
        let raw = json!({
            "seoInsights": {
                "relatedSearches": ["from the model"],
                "disclaimer": "model says trust me"
            }
        });
        let report = normalize(&raw, vec!["from serp".to_string()]);
        assert_eq!(report.seo_insights.disclaimer, SEO_DISCLAIMER);
        assert_eq!(report.seo_insights.related_searches, vec!["from serp"]);
    }

    #[test]
    fn test_fallback_report_normalizes_fully() {
        let report = normalize(&fallback_report("An idea"), vec![]);
        assert_eq!(report.overview.value_proposition, "An idea...");
        assert_eq!(report.potential_challenges.len(), 3);
        assert_eq!(report.the_market.target_audience.len(), 3);
        assert_eq!(report.validation_metrics.ready_to_spend, 6);
        assert_eq!(report.overall_score, "70%");
    }
}
