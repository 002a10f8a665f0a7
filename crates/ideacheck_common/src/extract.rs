//! JSON extraction from free-form model text
//!
//! Models are asked for JSON but routinely wrap it in prose or markdown fences.
//! Extraction is progressive, cheapest exact case first:
//! 1. the whole text parses as a JSON object
//! 2. a ```json fenced block parses as an object
//! 3. the widest `{ ... }` span parses as an object
//! 4. a canned report built around the raw text
//!
//! Step 4 always succeeds, so `extract_json` never fails.

use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Characters of raw text kept as the value proposition of the fallback report
pub const FALLBACK_PREFIX_CHARS: usize = 200;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```json\s*(.*?)\s*```").unwrap());

/// Pull a JSON object out of model text. Always returns `Value::Object`.
pub fn extract_json(text: &str) -> Value {
    let trimmed = text.trim();

    if let Some(v) = parse_object(trimmed) {
        return v;
    }

    if let Some(v) = FENCED_JSON
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|body| parse_object(body.as_str()))
    {
        debug!("Extracted JSON from fenced block");
        return v;
    }

    if let Some(v) = widest_brace_span(trimmed).and_then(parse_object) {
        debug!("Extracted JSON from brace span");
        return v;
    }

    warn!(
        "Model text is not interpretable as JSON ({} chars), using fallback report",
        text.len()
    );
    fallback_report(text)
}

fn parse_object(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(v) if v.is_object() => Some(v),
        _ => None,
    }
}

/// First `{` through last `}`
fn widest_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Canned report used when nothing in the text parses
pub fn fallback_report(text: &str) -> Value {
    let prefix: String = text.chars().take(FALLBACK_PREFIX_CHARS).collect();

    json!({
        "overview": {
            "valueProposition": format!("{}...", prefix),
            "keyBenefits": [
                "AI-generated analysis",
                "Market insights",
                "Competitor research",
                "Validation metrics"
            ]
        },
        "potentialChallenges": [
            "AI analysis may vary",
            "Market data limitations",
            "Competitive landscape changes"
        ],
        "sampleCompetitors": [
            { "name": "Competitor A", "description": "Similar service provider" },
            { "name": "Competitor B", "description": "Alternative solution" }
        ],
        "theMarket": {
            "targetAudience": ["Entrepreneurs", "Startups", "Product managers"],
            "marketDynamics": "Growing market for validation tools",
            "marketSizeEstimate": "Moderate to large",
            "marketTrend": "Growing"
        },
        "validationMetrics": {
            "vitaminOrPainkiller": 7,
            "readyToSpend": 6,
            "easyToConnect": 8,
            "easyToMarket": 7
        },
        "overallScore": "70%"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_parse() {
        assert_eq!(extract_json(r#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn test_direct_parse_with_whitespace() {
        assert_eq!(extract_json("\n  {\"a\":1}\n"), json!({"a": 1}));
    }

    #[test]
    fn test_fenced_block() {
        assert_eq!(extract_json("```json\n{\"a\":1}\n```"), json!({"a": 1}));
    }

    #[test]
    fn test_fenced_block_with_prose_and_uppercase_label() {
        let text = "Here is the analysis:\n```JSON\n{\"overallScore\": \"68%\"}\n```\nHope it helps!";
        assert_eq!(extract_json(text), json!({"overallScore": "68%"}));
    }

    #[test]
    fn test_brace_span() {
        assert_eq!(extract_json(r#"prefix {"a":1} suffix"#), json!({"a": 1}));
    }

    #[test]
    fn test_brace_span_is_widest_match() {
        let text = r#"Result: {"outer": {"inner": 2}} done"#;
        assert_eq!(extract_json(text), json!({"outer": {"inner": 2}}));
    }

    #[test]
    fn test_broken_fence_falls_through_to_braces() {
        // Fence body is invalid, but the brace span covering it is not
        let text = "```json\n{\"a\": 1}\n// trailing comment\n```";
        // The widest span is {"a": 1}
        assert_eq!(extract_json(text), json!({"a": 1}));
    }

    #[test]
    fn test_no_json_uses_fallback() {
        let v = extract_json("no json here");
        assert!(v.is_object());
        assert_eq!(v["overview"]["valueProposition"], "no json here...");
        assert_eq!(v["overview"]["keyBenefits"].as_array().unwrap().len(), 4);
        assert_eq!(v["sampleCompetitors"].as_array().unwrap().len(), 2);
        assert_eq!(v["validationMetrics"]["easyToConnect"], 8);
        assert_eq!(v["overallScore"], "70%");
    }

    #[test]
    fn test_non_object_json_uses_fallback() {
        let v = extract_json("[1, 2, 3]");
        assert!(v.is_object());
        assert_eq!(v["overallScore"], "70%");
    }

    #[test]
    fn test_unbalanced_braces_use_fallback() {
        let v = extract_json("} nothing useful {");
        assert_eq!(v["theMarket"]["marketTrend"], "Growing");
    }

    #[test]
    fn test_fallback_truncates_on_char_boundary() {
        let text = "é".repeat(300);
        let v = extract_json(&text);
        let vp = v["overview"]["valueProposition"].as_str().unwrap();
        assert_eq!(vp.chars().count(), FALLBACK_PREFIX_CHARS + 3);
        assert!(vp.ends_with("..."));
    }
}
