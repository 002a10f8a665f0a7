//! Prompt template for idea analysis

use crate::report::MarketTrend;

pub const KEY_BENEFIT_COUNT: usize = 4;
pub const CHALLENGE_COUNT: usize = 4;
pub const COMPETITOR_COUNT: usize = 3;
pub const AUDIENCE_COUNT: usize = 5;

/// Build the analysis prompt. The shape described here must match what
/// `normalize` reads.
pub fn analysis_prompt(idea: &str) -> String {
    let trends = MarketTrend::ALL
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "Analyze the following SaaS idea and return JSON with fields: \
         overview(valueProposition, keyBenefits[{KEY_BENEFIT_COUNT}]), \
         potentialChallenges[{CHALLENGE_COUNT}], \
         sampleCompetitors[{{name, description}}] ({COMPETITOR_COUNT} items), \
         theMarket{{targetAudience[{AUDIENCE_COUNT}], marketDynamics, marketSizeEstimate, marketTrend in [{trends}]}}, \
         validationMetrics{{vitaminOrPainkiller, readyToSpend, easyToConnect, easyToMarket}} as integers 1-10, \
         and overallScore as percentage string like \"68%\". SaaS Idea: {idea}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_every_section() {
        let prompt = analysis_prompt("A CRM for florists");
        for field in [
            "valueProposition",
            "keyBenefits[4]",
            "potentialChallenges[4]",
            "sampleCompetitors[{name, description}] (3 items)",
            "targetAudience[5]",
            "marketTrend in [Growing,Stable,Declining]",
            "vitaminOrPainkiller",
            "integers 1-10",
            "overallScore",
        ] {
            assert!(prompt.contains(field), "prompt missing {}", field);
        }
        assert!(prompt.ends_with("SaaS Idea: A CRM for florists"));
    }
}
