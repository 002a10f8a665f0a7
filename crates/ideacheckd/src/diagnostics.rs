//! Debug-mode provider probes
//!
//! Three independent checks: model listing, a minimal generation through the
//! fallback resolver, and a minimal search. A failing probe is reported in its
//! own slot and never fails the request.

use crate::fallback::ModelResolver;
use crate::gemini::{GenerativeBackend, ModelError};
use crate::search::SearchBackend;
use serde::Serialize;
use tracing::warn;

/// Idea text used for the generation probe
pub const DIAGNOSTIC_IDEA: &str = r#"Quick diagnostic: return a JSON object {"status":"ok"}"#;

/// Query used for the search probe
pub const DIAGNOSTIC_QUERY: &str = "diagnostic";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_listed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_list_error: Option<String>,
    pub gemini: GeminiProbe,
    pub serp: SerpProbe,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiProbe {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerpProbe {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run all probes concurrently
pub async fn run_diagnostics(
    models: &dyn GenerativeBackend,
    resolver: &ModelResolver,
    search: &dyn SearchBackend,
) -> Diagnostics {
    let (listed, generated, related) = tokio::join!(
        models.list_models(),
        resolver.resolve(DIAGNOSTIC_IDEA),
        search.related_searches(DIAGNOSTIC_QUERY),
    );

    // A rejected listing counts as zero models; only failures to reach or
    // decode the endpoint are reported as errors
    let (models_listed, models_list_error) = match listed {
        Ok(list) => (Some(list.len()), None),
        Err(ModelError::Http { status, .. }) => {
            warn!("Model listing returned {}", status);
            (Some(0), None)
        }
        Err(e) => (None, Some(e.to_string())),
    };

    let gemini = match generated {
        Ok(raw) => GeminiProbe {
            ok: true,
            sample_keys: Some(
                raw.as_object()
                    .map(|o| o.keys().cloned().collect())
                    .unwrap_or_default(),
            ),
            error: None,
        },
        Err(e) => GeminiProbe {
            ok: false,
            sample_keys: None,
            error: Some(e.to_string()),
        },
    };

    let serp = match related {
        Ok(r) => SerpProbe {
            ok: true,
            related_count: Some(r.len()),
            error: None,
        },
        Err(e) => SerpProbe {
            ok: false,
            related_count: None,
            error: Some(e.to_string()),
        },
    };

    Diagnostics {
        ok: true,
        models_listed,
        models_list_error,
        gemini,
        serp,
    }
}
