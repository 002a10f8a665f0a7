//! Provider credentials
//!
//! Resolved per request so that a missing key is reported as a 500 on the
//! request that needed it, not as a startup failure.

pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const SERP_KEY_VAR: &str = "SERPAPI_API_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub gemini_key: String,
    pub serp_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_key", &"[REDACTED]")
            .field("serp_key", &"[REDACTED]")
            .finish()
    }
}

/// Where credentials come from
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Read the process environment on every request
    Environment,
    /// Fixed credentials, or none at all
    Fixed(Option<Credentials>),
}

impl CredentialSource {
    pub fn resolve(&self) -> Option<Credentials> {
        match self {
            CredentialSource::Environment => Some(Credentials {
                gemini_key: env_key(GEMINI_KEY_VAR)?,
                serp_key: env_key(SERP_KEY_VAR)?,
            }),
            CredentialSource::Fixed(creds) => creds.clone(),
        }
    }
}

/// Empty values count as absent
fn env_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_source() {
        let creds = Credentials {
            gemini_key: "g".to_string(),
            serp_key: "s".to_string(),
        };
        let source = CredentialSource::Fixed(Some(creds.clone()));
        assert_eq!(source.resolve(), Some(creds));
        assert_eq!(CredentialSource::Fixed(None).resolve(), None);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials {
            gemini_key: "secret-gemini".to_string(),
            serp_key: "secret-serp".to_string(),
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("secret"));
    }
}
