//! Canonical storage domain classification
//!
//! An external system may be served from several URL paths or subdomains; all of
//! them must collapse to one stored account identity.

use crate::config::{DomainRule, PortalConfig};
use crate::types::normalize_domain;

#[derive(Debug, Clone)]
pub struct DomainClassifier {
    rules: Vec<DomainRule>,
    default_domain: String,
}

impl DomainClassifier {
    #[must_use]
    pub fn new(rules: Vec<DomainRule>, default_domain: impl Into<String>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| DomainRule::new(r.token.to_ascii_lowercase(), normalize_domain(&r.domain)))
            .collect();
        Self {
            rules,
            default_domain: normalize_domain(&default_domain.into()),
        }
    }

    #[must_use]
    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(config.domain_rules.clone(), config.default_domain.clone())
    }

    /// Resolve the canonical storage domain of `destination`.
    ///
    /// Rules apply in declared order over scheme, host and path; the first token
    /// found wins. Query string and fragment are ignored.
    #[must_use]
    pub fn classify(&self, destination: &str) -> &str {
        let lowered = destination.to_ascii_lowercase();
        let location = lowered.split(['?', '#']).next().unwrap_or_default();

        self.rules
            .iter()
            .find(|r| location.contains(&r.token))
            .map_or(self.default_domain.as_str(), |r| r.domain.as_str())
    }
}
