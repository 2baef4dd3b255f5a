//! Derived accessors over a resolved industry configuration
//!
//! Every page consumes the registry through this type. None of the
//! accessors can fail; missing data degrades to the raw key or an empty
//! default.

use std::collections::BTreeMap;

use super::{partners, IndustryConfig, VoiceParsingConfig};
use crate::models::{IndustryId, Tenant};

/// Accessor wrapper around a resolved `IndustryConfig`
#[derive(Debug, Clone, Copy)]
pub struct IndustryResolver {
    config: &'static IndustryConfig,
}

impl IndustryResolver {
    /// Resolve for an industry identifier
    pub fn new(id: IndustryId) -> Self {
        Self { config: super::resolve(id) }
    }

    /// Resolve for the active tenant's industry
    pub fn for_tenant(tenant: &Tenant) -> Self {
        Self::new(tenant.industry)
    }

    /// The underlying configuration record
    pub fn config(&self) -> &'static IndustryConfig {
        self.config
    }

    /// Terminology lookup; returns the raw key when no term is configured
    /// rather than failing
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        self.config
            .terminology
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Feature check: strict equality to `true`; absent, `false`, or
    /// non-boolean values are all disabled
    pub fn has_feature(&self, flag: &str) -> bool {
        matches!(
            self.config.features.get(flag),
            Some(serde_json::Value::Bool(true))
        )
    }

    /// Ordered pipeline stage names
    pub fn pipeline_stages(&self) -> &'static [String] {
        &self.config.pipeline_stages
    }

    /// Job type names
    pub fn job_types(&self) -> &'static [String] {
        &self.config.job_types
    }

    /// Billing types, empty when not configured
    pub fn billing_types(&self) -> &'static [String] {
        self.config.billing_types.as_deref().unwrap_or(&[])
    }

    /// Compliance requirements, empty when not configured
    pub fn compliance_requirements(&self) -> &'static [String] {
        self.config.compliance_requirements.as_deref().unwrap_or(&[])
    }

    /// Custom field definitions (key → display label)
    pub fn custom_fields(&self) -> Option<&'static BTreeMap<String, String>> {
        self.config.custom_fields.as_ref()
    }

    /// Voice-parsing keyword lists; `None` when the industry has no voice
    /// workflow configuration
    pub fn voice_parsing(&self) -> Option<&'static VoiceParsingConfig> {
        self.config.voice_parsing.as_ref()
    }

    /// Partner types for this industry (separate static table, own default)
    pub fn partner_types(&self) -> &'static [&'static str] {
        partners::partner_types(self.config.id)
    }

    /// Partner tiers for this industry (separate static table, own default)
    pub fn partner_tiers(&self) -> &'static [&'static str] {
        partners::partner_tiers(self.config.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_returns_configured_term() {
        let r = IndustryResolver::new(IndustryId::Mortgage);
        assert_eq!(r.label("contact"), "Borrower");
        assert_eq!(r.label("jobs"), "Loans");
    }

    #[test]
    fn label_falls_back_to_raw_key() {
        for id in IndustryId::ALL {
            let r = IndustryResolver::new(id);
            assert_eq!(r.label("no_such_term"), "no_such_term");
        }
    }

    #[test]
    fn has_feature_requires_explicit_true() {
        let r = IndustryResolver::new(IndustryId::BlueCollar);
        assert!(r.has_feature("inventory"));
        // explicitly false
        assert!(!r.has_feature("compliance"));
        // absent
        assert!(!r.has_feature("no_such_feature"));
    }

    #[test]
    fn list_accessors_default_to_empty() {
        let r = IndustryResolver::new(IndustryId::Custom);
        assert!(r.billing_types().is_empty());
        assert!(r.compliance_requirements().is_empty());
        assert!(r.custom_fields().is_none());
        assert!(r.voice_parsing().is_none());
    }

    #[test]
    fn mortgage_scenario_end_to_end() {
        let r = IndustryResolver::new(IndustryId::parse(Some("mortgage")));
        assert_eq!(
            r.partner_types(),
            ["realtor", "title_company", "appraiser", "insurance_agent", "financial_planner"]
        );
        assert_eq!(r.partner_tiers(), ["prospect", "top50", "account", "channel"]);
    }

    #[test]
    fn unknown_industry_scenario_end_to_end() {
        let r = IndustryResolver::new(IndustryId::parse(Some("unknown_xyz")));
        assert_eq!(r.config().id, IndustryId::Custom);
        assert_eq!(r.partner_tiers(), ["prospect", "active", "preferred", "strategic"]);
    }
}
