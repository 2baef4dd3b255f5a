//! Industry configuration registry
//!
//! One static `IndustryConfig` per supported industry identifier, loaded at
//! process start from the definition files bundled under `data/`. Lookup is
//! a total function: anything the registry does not recognize maps to the
//! `custom` entry, never to an error.

pub mod partners;
pub mod resolver;

pub use resolver::IndustryResolver;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::IndustryId;

/// Keyword lists driving transcript parsing for the voice workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceParsingConfig {
    pub time_keywords: Vec<String>,
    pub part_keywords: Vec<String>,
    pub followup_keywords: Vec<String>,
}

/// Per-industry configuration record
///
/// Immutable after load. `terminology` and `features` stay open maps:
/// `label` falls back to the raw key when a term is missing, and
/// `has_feature` treats anything but an explicit `true` as disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryConfig {
    pub id: IndustryId,
    pub name: String,
    pub terminology: BTreeMap<String, String>,
    #[serde(default)]
    pub features: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub pipeline_stages: Vec<String>,
    #[serde(default)]
    pub billing_types: Option<Vec<String>>,
    #[serde(default)]
    pub compliance_requirements: Option<Vec<String>>,
    #[serde(default)]
    pub voice_parsing: Option<VoiceParsingConfig>,
    #[serde(default)]
    pub custom_fields: Option<BTreeMap<String, String>>,
}

/// Bundled definition files, one per supported identifier
const BUNDLED_CONFIGS: [(&str, &str); 15] = [
    ("blue_collar", include_str!("data/blue_collar.json")),
    ("medical", include_str!("data/medical.json")),
    ("beauty_wellness", include_str!("data/beauty_wellness.json")),
    ("mortgage", include_str!("data/mortgage.json")),
    ("insurance", include_str!("data/insurance.json")),
    ("real_estate", include_str!("data/real_estate.json")),
    ("legal", include_str!("data/legal.json")),
    ("accounting", include_str!("data/accounting.json")),
    ("home_services", include_str!("data/home_services.json")),
    ("automotive", include_str!("data/automotive.json")),
    ("fitness", include_str!("data/fitness.json")),
    ("pet_services", include_str!("data/pet_services.json")),
    ("events", include_str!("data/events.json")),
    ("professional_services", include_str!("data/professional_services.json")),
    ("custom", include_str!("data/custom.json")),
];

static REGISTRY: Lazy<BTreeMap<IndustryId, IndustryConfig>> = Lazy::new(|| {
    BUNDLED_CONFIGS
        .iter()
        .map(|(name, json)| {
            let config: IndustryConfig = serde_json::from_str(json)
                .unwrap_or_else(|e| panic!("bundled industry config {}.json is invalid: {}", name, e));
            (config.id, config)
        })
        .collect()
});

/// Resolve an industry identifier to its configuration
///
/// Deterministic and total: an identifier missing from the registry yields
/// the `custom` entry. The registry always contains `custom`, so the inner
/// lookup cannot fail.
pub fn resolve(id: IndustryId) -> &'static IndustryConfig {
    REGISTRY
        .get(&id)
        .unwrap_or_else(|| &REGISTRY[&IndustryId::Custom])
}

/// Resolve from a raw identifier string (unknown/empty/missing → `custom`)
pub fn resolve_str(id: Option<&str>) -> &'static IndustryConfig {
    resolve(IndustryId::parse(id))
}

/// All registered configurations, in identifier order
pub fn all() -> impl Iterator<Item = &'static IndustryConfig> {
    REGISTRY.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_matching_id_for_every_industry() {
        for id in IndustryId::ALL {
            assert_eq!(resolve(id).id, id, "config id mismatch for {}", id);
        }
    }

    #[test]
    fn resolve_str_falls_back_to_custom() {
        assert_eq!(resolve_str(Some("unknown_xyz")).id, IndustryId::Custom);
        assert_eq!(resolve_str(Some("")).id, IndustryId::Custom);
        assert_eq!(resolve_str(None).id, IndustryId::Custom);
    }

    #[test]
    fn every_config_has_core_terminology_and_stages() {
        for config in all() {
            for key in ["contact", "contacts", "job", "jobs", "complete"] {
                assert!(
                    config.terminology.contains_key(key),
                    "{} missing terminology key {}",
                    config.id,
                    key
                );
            }
            assert!(!config.pipeline_stages.is_empty(), "{} has no stages", config.id);
            assert!(!config.job_types.is_empty(), "{} has no job types", config.id);
        }
    }

    #[test]
    fn registry_covers_all_supported_identifiers() {
        assert_eq!(all().count(), IndustryId::ALL.len());
    }
}
