//! Partner taxonomy by industry
//!
//! A second identifier-keyed static table, separate from the main registry,
//! with its own default fallback lists. Partners live in the `contacts`
//! table with `contact_type = partner`; these lists drive the type and tier
//! selectors on the Partners page.

use crate::models::IndustryId;

/// Default partner types for industries without a specific list
pub const DEFAULT_PARTNER_TYPES: [&str; 3] = ["referral_partner", "vendor", "contractor"];

/// Default partner tiers for industries without a specific list
pub const DEFAULT_PARTNER_TIERS: [&str; 4] = ["prospect", "active", "preferred", "strategic"];

/// Partner types for an industry; never empty
pub fn partner_types(id: IndustryId) -> &'static [&'static str] {
    match id {
        IndustryId::Mortgage => &["realtor", "title_company", "appraiser", "insurance_agent", "financial_planner"],
        IndustryId::Insurance => &["referral_partner", "agency", "carrier_rep", "adjuster"],
        IndustryId::RealEstate => &["lender", "title_company", "inspector", "contractor", "stager"],
        IndustryId::Legal => &["co_counsel", "expert_witness", "court_reporter", "investigator"],
        IndustryId::Accounting => &["attorney", "financial_advisor", "banker", "insurance_agent"],
        IndustryId::BlueCollar | IndustryId::HomeServices => {
            &["supplier", "subcontractor", "equipment_vendor", "referral_partner"]
        }
        IndustryId::Automotive => &["parts_supplier", "tow_service", "body_shop", "dealer"],
        IndustryId::Medical => &["specialist", "lab", "pharmacy", "insurance_rep"],
        IndustryId::BeautyWellness => &["product_vendor", "educator", "influencer", "referral_partner"],
        IndustryId::Fitness => &["nutritionist", "physical_therapist", "supplement_vendor", "influencer"],
        IndustryId::PetServices => &["vet", "pet_store", "rescue_organization", "trainer"],
        IndustryId::Events => &["venue", "caterer", "photographer", "florist", "dj_band"],
        IndustryId::ProfessionalServices => {
            &["referral_partner", "technology_vendor", "consultant", "contractor"]
        }
        IndustryId::Custom => &DEFAULT_PARTNER_TYPES,
    }
}

/// Partner tiers for an industry; never empty
pub fn partner_tiers(id: IndustryId) -> &'static [&'static str] {
    match id {
        IndustryId::Mortgage => &["prospect", "top50", "account", "channel"],
        IndustryId::RealEstate => &["prospect", "preferred", "exclusive"],
        _ => &DEFAULT_PARTNER_TIERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mortgage_partner_types_are_exact() {
        assert_eq!(
            partner_types(IndustryId::Mortgage),
            ["realtor", "title_company", "appraiser", "insurance_agent", "financial_planner"]
        );
    }

    #[test]
    fn unmapped_industry_gets_default_lists() {
        // unknown identifiers parse to Custom, which carries the defaults
        let id = IndustryId::parse(Some("unknown_xyz"));
        assert_eq!(partner_types(id), DEFAULT_PARTNER_TYPES);
        assert_eq!(partner_tiers(id), ["prospect", "active", "preferred", "strategic"]);
    }

    #[test]
    fn no_industry_has_empty_taxonomy() {
        for id in IndustryId::ALL {
            assert!(!partner_types(id).is_empty());
            assert!(!partner_tiers(id).is_empty());
        }
    }
}
