//! Domain models for the hosted-backend tables
//!
//! Every record is scoped to exactly one tenant. Row-level access control
//! lives in the backend; these types only mirror its shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Industry identifier for a tenant
///
/// Unknown identifiers deserialize to `Custom`, so a tenant row with an
/// unrecognized industry never fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustryId {
    BlueCollar,
    Medical,
    BeautyWellness,
    Mortgage,
    Insurance,
    RealEstate,
    Legal,
    Accounting,
    HomeServices,
    Automotive,
    Fitness,
    PetServices,
    Events,
    ProfessionalServices,
    #[serde(other)]
    Custom,
}

impl IndustryId {
    /// All supported identifiers, `custom` last
    pub const ALL: [IndustryId; 15] = [
        IndustryId::BlueCollar,
        IndustryId::Medical,
        IndustryId::BeautyWellness,
        IndustryId::Mortgage,
        IndustryId::Insurance,
        IndustryId::RealEstate,
        IndustryId::Legal,
        IndustryId::Accounting,
        IndustryId::HomeServices,
        IndustryId::Automotive,
        IndustryId::Fitness,
        IndustryId::PetServices,
        IndustryId::Events,
        IndustryId::ProfessionalServices,
        IndustryId::Custom,
    ];

    /// Snake-case identifier as stored in the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryId::BlueCollar => "blue_collar",
            IndustryId::Medical => "medical",
            IndustryId::BeautyWellness => "beauty_wellness",
            IndustryId::Mortgage => "mortgage",
            IndustryId::Insurance => "insurance",
            IndustryId::RealEstate => "real_estate",
            IndustryId::Legal => "legal",
            IndustryId::Accounting => "accounting",
            IndustryId::HomeServices => "home_services",
            IndustryId::Automotive => "automotive",
            IndustryId::Fitness => "fitness",
            IndustryId::PetServices => "pet_services",
            IndustryId::Events => "events",
            IndustryId::ProfessionalServices => "professional_services",
            IndustryId::Custom => "custom",
        }
    }

    /// Total parse: unknown, empty, or missing identifiers map to `Custom`
    pub fn parse(id: Option<&str>) -> IndustryId {
        match id {
            Some(s) => IndustryId::ALL
                .into_iter()
                .find(|i| i.as_str() == s)
                .unwrap_or(IndustryId::Custom),
            None => IndustryId::Custom,
        }
    }
}

impl std::fmt::Display for IndustryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a user within a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Owner,
    Admin,
    Manager,
    Member,
    FieldWorker,
    Customer,
}

/// Processing state of a voice entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceEntryStatus {
    Pending,
    Processing,
    Parsed,
    Failed,
}

/// Billing lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

/// Job statuses counted as "active" on the dashboard
pub const ACTIVE_JOB_STATUSES: [&str; 3] = ["scheduled", "in_progress", "quoted"];

/// Branding configuration stored on the tenant row
///
/// The backend column is JSON; absent fields take defaults rather than
/// failing the row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
}

/// Per-tenant feature overrides layered over the industry defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureOverrides(pub BTreeMap<String, bool>);

/// Per-tenant industry customizations layered over the registry entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryOverrides {
    pub terminology: BTreeMap<String, String>,
    pub pipeline_stages: Option<Vec<String>>,
}

/// Business entity owning all domain data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default = "default_industry")]
    pub industry: IndustryId,
    #[serde(default)]
    pub feature_config: FeatureOverrides,
    #[serde(default)]
    pub industry_config: IndustryOverrides,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default = "default_tier")]
    pub subscription_tier: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_industry() -> IndustryId {
    IndustryId::Custom
}

fn default_tier() -> String {
    "starter".to_string()
}

fn default_true() -> bool {
    true
}

/// Membership linking a user to a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUser {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub role: UserRole,
    pub hourly_rate: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership row with its tenant embedded (`tenant_users.select(*, tenants(*))`)
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipWithTenant {
    #[serde(flatten)]
    pub membership: TenantUser,
    pub tenants: Option<Tenant>,
}

/// Partner metadata stored in a partner contact's `custom_fields`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnerProfile {
    pub partner_type: Option<String>,
    pub partner_tier: Option<String>,
    pub company: Option<String>,
}

/// Contact record (customers and partners share the table,
/// distinguished by `contact_type`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub tenant_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone_secondary: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub contact_type: String,
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub custom_fields: serde_json::Value,
    pub notes: Option<String>,
    #[serde(default)]
    pub total_jobs: i64,
    #[serde(default)]
    pub total_revenue: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Partner metadata from `custom_fields`; lenient on malformed blobs
    pub fn partner_profile(&self) -> PartnerProfile {
        serde_json::from_value(self.custom_fields.clone()).unwrap_or_default()
    }
}

/// Insert payload for `contacts`
#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub tenant_id: Uuid,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    pub contact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub custom_fields: serde_json::Value,
}

/// Job record; `status` holds an industry-defined pipeline stage name,
/// so it stays a string rather than a closed enum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub tenant_id: Uuid,
    pub contact_id: Option<i64>,
    pub assigned_to: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub job_type: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time_start: Option<String>,
    pub scheduled_time_end: Option<String>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub service_address: Option<String>,
    pub service_city: Option<String>,
    pub service_state: Option<String>,
    pub service_zip: Option<String>,
    pub estimated_hours: Option<f64>,
    pub estimated_total: Option<f64>,
    pub actual_hours: Option<f64>,
    pub actual_total: Option<f64>,
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub custom_fields: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job row with its contact's name embedded
#[derive(Debug, Clone, Deserialize)]
pub struct JobWithContact {
    #[serde(flatten)]
    pub job: Job,
    pub contacts: Option<ContactName>,
}

/// Embedded `contacts(full_name)` fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactName {
    pub full_name: String,
}

/// Insert payload for `jobs`
#[derive(Debug, Clone, Serialize)]
pub struct NewJob {
    pub tenant_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total: Option<f64>,
}

/// Voice-dictated field note attached to a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceEntry {
    pub id: i64,
    pub tenant_id: Uuid,
    pub job_id: Option<i64>,
    pub user_id: Option<Uuid>,
    pub audio_url: Option<String>,
    pub duration_seconds: Option<i64>,
    pub raw_transcription: Option<String>,
    pub status: VoiceEntryStatus,
    #[serde(default)]
    pub parsed_data: serde_json::Value,
    #[serde(default)]
    pub billing_items_generated: serde_json::Value,
    #[serde(default)]
    pub tasks_generated: serde_json::Value,
    #[serde(default)]
    pub inventory_updates: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// Voice entry with its job's title embedded
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceEntryWithJob {
    #[serde(flatten)]
    pub entry: VoiceEntry,
    pub jobs: Option<JobTitle>,
}

/// Embedded `jobs(title)` fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTitle {
    pub title: String,
}

/// Line item billed against a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingItem {
    pub id: i64,
    pub tenant_id: Uuid,
    pub job_id: i64,
    pub voice_entry_id: Option<i64>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    pub item_type: String,
    pub status: BillingStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `billing_items`
#[derive(Debug, Clone, Serialize)]
pub struct NewBillingItem {
    pub tenant_id: Uuid,
    pub job_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_entry_id: Option<i64>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    pub item_type: String,
}

/// Timeline event on a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub tenant_id: Uuid,
    pub contact_id: i64,
    pub job_id: Option<i64>,
    pub user_id: Option<Uuid>,
    pub activity_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Stocked part or material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub tenant_id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity_on_hand: f64,
    pub quantity_reserved: f64,
    pub reorder_point: f64,
    pub unit_cost: Option<f64>,
    pub unit_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scheduled appointment with a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub tenant_id: Uuid,
    pub contact_id: i64,
    pub assigned_to: Option<Uuid>,
    pub service_type: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn industry_id_roundtrips_all_identifiers() {
        for id in IndustryId::ALL {
            assert_eq!(IndustryId::parse(Some(id.as_str())), id);
        }
    }

    #[test]
    fn industry_id_parse_is_total() {
        assert_eq!(IndustryId::parse(Some("unknown_xyz")), IndustryId::Custom);
        assert_eq!(IndustryId::parse(Some("")), IndustryId::Custom);
        assert_eq!(IndustryId::parse(None), IndustryId::Custom);
    }

    #[test]
    fn industry_id_keys_an_ordered_map() {
        // The registry keys a BTreeMap by IndustryId
        let map: std::collections::BTreeMap<IndustryId, usize> = IndustryId::ALL
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        assert_eq!(map.len(), IndustryId::ALL.len());
        assert_eq!(map.get(&IndustryId::Custom), Some(&14));
    }

    #[test]
    fn unknown_industry_deserializes_to_custom() {
        let id: IndustryId = serde_json::from_str("\"underwater_basketweaving\"").unwrap();
        assert_eq!(id, IndustryId::Custom);
    }

    #[test]
    fn partner_profile_tolerates_malformed_custom_fields() {
        let json = serde_json::json!({
            "id": 1,
            "tenant_id": "00000000-0000-0000-0000-000000000001",
            "full_name": "Dana Realty",
            "email": null,
            "phone": null,
            "phone_secondary": null,
            "address": null,
            "city": null,
            "state": null,
            "zip": null,
            "contact_type": "partner",
            "source": null,
            "custom_fields": "not-an-object",
            "notes": null,
            "created_at": "2026-01-05T12:00:00Z",
            "updated_at": "2026-01-05T12:00:00Z"
        });
        let contact: Contact = serde_json::from_value(json).unwrap();
        let profile = contact.partner_profile();
        assert!(profile.partner_type.is_none());
        assert!(profile.partner_tier.is_none());
    }
}
