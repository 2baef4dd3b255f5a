//! Session and tenant context objects
//!
//! Explicit context passed into page handlers by reference: constructed at
//! sign-in, invalidated on sign-out, rebuilt on tenant switch. No ambient
//! globals.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::backend::{AuthUser, BackendClient, Session};
use crate::models::{MembershipWithTenant, Tenant, TenantUser};
use crate::store::TenantSelectionStore;
use crate::{Error, Result};

/// Authenticated user session (tokens + identity)
#[derive(Debug, Clone)]
pub struct AuthSession {
    session: Session,
}

impl AuthSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn access_token(&self) -> &str {
        &self.session.access_token
    }

    pub fn user(&self) -> &AuthUser {
        &self.session.user
    }
}

/// The user's tenant memberships and the currently selected tenant
#[derive(Debug, Clone)]
pub struct TenantSession {
    tenants: Vec<Tenant>,
    memberships: Vec<TenantUser>,
    active: usize,
}

impl TenantSession {
    /// Load all active memberships for the user and pick the active tenant:
    /// the locally saved selection when it is still a membership, otherwise
    /// the first one. Returns `None` for a user with no memberships.
    pub async fn load(
        client: &BackendClient,
        auth: &AuthSession,
        store: &TenantSelectionStore,
    ) -> Result<Option<TenantSession>> {
        let rows: Vec<MembershipWithTenant> = client
            .from("tenant_users")
            .select("*, tenants(*)")
            .eq("user_id", auth.user().id)
            .eq("is_active", true)
            .bearer(auth.access_token())
            .fetch()
            .await?;

        let mut tenants = Vec::new();
        let mut memberships = Vec::new();
        for row in rows {
            if let Some(tenant) = row.tenants {
                tenants.push(tenant);
                memberships.push(row.membership);
            }
        }

        if tenants.is_empty() {
            return Ok(None);
        }

        let saved = store.load();
        let active = saved
            .and_then(|id| tenants.iter().position(|t| t.id == id))
            .unwrap_or(0);

        Ok(Some(TenantSession { tenants, memberships, active }))
    }

    /// The selected tenant
    pub fn tenant(&self) -> &Tenant {
        &self.tenants[self.active]
    }

    /// The user's membership in the selected tenant
    pub fn membership(&self) -> &TenantUser {
        &self.memberships[self.active]
    }

    /// All tenants available in the switcher
    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    /// Switch the active tenant and persist the selection
    pub fn switch(&mut self, tenant_id: Uuid, store: &TenantSelectionStore) -> Result<()> {
        let index = self
            .tenants
            .iter()
            .position(|t| t.id == tenant_id)
            .ok_or_else(|| Error::NotFound(format!("no membership for tenant {}", tenant_id)))?;
        self.active = index;
        store.save(tenant_id);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TenantIdRow {
    #[allow(dead_code)]
    tenant_id: Uuid,
}

/// Auto-create a tenant for a newly signed-up user with no membership:
/// `<email-prefix>'s Business`, blue-collar industry, starter tier, with
/// an `owner` membership linking the user to it.
pub async fn ensure_user_has_tenant(client: &BackendClient, auth: &AuthSession) -> Result<()> {
    let existing: Vec<TenantIdRow> = client
        .from("tenant_users")
        .select("tenant_id")
        .eq("user_id", auth.user().id)
        .limit(1)
        .bearer(auth.access_token())
        .fetch()
        .await?;

    if !existing.is_empty() {
        return Ok(());
    }

    let email_prefix = auth
        .user()
        .email
        .as_deref()
        .and_then(|e| e.split('@').next())
        .unwrap_or("user");
    let slug = slugify(&format!("{}-{}", email_prefix, Utc::now().timestamp_millis()));

    let tenant: Tenant = client
        .from("tenants")
        .bearer(auth.access_token())
        .insert_one(&json!({
            "name": format!("{}'s Business", email_prefix),
            "slug": slug,
            "industry": "blue_collar",
            "subscription_tier": "starter",
        }))
        .await
        .map_err(|e| {
            error!("Failed to create tenant for new user: {}", e);
            e
        })?;

    let _: Vec<TenantUser> = client
        .from("tenant_users")
        .bearer(auth.access_token())
        .insert(&json!({
            "tenant_id": tenant.id,
            "user_id": auth.user().id,
            "role": "owner",
        }))
        .await
        .map_err(|e| {
            error!("Failed to link user to new tenant: {}", e);
            e
        })?;

    info!("Created tenant {} for new user", tenant.slug);
    Ok(())
}

/// Lowercase; anything outside `[a-z0-9-]` becomes `-`
fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}
