//! Table query builder (PostgREST conventions)
//!
//! Covers the modifiers the pages actually use: column selection with
//! embedded resources, `eq`/`in`/`or(ilike)` filters, ordering, and row
//! limits. Writes always request the mutated representation back so call
//! sites can observe failures and merge results instead of assuming
//! success.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Result};

use super::client::BackendClient;

/// Sort direction for `order`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Builder for a single request against one table
#[derive(Debug, Clone)]
pub struct TableQuery<'a> {
    client: &'a BackendClient,
    table: String,
    token: Option<String>,
    params: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a BackendClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            token: None,
            params: Vec::new(),
        }
    }

    /// Act as the given user; the backend applies row-level tenant scoping
    /// to the token's identity
    pub fn bearer(mut self, access_token: &str) -> Self {
        self.token = Some(access_token.to_string());
        self
    }

    /// Column projection, including embedded resources
    /// (e.g. `*, contacts(full_name)`)
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Equality filter: `column = value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params.push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Membership filter: `column IN (values)`
    pub fn in_list<T: ToString>(mut self, column: &str, values: &[T]) -> Self {
        let list = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((column.into(), format!("in.({})", list)));
        self
    }

    /// Case-insensitive substring match across any of the given columns
    pub fn ilike_any(mut self, columns: &[&str], term: &str) -> Self {
        let pattern = format!("%{}%", term);
        let filter = columns
            .iter()
            .map(|c| format!("{}.ilike.{}", c, pattern))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push(("or".into(), format!("({})", filter)));
        self
    }

    /// Sort by a column
    pub fn order(mut self, column: &str, direction: Order) -> Self {
        let value = match direction {
            Order::Ascending => column.to_string(),
            Order::Descending => format!("{}.desc", column),
        };
        self.params.push(("order".into(), value));
        self
    }

    /// Cap the number of returned rows
    pub fn limit(mut self, n: u32) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    fn url(&self) -> String {
        format!("{}/rest/v1/{}", self.client.base_url(), self.table)
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let token = self.token.as_deref().unwrap_or(self.client.anon_key());
        self.client
            .http()
            .request(method, self.url())
            .query(&self.params)
            .header("apikey", self.client.anon_key())
            .bearer_auth(token)
    }

    /// Fetch all matching rows
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let response = self.request(reqwest::Method::GET).send().await?;
        if !response.status().is_success() {
            return Err(BackendClient::error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch exactly one row; `NotFound` when the filter matches nothing
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T> {
        let table = self.table.clone();
        let mut rows: Vec<T> = self.limit(1).fetch().await?;
        rows.pop()
            .ok_or_else(|| Error::NotFound(format!("no matching row in {}", table)))
    }

    /// Count matching rows without transferring them
    pub async fn count(self) -> Result<i64> {
        let response = self
            .request(reqwest::Method::HEAD)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendClient::error_from_response(response).await);
        }
        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Internal("count response missing content-range".into()))?;
        parse_content_range_total(content_range)
            .ok_or_else(|| Error::Internal(format!("unparseable content-range: {}", content_range)))
    }

    /// Insert one or more rows, returning the stored representation
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(self, body: &B) -> Result<Vec<T>> {
        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendClient::error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// Insert a single row and return it as stored
    pub async fn insert_one<B: Serialize + ?Sized, T: DeserializeOwned>(self, body: &B) -> Result<T> {
        let table = self.table.clone();
        let mut rows = self.insert(body).await?;
        rows.pop()
            .ok_or_else(|| Error::Internal(format!("insert into {} returned no representation", table)))
    }

    /// Update matching rows, returning the mutated representations
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(self, body: &B) -> Result<Vec<T>> {
        let response = self
            .request(reqwest::Method::PATCH)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendClient::error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// Update exactly one row; `NotFound` when the filter matched nothing
    /// (a silent zero-row update would let a failed write masquerade as
    /// success)
    pub async fn update_one<B: Serialize + ?Sized, T: DeserializeOwned>(self, body: &B) -> Result<T> {
        let table = self.table.clone();
        let mut rows = self.update(body).await?;
        rows.pop()
            .ok_or_else(|| Error::NotFound(format!("update matched no rows in {}", table)))
    }

    /// Delete matching rows
    pub async fn delete(self) -> Result<()> {
        let response = self.request(reqwest::Method::DELETE).send().await?;
        if !response.status().is_success() {
            return Err(BackendClient::error_from_response(response).await);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Total from a `Content-Range` header (`items 0-24/3573` or `*/0`)
fn parse_content_range_total(value: &str) -> Option<i64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn client() -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: "https://backend.example.com".into(),
            anon_key: "anon".into(),
        })
        .unwrap()
    }

    #[test]
    fn eq_order_limit_build_expected_params() {
        let client = client();
        let query = client
            .from("contacts")
            .select("*")
            .eq("contact_type", "partner")
            .order("full_name", Order::Ascending)
            .limit(100);

        assert_eq!(
            query.params(),
            [
                ("select".to_string(), "*".to_string()),
                ("contact_type".to_string(), "eq.partner".to_string()),
                ("order".to_string(), "full_name".to_string()),
                ("limit".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn descending_order_appends_suffix() {
        let client = client();
        let query = client.from("jobs").order("created_at", Order::Descending);
        assert_eq!(query.params(), [("order".to_string(), "created_at.desc".to_string())]);
    }

    #[test]
    fn ilike_any_builds_or_filter() {
        let client = client();
        let query = client.from("contacts").ilike_any(&["full_name", "email"], "smith");
        assert_eq!(
            query.params(),
            [(
                "or".to_string(),
                "(full_name.ilike.%smith%,email.ilike.%smith%)".to_string()
            )]
        );
    }

    #[test]
    fn in_list_builds_membership_filter() {
        let client = client();
        let query = client.from("jobs").in_list("status", &["scheduled", "in_progress"]);
        assert_eq!(
            query.params(),
            [("status".to_string(), "in.(scheduled,in_progress)".to_string())]
        );
    }

    #[test]
    fn content_range_total_parses() {
        assert_eq!(parse_content_range_total("items 0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("garbage"), None);
    }
}
