use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::error::{ProviderError, Result};
use super::http_client;
use crate::config::ProviderConfig;

/// Equality filter on a column (`col=eq.value`)
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

/// Ordering term (`order=col.desc`)
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// A filtered, ordered select against one table
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: String,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    /// Expect exactly one row
    pub single: bool,
}

impl SelectQuery {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            single: false,
        }
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            descending: true,
        });
        self
    }

    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Query string pairs in PostgREST syntax
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];

        for filter in &self.filters {
            pairs.push((filter.column.clone(), format!("eq.{}", filter.value)));
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.descending { "desc" } else { "asc" }))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("order".to_string(), order));
        }

        pairs
    }
}

/// Table operations consumed from the data provider
#[async_trait]
pub trait DataBackend: Send + Sync {
    /// Run a select; `single` queries yield exactly one row or an error
    async fn select(&self, query: &SelectQuery, access_token: &str) -> Result<Vec<Value>>;

    async fn insert(&self, table: &str, rows: Vec<Value>, access_token: &str) -> Result<()>;
}

/// Client for the PostgREST data API
pub struct RestClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestClient {
    /// Create a new data client
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: format!("{}/rest/v1", config.url),
            anon_key: config.anon_key.clone(),
        })
    }

    fn url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }
}

#[async_trait]
impl DataBackend for RestClient {
    async fn select(&self, query: &SelectQuery, access_token: &str) -> Result<Vec<Value>> {
        let url = self.url(&query.table);
        log::debug!("GET {} {:?}", url, query.query_pairs());

        let accept = if query.single {
            "application/vnd.pgrst.object+json"
        } else {
            "application/json"
        };

        let response = self
            .client
            .get(&url)
            .query(&query.query_pairs())
            .header("apikey", &self.anon_key)
            .header("Accept", accept)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::from_response(status, &text));
        }

        let body: Value = serde_json::from_str(&text)?;
        match body {
            Value::Array(rows) => Ok(rows),
            row @ Value::Object(_) if query.single => Ok(vec![row]),
            other => Err(ProviderError::Api {
                status: StatusCode::OK.as_u16(),
                message: format!("Expected rows from {}, got {}", query.table, other),
            }),
        }
    }

    async fn insert(&self, table: &str, rows: Vec<Value>, access_token: &str) -> Result<()> {
        let url = self.url(table);
        log::debug!("POST {} ({} rows)", url, rows.len());

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(access_token)
            .json(&rows)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_response(status, &text));
        }
        Ok(())
    }
}
