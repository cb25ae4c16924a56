// Kusto (Azure Data Explorer) repository implementation
use crate::application::credentials::{AccessToken, CredentialProvider};
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::telemetry::TelemetryRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

const TIME_COLUMN: &str = "TimeGenerated";
const TEMP_COLUMN: &str = "temp";
const HUM_COLUMN: &str = "hum";
const DEVICE_TIME_COLUMN: &str = "deviceTime";

static NULL: serde_json::Value = serde_json::Value::Null;

#[derive(Clone)]
pub struct KustoRepository {
    cluster_url: String,
    database: String,
    credentials: Arc<dyn CredentialProvider>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct KustoQueryRequest<'a> {
    db: &'a str,
    csl: &'a str,
}

#[derive(Debug, Deserialize)]
struct KustoResponse {
    #[serde(rename = "Tables")]
    tables: Vec<KustoTable>,
}

#[derive(Debug, Deserialize)]
struct KustoTable {
    #[serde(rename = "Columns")]
    columns: Vec<KustoColumn>,
    #[serde(rename = "Rows")]
    rows: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct KustoColumn {
    #[serde(rename = "ColumnName")]
    column_name: String,
}

#[derive(Debug, Deserialize)]
struct KustoErrorResponse {
    error: KustoError,
}

#[derive(Debug, Deserialize)]
struct KustoError {
    message: String,
    #[serde(rename = "@message", default)]
    detail: Option<String>,
}

impl KustoRepository {
    pub fn new(
        cluster_url: String,
        database: String,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(QUERY_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            cluster_url: cluster_url.trim_end_matches('/').to_string(),
            database,
            credentials,
            client,
        })
    }

    fn query_url(&self) -> String {
        format!("{}/v1/rest/query", self.cluster_url)
    }

    async fn send_query(&self, token: &AccessToken, query: &str) -> Result<KustoResponse> {
        let response = self
            .client
            .post(self.query_url())
            .bearer_auth(token.secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&KustoQueryRequest {
                db: &self.database,
                csl: query,
            })
            .send()
            .await
            .context("Failed to send request to Kusto")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Kusto query failed with status {}: {}", status, error_message(&body));
        }

        response
            .json::<KustoResponse>()
            .await
            .context("Failed to parse Kusto response")
    }
}

#[async_trait]
impl TelemetryRepository for KustoRepository {
    async fn execute_query(&self, query: &str) -> Result<Vec<TelemetryRecord>> {
        let token = self
            .credentials
            .access_token()
            .await
            .context("Failed to acquire Kusto access token")?;

        self.send_query(&token, query)
            .await
            .and_then(parse_primary_result)
            .map_err(|e| anyhow::anyhow!(token.redact(&format!("{:#}", e))))
    }
}

/// Prefer the semantic detail Kusto puts in `@message`, fall back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<KustoErrorResponse>(body) {
        Ok(resp) => resp.error.detail.unwrap_or(resp.error.message),
        Err(_) => body.trim().to_string(),
    }
}

fn parse_primary_result(response: KustoResponse) -> Result<Vec<TelemetryRecord>> {
    let table = response
        .tables
        .into_iter()
        .next()
        .context("Kusto response contained no result tables")?;

    let column = |name: &str| {
        table
            .columns
            .iter()
            .position(|c| c.column_name == name)
            .with_context(|| format!("Kusto result is missing column {}", name))
    };
    let time_idx = column(TIME_COLUMN)?;
    let temp_idx = column(TEMP_COLUMN)?;
    let hum_idx = column(HUM_COLUMN)?;
    let device_time_idx = column(DEVICE_TIME_COLUMN)?;

    let mut records = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).unwrap_or(&NULL);

        let time = cell(time_idx)
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .with_context(|| format!("Row {} has no valid {}", i, TIME_COLUMN))?
            .with_timezone(&chrono::Utc);

        let device_time = match cell(device_time_idx) {
            serde_json::Value::Null => None,
            value => Some(value.clone()),
        };

        records.push(TelemetryRecord {
            time,
            temp: cell(temp_idx).as_f64(),
            hum: cell(hum_idx).as_f64(),
            device_time,
        });
    }

    Ok(records)
}
