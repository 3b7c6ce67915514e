//! Google Sheets v4 values API as a [`RowStore`].

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};

use crate::{auth::TokenSource, Row, RowRange, RowStore, SheetsConfig, StoreError};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Row>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteValues<'a> {
    range: &'a str,
    major_dimension: &'a str,
    values: &'a [Row],
}

/// Client for a single spreadsheet, authenticated as a service account.
#[derive(Debug)]
pub struct SheetsClient {
    config: SheetsConfig,
    http: HttpClient,
    auth: Option<TokenSource>,
}

impl SheetsClient {
    /// Create a client. Missing credentials are not an error here:
    /// the client then reports itself as unavailable.
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let auth = match (&config.client_email, config.private_key_pem()) {
            (Some(email), Some(key)) => Some(TokenSource::new(
                email.clone(),
                key,
                config.private_key_id.clone(),
                http.clone(),
            )),
            _ => None,
        };

        Ok(SheetsClient { config, http, auth })
    }

    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    /// URL of a values resource, optionally with an action suffix like `:clear`
    fn values_url(&self, range: RowRange, action: &str) -> Result<Url, StoreError> {
        let id = self
            .config
            .spreadsheet_id
            .as_deref()
            .ok_or(StoreError::NotConfigured)?;
        let range = format!("{}{}", range.a1(&self.config.sheet_name), action);

        let mut url = Url::parse(API_BASE).map_err(|e| StoreError::InvalidRange(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidRange(range.clone()))?
            .push(id)
            .push("values")
            .push(&range);
        Ok(url)
    }

    async fn with_auth(&self, builder: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        let auth = self.auth.as_ref().ok_or(StoreError::NotConfigured)?;
        Ok(builder.bearer_auth(auth.token().await?))
    }

    /// Turn a non success response into an API error
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => json["error"]["message"]
                .as_str()
                .or_else(|| json["error"].as_str())
                .unwrap_or(&body)
                .to_string(),
            Err(_) => body,
        };
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RowStore for SheetsClient {
    fn is_available(&self) -> bool {
        self.config.is_available()
    }

    async fn read_rows(&self, range: RowRange) -> Result<Vec<Row>> {
        let mut url = self.values_url(range, "")?;
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE")
            .append_pair("majorDimension", "ROWS");

        let request = self.with_auth(self.http.get(url)).await?;
        let response = Self::check(request.send().await?).await?;
        let values: ValueRange = response.json().await?;
        Ok(values.values)
    }

    async fn clear_rows(&self, range: RowRange) -> Result<()> {
        let url = self.values_url(range, ":clear")?;
        let request = self.with_auth(self.http.post(url)).await?;
        Self::check(request.json(&serde_json::json!({})).send().await?).await?;
        Ok(())
    }

    async fn write_rows(&self, range: RowRange, rows: Vec<Row>) -> Result<()> {
        let a1 = range.a1(&self.config.sheet_name);
        let mut url = self.values_url(range, "")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = WriteValues {
            range: &a1,
            major_dimension: "ROWS",
            values: &rows,
        };
        let request = self.with_auth(self.http.put(url)).await?;
        Self::check(request.json(&body).send().await?).await?;
        Ok(())
    }
}
