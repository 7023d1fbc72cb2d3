//! Upload to a PostgREST-compatible table (e.g. a Supabase project).

use std::env;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SinkError;
use crate::models::config::RemoteConfig;
use crate::models::record::Record;

/// Batches between progress lines.
const PROGRESS_EVERY: usize = 10;

/// Row shape of the remote table (snake_case columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteRow<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub full_name: &'a str,
    pub contact: &'a str,
    pub address: &'a str,
    pub pincode: &'a str,
    pub city: &'a str,
}

impl<'a> From<&'a Record> for RemoteRow<'a> {
    fn from(record: &'a Record) -> Self {
        let p = &record.person;
        Self {
            id: &record.id,
            first_name: &p.first_name,
            last_name: &p.last_name,
            full_name: &p.full_name,
            contact: &p.contact,
            address: &p.address,
            pincode: &p.pincode,
            city: &p.city,
        }
    }
}

/// Outcome of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Batches attempted.
    pub batches: usize,
    /// Records in batches the store accepted.
    pub uploaded: usize,
    /// Index of each rejected batch with its error.
    pub failed_batches: Vec<(usize, String)>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed_batches.is_empty()
    }
}

/// Client for one remote table.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: reqwest::Client,
    endpoint: String,
    batch_size: usize,
}

impl RemoteSink {
    /// Create a sink for `table` under `base_url`, authenticating with `api_key`.
    pub fn new(base_url: &str, table: &str, api_key: &str) -> Result<Self, SinkError> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(api_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key))?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            batch_size: 500,
        })
    }

    /// Build from configuration, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, SinkError> {
        let api_key = env::var(&config.api_key_env).ok();
        Self::from_parts(config, api_key.as_deref())
    }

    fn from_parts(config: &RemoteConfig, api_key: Option<&str>) -> Result<Self, SinkError> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| SinkError::NotConfigured("remote.url is not set".to_string()))?;
        let api_key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
            SinkError::NotConfigured(format!("environment variable {} is not set", config.api_key_env))
        })?;

        Ok(Self::new(url, &config.table, api_key)?.with_batch_size(config.batch_size))
    }

    /// Set records per request. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Delete every stored row.
    pub async fn clear(&self) -> Result<(), SinkError> {
        // PostgREST refuses unfiltered deletes; every row has a non-empty id
        let request = self.client.delete(&self.endpoint).query(&[("id", "neq.")]);
        send(request).await?;
        info!("Cleared remote table {}", self.endpoint);
        Ok(())
    }

    /// Upsert `records` in batches.
    ///
    /// A rejected batch is logged and recorded; later batches are still sent.
    pub async fn upload(&self, records: &[Record]) -> UploadReport {
        let mut report = UploadReport::default();

        for (index, batch) in records.chunks(self.batch_size).enumerate() {
            report.batches += 1;
            let rows: Vec<RemoteRow<'_>> = batch.iter().map(RemoteRow::from).collect();

            let request = self
                .client
                .post(&self.endpoint)
                .header("Prefer", "resolution=merge-duplicates")
                .json(&rows);

            match send(request).await {
                Ok(_) => {
                    report.uploaded += batch.len();
                    if index % PROGRESS_EVERY == 0 {
                        info!("Uploaded {}/{}", report.uploaded, records.len());
                    }
                }
                Err(e) => {
                    warn!("Error at batch {}: {}", index, e);
                    report.failed_batches.push((index, e.to_string()));
                }
            }
        }

        debug!(
            "Upload finished: {} batches, {} failed",
            report.batches,
            report.failed_batches.len()
        );
        report
    }

    /// Number of stored rows, as reported by the store.
    pub async fn count(&self) -> Result<Option<usize>, SinkError> {
        let request = self
            .client
            .head(&self.endpoint)
            .query(&[("select", "id")])
            .header("Prefer", "count=exact");

        let response = send(request).await?;
        Ok(response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total))
    }
}

async fn send(request: RequestBuilder) -> Result<Response, SinkError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SinkError::Status {
        status: status.as_u16(),
        body,
    })
}

fn header_value(value: &str) -> Result<HeaderValue, SinkError> {
    HeaderValue::from_str(value)
        .map_err(|_| SinkError::NotConfigured("API key contains invalid characters".to_string()))
}

/// Total from a `Content-Range` header such as `0-499/1234` or `*/1234`.
fn parse_content_range_total(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::Gazetteer;
    use crate::models::record::Person;
    use pretty_assertions::assert_eq;

    fn config(url: Option<&str>) -> RemoteConfig {
        RemoteConfig {
            url: url.map(str::to_string),
            batch_size: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_row_uses_snake_case() {
        let record = Record {
            id: "000007".to_string(),
            person: Person::new("RAM KUMAR", "9876543210", "Noida 201301", &Gazetteer::default())
                .unwrap(),
        };

        let value = serde_json::to_value(RemoteRow::from(&record)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "000007",
                "first_name": "RAM",
                "last_name": "KUMAR",
                "full_name": "RAM KUMAR",
                "contact": "9876543210",
                "address": "Noida 201301",
                "pincode": "201301",
                "city": "Noida"
            })
        );
    }

    #[test]
    fn test_from_parts() {
        let sink = RemoteSink::from_parts(&config(Some("https://db.example.com/")), Some("key")).unwrap();
        assert_eq!(sink.endpoint(), "https://db.example.com/rest/v1/voters");
        assert_eq!(sink.batch_size(), 2);
    }

    #[test]
    fn test_not_configured() {
        assert!(matches!(
            RemoteSink::from_parts(&config(None), Some("key")),
            Err(SinkError::NotConfigured(_))
        ));
        assert!(matches!(
            RemoteSink::from_parts(&config(Some("https://db.example.com")), None),
            Err(SinkError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_zero_batch_size() {
        let sink = RemoteSink::new("https://db.example.com", "voters", "key")
            .unwrap()
            .with_batch_size(0);
        assert_eq!(sink.batch_size(), 1);
    }

    #[tokio::test]
    async fn test_empty_upload_sends_nothing() {
        let sink = RemoteSink::new("http://127.0.0.1:9", "voters", "key").unwrap();
        let report = sink.upload(&[]).await;

        assert_eq!(report, UploadReport::default());
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_failed_batches_do_not_stop_upload() {
        // nothing listens on the discard port, so every request fails
        let sink = RemoteSink::new("http://127.0.0.1:9", "voters", "key")
            .unwrap()
            .with_batch_size(1);
        let records: Vec<Record> = ["ASHA", "RAVI", "MEENA"]
            .iter()
            .enumerate()
            .map(|(i, name)| Record {
                id: format!("{:06}", i + 1),
                person: Person::new(name, "", "Saket", &Gazetteer::default()).unwrap(),
            })
            .collect();

        let report = sink.upload(&records).await;

        assert_eq!(report.batches, 3);
        assert_eq!(report.uploaded, 0);
        let failed: Vec<usize> = report.failed_batches.iter().map(|(i, _)| *i).collect();
        assert_eq!(failed, vec![0, 1, 2]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_content_range() {
        assert_eq!(parse_content_range_total("0-499/1234"), Some(1234));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
    }
}
