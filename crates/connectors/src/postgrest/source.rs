use crate::{
    error::ConnectorError,
    postgrest::{SINGLE_OBJECT, SINGLE_ROW_MISMATCH, config::PostgrestConfig},
    requests::{FetchOneRequest, InsertRequest, UpdateRequest, describe_filters},
    source::ProfileSource,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url, header::ACCEPT};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Asks PostgREST not to echo written rows back.
const RETURN_MINIMAL: &str = "return=minimal";

/// Reads and writes rows through a PostgREST (or Supabase) REST endpoint.
pub struct PostgrestSource {
    client: reqwest::Client,
    config: PostgrestConfig,
    base_url: Url,
}

/// Error payload returned by PostgREST on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl PostgrestSource {
    pub fn new(config: PostgrestConfig) -> Result<Self, ConnectorError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            ConnectorError::InvalidConfig(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;
        if config.api_key.is_empty() {
            return Err(ConnectorError::InvalidConfig("API key is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, ConnectorError> {
        let url = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), table);
        Url::parse(&url)
            .map_err(|e| ConnectorError::InvalidConfig(format!("Invalid table URL '{url}': {e}")))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.config.bearer())
    }

    async fn read_error(response: Response) -> Result<(StatusCode, PostgrestErrorBody), ConnectorError> {
        let status = response.status();
        let body = response.text().await?;
        let error = serde_json::from_str::<PostgrestErrorBody>(&body).unwrap_or_else(|_| {
            PostgrestErrorBody {
                code: status.as_u16().to_string(),
                message: body.clone(),
            }
        });
        Ok((status, error))
    }

    fn backend_error(status: StatusCode, error: PostgrestErrorBody, context: String) -> ConnectorError {
        warn!(
            "PostgREST returned {}: {}: {} - {}",
            status, context, error.code, error.message
        );
        ConnectorError::Backend {
            status: status.as_u16(),
            code: error.code,
            message: error.message,
            context,
        }
    }

    /// Succeeds on any 2xx, otherwise reports the backend error under `context`.
    async fn expect_success(response: Response, context: String) -> Result<(), ConnectorError> {
        if response.status().is_success() {
            return Ok(());
        }
        let (status, error) = Self::read_error(response).await?;
        Err(Self::backend_error(status, error, context))
    }
}

#[async_trait]
impl ProfileSource for PostgrestSource {
    async fn fetch_one(&self, request: &FetchOneRequest) -> Result<Option<Value>, ConnectorError> {
        let url = self.table_url(&request.table)?;
        let filters = describe_filters(&request.filters);

        debug!(
            "Fetching one row from '{}' where {} with select '{}'",
            request.table, filters, request.select
        );

        let mut query = vec![("select".to_string(), request.select.clone())];
        query.extend(
            request
                .filters
                .iter()
                .map(|(column, value)| (column.clone(), format!("eq.{value}"))),
        );

        let response = self
            .authorize(self.client.get(url))
            .query(&query)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        if response.status().is_success() {
            let record = response.json::<Value>().await?;
            return Ok(Some(record));
        }

        let (status, error) = Self::read_error(response).await?;
        if status == StatusCode::NOT_ACCEPTABLE && error.code == SINGLE_ROW_MISMATCH {
            debug!("No row in '{}' where {}", request.table, filters);
            return Ok(None);
        }

        Err(Self::backend_error(
            status,
            error,
            format!("Failed to fetch from '{}'", request.table),
        ))
    }

    async fn insert(&self, request: &InsertRequest) -> Result<(), ConnectorError> {
        let url = self.table_url(&request.table)?;
        debug!("Inserting one row into '{}'", request.table);

        let response = self
            .authorize(self.client.post(url))
            .header("Prefer", RETURN_MINIMAL)
            .json(&request.row)
            .send()
            .await?;

        Self::expect_success(response, format!("Failed to insert into '{}'", request.table)).await
    }

    async fn update(&self, request: &UpdateRequest) -> Result<(), ConnectorError> {
        let url = self.table_url(&request.table)?;
        debug!(
            "Updating '{}' where {} = '{}'",
            request.table, request.key_column, request.key
        );

        let response = self
            .authorize(self.client.patch(url))
            .query(&[(request.key_column.as_str(), format!("eq.{}", request.key))])
            .header("Prefer", RETURN_MINIMAL)
            .json(&request.changes)
            .send()
            .await?;

        Self::expect_success(response, format!("Failed to update '{}'", request.table)).await
    }

    fn name(&self) -> String {
        format!("PostgREST at {}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;
    use std::time::Duration;

    fn request() -> FetchOneRequest {
        FetchOneRequest::new("athletes", "id", "a1").select("federation_id,division(*)")
    }

    #[tokio::test]
    async fn test_fetch_one_returns_record() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/athletes")
                    .query_param("select", "federation_id,division(*)")
                    .query_param("id", "eq.a1")
                    .header("apikey", "anon")
                    .header("authorization", "Bearer user-jwt")
                    .header("accept", SINGLE_OBJECT);
                then.status(200).json_body(json!({
                    "federation_id": "f1",
                    "division": { "id": "d1", "name": "Open" }
                }));
            })
            .await;

        let source = PostgrestSource::new(
            PostgrestConfig::new(server.base_url(), "anon").with_access_token("user-jwt"),
        )
        .unwrap();
        let record = source.fetch_one(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            record,
            Some(json!({
                "federation_id": "f1",
                "division": { "id": "d1", "name": "Open" }
            }))
        );
    }

    #[tokio::test]
    async fn test_zero_rows_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/athletes");
                then.status(406).json_body(json!({
                    "code": "PGRST116",
                    "details": "The result contains 0 rows",
                    "hint": null,
                    "message": "JSON object requested, multiple (or no) rows returned"
                }));
            })
            .await;

        let source = PostgrestSource::new(PostgrestConfig::new(server.base_url(), "anon")).unwrap();

        assert_eq!(source.fetch_one(&request()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_backend_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/athletes");
                then.status(400).json_body(json!({
                    "code": "42703",
                    "details": null,
                    "hint": null,
                    "message": "column athletes.horse does not exist"
                }));
            })
            .await;

        let source = PostgrestSource::new(PostgrestConfig::new(server.base_url(), "anon")).unwrap();
        let err = source.fetch_one(&request()).await.unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Failed to fetch from 'athletes': 42703 - column athletes.horse does not exist"
        );
    }

    #[tokio::test]
    async fn test_non_json_error_body_keeps_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/athletes");
                then.status(503).body("upstream unavailable");
            })
            .await;

        let source = PostgrestSource::new(PostgrestConfig::new(server.base_url(), "anon")).unwrap();
        let err = source.fetch_one(&request()).await.unwrap_err();

        assert!(!err.is_client_error());
        assert!(matches!(
            err,
            ConnectorError::Backend { status: 503, ref code, .. } if code == "503"
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/athletes");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({}));
            })
            .await;

        let source = PostgrestSource::new(
            PostgrestConfig::new(server.base_url(), "anon").with_timeout(Duration::from_millis(50)),
        )
        .unwrap();
        let err = source.fetch_one(&request()).await.unwrap_err();

        assert!(matches!(err, ConnectorError::Http(ref e) if e.is_timeout()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            PostgrestSource::new(PostgrestConfig::new("not a url", "anon")),
            Err(ConnectorError::InvalidConfig(_))
        ));
        assert!(matches!(
            PostgrestSource::new(PostgrestConfig::new("http://localhost:3000", "")),
            Err(ConnectorError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_one_sends_every_filter() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/divisions")
                    .query_param("select", "id")
                    .query_param("id", "eq.d1")
                    .query_param("federation_id", "eq.f1");
                then.status(200).json_body(json!({ "id": "d1" }));
            })
            .await;

        let source = PostgrestSource::new(PostgrestConfig::new(server.base_url(), "anon")).unwrap();
        let request = FetchOneRequest::new("divisions", "id", "d1")
            .and_eq("federation_id", "f1")
            .select("id");

        assert_eq!(
            source.fetch_one(&request).await.unwrap(),
            Some(json!({ "id": "d1" }))
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insert_posts_row() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/athletes")
                    .header("apikey", "anon")
                    .header("prefer", "return=minimal")
                    .json_body(json!({ "id": "u1", "federation_id": "f1" }));
                then.status(201);
            })
            .await;

        let source = PostgrestSource::new(PostgrestConfig::new(server.base_url(), "anon")).unwrap();
        source
            .insert(&InsertRequest::new(
                "athletes",
                json!({ "id": "u1", "federation_id": "f1" }),
            ))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insert_conflict_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/athletes");
                then.status(409).json_body(json!({
                    "code": "23505",
                    "message": "duplicate key value violates unique constraint \"athletes_pkey\""
                }));
            })
            .await;

        let source = PostgrestSource::new(PostgrestConfig::new(server.base_url(), "anon")).unwrap();
        let err = source
            .insert(&InsertRequest::new("athletes", json!({ "id": "u1" })))
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(
            err.to_string()
                .starts_with("Failed to insert into 'athletes': 23505 - duplicate key")
        );
    }

    #[tokio::test]
    async fn test_update_patches_keyed_row() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/users")
                    .query_param("id", "eq.u1")
                    .header("authorization", "Bearer anon")
                    .json_body(json!({ "username": "jdoe2" }));
                then.status(204);
            })
            .await;

        let source = PostgrestSource::new(PostgrestConfig::new(server.base_url(), "anon")).unwrap();
        source
            .update(&UpdateRequest::new(
                "users",
                "id",
                "u1",
                json!({ "username": "jdoe2" }),
            ))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
