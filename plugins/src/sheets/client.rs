use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use taskcast_core::api::{RowSource, SheetsServiceConfig};

use crate::http::{parse_json_response, ServiceHttpError};

const SERVICE: &str = "sheets";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn cell_text(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Reads cell values through the Sheets v4 `values.get` endpoint.
#[derive(Clone)]
pub struct SheetsClient {
    base_url: String,
    api_key: String,
    access_token: String,
    http: reqwest::Client,
}

impl SheetsClient {
    pub fn new(cfg: &SheetsServiceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.trim().to_string(),
            access_token: cfg.access_token.trim().to_string(),
            http,
        })
    }

    fn values_url(&self, sheet_id: &str, range: &str) -> Result<Url, ServiceHttpError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ServiceHttpError::url_error(SERVICE, &self.base_url, e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ServiceHttpError::url_error(SERVICE, &self.base_url, "base url cannot take a path"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", sheet_id, "values", range]);
        Ok(url)
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if !self.access_token.is_empty() {
            req.bearer_auth(&self.access_token)
        } else if !self.api_key.is_empty() {
            req.query(&[("key", self.api_key.as_str())])
        } else {
            req
        }
    }

    pub async fn get_values(&self, sheet_id: &str, range: &str) -> anyhow::Result<Vec<Vec<String>>> {
        let url = self.values_url(sheet_id, range)?;
        tracing::debug!(
            target: "taskcast.sheets",
            stage = "sheets.http.values.in",
            sheet_id = %sheet_id,
            range = %range
        );
        let req = self.http.get(url.clone());
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ServiceHttpError::from_reqwest(SERVICE, err, url.to_string()))?;
        let status = resp.status();
        let body: ValueRange = parse_json_response(SERVICE, resp).await?;
        let rows: Vec<Vec<String>> = body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        tracing::debug!(
            target: "taskcast.sheets",
            stage = "sheets.http.values.out",
            status = %status,
            range = body.range.as_deref().unwrap_or(range),
            rows = rows.len()
        );
        Ok(rows)
    }
}

#[async_trait]
impl RowSource for SheetsClient {
    fn name(&self) -> &str {
        "google_sheets"
    }

    async fn fetch_rows(&self, sheet_id: &str, range: &str) -> anyhow::Result<Vec<Vec<String>>> {
        self.get_values(sheet_id, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ServiceHttpErrorKind;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;

    fn client(base_url: String, api_key: &str, access_token: &str) -> SheetsClient {
        SheetsClient::new(&SheetsServiceConfig {
            base_url,
            api_key: api_key.to_string(),
            access_token: access_token.to_string(),
            timeout_ms: 1_000,
        })
        .unwrap()
    }

    #[test]
    fn values_url_keeps_range_readable() {
        let c = client("https://sheets.googleapis.com/".into(), "", "");
        let url = c.values_url("abc", "Hoja1!A2:N").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/Hoja1!A2:N"
        );
    }

    #[tokio::test]
    async fn test_get_values_with_api_key() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/v4/spreadsheets/sheet-1/values/Hoja1!A2:E")
            .match_query(Matcher::UrlEncoded("key".into(), "k-123".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"range":"Hoja1!A2:E","majorDimension":"ROWS","values":[["TS task1","","Ana","01/01/2020","no realizado"],["solo",3,true,null]]}"#,
            )
            .create_async()
            .await;

        let c = client(server.url(), "k-123", "");
        let rows = c.fetch_rows("sheet-1", "Hoja1!A2:E").await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["TS task1", "", "Ana", "01/01/2020", "no realizado"],
                vec!["solo", "3", "true", ""],
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_range_has_no_values_key() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/v4/spreadsheets/s/values/A1:B")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"range":"A1:B","majorDimension":"ROWS"}"#)
            .create_async()
            .await;

        let c = client(server.url(), "ignored", "tok");
        let rows = c.get_values("s", "A1:B").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_status_error_is_typed() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/v4/spreadsheets/s/values/A1:B")
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"The caller does not have permission"}}"#)
            .create_async()
            .await;

        let c = client(server.url(), "", "");
        let err = c.get_values("s", "A1:B").await.unwrap_err();
        let http = err.downcast_ref::<ServiceHttpError>().unwrap();
        assert_eq!(http.kind(), ServiceHttpErrorKind::Status);
        assert_eq!(http.status(), Some(403));
        assert!(err.to_string().contains("does not have permission"));
    }
}
