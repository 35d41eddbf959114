// HTTP gateway to the records service
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, SET_COOKIE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::types::{
    history_to_locations, ActionLogEntry, FolderContentDto, HistoryResponse, LogsResponse,
    Mutation, MutationAck, SearchResponse, StudentDetail, TrashEntry, TrashResponse,
};
use crate::api::ApiError;
use crate::model::{FolderContent, Location};

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Thin wrapper over the HTTP API. Session cookies live in the client's
/// jar; the CSRF token is captured from responses and echoed in a
/// header on every mutating request.
pub struct ApiClient {
    http: Client,
    base: Url,
    csrf: Option<String>,
}

impl ApiClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base,
            csrf: None,
        })
    }

    pub fn folder_content(&mut self, type_name: &str, id: i64) -> Result<FolderContent, ApiError> {
        let mut url = self.url("api/folder-content/")?;
        url.query_pairs_mut()
            .append_pair("type", type_name)
            .append_pair("id", &id.to_string());
        let dto: FolderContentDto = self.get(url)?;
        dto.into_content()
    }

    pub fn student(&mut self, id: i64) -> Result<StudentDetail, ApiError> {
        let url = self.url(&format!("api/student/{id}/"))?;
        self.get(url)
    }

    pub fn search(&mut self, query: &str) -> Result<SearchResponse, ApiError> {
        let mut url = self.url("api/search/")?;
        url.query_pairs_mut().append_pair("q", query);
        self.get(url)
    }

    pub fn navigation_history(&mut self) -> Result<Vec<Location>, ApiError> {
        let url = self.url("api/navigation-history/")?;
        let response: HistoryResponse = self.get(url)?;
        Ok(history_to_locations(response.history))
    }

    pub fn action_logs(&mut self) -> Result<Vec<ActionLogEntry>, ApiError> {
        let url = self.url("api/action-logs/")?;
        let response: LogsResponse = self.get(url)?;
        Ok(response.logs)
    }

    pub fn trash(&mut self) -> Result<Vec<TrashEntry>, ApiError> {
        let url = self.url("api/trash/")?;
        let response: TrashResponse = self.get(url)?;
        Ok(response.items)
    }

    /// Run a mutation; a 200 with `success:false` becomes `Rejected`
    /// carrying the server's message.
    pub fn mutate(&mut self, mutation: &Mutation) -> Result<MutationAck, ApiError> {
        let url = self.url(mutation.endpoint())?;
        let ack: MutationAck = self.post(url, &mutation.to_body())?;
        if ack.success {
            Ok(ack)
        } else {
            Err(ApiError::Rejected(ack.error.clone().unwrap_or_else(|| {
                "the server rejected the request".to_string()
            })))
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("bad url {path}: {e}")))
    }

    fn get<T: DeserializeOwned>(&mut self, url: Url) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;
        self.read_json(response)
    }

    fn post<T: DeserializeOwned>(&mut self, url: Url, body: &Value) -> Result<T, ApiError> {
        let mut request = self.http.post(url).json(body);
        if let Some(token) = &self.csrf {
            request = request.header(CSRF_HEADER, token.as_str());
        }
        let response = request.send()?;
        self.read_json(response)
    }

    fn read_json<T: DeserializeOwned>(&mut self, response: Response) -> Result<T, ApiError> {
        self.capture_csrf(&response);
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            // Error bodies usually still carry a JSON "error" field.
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request rejected")
                        .to_string()
                });
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn capture_csrf(&mut self, response: &Response) {
        for value in response.headers().get_all(SET_COOKIE) {
            if let Ok(raw) = value.to_str() {
                if let Some(token) = csrf_from_set_cookie(raw) {
                    self.csrf = Some(token);
                }
            }
        }
    }
}

/// Extract the CSRF token value from one Set-Cookie header line.
pub(crate) fn csrf_from_set_cookie(raw: &str) -> Option<String> {
    let (name, rest) = raw.split_once('=')?;
    if name.trim() != CSRF_COOKIE {
        return None;
    }
    let value = rest.split(';').next()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_cookie_parsing() {
        assert_eq!(
            csrf_from_set_cookie("csrftoken=abc123; Path=/; SameSite=Lax"),
            Some("abc123".to_string())
        );
        assert_eq!(csrf_from_set_cookie("csrftoken=xyz"), Some("xyz".to_string()));
        assert_eq!(csrf_from_set_cookie("sessionid=abc123; Path=/"), None);
        assert_eq!(csrf_from_set_cookie("csrftoken=; Path=/"), None);
        assert_eq!(csrf_from_set_cookie("no cookie here"), None);
    }
}
