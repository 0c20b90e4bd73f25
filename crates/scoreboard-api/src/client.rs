// Players REST API HTTP client
//
// Wraps `reqwest::Client` with base-URL normalization, JSON bodies, and
// status classification. The backend answers a PUT/DELETE on a missing row
// with an empty 200 body, so record endpoints treat an empty or `null`
// body as "not found" rather than a decode failure.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{HealthStatus, NewPlayer, PlayerRecord, PointsUpdate};
use crate::transport::TransportConfig;

/// Error body shapes the backend (or a proxy in front of it) may emit.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Async client for the players REST API.
///
/// All paths are resolved against a normalized base URL ending in `/`, so
/// `http://host:3001`, `http://host:3001/` and `http://host:3001/api` all
/// address the same endpoints.
pub struct PlayerClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl PlayerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` from a `TransportConfig`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// `timeout` is only used to label [`Error::Timeout`]; the client's own
    /// timeout settings are left as configured.
    pub fn with_client(
        base_url: &str,
        http: reqwest::Client,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// Strip a trailing `/api` segment and guarantee a trailing slash.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/');
        let path = path.strip_suffix("/api").unwrap_or(path).to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/players` -- every player, in the order the backend returns.
    pub async fn list_players(&self) -> Result<Vec<PlayerRecord>, Error> {
        let url = self.url("api/players")?;
        debug!("GET {url}");

        let resp = self.send(self.http.get(url)).await?;
        self.handle_response(resp).await
    }

    /// `POST /api/players` -- create a player with zero points.
    pub async fn create_player(&self, name: &str) -> Result<PlayerRecord, Error> {
        let url = self.url("api/players")?;
        debug!("POST {url}");

        let body = NewPlayer { name, points: 0 };
        let resp = self.send(self.http.post(url).json(&body)).await?;
        self.handle_response(resp).await
    }

    /// `PUT /api/players/{id}` -- overwrite a player's point total.
    pub async fn update_points(&self, id: i64, points: i64) -> Result<PlayerRecord, Error> {
        let url = self.url(&format!("api/players/{id}"))?;
        debug!("PUT {url} points={points}");

        let resp = self
            .send(self.http.put(url).json(&PointsUpdate { points }))
            .await?;
        self.handle_record(resp, id).await
    }

    /// `DELETE /api/players/{id}` -- remove a player, returning the removed row.
    pub async fn delete_player(&self, id: i64) -> Result<PlayerRecord, Error> {
        let url = self.url(&format!("api/players/{id}"))?;
        debug!("DELETE {url}");

        let resp = self.send(self.http.delete(url)).await?;
        self.handle_record(resp, id).await
    }

    /// `GET /health` -- liveness probe.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        let url = self.url("health")?;
        debug!("GET {url}");

        let resp = self.send(self.http.get(url)).await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        builder.send().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout: self.timeout,
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn read_body(&self, resp: reqwest::Response) -> Result<String, Error> {
        resp.text().await.map_err(|e| self.transport_error(e))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        let body = self.read_body(resp).await?;
        decode(body)
    }

    /// Like [`handle_response`](Self::handle_response), but a 404 or an
    /// empty / `null` success body means the player does not exist.
    async fn handle_record(&self, resp: reqwest::Response, id: i64) -> Result<PlayerRecord, Error> {
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id });
        }
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = self.read_body(resp).await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            trace!(id, "empty record body");
            return Err(Error::NotFound { id });
        }
        decode(body)
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.error.or(e.message))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    preview(&raw)
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
