use super::request::{ApiEvent, ApiRequest, Dispatch, Part, Payload, Reply};
use super::ApiError;
use crate::model::{EntityKind, Record};
use reqwest::multipart::{Form, Part as FormPart};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client for the cinema backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for `base_url`. A trailing slash is added when missing
    /// so that resource paths join under it rather than replacing its last
    /// segment.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let mut builder = Client::builder().user_agent(concat!("cinedk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/{path}/`; non-ASCII path segments are percent-encoded.
    pub fn collection_url(&self, kind: EntityKind) -> Result<Url, ApiError> {
        self.join(&format!("{}/", kind.path()))
    }

    /// `{base}/{path}/{id}/`
    pub fn item_url(&self, kind: EntityKind, id: i64) -> Result<Url, ApiError> {
        self.join(&format!("{}/{}/", kind.path(), id))
    }

    fn join(&self, relative: &str) -> Result<Url, ApiError> {
        self.base.join(relative).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base, relative),
            reason: e.to_string(),
        })
    }

    /// Fetch a collection without decoding it.
    pub async fn list_raw(&self, kind: EntityKind) -> Result<Vec<u8>, ApiError> {
        let url = self.collection_url(kind)?;
        let response = self.send(Method::GET, url, None).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, ApiError> {
        let body = self.list_raw(kind).await?;
        let records = Record::decode_list(kind, &body)?;
        debug!("Decoded {} {} record(s)", records.len(), kind);
        Ok(records)
    }

    pub async fn create(&self, kind: EntityKind, payload: &Payload) -> Result<(), ApiError> {
        let url = self.collection_url(kind)?;
        self.send(Method::POST, url, Some(payload)).await?;
        Ok(())
    }

    pub async fn update(&self, kind: EntityKind, id: i64, payload: &Payload) -> Result<(), ApiError> {
        let url = self.item_url(kind, id)?;
        self.send(Method::PUT, url, Some(payload)).await?;
        Ok(())
    }

    pub async fn delete(&self, kind: EntityKind, id: i64) -> Result<(), ApiError> {
        let url = self.item_url(kind, id)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Run one request to completion.
    pub async fn execute(&self, request: ApiRequest) -> Result<Reply, ApiError> {
        match request {
            ApiRequest::List { kind } => self.list(kind).await.map(Reply::Records),
            ApiRequest::Create { kind, payload } => {
                self.create(kind, &payload).await.map(|()| Reply::Saved)
            }
            ApiRequest::Update { kind, id, payload } => {
                self.update(kind, id, &payload).await.map(|()| Reply::Saved)
            }
            ApiRequest::Delete { kind, id } => self.delete(kind, id).await.map(|()| Reply::Deleted),
        }
    }

    /// Run a tagged request and wrap its outcome for the UI thread.
    pub async fn dispatch(&self, dispatch: Dispatch) -> ApiEvent {
        let Dispatch { generation, request } = dispatch;
        let operation = request.operation();
        debug!("{} {:?} started", generation, operation);
        let result = self.execute(request).await;
        ApiEvent {
            generation,
            operation,
            result,
        }
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        payload: Option<&Payload>,
    ) -> Result<Response, ApiError> {
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(payload) = payload {
            request = attach(request, payload).await?;
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {}", method, url, e);
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        info!("{} {} -> {}", method, url, status.as_u16());

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("{} {}: could not read error body: {}", method, url, e);
                    String::new()
                }
            };
            warn!("{} {} rejected: {}", method, url, body);
            return Err(ApiError::status(status, &body));
        }
        Ok(response)
    }
}

async fn attach(request: RequestBuilder, payload: &Payload) -> Result<RequestBuilder, ApiError> {
    match payload {
        Payload::Json(value) => Ok(request.json(value)),
        Payload::Multipart(parts) => {
            let mut form = Form::new();
            for part in parts {
                form = match part {
                    Part::Text { name, value } => form.text(name.clone(), value.clone()),
                    Part::File { name, path } => form.part(name.clone(), file_part(path).await?),
                };
            }
            Ok(request.multipart(form))
        }
    }
}

async fn file_part(path: &Path) -> Result<FormPart, ApiError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ApiError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let part = FormPart::bytes(bytes).file_name(file_name);
    Ok(part.mime_str(guess_mime(path))?)
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
