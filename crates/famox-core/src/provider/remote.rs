//! Remote provider: the same facade over the `famox-server` JSON API.
//!
//! A 404 on a lookup becomes `Ok(None)` and a 401 on login becomes
//! `Ok(false)`, matching the demo provider. Every other non-success answer is
//! a [`ProviderError::Remote`] carrying the server's message.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{ErrorBody, LoginRequest, SessionStatus};
use crate::error::ProviderError;
use crate::model::{
    CatalogueItem, Enquiry, EnquiryCreateInput, EnquiryPatch, MediaPost, Project, SiteSettings,
    SiteSettingsPatch, Solution,
};
use crate::provider::DataProvider;

/// [`DataProvider`] talking to a remote backend over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    http: Client,
    base_url: String,
}

impl RemoteProvider {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("famox-core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/v1/{path}", self.base_url);
        debug!(%method, %url, "remote provider request");
        self.http.request(method, url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ProviderError> {
        Ok(req.send().await?)
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ProviderError> {
        let resp = self.send(req).await?;
        decode(resp).await
    }

    async fn optional<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<Option<T>, ProviderError> {
        let resp = self.send(req).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(resp).await.map(Some)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        self.json(self.request(Method::GET, path)).await
    }

    async fn get_by_key<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<T>, ProviderError> {
        let path = format!("{collection}/{}", urlencoding::encode(key));
        self.optional(self.request(Method::GET, &path)).await
    }

    fn with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> RequestBuilder {
        self.request(method, path).json(body)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    Err(remote_error(status, resp).await)
}

async fn remote_error(status: StatusCode, resp: Response) -> ProviderError {
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.message)
        .unwrap_or(text);
    ProviderError::Remote {
        status: status.as_u16(),
        message,
    }
}

#[async_trait::async_trait]
impl DataProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn settings(&self) -> Result<SiteSettings, ProviderError> {
        self.get("settings").await
    }

    async fn update_settings(
        &self,
        patch: &SiteSettingsPatch,
    ) -> Result<SiteSettings, ProviderError> {
        patch.validate()?;
        self.json(self.with_body(Method::PATCH, "settings", patch)).await
    }

    async fn list_catalogue(&self) -> Result<Vec<CatalogueItem>, ProviderError> {
        self.get("catalogue").await
    }

    async fn catalogue_item(&self, slug: &str) -> Result<Option<CatalogueItem>, ProviderError> {
        self.get_by_key("catalogue", slug).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ProviderError> {
        self.get("projects").await
    }

    async fn project(&self, slug: &str) -> Result<Option<Project>, ProviderError> {
        self.get_by_key("projects", slug).await
    }

    async fn list_media(&self) -> Result<Vec<MediaPost>, ProviderError> {
        self.get("media").await
    }

    async fn media_post(&self, slug: &str) -> Result<Option<MediaPost>, ProviderError> {
        self.get_by_key("media", slug).await
    }

    async fn list_solutions(&self) -> Result<Vec<Solution>, ProviderError> {
        self.get("solutions").await
    }

    async fn solution(&self, slug: &str) -> Result<Option<Solution>, ProviderError> {
        self.get_by_key("solutions", slug).await
    }

    async fn list_enquiries(&self) -> Result<Vec<Enquiry>, ProviderError> {
        self.get("enquiries").await
    }

    async fn enquiry(&self, id: &str) -> Result<Option<Enquiry>, ProviderError> {
        self.get_by_key("enquiries", id).await
    }

    async fn create_enquiry(&self, input: EnquiryCreateInput) -> Result<Enquiry, ProviderError> {
        input.validate()?;
        self.json(self.with_body(Method::POST, "enquiries", &input)).await
    }

    async fn update_enquiry(
        &self,
        id: &str,
        patch: &EnquiryPatch,
    ) -> Result<Option<Enquiry>, ProviderError> {
        patch.validate()?;
        let path = format!("enquiries/{}", urlencoding::encode(id));
        self.optional(self.with_body(Method::PATCH, &path, patch)).await
    }

    async fn is_admin_authed(&self) -> Result<bool, ProviderError> {
        let session: SessionStatus = self.get("admin/session").await?;
        Ok(session.authed)
    }

    async fn admin_login(&self, password: &str) -> Result<bool, ProviderError> {
        let body = LoginRequest {
            password: password.to_owned(),
        };
        let resp = self
            .send(self.with_body(Method::POST, "admin/login", &body))
            .await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Ok(false);
        }
        let session: SessionStatus = decode(resp).await?;
        Ok(session.authed)
    }

    async fn admin_logout(&self) -> Result<(), ProviderError> {
        let resp = self
            .send(self.request(Method::POST, "admin/logout"))
            .await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(remote_error(status, resp).await)
    }

    async fn close(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
