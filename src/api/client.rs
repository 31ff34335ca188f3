//! Endpoint client for the restaurant backend.

use super::transport::{AuthTokenProvider, HttpRequest, HttpResponse, HttpTransport, Method};
use crate::domain::{MenuhubError, Restaurant, Result, SearchResponse};
use crate::form::TransferPayload;
use crate::observability::{traceparent, TRACEPARENT_HEADER};
use crate::query::SearchRequest;
use serde::de::DeserializeOwned;
use url::Url;

/// Path of the caller's own restaurant resource.
pub const MY_RESTAURANT_PATH: [&str; 3] = ["api", "my", "restaurant"];

/// Longest response excerpt carried in a transport error.
const ERROR_BODY_EXCERPT: usize = 200;

/// Whether a submit creates the caller's restaurant or replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

impl SubmitMode {
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Create => Method::Post,
            Self::Update => Method::Put,
        }
    }
}

/// Typed access to the search and "my restaurant" endpoints.
///
/// Search is anonymous; the "my restaurant" calls carry `Authorization: Bearer`.
/// Every request carries a `traceparent` header when an OpenTelemetry span is active.
#[derive(Debug, Clone)]
pub struct RestaurantApi<A, T> {
    base_url: Url,
    auth: A,
    transport: T,
}

impl<A, T> RestaurantApi<A, T>
where
    A: AuthTokenProvider,
    T: HttpTransport,
{
    pub fn new(base_url: Url, auth: A, transport: T) -> Self {
        Self {
            base_url,
            auth,
            transport,
        }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `request`, with the locality percent-encoded as one segment.
    ///
    /// # Errors
    ///
    /// Returns [`MenuhubError::Config`] if the base URL cannot carry a path.
    pub fn search_url(&self, request: &SearchRequest) -> Result<Url> {
        let mut url = self.endpoint(request.path_segments())?;
        url.set_query(Some(&request.query_string()));
        Ok(url)
    }

    /// Runs one restaurant search.
    ///
    /// # Errors
    ///
    /// [`MenuhubError::Transport`] on a failed exchange or non-2xx status,
    /// [`MenuhubError::Decode`] on an unreadable body.
    #[tracing::instrument(level = "debug", skip_all, fields(locality = request.locality()))]
    pub async fn search_restaurants(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = self.search_url(request)?;
        let response = self.execute(HttpRequest::new(Method::Get, url)).await?;
        let response = ensure_success(response, "search restaurants")?;
        let results: SearchResponse = decode_body(&response)?;

        tracing::debug!(
            results = results.data.len(),
            total = results.pagination.total,
            "search completed"
        );
        Ok(results)
    }

    /// Fetches the caller's restaurant, or `None` if they have not created one.
    ///
    /// # Errors
    ///
    /// [`MenuhubError::Auth`] without a token; otherwise as for
    /// [`Self::search_restaurants`].
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn get_my_restaurant(&self) -> Result<Option<Restaurant>> {
        let request = self.authorized(Method::Get).await?;
        let response = self.execute(request).await?;

        if response.status == 404 {
            tracing::debug!("caller has no restaurant yet");
            return Ok(None);
        }

        let response = ensure_success(response, "get restaurant")?;
        decode_body(&response).map(Some)
    }

    /// Creates the caller's restaurant from an encoded form.
    ///
    /// # Errors
    ///
    /// As for [`Self::get_my_restaurant`].
    pub async fn create_my_restaurant(&self, payload: TransferPayload) -> Result<Restaurant> {
        self.submit(SubmitMode::Create, payload).await
    }

    /// Replaces the caller's restaurant with an encoded form.
    ///
    /// # Errors
    ///
    /// As for [`Self::get_my_restaurant`].
    pub async fn update_my_restaurant(&self, payload: TransferPayload) -> Result<Restaurant> {
        self.submit(SubmitMode::Update, payload).await
    }

    /// Sends an encoded form with the method `mode` selects.
    ///
    /// # Errors
    ///
    /// As for [`Self::get_my_restaurant`].
    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?mode, field_count = payload.len()))]
    pub async fn submit(&self, mode: SubmitMode, payload: TransferPayload) -> Result<Restaurant> {
        let request = self.authorized(mode.method()).await?.with_multipart(payload);
        let response = self.execute(request).await?;
        let what = match mode {
            SubmitMode::Create => "create restaurant",
            SubmitMode::Update => "update restaurant",
        };
        let response = ensure_success(response, what)?;
        decode_body(&response)
    }

    async fn authorized(&self, method: Method) -> Result<HttpRequest> {
        let token = self.auth.get_auth_token().await?;
        let url = self.endpoint(MY_RESTAURANT_PATH)?;
        Ok(HttpRequest::new(method, url).with_header("Authorization", token.bearer()))
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let request = match traceparent() {
            Some(value) => request.with_header(TRACEPARENT_HEADER, value),
            None => request,
        };

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "response received");
        Ok(response)
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MenuhubError::Config(format!("base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn ensure_success(response: HttpResponse, what: &str) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    if response.status == 404 {
        return Err(MenuhubError::NotFound(format!("nothing to {what}")));
    }

    let text = response.text();
    let excerpt: String = text.trim().chars().take(ERROR_BODY_EXCERPT).collect();
    tracing::warn!(status = response.status, what, "request failed");

    let message = if excerpt.is_empty() {
        format!("failed to {what}")
    } else {
        format!("failed to {what}: {excerpt}")
    };
    Err(MenuhubError::transport(Some(response.status), message))
}

fn decode_body<D: DeserializeOwned>(response: &HttpResponse) -> Result<D> {
    serde_json::from_slice(&response.body).map_err(|e| MenuhubError::Decode(e.to_string()))
}
