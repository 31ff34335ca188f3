//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use menuhub::api::{AuthToken, AuthTokenProvider, HttpRequest, HttpResponse, HttpTransport, RestaurantApi};
use menuhub::{MenuhubError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url::Url;

/// Transport that replays scripted responses and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, error: MenuhubError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(MenuhubError::transport(None, "no scripted response")))
    }
}

pub struct FixedAuth(pub Option<&'static str>);

#[async_trait]
impl AuthTokenProvider for FixedAuth {
    async fn get_auth_token(&self) -> Result<AuthToken> {
        self.0
            .map(AuthToken::new)
            .ok_or_else(|| MenuhubError::Auth("signed out".into()))
    }
}

pub fn api(auth: Option<&'static str>) -> (RestaurantApi<FixedAuth, ScriptedTransport>, ScriptedTransport) {
    let transport = ScriptedTransport::default();
    let api = RestaurantApi::new(
        Url::parse("https://api.example.com").unwrap(),
        FixedAuth(auth),
        transport.clone(),
    );
    (api, transport)
}

pub const TACO_JSON: &str = r#"{
    "_id": "r1",
    "restaurantName": "Casa Taco",
    "city": "Austin",
    "country": "USA",
    "deliveryPrice": 299,
    "estimatedDeliveryTime": 30,
    "cuisines": ["Mexican", "Tacos"],
    "menuItems": [
        {"_id": "m1", "name": "Taco", "price": 399},
        {"_id": "m2", "name": "Burrito", "price": 1050}
    ],
    "imageUrl": "https://img.example/taco.png",
    "lastUpdated": "2024-05-01T12:00:00Z"
}"#;

pub fn search_json(total: u64) -> String {
    format!(
        r#"{{"data": [{TACO_JSON}], "pagination": {{"page": 1, "pages": 1, "total": {total}}}}}"#
    )
}
