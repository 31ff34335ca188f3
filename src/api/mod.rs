//! Backend access.
//!
//! - [`transport`]: the [`AuthTokenProvider`] and [`HttpTransport`] seams and their
//!   request/response types
//! - [`client`]: [`RestaurantApi`], the typed endpoint client
//! - [`http`]: [`ReqwestTransport`], the production transport

pub mod client;
pub mod http;
pub mod transport;

pub use client::{RestaurantApi, SubmitMode, MY_RESTAURANT_PATH};
pub use http::ReqwestTransport;
pub use transport::{
    AuthToken, AuthTokenProvider, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody,
    StaticTokenProvider,
};
