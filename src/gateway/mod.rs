//! Remote data gateway.
//!
//! The worker talks to the API only through the two traits below, so the
//! controller can be driven against scripted gateways in tests.
//!
//! - `transport`: bearer attachment, 401 recovery, request execution
//! - `http`: the restaurant listing and auth endpoints

pub mod http;
pub mod transport;

use crate::domain::error::Result;
use crate::domain::{AuthResponse, LoginData, RegisterData, RestaurantPage};
use futures_util::future::BoxFuture;

pub use http::HttpGateway;
pub use transport::{ApiRequest, HttpExecutor, HttpTransport, RawResponse, ReqwestExecutor};

/// Paged access to the restaurant listing.
pub trait RestaurantGateway: Send + Sync {
    /// Fetches one page. `page` starts at 1; an empty `search` means unfiltered.
    fn fetch_page(&self, page: u32, search: String) -> BoxFuture<'_, Result<RestaurantPage>>;
}

/// Login and registration. Successful calls persist the session.
pub trait AuthGateway: Send + Sync {
    fn login(&self, data: LoginData) -> BoxFuture<'_, Result<AuthResponse>>;
    fn register(&self, data: RegisterData) -> BoxFuture<'_, Result<AuthResponse>>;
}
