//! Restaurant and auth endpoints over [`HttpTransport`].

use crate::auth::Session;
use crate::domain::error::Result;
use crate::domain::{AuthResponse, LoginData, RegisterData, RestaurantPage};
use crate::gateway::transport::{ApiRequest, HttpTransport, LOGIN_PATH, REGISTER_PATH};
use crate::gateway::{AuthGateway, RestaurantGateway};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tracing::Instrument;

pub const SAMPLE_PATH: &str = "/restaurants/sample";

/// Builds the listing request. Page 1 and an empty search are left off the query.
#[must_use]
pub fn page_request(page: u32, search: &str) -> ApiRequest {
    let mut request = ApiRequest::get(SAMPLE_PATH);
    if page > 1 {
        request = request.with_query("page", page.to_string());
    }
    if !search.is_empty() {
        request = request.with_query("search", search);
    }
    request
}

#[derive(Clone)]
pub struct HttpGateway {
    transport: HttpTransport,
}

impl HttpGateway {
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    fn session(&self) -> &Session {
        self.transport.session()
    }

    async fn authenticate(&self, request: ApiRequest, password: &str) -> Result<AuthResponse> {
        let auth: AuthResponse = self.transport.send_unauthenticated(request).await?.json()?;
        self.session().save_auth(&auth)?;
        self.session().save_password(password)?;
        Ok(auth)
    }
}

impl RestaurantGateway for HttpGateway {
    fn fetch_page(&self, page: u32, search: String) -> BoxFuture<'_, Result<RestaurantPage>> {
        let span = tracing::debug_span!("fetch_page", page, search = %search);
        async move {
            let result = self.transport.get_json(page_request(page, &search)).await;
            if let Err(e) = &result {
                tracing::debug!(error = %e, page, "fetch_page failed");
            }
            result
        }
        .instrument(span)
        .boxed()
    }
}

impl AuthGateway for HttpGateway {
    fn login(&self, data: LoginData) -> BoxFuture<'_, Result<AuthResponse>> {
        async move {
            let body = serde_json::to_value(&data)?;
            self.authenticate(ApiRequest::post(LOGIN_PATH, body), &data.password)
                .await
        }
        .boxed()
    }

    fn register(&self, data: RegisterData) -> BoxFuture<'_, Result<AuthResponse>> {
        async move {
            let body = serde_json::to_value(&data)?;
            self.authenticate(ApiRequest::post(REGISTER_PATH, body), &data.password)
                .await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DineError;
    use crate::gateway::transport::testing::ScriptedExecutor;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn gateway(executor: &Arc<ScriptedExecutor>) -> (HttpGateway, Session) {
        let session = Session::new(MemoryStore::new());
        let transport = HttpTransport::new("http://api.test/api", session.clone(), executor.clone());
        (HttpGateway::new(transport), session)
    }

    #[test]
    fn page_query_omits_defaults() {
        assert!(page_request(1, "").query.is_empty());
        assert_eq!(
            page_request(2, "").query,
            vec![("page".to_string(), "2".to_string())]
        );
        assert_eq!(
            page_request(1, "sushi").query,
            vec![("search".to_string(), "sushi".to_string())]
        );
    }

    #[tokio::test]
    async fn fetch_page_decodes_response() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.respond(
            200,
            r#"{"totalRestaurants":2,"totalPages":3,"currentPage":2,
                "restaurants":[{"id":"r3","name":"Three"}]}"#,
        );
        let (gw, _) = gateway(&executor);

        let page = gw.fetch_page(2, "th".to_string()).await.unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.restaurants[0].id, "r3");
        assert_eq!(
            executor.requests()[0].url.query(),
            Some("page=2&search=th")
        );
    }

    #[tokio::test]
    async fn login_persists_tokens_and_password() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.respond(
            200,
            r#"{"message":"ok","user":{"email":"ana@example.com"},"token":"t","refreshToken":"r"}"#,
        );
        let (gw, session) = gateway(&executor);

        let auth = gw
            .login(LoginData {
                email: "ana@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .unwrap();
        assert_eq!(auth.token, "t");
        assert_eq!(session.token().unwrap().as_deref(), Some("t"));
        assert_eq!(session.credentials().unwrap().unwrap().password, "hunter22");
    }

    #[tokio::test]
    async fn rejected_register_is_not_reauthenticated() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.respond(401, r#"{"message":"Registration closed"}"#);
        let (gw, session) = gateway(&executor);

        let err = gw
            .register(RegisterData {
                email: "a@b.co".into(),
                password: "password1".into(),
                first_name: "A".into(),
                last_name: "B".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Registration closed"));
        assert!(matches!(err, DineError::Api { status: 401, .. }));
        assert_eq!(executor.requests().len(), 1);
        assert_eq!(session.token().unwrap(), None);
    }
}
