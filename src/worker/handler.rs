//! Worker implementation for gateway and storage operations.
//!
//! Each [`WorkerMessage`] runs as its own tokio task so the event loop never
//! blocks on the network. Completions are sent back over an unbounded channel
//! and merged by the controller in arrival order.

use crate::auth::Session;
use crate::domain::error::{DineError, Result};
use crate::domain::{AuthResponse, LoginData, RegisterData};
use crate::gateway::{AuthGateway, RestaurantGateway};
use crate::storage::Preferences;
use crate::ui::theme::ThemeMode;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Executes worker messages against the gateways and stores.
///
/// Cloning is cheap; every clone shares the same gateways and stores.
#[derive(Clone)]
pub struct ExploreWorker {
    restaurants: Arc<dyn RestaurantGateway>,
    auth: Arc<dyn AuthGateway>,
    session: Session,
    preferences: Preferences,
}

impl ExploreWorker {
    pub fn new(
        restaurants: Arc<dyn RestaurantGateway>,
        auth: Arc<dyn AuthGateway>,
        session: Session,
        preferences: Preferences,
    ) -> Self {
        Self {
            restaurants,
            auth,
            session,
            preferences,
        }
    }

    /// Maps an operation result to a response with consistent logging.
    fn handle_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn probe_auth(&self) -> Result<Option<crate::domain::User>> {
        if !self.session.is_authenticated()? {
            return Ok(None);
        }
        self.session.user()
    }

    fn handle_probe_auth(&self) -> WorkerResponse {
        let user = self.probe_auth().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "auth probe failed, treating as signed out");
            None
        });
        tracing::debug!(signed_in = user.is_some(), "auth probed");
        WorkerResponse::AuthProbed { user }
    }

    async fn handle_fetch_page(&self, page: u32, search: String, generation: u64, reset: bool) -> WorkerResponse {
        match self.restaurants.fetch_page(page, search).await {
            Ok(loaded) => {
                tracing::debug!(
                    page = loaded.current_page,
                    total_pages = loaded.total_pages,
                    count = loaded.restaurants.len(),
                    "page loaded"
                );
                WorkerResponse::PageLoaded {
                    generation,
                    reset,
                    page: loaded,
                }
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "error fetching restaurants");
                WorkerResponse::PageFailed {
                    generation,
                    reset,
                    page,
                    message: e.to_string(),
                }
            }
        }
    }

    fn auth_outcome(result: Result<AuthResponse>) -> WorkerResponse {
        match result {
            Ok(auth) => WorkerResponse::LoggedIn { user: auth.user },
            Err(e) => {
                tracing::info!(error = %e, "authentication rejected");
                let message = match &e {
                    DineError::Api { message, .. } => message.clone(),
                    _ => None,
                };
                WorkerResponse::AuthFailed { message }
            }
        }
    }

    async fn handle_login(&self, data: LoginData) -> WorkerResponse {
        Self::auth_outcome(self.auth.login(data).await)
    }

    async fn handle_register(&self, data: RegisterData) -> WorkerResponse {
        Self::auth_outcome(self.auth.register(data).await)
    }

    /// Clears the stored session. The controller signs out locally even when
    /// the store cannot be cleared.
    fn handle_logout(&self) -> WorkerResponse {
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "failed to clear stored session");
        }
        WorkerResponse::LoggedOut
    }

    fn handle_load_theme(&self) -> WorkerResponse {
        Self::handle_result("load theme preference", self.preferences.theme(), |saved| {
            let mode = saved.as_deref().and_then(ThemeMode::parse);
            WorkerResponse::ThemeLoaded { mode }
        })
    }

    fn handle_save_theme(&self, mode: ThemeMode) -> WorkerResponse {
        Self::handle_result(
            "save theme preference",
            self.preferences.set_theme(mode.as_str()),
            |()| WorkerResponse::ThemeSaved,
        )
    }

    /// Processes a worker message and returns the response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());

        async move {
            match message {
                WorkerMessage::ProbeAuth => self.handle_probe_auth(),
                WorkerMessage::FetchPage {
                    page,
                    search,
                    generation,
                    reset,
                } => self.handle_fetch_page(page, search, generation, reset).await,
                WorkerMessage::Login(data) => self.handle_login(data).await,
                WorkerMessage::Register(data) => self.handle_register(data).await,
                WorkerMessage::Logout => self.handle_logout(),
                WorkerMessage::LoadThemePreference => self.handle_load_theme(),
                WorkerMessage::SaveThemePreference { mode } => self.handle_save_theme(mode),
            }
        }
        .instrument(span)
        .await
    }

    /// Runs `message` on a new task and posts the response to `responses`.
    pub fn dispatch(&self, message: WorkerMessage, responses: UnboundedSender<WorkerResponse>) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            if responses.send(response).is_err() {
                tracing::debug!("event loop gone, dropping worker response");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RestaurantPage, User};
    use crate::storage::{KeyValueStore, MemoryStore};
    use futures_util::future::BoxFuture;
    use futures_util::FutureExt;

    struct StubRestaurants;

    impl RestaurantGateway for StubRestaurants {
        fn fetch_page(&self, page: u32, search: String) -> BoxFuture<'_, Result<RestaurantPage>> {
            async move {
                if search == "boom" {
                    Err(DineError::Network("connection refused".into()))
                } else {
                    Ok(RestaurantPage::new(page, 3, Vec::new()))
                }
            }
            .boxed()
        }
    }

    struct StubAuth;

    impl AuthGateway for StubAuth {
        fn login(&self, data: LoginData) -> BoxFuture<'_, Result<AuthResponse>> {
            async move {
                if data.password == "right" {
                    Ok(AuthResponse {
                        message: String::new(),
                        user: User::new(data.email),
                        token: "t".into(),
                        refresh_token: "r".into(),
                    })
                } else {
                    Err(DineError::Api {
                        status: 401,
                        message: Some("Invalid credentials".into()),
                    })
                }
            }
            .boxed()
        }

        fn register(&self, _data: RegisterData) -> BoxFuture<'_, Result<AuthResponse>> {
            async { Err(DineError::Network("offline".into())) }.boxed()
        }
    }

    fn worker(session: Session) -> ExploreWorker {
        ExploreWorker::new(
            Arc::new(StubRestaurants),
            Arc::new(StubAuth),
            session,
            Preferences::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn probe_requires_token_and_user() {
        let session = Session::new(MemoryStore::with_entries([(
            "user",
            r#"{"email":"ana@example.com"}"#,
        )]));
        let w = worker(session);
        assert_eq!(
            w.handle_message(WorkerMessage::ProbeAuth).await,
            WorkerResponse::AuthProbed { user: None }
        );

        let session = Session::new(MemoryStore::with_entries([
            ("token", "t"),
            ("user", r#"{"email":"ana@example.com"}"#),
        ]));
        let w = worker(session);
        assert_eq!(
            w.handle_message(WorkerMessage::ProbeAuth).await,
            WorkerResponse::AuthProbed {
                user: Some(User::new("ana@example.com"))
            }
        );
    }

    #[tokio::test]
    async fn fetch_echoes_generation() {
        let w = worker(Session::new(MemoryStore::new()));
        let ok = w
            .handle_message(WorkerMessage::FetchPage {
                page: 2,
                search: String::new(),
                generation: 7,
                reset: false,
            })
            .await;
        assert!(matches!(
            ok,
            WorkerResponse::PageLoaded { generation: 7, reset: false, ref page } if page.current_page == 2
        ));

        let failed = w
            .handle_message(WorkerMessage::FetchPage {
                page: 1,
                search: "boom".into(),
                generation: 8,
                reset: true,
            })
            .await;
        assert!(matches!(
            failed,
            WorkerResponse::PageFailed { generation: 8, reset: true, page: 1, .. }
        ));
    }

    #[tokio::test]
    async fn auth_failures_carry_server_message_only() {
        let w = worker(Session::new(MemoryStore::new()));
        let rejected = w
            .handle_message(WorkerMessage::Login(LoginData {
                email: "a@b.co".into(),
                password: "wrong".into(),
            }))
            .await;
        assert_eq!(
            rejected,
            WorkerResponse::AuthFailed {
                message: Some("Invalid credentials".into())
            }
        );

        let offline = w
            .handle_message(WorkerMessage::Register(RegisterData {
                email: "a@b.co".into(),
                password: "password1".into(),
                first_name: String::new(),
                last_name: String::new(),
            }))
            .await;
        assert_eq!(offline, WorkerResponse::AuthFailed { message: None });
    }

    #[tokio::test]
    async fn theme_preference_round_trip_and_dispatch() {
        let w = worker(Session::new(MemoryStore::new()));
        assert_eq!(
            w.handle_message(WorkerMessage::LoadThemePreference).await,
            WorkerResponse::ThemeLoaded { mode: None }
        );

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        w.dispatch(WorkerMessage::SaveThemePreference { mode: ThemeMode::Dark }, tx.clone())
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(WorkerResponse::ThemeSaved));

        w.dispatch(WorkerMessage::LoadThemePreference, tx).await.unwrap();
        assert_eq!(
            rx.recv().await,
            Some(WorkerResponse::ThemeLoaded {
                mode: Some(ThemeMode::Dark)
            })
        );
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some("t".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(DineError::Storage("read-only".into()))
        }

        fn delete(&mut self, _key: &str) -> Result<()> {
            Err(DineError::Storage("read-only".into()))
        }
    }

    #[tokio::test]
    async fn logout_signs_out_even_when_store_cannot_be_cleared() {
        let session = Session::new(ReadOnlyStore);
        assert!(session.clear().is_err());

        let w = worker(session);
        assert_eq!(w.handle_message(WorkerMessage::Logout).await, WorkerResponse::LoggedOut);
    }
}
