//! End-to-end flows: controller, worker, HTTP transport and session store
//! against an in-process fake API.

use dinedeck::auth::Session;
use dinedeck::gateway::transport::PreparedRequest;
use dinedeck::gateway::{HttpExecutor, HttpGateway, HttpTransport, RawResponse};
use dinedeck::storage::models::{PASSWORD_KEY, TOKEN_KEY, USER_KEY};
use dinedeck::storage::{MemoryStore, Preferences};
use dinedeck::worker::{ExploreWorker, WorkerMessage, WorkerResponse};
use dinedeck::{handle_event, Action, AppState, Event, Phase, Theme, ThemeMode};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const PASSWORD: &str = "secret-pass";
const WRONG_PASSWORD: &str = "not-the-password";

/// Serves `/restaurants/sample` and `/auth/login`.
///
/// Page contents depend on the search term: `""` gives three pages
/// (`r1 r2`, `r3`, `r4`), anything else a single page named after the term.
struct FakeApi {
    valid_token: Mutex<String>,
    logins: Mutex<u32>,
    seen: Mutex<Vec<PreparedRequest>>,
}

impl FakeApi {
    fn new(valid_token: &str) -> Arc<Self> {
        Arc::new(Self {
            valid_token: Mutex::new(valid_token.to_string()),
            logins: Mutex::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn logins(&self) -> u32 {
        *self.logins.lock().unwrap()
    }

    fn page(page: u32, search: &str) -> serde_json::Value {
        let (total, ids): (u32, Vec<String>) = if search.is_empty() {
            let ids = match page {
                1 => vec!["r1", "r2"],
                2 => vec!["r3"],
                _ => vec!["r4"],
            };
            (3, ids.into_iter().map(String::from).collect())
        } else {
            (1, vec![format!("{search}-1")])
        };
        let restaurants: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "name": id, "address": "Main St 1, Town", "rating": 4.5}))
            .collect();
        json!({
            "totalRestaurants": 5,
            "totalPages": total,
            "currentPage": page,
            "restaurants": restaurants,
        })
    }

    fn route(&self, request: &PreparedRequest) -> RawResponse {
        let path = request.url.path();
        if path.ends_with("/auth/login") {
            let body = request.body.clone().unwrap_or_default();
            if body["password"] == PASSWORD {
                *self.logins.lock().unwrap() += 1;
                let token = format!("token-{}", self.logins());
                *self.valid_token.lock().unwrap() = token.clone();
                return RawResponse {
                    status: 200,
                    body: json!({
                        "message": "ok",
                        "user": {"email": body["email"]},
                        "token": token,
                        "refreshToken": "refresh",
                    })
                    .to_string(),
                };
            }
            return RawResponse {
                status: 401,
                body: json!({"message": "Invalid credentials"}).to_string(),
            };
        }

        let authorized = request.bearer.as_deref() == Some(self.valid_token.lock().unwrap().as_str());
        if !authorized {
            return RawResponse {
                status: 401,
                body: json!({"message": "Unauthorized"}).to_string(),
            };
        }

        let query = |key: &str| {
            request
                .url
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        };
        let page = query("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let search = query("search").unwrap_or_default();
        RawResponse {
            status: 200,
            body: Self::page(page, &search).to_string(),
        }
    }
}

struct SharedApi(Arc<FakeApi>);

impl HttpExecutor for SharedApi {
    fn execute(&self, request: PreparedRequest) -> BoxFuture<'_, dinedeck::Result<RawResponse>> {
        let response = self.0.route(&request);
        self.0.seen.lock().unwrap().push(request);
        async move { Ok(response) }.boxed()
    }
}

struct Harness {
    state: AppState,
    worker: ExploreWorker,
    session: Session,
    api: Arc<FakeApi>,
}

impl Harness {
    fn new(store: MemoryStore, api: Arc<FakeApi>) -> Self {
        let session = Session::new(store);
        let transport = HttpTransport::new("http://api.test/api/", session.clone(), Arc::new(SharedApi(api.clone())));
        let gateway = Arc::new(HttpGateway::new(transport));
        let worker = ExploreWorker::new(gateway.clone(), gateway, session.clone(), Preferences::new(MemoryStore::new()));
        let state = AppState::new(Theme::for_mode(ThemeMode::Light), ThemeMode::Light, Duration::from_millis(300));
        Self {
            state,
            worker,
            session,
            api,
        }
    }

    fn signed_in(api: Arc<FakeApi>, token: &str) -> Self {
        let store = MemoryStore::with_entries([
            (TOKEN_KEY, token.to_string()),
            (USER_KEY, json!({"email": "ana@example.com"}).to_string()),
            (PASSWORD_KEY, PASSWORD.to_string()),
        ]);
        Self::new(store, api)
    }

    /// Applies an event and returns the worker messages it produced.
    fn send(&mut self, event: Event) -> Vec<WorkerMessage> {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        actions
            .into_iter()
            .filter_map(|action| match action {
                Action::PostToWorker(message) => Some(message),
                Action::Quit => None,
            })
            .collect()
    }

    async fn execute(&self, message: WorkerMessage) -> WorkerResponse {
        self.worker.handle_message(message).await
    }

    /// Runs messages to quiescence, delivering responses in request order.
    async fn settle(&mut self, mut queue: Vec<WorkerMessage>) {
        while !queue.is_empty() {
            let message = queue.remove(0);
            let response = self.execute(message).await;
            queue.extend(self.send(Event::WorkerResponse(response)));
        }
    }

    async fn mount(&mut self) {
        let messages = self.send(Event::Mount);
        self.settle(messages).await;
    }

    fn ids(&self) -> Vec<&str> {
        self.state.list.items.iter().map(|r| r.id.as_str()).collect()
    }
}

#[tokio::test]
async fn mount_loads_first_page() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;

    assert_eq!(h.ids(), ["r1", "r2"]);
    assert_eq!(h.state.phase, Phase::Ready);
    assert_eq!(h.state.list.total_pages, 3);

    let seen = h.api.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].url.as_str(), "http://api.test/api/restaurants/sample");
    assert_eq!(seen[0].url.query(), None);
    assert_eq!(seen[0].bearer.as_deref(), Some("good"));
}

#[tokio::test]
async fn scrolling_appends_until_last_page() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;

    let messages = h.send(Event::EndReached);
    h.settle(messages).await;
    assert_eq!(h.ids(), ["r1", "r2", "r3"]);

    let messages = h.send(Event::EndReached);
    h.settle(messages).await;
    assert_eq!(h.ids(), ["r1", "r2", "r3", "r4"]);

    assert!(h.send(Event::EndReached).is_empty(), "no page after the last");
}

#[tokio::test]
async fn search_during_load_more_never_appends_stale_page() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;

    let load_more = h.send(Event::EndReached);
    let search = h.send(Event::SetSearch("pho".into()));
    assert_eq!(load_more.len(), 1);
    assert_eq!(search.len(), 1);

    // The search completes first, the page-2 append arrives late.
    let search_response = h.execute(search[0].clone()).await;
    let late_response = h.execute(load_more[0].clone()).await;
    h.send(Event::WorkerResponse(search_response));
    h.send(Event::WorkerResponse(late_response));

    assert_eq!(h.ids(), ["pho-1"]);
    assert!(!h.state.guard.is_busy());
}

#[tokio::test]
async fn overlapping_searches_keep_the_latest_result() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;

    let first = h.send(Event::SetSearch("a".into()));
    let second = h.send(Event::SetSearch("ab".into()));

    let second_response = h.execute(second[0].clone()).await;
    let first_response = h.execute(first[0].clone()).await;
    h.send(Event::WorkerResponse(second_response));
    h.send(Event::WorkerResponse(first_response));

    assert_eq!(h.ids(), ["ab-1"]);
}

#[tokio::test]
async fn debounced_typing_commits_once() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;
    let requests_before = h.api.seen.lock().unwrap().len();

    let t0 = Instant::now();
    h.send(Event::SearchMode);
    for (i, c) in "sushi".chars().enumerate() {
        let at = t0 + Duration::from_millis(100 * i as u64);
        assert!(h.send(Event::Char { c, at }).is_empty());
    }
    assert!(h.send(Event::Tick(t0 + Duration::from_millis(500))).is_empty());

    let messages = h.send(Event::Tick(t0 + Duration::from_millis(700)));
    h.settle(messages).await;

    assert_eq!(h.ids(), ["sushi-1"]);
    assert_eq!(h.api.seen.lock().unwrap().len(), requests_before + 1);
}

#[tokio::test]
async fn refresh_resets_to_first_page() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;
    let messages = h.send(Event::EndReached);
    h.settle(messages).await;
    assert_eq!(h.state.list.current_page, 2);

    let messages = h.send(Event::Refresh);
    h.settle(messages).await;

    assert_eq!(h.ids(), ["r1", "r2"]);
    assert_eq!(h.state.list.current_page, 1);
    assert!(!h.state.refreshing);
}

#[tokio::test]
async fn refresh_while_loading_more_ignores_late_page() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;

    let load_more = h.send(Event::EndReached);
    let refresh = h.send(Event::Refresh);
    assert_eq!(load_more.len(), 1);
    assert_eq!(refresh.len(), 2, "probe plus page-1 reload");

    // Refresh finishes first; the page-2 append lands afterwards.
    h.settle(refresh).await;
    let late = h.execute(load_more[0].clone()).await;
    h.send(Event::WorkerResponse(late));

    assert_eq!(h.ids(), ["r1", "r2"]);
    assert_eq!(h.state.list.current_page, 1);
    assert!(!h.state.guard.is_busy());
    assert!(!h.state.refreshing);
}

#[tokio::test]
async fn search_during_refresh_probe_is_fetched() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;

    let mut refresh = h.send(Event::Refresh);
    let probe = refresh.remove(0);
    assert_eq!(probe, WorkerMessage::ProbeAuth);

    let search = h.send(Event::SetSearch("ramen".into()));
    assert_eq!(search.len(), 1, "search is not blocked by the pending probe");

    h.settle(refresh).await;
    h.settle(vec![probe]).await;
    h.settle(search).await;

    assert_eq!(h.ids(), ["ramen-1"]);
    assert_eq!(h.state.list.search_term, "ramen");
}

#[tokio::test]
async fn expired_token_is_renewed_transparently() {
    let api = FakeApi::new("fresh-only");
    let mut h = Harness::signed_in(api.clone(), "expired");
    h.mount().await;

    assert_eq!(h.ids(), ["r1", "r2"]);
    assert_eq!(api.logins(), 1);
    assert_eq!(h.session.token().unwrap().as_deref(), Some("token-1"));
}

#[tokio::test]
async fn failed_renewal_keeps_list_and_clears_session() {
    let api = FakeApi::new("good");
    let mut h = Harness::signed_in(api.clone(), "good");
    h.mount().await;

    // Server rotates its token and the stored password no longer works.
    *api.valid_token.lock().unwrap() = "rotated".into();
    h.session.save_password("stale").unwrap();

    let messages = h.send(Event::EndReached);
    h.settle(messages).await;

    assert_eq!(h.ids(), ["r1", "r2"], "last good list kept");
    assert!(!h.session.is_authenticated().unwrap());
}

#[tokio::test]
async fn signed_out_user_logs_in_then_loads() {
    let api = FakeApi::new("none");
    let mut h = Harness::new(MemoryStore::new(), api.clone());
    h.mount().await;

    assert!(h.state.form_visible());
    assert!(api.seen.lock().unwrap().is_empty(), "nothing fetched while signed out");

    let at = Instant::now();
    for c in "ana@example.com".chars() {
        h.send(Event::Char { c, at });
    }
    h.send(Event::FormNextField);
    for c in WRONG_PASSWORD.chars() {
        h.send(Event::Char { c, at });
    }
    let messages = h.send(Event::FormSubmit);
    h.settle(messages).await;
    assert_eq!(h.state.auth_form.error.as_deref(), Some("Invalid credentials"));

    for _ in 0..WRONG_PASSWORD.len() {
        h.send(Event::Backspace { at });
    }
    for c in PASSWORD.chars() {
        h.send(Event::Char { c, at });
    }
    let messages = h.send(Event::FormSubmit);
    h.settle(messages).await;

    assert!(!h.state.form_visible());
    assert_eq!(h.ids(), ["r1", "r2"]);
    assert_eq!(h.session.credentials().unwrap().unwrap().password, PASSWORD);
}

#[tokio::test]
async fn logout_clears_session_and_list() {
    let mut h = Harness::signed_in(FakeApi::new("good"), "good");
    h.mount().await;

    let messages = h.send(Event::Logout);
    h.settle(messages).await;

    assert!(h.state.list.items.is_empty());
    assert_eq!(h.state.phase, Phase::SignedOut);
    assert_eq!(h.session.token().unwrap(), None);
    assert_eq!(h.session.credentials().unwrap(), None);
}
