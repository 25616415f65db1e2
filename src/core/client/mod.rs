//! Public client surface + builder.
//! Internals are split into `auth` (login/session lifecycle), `constants` (UA + endpoints),
//! `retry` (transport retries) and `throttle` (request pacing).

mod auth;
mod constants;
mod retry;
mod throttle;

pub use retry::{Backoff, RetryConfig};

pub(crate) use constants::*;

use crate::core::{IrError, net};
use crate::service::ServiceInfo;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, RequestBuilder, Response};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use throttle::Throttle;
use tokio::sync::{Mutex, RwLock};
use url::Url;

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    logged_in: bool,
    /// Bumped on every accepted login so a renewal can tell whether someone beat it.
    generation: u64,
    custid: Option<u64>,
    service_info: Option<ServiceInfo>,
}

/// A logged-in (or lazily logging-in) handle to the members site.
///
/// Cloning is cheap; clones share the cookie jar, the session state and the throttle,
/// so every clone counts against the same request budget.
#[derive(Debug, Clone)]
pub struct IrClient {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
    credentials: Option<Credentials>,
    session_file: Option<PathBuf>,
    load_service_info: bool,
    retry: RetryConfig,
    throttle: Arc<Throttle>,
    state: Arc<RwLock<SessionState>>,
    login_lock: Arc<Mutex<()>>,
}

impl IrClient {
    /// Create a new builder.
    pub fn builder() -> IrClientBuilder {
        IrClientBuilder::default()
    }

    /// Whether the client currently holds a session the site accepted.
    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.logged_in
    }

    /// Customer id of the logged-in member, once known.
    pub async fn custid(&self) -> Option<u64> {
        self.state.read().await.custid
    }

    /// Track/car/club listings captured at login, if any were loaded.
    pub async fn service_info(&self) -> Option<ServiceInfo> {
        self.state.read().await.service_info.clone()
    }

    /* -------- internal helpers used by the endpoint modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, IrError> {
        Ok(self.base_url.join(path)?)
    }

    /// Cookie header the jar would send to the members site.
    pub(crate) fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Sends `req` and fails on a non-2xx status.
    pub(crate) async fn send_checked(
        &self,
        req: RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<Response, IrError> {
        let resp = self.send_with_retry(req, retry_override).await?;
        if !resp.status().is_success() {
            return Err(IrError::Status {
                status: resp.status().as_u16(),
                url: resp.url().to_string(),
            });
        }
        tracing::debug!(url = %resp.url(), status = resp.status().as_u16(), "response received");
        Ok(resp)
    }

    /// Sends `req` and returns the body of a successful response.
    ///
    /// No login precondition; `fetch_json` and `fetch_page` add it.
    pub(crate) async fn fetch_text(
        &self,
        req: RequestBuilder,
        endpoint: &str,
        key: &str,
        ext: &str,
        retry_override: Option<&RetryConfig>,
    ) -> Result<String, IrError> {
        let resp = self.send_checked(req, retry_override).await?;
        Ok(net::read_body(resp, endpoint, key, ext).await?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct IrClientBuilder {
    username: Option<String>,
    password: Option<String>,
    user_agent: Option<String>,
    base_url: Option<Url>,
    session_file: Option<PathBuf>,
    load_service_info: bool,
    min_interval: Option<Duration>,
    retry_config: Option<RetryConfig>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl IrClientBuilder {
    /// Members site username (e-mail) and password.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the site root (e.g., `https://members.iracing.com/`). Mainly for tests.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Persist the session cookie to `path` and try to reuse it before logging in.
    #[must_use]
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Also fetch the track/car/club listings when a persisted session is reused.
    /// A fresh login always captures them. Default: off.
    #[must_use]
    pub const fn load_service_info(mut self, yes: bool) -> Self {
        self.load_service_info = yes;
        self
    }

    /// Minimum time between two requests. Default: 2 seconds.
    #[must_use]
    pub const fn min_interval(mut self, dur: Duration) -> Self {
        self.min_interval = Some(dur);
        self
    }

    /// Transport retry policy for 5xx/429/timeouts.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry_config = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client. No request is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL fails to parse or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<IrClient, IrError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let jar = Arc::new(Jar::default());
        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_provider(jar.clone());

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        let credentials = match (self.username, self.password) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        Ok(IrClient {
            http,
            jar,
            base_url,
            credentials,
            session_file: self.session_file,
            load_service_info: self.load_service_info,
            retry: self.retry_config.unwrap_or_default(),
            throttle: Arc::new(Throttle::new(
                self.min_interval.unwrap_or(DEFAULT_MIN_INTERVAL),
            )),
            state: Arc::new(RwLock::new(SessionState::default())),
            login_lock: Arc::new(Mutex::new(())),
        })
    }
}
