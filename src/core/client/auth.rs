//! Login, session reuse and the logged-in precondition for data calls.

use reqwest::RequestBuilder;
use reqwest::header::SET_COOKIE;
use serde_json::Value;

use super::constants::{
    PATH_DRIVER_COUNTS, PATH_HOME, PATH_LOGIN_FORM, PATH_LOGIN_PAGE, SESSION_COOKIE_MARKER,
};
use super::{IrClient, RetryConfig};
use crate::core::session::{self, StoredSession};
use crate::core::{IrError, net, wire};
use crate::service::ServiceInfo;

impl IrClient {
    /// Log in to the members site.
    ///
    /// Does nothing when already logged in. With a session file configured, the stored
    /// cookie is tried first and validated with a cheap request; otherwise (or if it was
    /// rejected) the login form is submitted with the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::Auth`] when no credentials are configured or the site rejects
    /// them, and transport errors as they occur.
    pub async fn login(&self) -> Result<(), IrError> {
        if self.state.read().await.logged_in {
            return Ok(());
        }

        let _guard = self.login_lock.lock().await;

        // Another caller may have finished logging in while this one waited.
        if self.state.read().await.logged_in {
            return Ok(());
        }

        tracing::info!("logging in");
        if self.resume_stored_session().await? {
            return Ok(());
        }
        self.submit_login_form().await
    }

    /// Replace a session the site dropped after accepting it.
    ///
    /// `seen` is the generation the failed request was sent under. If a newer session
    /// exists by the time the lock is held, it is used as is. The stored cookie is stale
    /// as well, so this always goes through the form.
    async fn renew_session(&self, seen: u64) -> Result<(), IrError> {
        let _guard = self.login_lock.lock().await;

        {
            let state = self.state.read().await;
            if state.logged_in && state.generation != seen {
                tracing::debug!(generation = state.generation, "session already renewed");
                return Ok(());
            }
        }

        self.state.write().await.logged_in = false;
        self.submit_login_form().await
    }

    /// Forget the current session. The next data call logs in again.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        state.logged_in = false;
        state.custid = None;
    }

    /// Re-read the track/car/club listings from the members home page.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in or the request fails.
    pub async fn refresh_service_info(&self) -> Result<ServiceInfo, IrError> {
        self.ensure_logged_in().await?;
        let info = self.fetch_service_info().await?;
        self.state.write().await.service_info = Some(info.clone());
        Ok(info)
    }

    pub(crate) async fn ensure_logged_in(&self) -> Result<(), IrError> {
        self.login().await
    }

    /// Customer id of the logged-in member; logs in first if needed.
    pub(crate) async fn require_custid(&self) -> Result<u64, IrError> {
        self.ensure_logged_in().await?;
        self.custid()
            .await
            .ok_or_else(|| IrError::Auth("logged in but customer id is unknown".into()))
    }

    /// Fetch a JSON endpoint behind the login.
    ///
    /// An expired session does not produce an error status: the site serves its login
    /// page instead. A non-JSON body therefore triggers one fresh login and one resend.
    pub(crate) async fn fetch_json(
        &self,
        req: RequestBuilder,
        endpoint: &str,
        key: &str,
        retry_override: Option<&RetryConfig>,
    ) -> Result<Value, IrError> {
        self.fetch_in_session(req, endpoint, key, "json", retry_override, |text| {
            wire::decode_json(&text)
        })
        .await
    }

    /// Fetch a non-JSON page (HTML/CSV) behind the login.
    ///
    /// Same renewal as [`Self::fetch_json`], with the login form as the expiry signal.
    pub(crate) async fn fetch_page(
        &self,
        req: RequestBuilder,
        endpoint: &str,
        key: &str,
        ext: &str,
        retry_override: Option<&RetryConfig>,
    ) -> Result<String, IrError> {
        self.fetch_in_session(req, endpoint, key, ext, retry_override, |text| {
            (!wire::is_login_page(&text)).then_some(text)
        })
        .await
    }

    /// Sends `req` under the current session. `accept` returns `None` for a body that
    /// means the session is gone; that renews the session once and resends.
    async fn fetch_in_session<T>(
        &self,
        req: RequestBuilder,
        endpoint: &str,
        key: &str,
        ext: &str,
        retry_override: Option<&RetryConfig>,
        accept: impl Fn(String) -> Option<T>,
    ) -> Result<T, IrError> {
        self.ensure_logged_in().await?;

        for attempt in 0..=1 {
            let this = req
                .try_clone()
                .ok_or_else(|| IrError::Data("request body cannot be replayed".into()))?;
            let seen = self.state.read().await.generation;
            let text = self
                .fetch_text(this, endpoint, key, ext, retry_override)
                .await?;

            if let Some(v) = accept(text) {
                return Ok(v);
            }

            if attempt == 0 {
                tracing::info!(endpoint, "session looks expired; logging in again");
                self.renew_session(seen).await?;
            }
        }

        tracing::warn!(endpoint, "session rejected right after logging in");
        Err(IrError::SessionExpired)
    }

    /// Restore cookies from the session file and check the site still accepts them.
    async fn resume_stored_session(&self) -> Result<bool, IrError> {
        let Some(path) = self.session_file.as_deref() else {
            return Ok(false);
        };
        let Some(stored) = session::load(path) else {
            tracing::debug!(path = %path.display(), "no usable stored session");
            return Ok(false);
        };

        for pair in stored.cookie.split(';') {
            let pair = pair.trim();
            if !pair.is_empty() {
                self.jar.add_cookie_str(pair, &self.base_url);
            }
        }

        if !self.session_is_valid().await? {
            tracing::info!("stored session was rejected");
            return Ok(false);
        }

        let service_info = if self.load_service_info {
            Some(self.fetch_service_info().await?)
        } else {
            None
        };

        let mut state = self.state.write().await;
        state.logged_in = true;
        state.generation += 1;
        state.custid = Some(stored.custid);
        if service_info.is_some() {
            state.service_info = service_info;
        }
        tracing::info!(custid = stored.custid, "previous session valid");
        Ok(true)
    }

    async fn submit_login_form(&self) -> Result<(), IrError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or_else(|| IrError::Auth("no credentials configured".into()))?;

        // The form post is only accepted with the cookie this page hands out.
        let login_page = self.endpoint(PATH_LOGIN_PAGE)?;
        self.fetch_text(self.http.get(login_page), "login", "page", "html", None)
            .await?;

        let form = [
            ("username", creds.username.as_str()),
            ("password", creds.password.as_str()),
            ("utcoffset", "300"),
            ("todaysdate", ""),
        ];
        let before = self.session_cookie();
        let req = self.http.post(self.endpoint(PATH_LOGIN_FORM)?).form(&form);
        let resp = self.send_checked(req, None).await?;

        // A session cookie set on this response, or on a redirect hop before it, is the
        // only sign of success. The jar may still hold an older one.
        let issued = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|c| c.trim_start().starts_with(SESSION_COOKIE_MARKER));
        let body = net::read_body(resp, "login", "form", "html").await?;
        let after = self.session_cookie();

        let cookie = match self.cookie_header() {
            Some(cookie) if after.is_some() && (issued || after != before) => cookie,
            _ => {
                tracing::warn!(username = %creds.username, "login rejected");
                return Err(IrError::Auth(format!(
                    "invalid login for user {}; check the credentials",
                    creds.username
                )));
            }
        };

        let custid = wire::extract_custid(&body)
            .ok_or_else(|| IrError::Auth("customer id missing from login response".into()))?;
        let service_info = ServiceInfo::from_page(&body);

        if let Some(path) = self.session_file.as_deref() {
            let stored = StoredSession { cookie, custid };
            if let Err(e) = session::save(path, &stored) {
                tracing::warn!(path = %path.display(), error = %e, "could not save session");
            } else {
                tracing::debug!(path = %path.display(), "session saved");
            }
        }

        let mut state = self.state.write().await;
        state.logged_in = true;
        state.generation += 1;
        state.custid = Some(custid);
        state.service_info = Some(service_info);
        tracing::info!(custid, "log in successful");
        Ok(())
    }

    /// The `irsso_members*` pair the jar currently holds.
    fn session_cookie(&self) -> Option<String> {
        self.cookie_header()?
            .split(';')
            .map(str::trim)
            .find(|pair| pair.starts_with(SESSION_COOKIE_MARKER))
            .map(str::to_string)
    }

    /// A JSON object from the driver-counts endpoint means the cookie is live.
    async fn session_is_valid(&self) -> Result<bool, IrError> {
        let url = self.endpoint(PATH_DRIVER_COUNTS)?;
        match self
            .fetch_text(self.http.get(url), "driver_counts", "probe", "json", None)
            .await
        {
            Ok(text) => Ok(wire::decode_json(&text).is_some_and(|v| v.is_object())),
            Err(IrError::Status { status, .. }) => {
                tracing::debug!(status, "session probe refused");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_service_info(&self) -> Result<ServiceInfo, IrError> {
        let url = self.endpoint(PATH_HOME)?;
        let body = self
            .fetch_text(self.http.get(url), "home", "listings", "html", None)
            .await?;
        Ok(ServiceInfo::from_page(&body))
    }
}
