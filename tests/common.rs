#![allow(dead_code)]

use httpmock::{
    Method::{GET, POST},
    Mock, MockServer,
};
use irwebstats_rs::IrClient;
use std::{fs, path::Path, time::Duration};
use url::Url;

pub const CUSTID: u64 = 123_456;
pub const SESSION_COOKIE: &str = "irsso_membersv2=fresh-session";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, key: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{endpoint}_{key}.{ext}");
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.base_url())).unwrap()
}

/// A client pointed at the mock server, with no pacing and no transport retries.
pub fn client(server: &MockServer) -> IrClient {
    IrClient::builder()
        .credentials("jane@example.com", "hunter2")
        .base_url(base_url(server))
        .min_interval(Duration::ZERO)
        .retry_config(irwebstats_rs::RetryConfig {
            enabled: false,
            ..Default::default()
        })
        .build()
        .unwrap()
}

/// Login page + form post that hands out [`SESSION_COOKIE`] and customer id [`CUSTID`].
pub fn mock_login(server: &'_ MockServer) -> (Mock<'_>, Mock<'_>) {
    let page = server.mock(|when, then| {
        when.method(GET).path("/membersite/login.jsp");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><form action=\"Login\"></form></html>");
    });
    let form = server.mock(|when, then| {
        when.method(POST)
            .path("/membersite/Login")
            .form_urlencoded_tuple("username", "jane@example.com")
            .form_urlencoded_tuple("password", "hunter2")
            .form_urlencoded_tuple("utcoffset", "300");
        then.status(200)
            .header("content-type", "text/html")
            .header("set-cookie", format!("{SESSION_COOKIE}; Path=/"))
            .body(fixture("login", "form", "html"));
    });
    (page, form)
}

/// JSON endpoint that only answers with data for the fresh session cookie.
pub fn mock_json<'a>(server: &'a MockServer, path: &'a str, body: String) -> Mock<'a> {
    server.mock(|when, then| {
        when.path(path).header("cookie", SESSION_COOKIE);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}
