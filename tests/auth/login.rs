use crate::common::{self, CUSTID};
use httpmock::Method::{GET, POST};
use irwebstats_rs::{IrClient, IrError};
use std::time::Duration;

#[tokio::test]
async fn login_reads_custid_and_listings() {
    let server = common::setup_server();
    let (page, form) = common::mock_login(&server);

    let client = common::client(&server);
    assert!(!client.is_logged_in().await);
    client.login().await.unwrap();

    page.assert();
    form.assert();
    assert!(client.is_logged_in().await);
    assert_eq!(client.custid().await, Some(CUSTID));

    let info = client.service_info().await.expect("listings captured at login");
    assert_eq!(info.track_name(47).as_deref(), Some("Lime Rock Park"));
    assert_eq!(info.car_name(33).as_deref(), Some("Mazda MX-5 Cup"));
    assert_eq!(info.clubs.len(), 2);
    assert_eq!(info.seasons.len(), 1);
}

#[tokio::test]
async fn rejected_credentials_are_an_auth_error() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/membersite/login.jsp");
        then.status(200).body("<html>login</html>");
    });
    // No session cookie: the site just shows the login form again.
    let form = server.mock(|when, then| {
        when.method(POST).path("/membersite/Login");
        then.status(200)
            .body("<html>Invalid email address or password.</html>");
    });

    let client = common::client(&server);
    let err = client.login().await.unwrap_err();
    form.assert();
    match err {
        IrError::Auth(msg) => assert!(msg.contains("jane@example.com"), "{msg}"),
        other => panic!("expected Auth, got {other:?}"),
    }
    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn missing_credentials_fail_without_requests() {
    let server = common::setup_server();
    let (page, form) = common::mock_login(&server);

    let client = IrClient::builder()
        .base_url(common::base_url(&server))
        .min_interval(Duration::ZERO)
        .build()
        .unwrap();

    let err = client.driver_counts().await.unwrap_err();
    assert!(matches!(err, IrError::Auth(_)), "got {err:?}");
    page.assert_hits(0);
    form.assert_hits(0);
}

#[tokio::test]
async fn data_calls_log_in_once() {
    let server = common::setup_server();
    let (page, form) = common::mock_login(&server);
    let counts = common::mock_json(
        &server,
        "/membersite/member/GetDriverCounts",
        r#"{"friends":3,"studied":1,"notifications":0}"#.to_string(),
    );

    let client = common::client(&server);
    let first = client.driver_counts().await.unwrap();
    let second = client.driver_counts().await.unwrap();

    assert_eq!(first["friends"], 3);
    assert_eq!(first, second);
    page.assert_hits(1);
    form.assert_hits(1);
    counts.assert_hits(2);
}

#[tokio::test]
async fn requests_are_spaced_by_min_interval() {
    let server = common::setup_server();
    common::mock_login(&server);
    common::mock_json(
        &server,
        "/membersite/member/GetDriverCounts",
        "{}".to_string(),
    );

    let client = IrClient::builder()
        .credentials("jane@example.com", "hunter2")
        .base_url(common::base_url(&server))
        .min_interval(Duration::from_millis(150))
        .build()
        .unwrap();

    // login page, login form, then one data call: at least two full gaps.
    let started = std::time::Instant::now();
    client.driver_counts().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(290));
}
