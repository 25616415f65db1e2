use crate::common::{self, CUSTID, SESSION_COOKIE};
use httpmock::Method::{GET, POST};
use irwebstats_rs::{Driver, IrClient, IrError, Subsession};
use std::{fs, time::Duration};

const LOGIN_HTML: &str = "<html><body><form action=\"Login\">Please log in</form></body></html>";

#[tokio::test]
async fn silently_expired_session_is_renewed_once() {
    let server = common::setup_server();
    let (_, form) = common::mock_login(&server);

    // The stale cookie still passes the probe...
    server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/GetDriverCounts")
            .header("cookie", "irsso_membersv2=stale");
        then.status(200).body("{}");
    });
    // ...but the data endpoint answers with the login page.
    let stale = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetCareerStats")
            .header("cookie", "irsso_membersv2=stale");
        then.status(200).header("content-type", "text/html").body(LOGIN_HTML);
    });
    let fresh = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetCareerStats")
            .query_param("custid", "777")
            .header("cookie", SESSION_COOKIE);
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("career_stats", "123456", "json"));
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.txt");
    fs::write(&path, "irsso_membersv2=stale\n777\n").unwrap();

    let client = IrClient::builder()
        .credentials("jane@example.com", "hunter2")
        .base_url(common::base_url(&server))
        .session_file(&path)
        .min_interval(Duration::ZERO)
        .build()
        .unwrap();

    let stats = Driver::new(&client, 777).career_stats().await.unwrap();
    assert_eq!(stats.len(), 2);

    stale.assert_hits(1);
    form.assert_hits(1);
    fresh.assert_hits(1);
    assert_eq!(client.custid().await, Some(CUSTID));
}

#[tokio::test]
async fn second_non_data_answer_is_session_expired() {
    let server = common::setup_server();
    let (_, form) = common::mock_login(&server);
    let endpoint = server.mock(|when, then| {
        when.method(GET).path("/memberstats/member/GetCareerStats");
        then.status(200).header("content-type", "text/html").body(LOGIN_HTML);
    });

    let client = common::client(&server);
    let err = Driver::new(&client, CUSTID).career_stats().await.unwrap_err();

    assert!(matches!(err, IrError::SessionExpired), "got {err:?}");
    endpoint.assert_hits(2);
    form.assert_hits(2);
}

#[tokio::test]
async fn logout_forces_a_new_login() {
    let server = common::setup_server();
    let (_, form) = common::mock_login(&server);
    common::mock_json(
        &server,
        "/membersite/member/GetDriverCounts",
        "{}".to_string(),
    );

    let client = common::client(&server);
    client.driver_counts().await.unwrap();
    client.logout().await;
    assert!(!client.is_logged_in().await);
    assert_eq!(client.custid().await, None);

    client.driver_counts().await.unwrap();
    form.assert_hits(2);
}

fn client_resuming_stale_session(server: &httpmock::MockServer, dir: &std::path::Path) -> IrClient {
    let path = dir.join("session.txt");
    fs::write(&path, "irsso_membersv2=stale\n777\n").unwrap();
    server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/GetDriverCounts")
            .header("cookie", "irsso_membersv2=stale");
        then.status(200).body("{}");
    });
    IrClient::builder()
        .credentials("jane@example.com", "hunter2")
        .base_url(common::base_url(server))
        .session_file(&path)
        .min_interval(Duration::ZERO)
        .build()
        .unwrap()
}

#[tokio::test]
async fn expired_session_on_html_page_is_renewed() {
    let server = common::setup_server();
    let (_, form) = common::mock_login(&server);
    let stale = server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/statsseries.jsp")
            .header("cookie", "irsso_membersv2=stale");
        then.status(200).header("content-type", "text/html").body(LOGIN_HTML);
    });
    let fresh = server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/statsseries.jsp")
            .header("cookie", SESSION_COOKIE);
        then.status(200)
            .header("content-type", "text/html")
            .body(common::fixture("series_stats", "listing", "html"));
    });

    let dir = tempfile::tempdir().unwrap();
    let client = client_resuming_stale_session(&server, dir.path());
    let series = client.all_seasons().await.unwrap();

    assert_eq!(series.len(), 2);
    stale.assert_hits(1);
    form.assert_hits(1);
    fresh.assert_hits(1);
}

#[tokio::test]
async fn csv_endpoint_answering_with_login_form_is_session_expired() {
    let server = common::setup_server();
    let (_, form) = common::mock_login(&server);
    let endpoint = server.mock(|when, then| {
        when.method(GET).path("/memberstats/member/GetEventResultsAsCSV");
        then.status(200).header("content-type", "text/html").body(LOGIN_HTML);
    });

    let client = common::client(&server);
    let err = Subsession::new(&client, 16_230_101).results(0).await.unwrap_err();

    assert!(matches!(err, IrError::SessionExpired), "got {err:?}");
    endpoint.assert_hits(2);
    form.assert_hits(2);
}

#[tokio::test]
async fn concurrent_expiries_log_in_once() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/membersite/login.jsp");
        then.status(200).body("<html><form action=\"Login\"></form></html>");
    });
    let mut first = server.mock(|when, then| {
        when.method(POST).path("/membersite/Login");
        then.status(200)
            .header("set-cookie", "irsso_membersv2=first; Path=/")
            .body(common::fixture("login", "form", "html"));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetCareerStats")
            .header("cookie", "irsso_membersv2=first");
        then.status(200).header("content-type", "text/html").body(LOGIN_HTML);
    });
    common::mock_json(
        &server,
        "/memberstats/member/GetCareerStats",
        common::fixture("career_stats", "123456", "json"),
    );

    let client = common::client(&server);
    client.login().await.unwrap();
    first.delete();
    let (_, renewal) = common::mock_login(&server);

    let driver = Driver::new(&client, CUSTID);
    let (a, b) = tokio::join!(driver.career_stats(), driver.career_stats());

    assert_eq!(a.unwrap().len(), 2);
    assert_eq!(b.unwrap().len(), 2);
    renewal.assert_hits(1);
}
