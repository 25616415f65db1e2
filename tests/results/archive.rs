use crate::common::{self, SESSION_COOKIE};
use chrono::NaiveDate;
use httpmock::Method::POST;
use irwebstats_rs::{EventType, IrError, LicenseLevel, ResultsArchiveBuilder};

#[tokio::test]
async fn archive_search_posts_flags_and_season() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/memberstats/member/GetResults")
            .header("cookie", SESSION_COOKIE)
            .form_urlencoded_tuple("format", "json")
            .form_urlencoded_tuple("custid", "123456")
            .form_urlencoded_tuple("showraces", "1")
            .form_urlencoded_tuple("showquals", "0")
            .form_urlencoded_tuple("showops", "0")
            .form_urlencoded_tuple("showtts", "0")
            .form_urlencoded_tuple("showofficial", "1")
            .form_urlencoded_tuple("showunofficial", "1")
            .form_urlencoded_tuple("showrookie", "1")
            .form_urlencoded_tuple("showprowc", "1")
            .form_urlencoded_tuple("seasonyear", "2016")
            .form_urlencoded_tuple("seasonquarter", "3")
            .form_urlencoded_tuple("sort", "start_time")
            .form_urlencoded_tuple("order", "desc");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("results_archive", "123456", "json"));
    });

    let client = common::client(&server);
    let page = ResultsArchiveBuilder::new(&client)
        .event_types(&[EventType::Race])
        .season(2016, 3, None)
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0]["subsessionid"], 16230101);
    assert_eq!(page.items[0]["start_time"], "2016-09-14 18:00:00");
    assert_eq!(page.items[1]["displayname"], "Jane Doe");
}

#[tokio::test]
async fn archive_date_range_is_sent_as_utc_millis() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/memberstats/member/GetResults")
            .form_urlencoded_tuple("custid", "42")
            .form_urlencoded_tuple("starttime_low", "1473638400000")
            .form_urlencoded_tuple("starttime_high", "1474243200000")
            .form_urlencoded_tuple("showclassa", "1")
            .form_urlencoded_tuple("showclassb", "0")
            .form_urlencoded_tuple("showunofficial", "0");
        then.status(200)
            .body(r#"{"m":{"1":"rowcount"},"d":{"1":0}}"#);
    });

    let client = common::client(&server);
    let day = |d| NaiveDate::from_ymd_opt(2016, 9, d).unwrap();
    let page = ResultsArchiveBuilder::new(&client)
        .driver(42)
        .official_only()
        .licenses(&[LicenseLevel::A])
        .dates(day(12), day(19))
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn reversed_dates_fail_before_any_search() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(POST).path("/memberstats/member/GetResults");
        then.status(200).body("{}");
    });

    let client = common::client(&server);
    let day = |d| NaiveDate::from_ymd_opt(2016, 9, d).unwrap();
    let err = ResultsArchiveBuilder::new(&client)
        .dates(day(19), day(12))
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(err, IrError::InvalidDates), "got {err:?}");
    mock.assert_hits(0);
}
