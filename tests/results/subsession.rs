use crate::common::{self, CUSTID};
use httpmock::Method::GET;
use irwebstats_rs::Subsession;
use serde_json::Value;

#[tokio::test]
async fn event_results_csv_is_parsed() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetEventResultsAsCSV")
            .query_param("subsessionid", "16230101")
            .query_param("simsesnum", "0")
            .query_param("includeSummary", "1");
        then.status(200)
            .header("content-type", "text/csv")
            .body(common::fixture("event_results", "16230101", "csv"));
    });

    let client = common::client(&server);
    let res = Subsession::new(&client, 16_230_101).results(0).await.unwrap();
    mock.assert();

    assert_eq!(res.info["Track"], "Lime Rock Park");
    assert_eq!(res.info["Strength of Field"], "1835");
    assert_eq!(res.rows.len(), 2);

    let jane = &res.rows[1];
    assert_eq!(jane["finpos"], 2);
    assert_eq!(jane["custid"], 123456);
    assert_eq!(jane["name"], "Jane Doe");
    assert_eq!(jane["interval"], "-2.512");
    assert_eq!(jane["teamid"], "-123456");
    assert_eq!(jane["newirating"], 2341);
    assert_eq!(jane["qualifytime"], Value::Null);
    assert_eq!(jane["maxfuelfill"], 100);
}

#[tokio::test]
async fn result_detail_is_read_from_result_page() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/EventResult.do")
            .query_param("subsessionid", "16230101")
            .query_param("custid", "123456");
        then.status(200)
            .header("content-type", "text/html")
            .body(common::fixture("event_result", "16230101_123456", "html"));
    });

    let client = common::client(&server);
    let rec = Subsession::new(&client, 16_230_101)
        .result_detail(CUSTID)
        .await
        .unwrap();
    mock.assert();

    assert_eq!(rec["custid"], 123456);
    assert_eq!(rec["fastestlaptime"], "1:00.532");
    assert_eq!(rec["fastestlaptimems"], 605321);
    assert_eq!(rec["oldttRating"], 1600);
    assert_eq!(rec["sr_old"], "3.21");
    assert_eq!(rec["reasonOutName"], "Running");
}

#[tokio::test]
async fn laps_and_best_lap() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/GetLaps")
            .query_param("subsessionid", "16230101")
            .query_param("groupid", "123456")
            .query_param("simsessnum", "0");
        then.status(200)
            .body(common::fixture("laps", "16230101_123456", "json"));
    });

    let client = common::client(&server);
    let sub = Subsession::new(&client, 16_230_101);
    let laps = sub.laps(CUSTID, 0).await.unwrap();
    assert_eq!(laps["lapData"].as_array().map(Vec::len), Some(2));

    let best = sub.best_lap(CUSTID).await.unwrap();
    assert_eq!(best, 605321);
    mock.assert_hits(2);
}

#[tokio::test]
async fn subsession_rows_and_lap_chart() {
    let server = common::setup_server();
    common::mock_login(&server);
    let rows = server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/GetSubsessionResults")
            .query_param("subsessionID", "16230101");
        then.status(200)
            .body(r#"{"rows":[{"custid":10001,"finishpos":0},{"custid":123456,"finishpos":1}],"sessionid":900101}"#);
    });
    let chart = server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/GetLapChart")
            .query_param("subsessionid", "16230101")
            .query_param("carclassid", "-1");
        then.status(200).body(r#"{"startgrid":[],"lapdata":[]}"#);
    });

    let client = common::client(&server);
    let sub = Subsession::new(&client, 16_230_101);
    let got = sub.rows().await.unwrap();
    let lap_chart = sub.lap_chart().await.unwrap();

    rows.assert();
    chart.assert();
    assert_eq!(got.len(), 2);
    assert_eq!(got[1]["custid"], 123456);
    assert!(lap_chart.get("lapdata").is_some());
}

#[tokio::test]
async fn world_record_is_in_seconds() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetWorldRecords")
            .query_param("seasonyear", "2016")
            .query_param("seasonquarter", "3")
            .query_param("carid", "33")
            .query_param("trackid", "47")
            .query_param("custid", "123456")
            .query_param("format", "json")
            .query_param("upperbound", "1");
        then.status(200)
            .body(common::fixture("world_records", "33_47", "json"));
    });

    let client = common::client(&server);
    let record = client.world_record(2016, 3, 33, 47).await.unwrap();
    mock.assert();
    let secs = record.expect("record time");
    assert!((secs - 60.532).abs() < 1e-9, "{secs}");
}

#[tokio::test]
async fn world_record_without_times_is_none() {
    let server = common::setup_server();
    common::mock_login(&server);
    server.mock(|when, then| {
        when.method(GET).path("/memberstats/member/GetWorldRecords");
        then.status(200)
            .body(r#"{"m":{"1":"race","2":"rowcount"},"d":{"2":0,"r":[]}}"#);
    });

    let client = common::client(&server);
    assert_eq!(client.world_record(2016, 3, 1, 2).await.unwrap(), None);
}
