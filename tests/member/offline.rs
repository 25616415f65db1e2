use crate::common::{self, CUSTID, SESSION_COOKIE};
use httpmock::Method::GET;
use irwebstats_rs::{Category, ChartType, Driver};

#[tokio::test]
async fn career_stats_are_rounded_and_lenient() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetCareerStats")
            .query_param("custid", "123456")
            .header("cookie", SESSION_COOKIE);
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("career_stats", "123456", "json"));
    });

    let client = common::client(&server);
    let me = Driver::current(&client).await.unwrap();
    assert_eq!(me.custid(), CUSTID);

    let stats = me.career_stats().await.unwrap();
    mock.assert();

    assert_eq!(stats.len(), 2);
    let road = &stats[0];
    assert_eq!(road.category, "Road");
    assert_eq!(road.starts, 120);
    assert!((road.top5_percentage - 34.17).abs() < 1e-9);
    assert!((road.avg_incidents_per_race - 4.25).abs() < 1e-9);
    assert_eq!(road.total_club_points, 3520);

    let oval = &stats[1];
    assert_eq!(oval.starts, 12);
    assert!((oval.laps_led_percentage - 0.38).abs() < 1e-9);
    assert_eq!(oval.total_club_points, 0);
}

#[tokio::test]
async fn yearly_stats_carry_the_year() {
    let server = common::setup_server();
    common::mock_login(&server);
    common::mock_json(
        &server,
        "/memberstats/member/GetYearlyStats",
        r#"[{"year":"2015","category":"Road","starts":40,"wins":2},
            {"year":"2016","category":"Road","starts":"80","wins":"7"}]"#
            .to_string(),
    );

    let client = common::client(&server);
    let years = Driver::new(&client, 42).yearly_stats().await.unwrap();
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].year, Some(2015));
    assert_eq!(years[1].stats.wins, 7);
}

#[tokio::test]
async fn last_races_accept_numbers_and_strings() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetLastRacesStats")
            .query_param("custid", "123456");
        then.status(200)
            .body(common::fixture("last_races", "123456", "json"));
    });

    let client = common::client(&server);
    let races = Driver::new(&client, CUSTID).last_races().await.unwrap();
    mock.assert();

    assert_eq!(races.len(), 2);
    assert_eq!(races[0].finish_pos, Some(2));
    assert_eq!(races[0].winner_name.as_deref(), Some("John Roe"));
    assert_eq!(races[1].track_id, Some(93));
    assert_eq!(races[1].strength_of_field, Some(1702));
    assert_eq!(races[1].champ_points, Some(31.5));
    assert_eq!(races[1].winner_name.as_deref(), Some("Alex Poe"));
}

#[tokio::test]
async fn empty_list_endpoint_is_empty() {
    let server = common::setup_server();
    common::mock_login(&server);
    common::mock_json(
        &server,
        "/memberstats/member/GetLastRacesStats",
        "null".to_string(),
    );

    let client = common::client(&server);
    let races = Driver::new(&client, 9).last_races().await.unwrap();
    assert!(races.is_empty());
}

#[tokio::test]
async fn chart_sends_category_and_type() {
    let server = common::setup_server();
    common::mock_login(&server);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetChartData")
            .query_param("custId", "123456")
            .query_param("catId", "2")
            .query_param("chartType", "1");
        then.status(200)
            .body("[[1473876000000,2310],[1474480800000,2341]]");
    });

    let client = common::client(&server);
    let points = Driver::new(&client, CUSTID)
        .chart(Category::Road, ChartType::IRating)
        .await
        .unwrap();
    mock.assert();
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].value, 2341.0);
    assert_eq!(points[0].at.timestamp_millis(), 1_473_876_000_000);
}

#[tokio::test]
async fn personal_bests_and_status_pass_through() {
    let server = common::setup_server();
    common::mock_login(&server);
    let bests = server.mock(|when, then| {
        when.method(GET)
            .path("/memberstats/member/GetPersonalBests")
            .query_param("carid", "33")
            .query_param("custid", "123456");
        then.status(200)
            .body(r#"[{"trackname":"Lime+Rock+Park","bestlaptimeformatted":"1%3A00.532"}]"#);
    });
    let status = server.mock(|when, then| {
        when.method(GET)
            .path("/membersite/member/GetDriverStatus")
            .query_param("searchTerms", "Jane Doe");
        then.status(200)
            .body(r#"{"searchRacers":[{"custid":123456,"name":"Jane+Doe"}]}"#);
    });

    let client = common::client(&server);
    let pb = Driver::new(&client, CUSTID).personal_bests(33).await.unwrap();
    let found = client.driver_status("Jane Doe").await.unwrap();

    bests.assert();
    status.assert();
    assert_eq!(pb[0]["trackname"], "Lime+Rock+Park");
    assert_eq!(found["searchRacers"][0]["custid"], 123456);
}
