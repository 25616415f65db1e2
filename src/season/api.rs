use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::SeasonStandingsBuilder;
use super::model::{Car, Series};
use super::wire::SeriesRow;
use crate::core::client::{
    PATH_SEASON_STANDINGS, PATH_SERIES_PAGE, PATH_SERIES_RACE_RESULTS, PATH_SERIES_STATS_PAGE,
    PATH_SESSION_TIMES,
};
use crate::core::models::{bound, page_bounds};
use crate::core::wire::{self, ColumnMap};
use crate::core::{IrClient, IrError, Page, Record, RetryConfig};

static SERIES_OBJ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"seriesobj=([^;]*);").expect("series object regex"));
static SEASON_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"seasonID:([0-9]*),").expect("season id regex"));
static SERIES_IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"col_color_img:".+members/member_images/series/([^"]*)""#)
        .expect("series image regex")
});

pub(super) async fn all_seasons(
    client: &IrClient,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Series>, IrError> {
    let url = client.endpoint(PATH_SERIES_STATS_PAGE)?;
    let html = client
        .fetch_page(client.http().get(url), "series_stats", "listing", "html", retry_override)
        .await?;
    parse_season_listing(&html)
}

pub(super) fn parse_season_listing(html: &str) -> Result<Vec<Series>, IrError> {
    let listing = wire::extract_js_var(html, "SeasonListing", 1)?;
    let rows: Vec<SeriesRow> = wire::rows_from(listing, "season listing")?;
    Ok(rows
        .into_iter()
        .filter_map(|r| {
            Some(Series {
                series_id: r.seriesid?,
                name: r.seriesname.unwrap_or_default(),
                category_id: r.catid.unwrap_or_default(),
                cars: r
                    .cars
                    .into_iter()
                    .filter_map(|c| {
                        Some(Car {
                            id: c.id?,
                            name: c.name.unwrap_or_default(),
                        })
                    })
                    .collect(),
            })
        })
        .collect())
}

pub(super) fn standings_form(b: &SeasonStandingsBuilder) -> Vec<(&'static str, String)> {
    let (start, end) = page_bounds(b.page);
    vec![
        ("sort", b.sort.as_str().to_string()),
        ("order", b.order.as_str().to_string()),
        ("seasonid", b.season.to_string()),
        ("carclassid", b.car_class.to_string()),
        ("clubid", bound(b.club)),
        ("raceweek", bound(b.race_week)),
        ("division", bound(b.division)),
        ("start", start.to_string()),
        ("end", end.to_string()),
    ]
}

pub(super) async fn season_standings(
    client: &IrClient,
    b: &SeasonStandingsBuilder,
    retry_override: Option<&RetryConfig>,
) -> Result<Page<Record>, IrError> {
    let req = client
        .http()
        .post(client.endpoint(PATH_SEASON_STANDINGS)?)
        .form(&standings_form(b));
    let root = client
        .fetch_json(
            req,
            "season_standings",
            &format!("{}_{}", b.season, b.page),
            retry_override,
        )
        .await?;
    wire::tabular_page(&root)
}

pub(super) async fn race_sessions(
    client: &IrClient,
    season: i64,
    race_week: u8,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Record>, IrError> {
    let form = [
        ("seasonid", season.to_string()),
        ("raceweek", race_week.to_string()),
    ];
    let req = client
        .http()
        .post(client.endpoint(PATH_SERIES_RACE_RESULTS)?)
        .form(&form);
    let root = client
        .fetch_json(
            req,
            "series_race_results",
            &format!("{season}_{race_week}"),
            retry_override,
        )
        .await?;
    session_rows(&root)
}

/// `d` is a bare list of short-keyed rows here, without a row count.
pub(super) fn session_rows(root: &Value) -> Result<Vec<Record>, IrError> {
    let columns = ColumnMap::from_root(root)?;
    match root.get("d") {
        Some(Value::Array(rows)) => Ok(columns.name_rows(rows)),
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(_) => Err(IrError::Data("race sessions `d` is not a list".into())),
    }
}

pub(super) async fn session_times(
    client: &IrClient,
    season: i64,
    start: &str,
    end: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<Value, IrError> {
    let mut url = client.endpoint(PATH_SESSION_TIMES)?;
    url.query_pairs_mut()
        .append_pair("start", start)
        .append_pair("end", end)
        .append_pair("season", &season.to_string());
    client
        .fetch_json(
            client.http().get(url),
            "session_times",
            &season.to_string(),
            retry_override,
        )
        .await
}

pub(super) async fn current_series_images(
    client: &IrClient,
    retry_override: Option<&RetryConfig>,
) -> Result<BTreeMap<String, String>, IrError> {
    let url = client.endpoint(PATH_SERIES_PAGE)?;
    let html = client
        .fetch_page(client.http().get(url), "series", "images", "html", retry_override)
        .await?;
    Ok(parse_series_images(&html))
}

pub(super) fn parse_series_images(html: &str) -> BTreeMap<String, String> {
    let mut images = BTreeMap::new();
    for obj in SERIES_OBJ_RE.captures_iter(html) {
        let obj = &obj[1];
        let season = SEASON_ID_RE.captures(obj).map(|c| c[1].to_string());
        let image = SERIES_IMG_RE.captures(obj).map(|c| c[1].to_string());
        match (season, image) {
            (Some(season), Some(image)) => {
                images.insert(season, image);
            }
            _ => tracing::debug!("series object without season id or image"),
        }
    }
    images
}
