use chrono::DateTime;
use serde_json::Value;

use super::model::{CareerStats, ChartPoint, LastRaceStats, YearlyStats};
use super::wire::{LastRaceRow, StatsRow};
use crate::core::client::{
    PATH_CARS_DRIVEN, PATH_CAREER_STATS, PATH_CHART_DATA, PATH_DRIVER_COUNTS,
    PATH_DRIVER_STATUS, PATH_LAST_RACES, PATH_PERSONAL_BESTS, PATH_YEARLY_STATS,
};
use crate::core::wire::{self, round2};
use crate::core::{Category, ChartType, IrClient, IrError, Record, RetryConfig};

/* ---------- requests ---------- */

async fn get_custid_json(
    client: &IrClient,
    path: &str,
    endpoint: &str,
    custid: u64,
    extra: &[(&str, String)],
    retry_override: Option<&RetryConfig>,
) -> Result<Value, IrError> {
    let mut url = client.endpoint(path)?;
    {
        let mut qp = url.query_pairs_mut();
        for (k, v) in extra {
            qp.append_pair(k, v);
        }
        qp.append_pair("custid", &custid.to_string());
    }
    client
        .fetch_json(client.http().get(url), endpoint, &custid.to_string(), retry_override)
        .await
}

pub(super) async fn chart(
    client: &IrClient,
    custid: u64,
    category: Category,
    chart_type: ChartType,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<ChartPoint>, IrError> {
    let mut url = client.endpoint(PATH_CHART_DATA)?;
    url.query_pairs_mut()
        .append_pair("custId", &custid.to_string())
        .append_pair("catId", &category.id().to_string())
        .append_pair("chartType", &chart_type.id().to_string());

    let v = client
        .fetch_json(client.http().get(url), "chart", &custid.to_string(), retry_override)
        .await?;
    parse_chart(&v)
}

pub(super) async fn career_stats(
    client: &IrClient,
    custid: u64,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<CareerStats>, IrError> {
    let v = get_custid_json(client, PATH_CAREER_STATS, "career_stats", custid, &[], retry_override)
        .await?;
    let rows: Vec<StatsRow> = wire::rows_from(v, "career stats")?;
    Ok(rows.into_iter().map(map_stats).collect())
}

pub(super) async fn yearly_stats(
    client: &IrClient,
    custid: u64,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<YearlyStats>, IrError> {
    let v = get_custid_json(client, PATH_YEARLY_STATS, "yearly_stats", custid, &[], retry_override)
        .await?;
    let rows: Vec<StatsRow> = wire::rows_from(v, "yearly stats")?;
    Ok(rows
        .into_iter()
        .map(|r| YearlyStats {
            year: r.year.as_deref().and_then(|y| y.trim().parse().ok()),
            stats: map_stats(r),
        })
        .collect())
}

pub(super) async fn last_races(
    client: &IrClient,
    custid: u64,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<LastRaceStats>, IrError> {
    let v = get_custid_json(client, PATH_LAST_RACES, "last_races", custid, &[], retry_override)
        .await?;
    let rows: Vec<LastRaceRow> = wire::rows_from(v, "last races")?;
    Ok(rows
        .into_iter()
        .map(|r| LastRaceStats {
            date: r.date,
            track_id: r.track_id,
            car_id: r.car_id,
            series_id: r.series_id,
            season_id: r.season_id,
            subsession_id: r.subsession_id,
            start_pos: r.start_pos,
            finish_pos: r.finish_pos,
            incidents: r.incidents,
            laps_led: r.laps_led,
            champ_points: r.champ_points,
            strength_of_field: r.strength_of_field,
            winner_name: r.winner_name,
        })
        .collect())
}

pub(super) async fn cars_driven(
    client: &IrClient,
    custid: u64,
    retry_override: Option<&RetryConfig>,
) -> Result<Value, IrError> {
    get_custid_json(client, PATH_CARS_DRIVEN, "cars_driven", custid, &[], retry_override).await
}

pub(super) async fn personal_bests(
    client: &IrClient,
    custid: u64,
    car_id: i64,
    retry_override: Option<&RetryConfig>,
) -> Result<Value, IrError> {
    get_custid_json(
        client,
        PATH_PERSONAL_BESTS,
        "personal_bests",
        custid,
        &[("carid", car_id.to_string())],
        retry_override,
    )
    .await
}

pub(crate) async fn driver_counts(
    client: &IrClient,
    retry_override: Option<&RetryConfig>,
) -> Result<Record, IrError> {
    let url = client.endpoint(PATH_DRIVER_COUNTS)?;
    match client
        .fetch_json(client.http().get(url), "driver_counts", "self", retry_override)
        .await?
    {
        Value::Object(map) => Ok(map),
        other => Err(IrError::Data(format!("driver counts: expected object, got {other}"))),
    }
}

pub(crate) async fn driver_status(
    client: &IrClient,
    name: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<Value, IrError> {
    let mut url = client.endpoint(PATH_DRIVER_STATUS)?;
    url.query_pairs_mut().append_pair("searchTerms", name);
    client
        .fetch_json(client.http().get(url), "driver_status", "search", retry_override)
        .await
}

/* ---------- mapping ---------- */

fn map_stats(r: StatsRow) -> CareerStats {
    CareerStats {
        category: r.category.unwrap_or_default(),
        starts: r.starts.unwrap_or(0),
        wins: r.wins.unwrap_or(0),
        win_percentage: round2(r.win_perc.unwrap_or(0.0)),
        top5: r.top5.unwrap_or(0),
        top5_percentage: round2(r.top5_perc.unwrap_or(0.0)),
        poles: r.poles.unwrap_or(0),
        avg_start: round2(r.avg_start.unwrap_or(0.0)),
        avg_finish: round2(r.avg_finish.unwrap_or(0.0)),
        total_laps: r.total_laps.unwrap_or(0),
        laps_led: r.laps_led.unwrap_or(0),
        laps_led_percentage: round2(r.laps_led_perc.unwrap_or(0.0)),
        avg_incidents_per_race: round2(r.avg_inc_per_race.unwrap_or(0.0)),
        avg_points_per_race: round2(r.avg_pts_per_race.unwrap_or(0.0)),
        total_club_points: r.total_club_points.unwrap_or(0),
    }
}

/// Chart data is a list of `[epoch_ms, value]` pairs.
pub(crate) fn parse_chart(v: &Value) -> Result<Vec<ChartPoint>, IrError> {
    let Some(points) = v.as_array() else {
        return match v {
            Value::Null => Ok(Vec::new()),
            other => Err(IrError::Data(format!("chart data: expected list, got {other}"))),
        };
    };

    points
        .iter()
        .map(|p| {
            let ms = p.get(0).and_then(Value::as_i64);
            let value = p.get(1).and_then(Value::as_f64);
            match (ms.and_then(DateTime::from_timestamp_millis), value) {
                (Some(at), Some(value)) => Ok(ChartPoint { at, value }),
                _ => Err(IrError::Data(format!("chart data: bad point {p}"))),
            }
        })
        .collect()
}
