use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::ResultsArchiveBuilder;
use super::model::{EventResults, Period};
use crate::core::client::{
    PATH_EVENT_RESULT_PAGE, PATH_EVENT_RESULTS_CSV, PATH_LAP_CHART, PATH_LAPS,
    PATH_RESULTS_ARCHIVE, PATH_SUBSESSION_RESULTS, PATH_WORLD_RECORDS,
};
use crate::core::models::{bound, day_span_ms, page_bounds};
use crate::core::wire::{self, ColumnMap};
use crate::core::{EventType, IrClient, IrError, LicenseLevel, Page, Record, RetryConfig};

/* ---------- results archive ---------- */

fn flag(on: bool) -> String {
    u8::from(on).to_string()
}

pub(super) fn archive_form(
    b: &ResultsArchiveBuilder,
    custid: u64,
) -> Result<Vec<(&'static str, String)>, IrError> {
    let (lower, upper) = page_bounds(b.page);
    let mut form = vec![
        ("format", "json".to_string()),
        ("custid", custid.to_string()),
        ("seriesid", bound(b.series)),
        ("carid", bound(b.car)),
        ("trackid", bound(b.track)),
        ("lowerbound", lower.to_string()),
        ("upperbound", upper.to_string()),
        ("sort", b.sort.as_str().to_string()),
        ("order", b.order.as_str().to_string()),
        ("category", b.category.id().to_string()),
    ];
    for ev in EventType::ALL {
        form.push((ev.archive_flag(), flag(b.events.contains(&ev))));
    }
    form.push(("showofficial", flag(b.official)));
    form.push(("showunofficial", flag(b.unofficial)));
    for lic in LicenseLevel::ALL {
        form.push((lic.archive_flag(), flag(b.licenses.contains(&lic))));
    }

    match b.period {
        Some(Period::Season {
            year,
            quarter,
            race_week,
        }) => {
            form.push(("seasonyear", year.to_string()));
            form.push(("seasonquarter", quarter.to_string()));
            if let Some(week) = race_week {
                form.push(("raceweek", week.to_string()));
            }
        }
        Some(Period::Dates { start, end }) => {
            let (low, high) = day_span_ms(start, end)?;
            form.push(("starttime_low", low.to_string()));
            form.push(("starttime_high", high.to_string()));
        }
        None => {}
    }
    Ok(form)
}

pub(super) async fn results_archive(
    client: &IrClient,
    b: &ResultsArchiveBuilder,
    retry_override: Option<&RetryConfig>,
) -> Result<Page<Record>, IrError> {
    let custid = match b.driver {
        Some(id) => id,
        None => client.require_custid().await?,
    };
    let form = archive_form(b, custid)?;
    let req = client
        .http()
        .post(client.endpoint(PATH_RESULTS_ARCHIVE)?)
        .form(&form);
    let root = client
        .fetch_json(req, "results_archive", &custid.to_string(), retry_override)
        .await?;
    wire::tabular_page(&root)
}

/* ---------- one subsession ---------- */

pub(super) async fn event_results(
    client: &IrClient,
    subsession: u64,
    sim_session: i32,
    retry_override: Option<&RetryConfig>,
) -> Result<EventResults, IrError> {
    let mut url = client.endpoint(PATH_EVENT_RESULTS_CSV)?;
    url.query_pairs_mut()
        .append_pair("subsessionid", &subsession.to_string())
        .append_pair("simsesnum", &sim_session.to_string())
        .append_pair("includeSummary", "1");
    let text = client
        .fetch_page(
            client.http().get(url),
            "event_results",
            &subsession.to_string(),
            "csv",
            retry_override,
        )
        .await?;
    parse_event_csv(&text)
}

fn csv_cell(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = s.parse::<i64>() {
            return Value::from(n);
        }
    }
    Value::String(s.to_string())
}

/// Summary header, summary values, results header, then one line per driver.
pub(super) fn parse_event_csv(text: &str) -> Result<EventResults, IrError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.iter().all(str::is_empty) {
            continue;
        }
        records.push(rec);
    }

    let [summary_header, summary, results_header, rows @ ..] = records.as_slice() else {
        return Err(IrError::Data(format!(
            "event results CSV has {} non-empty lines, expected at least 3",
            records.len()
        )));
    };

    let info: Record = summary_header
        .iter()
        .zip(summary.iter())
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();

    let columns: Vec<String> = results_header
        .iter()
        .map(|h| {
            h.to_lowercase()
                .chars()
                .filter(char::is_ascii_lowercase)
                .collect()
        })
        .collect();

    let rows = rows
        .iter()
        .map(|r| {
            columns
                .iter()
                .zip(r.iter())
                .map(|(k, v)| (k.clone(), csv_cell(v)))
                .collect()
        })
        .collect();

    Ok(EventResults { info, rows })
}

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static OPEN_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\s*(\w)").expect("open key regex"));
static NEXT_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*(\w)").expect("next key regex"));
static KEY_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w):").expect("key end regex"));
static LAP_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#":"(\d)":"#).expect("lap time regex"));
static PARSE_FLOAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"parseFloat\(("\d\.\d\d")\)"#).expect("parseFloat regex"));

/// Fields read from the page's `resultOBJ` script object.
const RESULT_FIELDS: [&str; 16] = [
    "custid",
    "isOfficial",
    "carID",
    "avglaptime",
    "fastestlaptime",
    "fastestlaptimems",
    "fastestlapnum",
    "bestnlapstime",
    "bestnlapsnum",
    "lapscomplete",
    "incidents",
    "newttRating",
    "oldttRating",
    "sr_new",
    "sr_old",
    "reasonOutName",
];

pub(super) async fn event_result_detail(
    client: &IrClient,
    subsession: u64,
    custid: u64,
    retry_override: Option<&RetryConfig>,
) -> Result<Record, IrError> {
    let mut url = client.endpoint(PATH_EVENT_RESULT_PAGE)?;
    url.query_pairs_mut()
        .append_pair("subsessionid", &subsession.to_string())
        .append_pair("custid", &custid.to_string());
    let html = client
        .fetch_page(
            client.http().get(url),
            "event_result",
            &format!("{subsession}_{custid}"),
            "html",
            retry_override,
        )
        .await?;
    parse_result_object(&html)
}

/// The page holds a JavaScript object literal (unquoted keys, `parseFloat(..)` calls),
/// not JSON. Each wanted `key:value,` slice is cut out and quoted into a JSON object.
pub(super) fn parse_result_object(html: &str) -> Result<Record, IrError> {
    const MARKER: &str = "var resultOBJ =";

    let page = WS_RE.replace_all(html, " ");
    let start = page
        .find(MARKER)
        .ok_or_else(|| IrError::Data("result page without `resultOBJ`".into()))?
        + MARKER.len();
    let end = page[start..]
        .find("};")
        .map(|i| start + i + 1)
        .ok_or_else(|| IrError::Data("`resultOBJ` is unterminated".into()))?;
    let obj = page[start..end].replace('+', " ");

    let mut out = String::new();
    for field in RESULT_FIELDS {
        let from = obj
            .find(field)
            .ok_or_else(|| IrError::Data(format!("`resultOBJ` has no `{field}`")))?;
        let to = obj[from..]
            .find(',')
            .map(|i| from + i + 1)
            .ok_or_else(|| IrError::Data(format!("`resultOBJ` field `{field}` is unterminated")))?;
        out.push_str(&obj[from..to]);
    }

    let out = OPEN_KEY_RE.replace_all(&out, "{\"${1}");
    let out = NEXT_KEY_RE.replace_all(&out, ",\"${1}");
    let out = KEY_END_RE.replace_all(&out, "${1}\":");
    let out = LAP_TIME_RE.replace_all(&out, ":\"${1}:");
    let out = PARSE_FLOAT_RE.replace_all(&out, "${1}");

    let json = format!("{{\"{}}}", out.trim().trim_end_matches(','));
    match serde_json::from_str(&json)? {
        Value::Object(rec) => Ok(rec),
        other => Err(IrError::Data(format!("`resultOBJ` is not an object: {other}"))),
    }
}

pub(super) async fn subsession_results(
    client: &IrClient,
    subsession: u64,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Value>, IrError> {
    let mut url = client.endpoint(PATH_SUBSESSION_RESULTS)?;
    url.query_pairs_mut()
        .append_pair("subsessionID", &subsession.to_string());
    let mut root = client
        .fetch_json(
            client.http().get(url),
            "subsession_results",
            &subsession.to_string(),
            retry_override,
        )
        .await?;
    match root.get_mut("rows").map(Value::take) {
        Some(Value::Array(rows)) => Ok(rows),
        Some(Value::Null) => Ok(Vec::new()),
        _ => Err(IrError::Data("subsession results without `rows`".into())),
    }
}

pub(super) async fn laps(
    client: &IrClient,
    subsession: u64,
    custid: u64,
    sim_session: i32,
    retry_override: Option<&RetryConfig>,
) -> Result<Value, IrError> {
    let mut url = client.endpoint(PATH_LAPS)?;
    url.query_pairs_mut()
        .append_pair("subsessionid", &subsession.to_string())
        .append_pair("groupid", &custid.to_string())
        .append_pair("simsessnum", &sim_session.to_string());
    client
        .fetch_json(
            client.http().get(url),
            "laps",
            &format!("{subsession}_{custid}"),
            retry_override,
        )
        .await
}

pub(super) async fn lap_chart(
    client: &IrClient,
    subsession: u64,
    retry_override: Option<&RetryConfig>,
) -> Result<Value, IrError> {
    let mut url = client.endpoint(PATH_LAP_CHART)?;
    url.query_pairs_mut()
        .append_pair("subsessionid", &subsession.to_string())
        .append_pair("carclassid", "-1");
    client
        .fetch_json(
            client.http().get(url),
            "lap_chart",
            &subsession.to_string(),
            retry_override,
        )
        .await
}

pub(super) fn best_lap_of(laps: &Value) -> Result<Value, IrError> {
    laps.pointer("/drivers/0/bestlaptime")
        .cloned()
        .ok_or_else(|| IrError::Data("lap data without a best lap".into()))
}

/* ---------- world records ---------- */

pub(crate) async fn world_record(
    client: &IrClient,
    year: u16,
    quarter: u8,
    car: i64,
    track: i64,
) -> Result<Option<f64>, IrError> {
    let custid = client.require_custid().await?;
    let mut url = client.endpoint(PATH_WORLD_RECORDS)?;
    url.query_pairs_mut()
        .append_pair("seasonyear", &year.to_string())
        .append_pair("seasonquarter", &quarter.to_string())
        .append_pair("carid", &car.to_string())
        .append_pair("trackid", &track.to_string())
        .append_pair("custid", &custid.to_string())
        .append_pair("format", "json")
        .append_pair("upperbound", "1");
    let root = client
        .fetch_json(
            client.http().get(url),
            "world_records",
            &format!("{car}_{track}"),
            None,
        )
        .await?;
    Ok(record_time(&root))
}

/// Lap time of the record row, in seconds.
pub(super) fn record_time(root: &Value) -> Option<f64> {
    let columns = ColumnMap::from_root(root).ok()?;
    let row = root.pointer("/d/r/1")?;
    let key = columns.key_for("race")?;
    let raw = match row.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => return n.as_f64(),
        _ => return None,
    };
    match raw.split_once("%3A") {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.trim().parse().ok()?;
            let seconds: f64 = seconds.trim().parse().ok()?;
            (0.0..60.0)
                .contains(&seconds)
                .then(|| f64::from(minutes) * 60.0 + seconds)
        }
        None => raw.trim().parse().ok(),
    }
}
