use super::{DriverSearchBuilder, Span};
use crate::core::client::PATH_DRIVER_STATS;
use crate::core::models::{bound, page_bounds};
use crate::core::wire;
use crate::core::{IrClient, IrError, Page, Record, RetryConfig};

fn span(form: &mut Vec<(&'static str, String)>, low: &'static str, high: &'static str, s: Span<u32>) {
    form.push((low, bound(s.0)));
    form.push((high, bound(s.1)));
}

pub(super) fn search_form(b: &DriverSearchBuilder, custid: u64) -> Vec<(&'static str, String)> {
    let (lower, upper) = page_bounds(b.page);
    let mut form = vec![
        ("custid", custid.to_string()),
        ("search", "null".to_string()),
        ("friend", bound(None::<i64>)),
        ("watched", bound(None::<i64>)),
        ("recent", bound(None::<i64>)),
        ("country", b.country.clone().unwrap_or_else(|| "null".to_string())),
        ("category", b.category.id().to_string()),
        ("classlow", bound(b.license.0.map(|l| i64::from(l.id())))),
        ("classhigh", bound(b.license.1.map(|l| i64::from(l.id())))),
    ];
    span(&mut form, "iratinglow", "iratinghigh", b.irating);
    span(&mut form, "ttratinglow", "ttratinghigh", b.ttrating);
    span(&mut form, "avgstartlow", "avgstarthigh", b.avg_start);
    span(&mut form, "avgfinishlow", "avgfinishhigh", b.avg_finish);
    span(&mut form, "avgpointslow", "avgpointshigh", b.avg_points);
    span(&mut form, "avgincidentslow", "avgincidentshigh", b.avg_incidents);
    form.extend([
        ("lowerbound", lower.to_string()),
        ("upperbound", upper.to_string()),
        ("sort", b.sort.as_str().to_string()),
        ("order", b.order.as_str().to_string()),
        ("active", u8::from(b.active).to_string()),
    ]);
    form
}

pub(super) async fn driver_search(
    client: &IrClient,
    b: &DriverSearchBuilder,
    retry_override: Option<&RetryConfig>,
) -> Result<Page<Record>, IrError> {
    let custid = client.require_custid().await?;
    let form = search_form(b, custid);
    let req = client.http().post(client.endpoint(PATH_DRIVER_STATS)?).form(&form);
    let root = client
        .fetch_json(req, "driver_stats", &b.page.to_string(), retry_override)
        .await?;
    Ok(drop_own_row(wire::tabular_page(&root)?, custid))
}

/// The first row is the caller's own entry whenever the caller is not in the results.
fn drop_own_row(mut page: Page<Record>, custid: u64) -> Page<Record> {
    let is_own = page
        .items
        .first()
        .and_then(|r| r.get("custid"))
        .and_then(wire::as_u64)
        == Some(custid);
    if is_own {
        page.items.remove(0);
    }
    page
}
