use serde_json::Value;

use super::HostedResultsBuilder;
use crate::core::client::PATH_HOSTED_RESULTS;
use crate::core::models::{day_span_ms, page_bounds};
use crate::core::wire;
use crate::core::{IrClient, IrError, Page, RetryConfig};

pub(super) fn hosted_form(b: &HostedResultsBuilder) -> Result<Vec<(&'static str, String)>, IrError> {
    let (lower, upper) = page_bounds(b.page);
    let mut form = vec![
        ("sort", b.sort.as_str().to_string()),
        ("order", b.order.as_str().to_string()),
        ("lowerbound", lower.to_string()),
        ("upperbound", upper.to_string()),
    ];
    if let Some(host) = &b.host {
        form.push(("sessionhost", host.clone()));
    }
    if let Some(name) = &b.session_name {
        form.push(("sessionname", name.clone()));
    }
    if let Some((start, end)) = b.dates {
        let (low, high) = day_span_ms(start, end)?;
        form.push(("starttime_lowerbound", low.to_string()));
        form.push(("starttime_upperbound", high.to_string()));
    }
    Ok(form)
}

pub(super) async fn hosted_results(
    client: &IrClient,
    b: &HostedResultsBuilder,
    retry_override: Option<&RetryConfig>,
) -> Result<Page<Value>, IrError> {
    let form = hosted_form(b)?;
    let req = client
        .http()
        .post(client.endpoint(PATH_HOSTED_RESULTS)?)
        .form(&form);
    let root = client
        .fetch_json(req, "hosted_results", &b.page.to_string(), retry_override)
        .await?;
    hosted_page(root)
}

/// Hosted results come as plain `rows` with a `rowcount`, not the tabular shape.
pub(super) fn hosted_page(mut root: Value) -> Result<Page<Value>, IrError> {
    let total = root.get("rowcount").and_then(wire::as_u64).unwrap_or(0);
    let items = match root.get_mut("rows").map(Value::take) {
        Some(Value::Array(rows)) => rows,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => return Err(IrError::Data("hosted results `rows` is not a list".into())),
    };
    Ok(Page { items, total })
}
