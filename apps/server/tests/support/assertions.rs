use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status");
}

/// The `detail` message of an error body.
pub fn detail(body: &Value) -> anyhow::Result<&str> {
    body.get("detail")
        .and_then(|v| v.as_str())
        .context("error body has a string `detail`")
}

/// `id` of every object in a JSON array, in order.
pub fn ids(body: &Value) -> anyhow::Result<Vec<String>> {
    let items = body.as_array().context("body is a JSON array")?;
    Ok(items
        .iter()
        .filter_map(|item| item.get("id").and_then(|v| v.as_str()))
        .map(str::to_string)
        .collect())
}

/// `distance_km` of every object in a JSON array, in order.
pub fn distances(body: &Value) -> anyhow::Result<Vec<f64>> {
    let items = body.as_array().context("body is a JSON array")?;
    items
        .iter()
        .map(|item| {
            item.get("distance_km")
                .and_then(|v| v.as_f64())
                .context("item has numeric distance_km")
        })
        .collect()
}

pub fn assert_sorted_by_distance(body: &Value) -> anyhow::Result<()> {
    let d = distances(body)?;
    assert!(
        d.windows(2).all(|w| w[0] <= w[1]),
        "results not sorted by distance: {d:?}"
    );
    Ok(())
}
