use super::charts::ChartData;
use crate::Result;
use crate::metrics::MetricsBundle;
use chrono::{DateTime, Utc};
use core::fmt::Write;
use ohno::IntoAppError;
use serde::Serialize;

#[derive(Serialize)]
struct Document<'a> {
    generated: String,
    metrics: &'a MetricsBundle,
    charts: &'a ChartData,
}

/// Render the machine-readable report as pretty-printed JSON.
pub fn generate<W: Write>(
    metrics: &MetricsBundle,
    charts: &ChartData,
    generated: DateTime<Utc>,
    writer: &mut W,
) -> Result<()> {
    let document = Document {
        generated: generated.to_rfc3339(),
        metrics,
        charts,
    };

    let json = serde_json::to_string_pretty(&document).into_app_err("serializing JSON report")?;
    writeln!(writer, "{json}")?;
    Ok(())
}
