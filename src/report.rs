//! Console and JSON rendering of an [`AnalysisReport`].
//!
//! Console layout:
//! 1. Training metrics per region (RMSE, R², mean prediction)
//! 2. Bootstrap profit table (mean, CI bounds, loss risk), best region first
//! 3. Recommendation line

use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

use crate::types::AnalysisReport;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

const RULE: &str = "----------------------------------------";

/// Training metrics block.
pub fn render_training(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Training results per region ===");
    for r in &report.regions {
        let m = &r.metrics;
        let _ = writeln!(out, "Region {}", r.region);
        let _ = writeln!(out, "  RMSE:       {:.2}", m.rmse);
        let _ = writeln!(out, "  R²:         {:.3}", m.r2);
        let _ = writeln!(out, "  Mean pred:  {:.2}", m.mean_predicted);
        let _ = writeln!(
            out,
            "  Mean real:  {:.2} ({} train / {} validation wells)",
            m.mean_actual, m.train_rows, m.validation_rows
        );
        let _ = writeln!(out, "{RULE}");
    }
    out
}

/// Bootstrap profit table, rows in report order (best mean profit first).
pub fn render_profit_table(report: &AnalysisReport) -> String {
    let p = &report.parameters;
    let ci_pct = p.confidence_level * 100.0;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "=== Estimated profit and risk (bootstrap, {} iterations) ===",
        p.iterations
    );
    let _ = writeln!(
        out,
        "{:<8} {:>18} {:>18} {:>18} {:>12}",
        "Region",
        "Mean profit (USD)",
        format!("CI{ci_pct:.0}% low (USD)"),
        format!("CI{ci_pct:.0}% high (USD)"),
        "Loss risk %"
    );
    for r in &report.regions {
        let b = &r.bootstrap;
        let flag = if r.within_risk_limit { "" } else { "  ◀ over risk limit" };
        let _ = writeln!(
            out,
            "{:<8} {:>18.2} {:>18.2} {:>18.2} {:>12.2}{}",
            r.region,
            b.mean_profit,
            b.ci_low,
            b.ci_high,
            b.loss_risk_percent(),
            flag
        );
    }
    let _ = writeln!(
        out,
        "Break-even: {:.2} thousand barrels per developed well ({} of {} sampled wells)",
        p.break_even_product_per_well, p.top_wells, p.wells_per_sample
    );
    out
}

/// One-line recommendation.
pub fn render_recommendation(report: &AnalysisReport) -> String {
    let limit_pct = report.parameters.max_loss_risk * 100.0;
    match report.recommended_summary() {
        Some(r) => format!(
            "Recommended region: {} (mean profit {:.2} USD, loss risk {:.2}% < {:.2}%)",
            r.region,
            r.bootstrap.mean_profit,
            r.bootstrap.loss_risk_percent(),
            limit_pct
        ),
        None => format!("No region meets the loss-risk limit of {limit_pct:.2}%"),
    }
}

/// Full console report.
pub fn render(report: &AnalysisReport) -> String {
    format!(
        "{}\n{}\n{}\n",
        render_training(report),
        render_profit_table(report),
        render_recommendation(report)
    )
}

/// Pretty-printed JSON of the whole report.
pub fn to_json(report: &AnalysisReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the JSON report to `path`.
pub fn write_json(report: &AnalysisReport, path: &Path) -> Result<(), ReportError> {
    let json = to_json(report)?;
    std::fs::write(path, json).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), "JSON report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BootstrapResult, LinearCoefficients, ModelMetrics, RegionSummary, ReportParameters,
    };
    use chrono::Utc;

    fn report(recommended: Option<&str>) -> AnalysisReport {
        let region = |name: &str, mean_profit: f64, loss_risk: f64| RegionSummary {
            region: name.to_string(),
            metrics: ModelMetrics {
                rmse: 37.756_6,
                r2: 0.279_9,
                mean_predicted: 92.398_8,
                mean_actual: 92.326,
                train_rows: 75_000,
                validation_rows: 25_000,
            },
            coefficients: LinearCoefficients {
                intercept: 77.0,
                coefficients: [3.8, -14.2, 6.6],
            },
            bootstrap: BootstrapResult {
                profits: vec![1.0, 2.0],
                mean_profit,
                std_dev: 1.0,
                ci_low: mean_profit - 1.0,
                ci_high: mean_profit + 1.0,
                confidence_level: 0.95,
                loss_risk,
            },
            mean_product: 92.5,
            within_risk_limit: loss_risk < 0.025,
        };

        AnalysisReport {
            generated_at: Utc::now(),
            parameters: ReportParameters {
                seed: 12_345,
                budget_usd: 10_000_000.0,
                revenue_per_unit_usd: 4_500.0,
                wells_per_sample: 500,
                top_wells: 200,
                iterations: 1_000,
                confidence_level: 0.95,
                max_loss_risk: 0.025,
                break_even_product_per_well: 11.111,
            },
            regions: vec![region("1", 200.5, 0.0), region("0", 100.25, 0.1)],
            recommended: recommended.map(str::to_string),
        }
    }

    #[test]
    fn test_training_block_formats_metrics() {
        let text = render_training(&report(None));
        assert!(text.contains("Region 1"));
        assert!(text.contains("RMSE:       37.76"));
        assert!(text.contains("R²:         0.280"));
        assert!(text.contains("Mean pred:  92.40"));
    }

    #[test]
    fn test_profit_table_rows_and_flags() {
        let text = render_profit_table(&report(Some("1")));
        assert!(text.contains("CI95% low (USD)"));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].starts_with("1 "));
        assert!(lines[2].contains("200.50"));
        assert!(lines[3].starts_with("0 "));
        assert!(lines[3].contains("10.00"));
        assert!(lines[3].contains("over risk limit"));
        assert!(text.contains("Break-even: 11.11"));
    }

    #[test]
    fn test_recommendation_line() {
        assert!(render_recommendation(&report(Some("1"))).starts_with("Recommended region: 1"));
        assert_eq!(
            render_recommendation(&report(None)),
            "No region meets the loss-risk limit of 2.50%"
        );
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json(&report(Some("1")), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["recommended"], "1");
        assert_eq!(value["regions"][0]["region"], "1");
        assert_eq!(value["parameters"]["top_wells"], 200);
        assert!(value["regions"][0]["bootstrap"]["profits"].is_array());
    }
}
