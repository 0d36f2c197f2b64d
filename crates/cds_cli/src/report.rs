//! Report assembly and rendering.
//!
//! A [`Report`] gathers the echoed inputs, hazard curve, PV rows and par
//! reconciliation of one run and renders them as a console table, a JSON
//! document or a flat CSV with one record per tenor.

use std::io::Write;

use cds_core::market_data::curves::{CreditCurve, HazardCurve};
use cds_core::market_data::CurveError;
use cds_models::instruments::credit::{CdsValuation, BASIS_POINTS};
use cds_optimiser::calibration::{CalibrationResult, ParReconciliation, ScenarioAnalysis};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::Result;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Console table
    #[default]
    Table,
    /// Pretty-printed JSON document
    Json,
    /// One CSV record per tenor
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            )),
        }
    }
}

/// A report that renders in every [`OutputFormat`].
pub trait Render {
    /// Render in `format` to `writer`.
    fn render<W: Write>(&self, format: OutputFormat, writer: &mut W) -> Result<()>;
}

/// Input parameters echoed at the top of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSummary {
    /// Notional
    pub notional: f64,
    /// Recovery rate
    pub recovery_rate: f64,
    /// Coupons per year
    pub coupon_frequency: u32,
    /// Step-in lag in days
    pub step_in_days: u32,
    /// Cash-settle lag in days
    pub cash_settle_days: u32,
    /// Day-count denominator
    pub day_count_denominator: f64,
    /// Accrual on default
    pub accrual_on_default: bool,
    /// Discount curve description
    pub discount_curve: String,
    /// Number of quotes
    pub quote_count: usize,
}

impl From<&RunConfig> for InputSummary {
    fn from(config: &RunConfig) -> Self {
        Self {
            notional: config.notional,
            recovery_rate: config.recovery_rate,
            coupon_frequency: config.coupon_frequency,
            step_in_days: config.isda.step_in_days,
            cash_settle_days: config.isda.cash_settle_days,
            day_count_denominator: config.isda.day_count_denominator,
            accrual_on_default: config.isda.accrual_on_default,
            discount_curve: config.discount_curve.to_string(),
            quote_count: config.quotes.len(),
        }
    }
}

/// One hazard segment with the survival probability at its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HazardRow {
    /// Segment start
    pub start: f64,
    /// Segment end
    pub end: f64,
    /// Hazard rate on the segment
    pub hazard_rate: f64,
    /// Survival probability at `end`
    pub survival_probability: f64,
}

/// PVs for one tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingRow {
    /// Tenor in years
    pub maturity: f64,
    /// Running coupon in basis points
    pub coupon_bps: f64,
    /// Premium leg PV
    pub premium: f64,
    /// Protection leg PV
    pub protection: f64,
    /// Protection minus premium
    pub net: f64,
    /// Scheduled coupon component
    pub coupon_pv: f64,
    /// Accrual-on-default component
    pub accrual_on_default_pv: f64,
    /// Coupon annuity at unit spread
    pub pv01: f64,
    /// Coupon annuity per basis point
    pub pv01_per_bp: f64,
}

impl From<&CdsValuation<f64>> for PricingRow {
    fn from(v: &CdsValuation<f64>) -> Self {
        Self {
            maturity: v.maturity,
            coupon_bps: v.coupon * BASIS_POINTS,
            premium: v.premium_pv,
            protection: v.protection_pv,
            net: v.net_price,
            coupon_pv: v.coupon_pv,
            accrual_on_default_pv: v.accrual_on_default_pv,
            pv01: v.pv01,
            pv01_per_bp: v.pv01_per_bp(),
        }
    }
}

/// Flat per-tenor record for CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TenorRecord {
    /// Tenor in years
    pub maturity: f64,
    /// Hazard rate at the tenor
    pub hazard_rate: f64,
    /// Survival probability at the tenor
    pub survival_probability: f64,
    /// Premium leg PV per unit notional
    pub premium: f64,
    /// Protection leg PV per unit notional
    pub protection: f64,
    /// Net PV per unit notional
    pub net: f64,
    /// Coupon annuity per basis point
    pub pv01_per_bp: f64,
    /// Quoted par spread
    pub market_bps: f64,
    /// Model par spread
    pub model_bps: f64,
    /// Model minus market
    pub error_bps: f64,
}

/// Everything a run reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Echoed inputs
    pub inputs: InputSummary,
    /// Hazard segments
    pub hazard: Vec<HazardRow>,
    /// PVs per unit notional
    pub pricing: Vec<PricingRow>,
    /// PVs scaled by the notional, when it is not 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled_pricing: Option<Vec<PricingRow>>,
    /// Market against model par spreads
    pub reconciliation: Vec<ParReconciliation<f64>>,
    #[serde(skip)]
    tenors: Vec<(f64, f64)>,
}

impl Report {
    /// Assemble a report from a hazard curve and per-quote valuations.
    pub fn new(
        inputs: InputSummary,
        curve: &HazardCurve<f64>,
        valuations: &[CdsValuation<f64>],
        reconciliation: Vec<ParReconciliation<f64>>,
    ) -> std::result::Result<Self, CurveError> {
        let hazard = curve
            .segments()
            .iter()
            .map(|s| {
                Ok(HazardRow {
                    start: s.start,
                    end: s.end,
                    hazard_rate: s.hazard_rate,
                    survival_probability: curve.survival_probability(s.end)?,
                })
            })
            .collect::<std::result::Result<Vec<_>, CurveError>>()?;

        let tenors = valuations
            .iter()
            .map(|v| {
                Ok((
                    curve.hazard_rate(v.maturity)?,
                    curve.survival_probability(v.maturity)?,
                ))
            })
            .collect::<std::result::Result<Vec<_>, CurveError>>()?;

        let pricing: Vec<PricingRow> = valuations.iter().map(PricingRow::from).collect();
        let notional = inputs.notional;
        let scaled_pricing = (notional != 1.0).then(|| {
            valuations
                .iter()
                .map(|v| PricingRow::from(&v.scaled(notional)))
                .collect()
        });

        Ok(Self {
            inputs,
            hazard,
            pricing,
            scaled_pricing,
            reconciliation,
            tenors,
        })
    }

    /// One flat record per tenor.
    pub fn tenor_records(&self) -> Vec<TenorRecord> {
        self.pricing
            .iter()
            .zip(&self.reconciliation)
            .zip(&self.tenors)
            .map(|((p, r), &(hazard_rate, survival_probability))| TenorRecord {
                maturity: p.maturity,
                hazard_rate,
                survival_probability,
                premium: p.premium,
                protection: p.protection,
                net: p.net,
                pv01_per_bp: p.pv01_per_bp,
                market_bps: r.market_bps,
                model_bps: r.model_bps,
                error_bps: r.error_bps,
            })
            .collect()
    }

    fn render_table<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let i = &self.inputs;
        writeln!(w, "Input parameters:")?;
        writeln!(w, "  Notional:                      {:.2}", i.notional)?;
        writeln!(w, "  Recovery rate:                 {:.2}%", i.recovery_rate * 100.0)?;
        writeln!(w, "  Coupon frequency:              {}x per year", i.coupon_frequency)?;
        writeln!(
            w,
            "  Step-in / cash-settle (days):  {} / {}",
            i.step_in_days, i.cash_settle_days
        )?;
        writeln!(w, "  Day count:                     ACT/{}", i.day_count_denominator)?;
        writeln!(w, "  Accrual on default:            {}", i.accrual_on_default)?;
        writeln!(w, "  Discount curve:                {}", i.discount_curve)?;
        writeln!(w, "  Quotes loaded:                 {} maturities", i.quote_count)?;

        writeln!(w, "\nHazard rates:")?;
        writeln!(w, "┌────────────┬────────────┬────────────┬────────────┐")?;
        writeln!(w, "│ Start      │ End        │ Hazard     │ Survival   │")?;
        writeln!(w, "├────────────┼────────────┼────────────┼────────────┤")?;
        for row in &self.hazard {
            writeln!(
                w,
                "│ {:>9.4}y │ {:>9.4}y │ {:>9.4}% │ {:>10.6} │",
                row.start,
                row.end,
                row.hazard_rate * 100.0,
                row.survival_probability
            )?;
        }
        writeln!(w, "└────────────┴────────────┴────────────┴────────────┘")?;

        writeln!(w, "\nCDS PVs per unit notional:")?;
        write_pricing_table(w, &self.pricing, 6)?;

        if let Some(scaled) = &self.scaled_pricing {
            writeln!(w, "\nScaled PVs for notional {:.2}:", i.notional)?;
            write_pricing_table(w, scaled, 2)?;
        }

        if let Some(last) = self.pricing.last() {
            writeln!(w, "\nLast maturity premium breakdown:")?;
            writeln!(w, "  Coupons:             {:.6}", last.coupon_pv)?;
            writeln!(w, "  Accrual on default:  {:.6}", last.accrual_on_default_pv)?;
        }

        writeln!(w, "\nValidation vs market par spreads:")?;
        writeln!(w, "┌────────────┬──────────────┬──────────────┬──────────────┐")?;
        writeln!(w, "│ Maturity   │ Market (bps) │ Model (bps)  │ Error (bps)  │")?;
        writeln!(w, "├────────────┼──────────────┼──────────────┼──────────────┤")?;
        for row in &self.reconciliation {
            writeln!(
                w,
                "│ {:>9.4}y │ {:>12.4} │ {:>12.4} │ {:>12.2e} │",
                row.maturity, row.market_bps, row.model_bps, row.error_bps
            )?;
        }
        writeln!(w, "└────────────┴──────────────┴──────────────┴──────────────┘")?;
        Ok(())
    }
}

impl Render for Report {
    fn render<W: Write>(&self, format: OutputFormat, writer: &mut W) -> Result<()> {
        match format {
            OutputFormat::Table => self.render_table(writer)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)?;
                writeln!(writer)?;
            }
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(writer);
                for record in self.tenor_records() {
                    wtr.serialize(record)?;
                }
                wtr.flush()?;
            }
        }
        Ok(())
    }
}

fn write_pricing_table<W: Write>(
    w: &mut W,
    rows: &[PricingRow],
    precision: usize,
) -> std::io::Result<()> {
    writeln!(w, "┌────────────┬──────────────┬──────────────┬──────────────┬──────────────┐")?;
    writeln!(w, "│ Maturity   │ Premium      │ Protection   │ Net          │ PV01/bp      │")?;
    writeln!(w, "├────────────┼──────────────┼──────────────┼──────────────┼──────────────┤")?;
    for row in rows {
        writeln!(
            w,
            "│ {:>9.4}y │ {:>12.p$} │ {:>12.p$} │ {:>12.p$} │ {:>12.p$} │",
            row.maturity,
            row.premium,
            row.protection,
            row.net,
            row.pv01_per_bp,
            p = precision
        )?;
    }
    writeln!(w, "└────────────┴──────────────┴──────────────┴──────────────┴──────────────┘")?;
    Ok(())
}

/// One scenario against the base calibration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRow {
    /// Shift label, e.g. `+25bp` or `x0.5`
    pub scenario: String,
    /// Reference-tenor par spread
    pub reference_par_bps: f64,
    /// Change against the base
    pub reference_par_change_bps: f64,
    /// Total net price per unit notional
    pub total_net_price: f64,
    /// Change against the base
    pub net_price_change: f64,
    /// Calibrated hazard rate per quoted tenor
    pub hazard_rates: Vec<f64>,
}

/// Flat per-scenario, per-tenor record for CSV output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRecord {
    /// Shift label
    pub scenario: String,
    /// Tenor in years
    pub maturity: f64,
    /// Calibrated hazard rate on the segment ending at `maturity`
    pub hazard_rate: f64,
    /// Reference-tenor par spread
    pub reference_par_bps: f64,
    /// Change against the base
    pub reference_par_change_bps: f64,
    /// Total net price per unit notional
    pub total_net_price: f64,
    /// Change against the base
    pub net_price_change: f64,
}

/// Spread-scenario sensitivity report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    /// Tenor whose par spread is tracked
    pub reference_maturity: f64,
    /// Quoted tenors
    pub tenors: Vec<f64>,
    /// Base hazard rate per tenor
    pub base_hazard_rates: Vec<f64>,
    /// One row per shift
    pub rows: Vec<ScenarioRow>,
}

impl From<&ScenarioAnalysis<f64>> for ScenarioReport {
    fn from(analysis: &ScenarioAnalysis<f64>) -> Self {
        let hazard_rates = |result: &CalibrationResult<f64>| -> Vec<f64> {
            result.hazard_pillars().into_iter().map(|(_, rate)| rate).collect()
        };
        let rows = analysis
            .sensitivities()
            .into_iter()
            .zip(&analysis.scenarios)
            .map(|(row, scenario)| ScenarioRow {
                scenario: row.shift.to_string(),
                reference_par_bps: row.reference_par_bps,
                reference_par_change_bps: row.reference_par_change_bps,
                total_net_price: row.total_net_price,
                net_price_change: row.net_price_change,
                hazard_rates: hazard_rates(&scenario.result),
            })
            .collect();

        Self {
            reference_maturity: analysis.reference_maturity,
            tenors: analysis.base.result.quotes.iter().map(|q| q.maturity).collect(),
            base_hazard_rates: hazard_rates(&analysis.base.result),
            rows,
        }
    }
}

impl ScenarioReport {
    /// One flat record per scenario and tenor.
    pub fn records(&self) -> Vec<ScenarioRecord> {
        self.rows
            .iter()
            .flat_map(|row| {
                self.tenors
                    .iter()
                    .zip(&row.hazard_rates)
                    .map(move |(&maturity, &hazard_rate)| ScenarioRecord {
                        scenario: row.scenario.clone(),
                        maturity,
                        hazard_rate,
                        reference_par_bps: row.reference_par_bps,
                        reference_par_change_bps: row.reference_par_change_bps,
                        total_net_price: row.total_net_price,
                        net_price_change: row.net_price_change,
                    })
            })
            .collect()
    }

    fn render_table<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "Spread sensitivity ({}y par spread):", self.reference_maturity)?;
        writeln!(w, "┌────────────┬──────────────┬──────────────┬──────────────┬──────────────┐")?;
        writeln!(w, "│ Scenario   │ Par (bps)    │ Δ Par (bps)  │ Net PV       │ Δ Net PV     │")?;
        writeln!(w, "├────────────┼──────────────┼──────────────┼──────────────┼──────────────┤")?;
        for row in &self.rows {
            writeln!(
                w,
                "│ {:<10} │ {:>12.4} │ {:>+12.4} │ {:>12.6} │ {:>+12.6} │",
                row.scenario,
                row.reference_par_bps,
                row.reference_par_change_bps,
                row.total_net_price,
                row.net_price_change
            )?;
        }
        writeln!(w, "└────────────┴──────────────┴──────────────┴──────────────┴──────────────┘")?;

        writeln!(w, "\nHazard rates (%) by scenario:")?;
        write!(w, "  {:<10}", "Tenor")?;
        write!(w, " {:>10}", "base")?;
        for row in &self.rows {
            write!(w, " {:>10}", row.scenario)?;
        }
        writeln!(w)?;
        for (i, tenor) in self.tenors.iter().enumerate() {
            write!(w, "  {:<10}", format!("{}y", tenor))?;
            write!(w, " {:>10.4}", self.base_hazard_rates[i] * 100.0)?;
            for row in &self.rows {
                write!(w, " {:>10.4}", row.hazard_rates[i] * 100.0)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl Render for ScenarioReport {
    fn render<W: Write>(&self, format: OutputFormat, writer: &mut W) -> Result<()> {
        match format {
            OutputFormat::Table => self.render_table(writer)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)?;
                writeln!(writer)?;
            }
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(writer);
                for record in self.records() {
                    wtr.serialize(record)?;
                }
                wtr.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cds_core::market_data::curves::DiscountCurve;
    use cds_models::instruments::credit::{CdsQuote, ContractTerms, ValuationEngine};

    fn sample_report(notional: f64) -> Report {
        let discount = DiscountCurve::flat(0.015).unwrap();
        let curve = HazardCurve::from_pillars(&[1.0, 3.0], &[0.02, 0.025]).unwrap();
        let terms = ContractTerms::default();
        let engine = ValuationEngine::new(&discount, &curve, &terms).unwrap();

        let quotes = [CdsQuote::from_bps(1.0, 120.0), CdsQuote::from_bps(3.0, 140.0)];
        let valuations: Vec<_> = quotes
            .iter()
            .map(|q| engine.value_quote(q).unwrap())
            .collect();
        let reconciliation = quotes
            .iter()
            .zip(&valuations)
            .map(|(q, v)| ParReconciliation {
                maturity: q.maturity,
                market_bps: q.spread_bps(),
                model_bps: v.par_spread * BASIS_POINTS,
                error_bps: (v.par_spread - q.spread) * BASIS_POINTS,
            })
            .collect();

        let inputs = InputSummary {
            notional,
            recovery_rate: 0.4,
            coupon_frequency: 4,
            step_in_days: 1,
            cash_settle_days: 3,
            day_count_denominator: 365.0,
            accrual_on_default: true,
            discount_curve: "flat, rate=1.5000%".to_string(),
            quote_count: 2,
        };
        Report::new(inputs, &curve, &valuations, reconciliation).unwrap()
    }

    fn render(report: &Report, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        report.render(format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    // ========================================
    // Format Parsing Tests
    // ========================================

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().unwrap_err().contains("Supported"));
    }

    // ========================================
    // Assembly Tests
    // ========================================

    #[test]
    fn test_hazard_rows() {
        let report = sample_report(1.0);
        assert_eq!(report.hazard.len(), 2);
        assert_eq!(report.hazard[1].start, 1.0);
        assert!((report.hazard[1].survival_probability - (-0.07_f64).exp()).abs() < 1e-14);
        assert!(report.scaled_pricing.is_none());
    }

    #[test]
    fn test_scaled_rows_when_notional_set() {
        let report = sample_report(1_000_000.0);
        let scaled = report.scaled_pricing.as_ref().unwrap();
        let ratio = scaled[0].protection / report.pricing[0].protection;
        assert!((ratio - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_tenor_records_align() {
        let records = sample_report(1.0).tenor_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hazard_rate, 0.02);
        assert_eq!(records[1].hazard_rate, 0.025);
        assert_eq!(records[1].market_bps, 140.0);
    }

    // ========================================
    // Scenario Report Tests
    // ========================================

    fn sample_scenarios() -> ScenarioReport {
        use cds_optimiser::calibration::{HazardBootstrapper, SpreadScenarioEngine, SpreadShift};

        let discount = DiscountCurve::flat(0.015).unwrap();
        let terms = ContractTerms::default();
        let bootstrapper = HazardBootstrapper::with_defaults();
        let quotes = [CdsQuote::from_bps(1.0, 120.0), CdsQuote::from_bps(5.0, 170.0)];
        let analysis = SpreadScenarioEngine::new(&bootstrapper, &discount, &terms)
            .run(
                &quotes,
                &[SpreadShift::Parallel(-10.0), SpreadShift::Relative(0.5)],
                5.0,
            )
            .unwrap();
        ScenarioReport::from(&analysis)
    }

    #[test]
    fn test_scenario_report_rows() {
        let report = sample_scenarios();
        assert_eq!(report.tenors, vec![1.0, 5.0]);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].scenario, "-10bp");
        assert_eq!(report.rows[1].scenario, "x0.5");
        assert!((report.rows[0].reference_par_change_bps + 10.0).abs() < 1e-6);
        assert!(report.rows[1].hazard_rates[0] < report.base_hazard_rates[0]);
        assert_eq!(report.records().len(), 4);
    }

    #[test]
    fn test_scenario_report_formats() {
        let report = sample_scenarios();

        let mut table = Vec::new();
        report.render(OutputFormat::Table, &mut table).unwrap();
        let table = String::from_utf8(table).unwrap();
        assert!(table.contains("Spread sensitivity (5y par spread):"));
        assert!(table.contains("x0.5"));

        let mut json = Vec::new();
        report.render(OutputFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["rows"][1]["hazard_rates"].as_array().unwrap().len(), 2);

        let mut csv_out = Vec::new();
        report.render(OutputFormat::Csv, &mut csv_out).unwrap();
        let text = String::from_utf8(csv_out).unwrap();
        assert!(text.starts_with("scenario,maturity,hazard_rate"));
        assert_eq!(text.lines().count(), 5);
    }

    // ========================================
    // Rendering Tests
    // ========================================

    #[test]
    fn test_render_table() {
        let text = render(&sample_report(10.0), OutputFormat::Table);
        assert!(text.contains("Input parameters:"));
        assert!(text.contains("Hazard rates:"));
        assert!(text.contains("Scaled PVs for notional 10.00"));
        assert!(text.contains("Validation vs market par spreads:"));
    }

    #[test]
    fn test_render_json() {
        let text = render(&sample_report(1.0), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["hazard"].as_array().unwrap().len(), 2);
        assert_eq!(value["inputs"]["quote_count"], 2);
        assert!(value.get("scaled_pricing").is_none());
        assert!(value.get("tenors").is_none());
    }

    #[test]
    fn test_render_csv() {
        let text = render(&sample_report(1.0), OutputFormat::Csv);
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("maturity,hazard_rate,survival_probability"));
        assert_eq!(lines.count(), 2);
    }
}
