//! Typed view over the `metrics` object of a backtest result

use serde::Deserialize;
use serde_json::Value;

/// Performance figures a backtest engine reports; all fields optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_trades: Option<f64>,
    pub final_equity: Option<f64>,
    /// Percent
    pub total_return: Option<f64>,
    /// Percent
    pub win_rate: Option<f64>,
    /// Percent
    pub max_drawdown: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub profit_factor: Option<f64>,
}

impl MetricsSummary {
    /// Returns None unless `value` is an object with at least one known figure
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let summary: MetricsSummary = serde_json::from_value(value.clone()).ok()?;
        if summary == MetricsSummary::default() {
            None
        } else {
            Some(summary)
        }
    }
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = [
            ("trades", self.total_trades, 0usize, ""),
            ("final_equity", self.final_equity, 2, ""),
            ("total_return", self.total_return, 2, "%"),
            ("win_rate", self.win_rate, 1, "%"),
            ("max_drawdown", self.max_drawdown, 2, "%"),
            ("sharpe", self.sharpe_ratio, 2, ""),
            ("profit_factor", self.profit_factor, 2, ""),
        ];

        let mut first = true;
        for (label, value, precision, unit) in fields {
            if let Some(v) = value {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}={:.*}{}", label, precision, v, unit)?;
                first = false;
            }
        }
        Ok(())
    }
}
