//! Request runner: one submission, one console report

use serde_json::Value;
use std::io::Write;
use tracing::{error, info, warn};

use super::client::BacktestClient;
use super::metrics::MetricsSummary;
use crate::common::errors::{FailureKind, Result};
use crate::strategy::{validate, Strategy};

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// HTTP 200 with a JSON object body
    Success {
        /// Top-level keys in server order
        keys: Vec<String>,
        metrics: Option<Value>,
    },
    /// Any status other than 200
    ErrorResponse { status: u16 },
    /// Payload printed, nothing sent
    DryRun,
    Failed { kind: FailureKind, message: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            RunOutcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Sends one strategy and writes the human-readable report
pub struct RequestRunner {
    client: BacktestClient,
    strategy: Strategy,
    dry_run: bool,
}

impl RequestRunner {
    pub fn new(client: BacktestClient, strategy: Strategy) -> Self {
        Self {
            client,
            strategy,
            dry_run: false,
        }
    }

    /// Print the payload and validation findings without sending
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn client(&self) -> &BacktestClient {
        &self.client
    }

    /// Execute the run. Every failure is reported to `out`; nothing propagates.
    pub async fn run<W: Write>(&self, out: &mut W) -> RunOutcome {
        match self.execute(out).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let kind = err.kind();
                let message = match kind {
                    FailureKind::Other => err.to_string(),
                    FailureKind::Connection | FailureKind::Timeout => err.cause(),
                };
                error!(kind = %kind, "Backtest request failed: {}", message);
                // The sink itself may be what failed.
                let _ = writeln!(out, "{}: {}", kind.label(), message);
                RunOutcome::Failed { kind, message }
            }
        }
    }

    async fn execute<W: Write>(&self, out: &mut W) -> Result<RunOutcome> {
        writeln!(out, "Testing backtest API endpoint...")?;
        writeln!(out, "URL: {}", self.client.url())?;
        writeln!(out, "Strategy: {}", self.strategy.to_pretty_json()?)?;

        for issue in validate(&self.strategy) {
            warn!("Strategy validation: {}", issue);
        }

        if self.dry_run {
            info!("Dry run, request not sent");
            return Ok(RunOutcome::DryRun);
        }

        info!(
            "Submitting strategy '{}' (timeout {:?})",
            self.strategy.id,
            self.client.timeout()
        );
        let response = self.client.submit(&self.strategy).await?;

        writeln!(out)?;
        writeln!(out, "Response Status: {}", response.status)?;
        writeln!(out, "Response Headers: {}", response.headers_json())?;
        writeln!(out, "Response Text: {}", response.body)?;

        if !response.is_ok() {
            writeln!(out, "Error response")?;
            warn!("Backtest endpoint returned status {}", response.status);
            return Ok(RunOutcome::ErrorResponse {
                status: response.status,
            });
        }

        let result = response.result_object()?;
        let keys: Vec<String> = result.keys().cloned().collect();
        writeln!(out)?;
        writeln!(out, "Success! Result keys: {}", serde_json::to_string(&keys)?)?;

        let metrics = result.get("metrics").cloned();
        if let Some(metrics) = &metrics {
            writeln!(out, "Metrics: {}", metrics)?;
            if let Some(summary) = MetricsSummary::from_value(metrics) {
                info!("Backtest metrics: {}", summary);
            }
        }

        Ok(RunOutcome::Success { keys, metrics })
    }
}
