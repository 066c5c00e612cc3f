//! Common test utilities and fixtures

#![allow(dead_code)]

use backtest_probe::backtest::{BacktestClient, RequestRunner, RunOutcome};
use backtest_probe::strategy::test_strategy;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

/// Endpoint path the probe posts to
pub const BACKTEST_PATH: &str = "/api/backtest/";

/// Full endpoint URL on a mock server
pub fn endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), BACKTEST_PATH)
}

/// URL on a local port with no listener
pub fn unreachable_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, BACKTEST_PATH)
}

/// Run the built-in strategy against `url` and capture the console report
pub async fn run_against(url: &str, timeout: Duration) -> (RunOutcome, String) {
    let client = BacktestClient::with_timeout(url, timeout).expect("Failed to create client");
    let runner = RequestRunner::new(client, test_strategy());

    let mut out = Vec::new();
    let outcome = runner.run(&mut out).await;
    (outcome, String::from_utf8(out).expect("report is UTF-8"))
}

/// The payload the probe must put on the wire, written out by hand
pub fn expected_payload() -> Value {
    json!({
        "id": "test-strategy-123",
        "name": "Test Strategy",
        "description": "Simple test strategy",
        "nodes": [
            {"id": "stock-1", "type": "stock", "data": {"symbol": "AAPL", "quantity": 100}},
            {"id": "rsi-1", "type": "technicalIndicator", "data": {"blockType": "RSI", "period": 14}},
            {
                "id": "condition-1",
                "type": "priceCondition",
                "data": {"blockType": "price_condition", "operator": "less_than", "value": 30}
            },
            {"id": "buy-1", "type": "orderType", "data": {"blockType": "BUY", "quantity": 100}}
        ],
        "edges": [
            {"source": "stock-1", "target": "rsi-1"},
            {"source": "rsi-1", "target": "condition-1"},
            {"source": "condition-1", "target": "buy-1"}
        ],
        "metadata": {
            "created": "2025-09-13T14:00:00Z",
            "lastModified": "2025-09-13T14:00:00Z",
            "version": 1
        }
    })
}

/// Sample API responses for testing
pub mod api_responses {
    /// Backtest result carrying metrics
    pub const WITH_METRICS: &str = r#"{
        "strategy_id": "test-strategy-123",
        "status": "completed",
        "metrics": {
            "totalTrades": 4,
            "finalEquity": 10412.75,
            "totalReturn": 4.13,
            "winRate": 75.0,
            "maxDrawdown": -2.4,
            "sharpeRatio": 1.31,
            "profitFactor": 2.2
        },
        "trades": []
    }"#;

    /// Backtest result without a metrics field
    pub const WITHOUT_METRICS: &str = r#"{
        "strategy_id": "test-strategy-123",
        "status": "queued"
    }"#;

    /// Validation failure returned by the server
    pub const BAD_REQUEST: &str = r#"{"error": "Strategy must contain an exit condition"}"#;
}
