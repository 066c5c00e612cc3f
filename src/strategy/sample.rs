//! Built-in strategy submitted when no strategy file is given

use serde_json::{json, Map, Value};

use super::types::{Edge, Node, NodeType, Strategy, StrategyMetadata};

/// Linear RSI strategy: stock → RSI(14) → price < 30 → BUY 100
pub fn test_strategy() -> Strategy {
    Strategy {
        id: "test-strategy-123".to_string(),
        name: "Test Strategy".to_string(),
        description: Some("Simple test strategy".to_string()),
        nodes: vec![
            Node::new(
                "stock-1",
                NodeType::Stock,
                data(json!({"symbol": "AAPL", "quantity": 100})),
            ),
            Node::new(
                "rsi-1",
                NodeType::TechnicalIndicator,
                data(json!({"blockType": "RSI", "period": 14})),
            ),
            Node::new(
                "condition-1",
                NodeType::PriceCondition,
                data(json!({
                    "blockType": "price_condition",
                    "operator": "less_than",
                    "value": 30
                })),
            ),
            Node::new(
                "buy-1",
                NodeType::OrderType,
                data(json!({"blockType": "BUY", "quantity": 100})),
            ),
        ],
        edges: vec![
            Edge::new("stock-1", "rsi-1"),
            Edge::new("rsi-1", "condition-1"),
            Edge::new("condition-1", "buy-1"),
        ],
        metadata: StrategyMetadata::new("2025-09-13T14:00:00Z", 1),
        extra: Map::new(),
    }
}

fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
