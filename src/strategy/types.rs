use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node type tag as emitted by the strategy builder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Stock,
    TechnicalIndicator,
    PriceCondition,
    OrderType,
    OptionLeg,
    StopLoss,
    ProfitTarget,
    PositionSizing,
    /// Tag not known to this crate, kept verbatim
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Stock => "stock",
            NodeType::TechnicalIndicator => "technicalIndicator",
            NodeType::PriceCondition => "priceCondition",
            NodeType::OrderType => "orderType",
            NodeType::OptionLeg => "optionLeg",
            NodeType::StopLoss => "stopLoss",
            NodeType::ProfitTarget => "profitTarget",
            NodeType::PositionSizing => "positionSizing",
            NodeType::Other(tag) => tag.as_str(),
        }
    }

    /// Nodes that name something to trade
    pub fn is_instrument(&self) -> bool {
        matches!(self, NodeType::Stock | NodeType::OptionLeg)
    }

    /// Nodes that can open a position
    pub fn is_entry(&self) -> bool {
        matches!(self, NodeType::PriceCondition | NodeType::TechnicalIndicator)
    }

    /// Nodes that can close a position
    pub fn is_exit(&self) -> bool {
        matches!(self, NodeType::ProfitTarget | NodeType::StopLoss)
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "stock" => NodeType::Stock,
            "technicalIndicator" => NodeType::TechnicalIndicator,
            "priceCondition" => NodeType::PriceCondition,
            "orderType" => NodeType::OrderType,
            "optionLeg" => NodeType::OptionLeg,
            "stopLoss" => NodeType::StopLoss,
            "profitTarget" => NodeType::ProfitTarget,
            "positionSizing" => NodeType::PositionSizing,
            _ => NodeType::Other(tag),
        }
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of the strategy graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Type-specific attributes, key order preserved on the wire
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Builder fields such as `position` or `width`, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            node_type,
            data,
            extra: Map::new(),
        }
    }

    /// String attribute from `data`, if present
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// Directed link between two node ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Builder-assigned edge id; absent for hand-written payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// `sourceHandle`, `animated` and the like
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Timestamps are kept as the exact text received so exports round-trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyMetadata {
    pub created: String,
    pub last_modified: String,
    pub version: u32,
    /// e.g. `backtest_results`, `risk_metrics`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StrategyMetadata {
    /// Metadata for a strategy that has not been modified since creation
    pub fn new(created: impl Into<String>, version: u32) -> Self {
        let created = created.into();
        Self {
            last_modified: created.clone(),
            created,
            version,
            extra: Map::new(),
        }
    }

    /// Same as [`StrategyMetadata::new`], formatting `created` as RFC 3339 UTC
    pub fn created_at(created: DateTime<Utc>, version: u32) -> Self {
        Self::new(created.to_rfc3339_opts(SecondsFormat::AutoSi, true), version)
    }

    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created)
    }

    pub fn last_modified_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_modified)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Trading strategy graph submitted for backtesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    pub metadata: StrategyMetadata,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Strategy {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Pretty-printed JSON body, two-space indented
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_type_tags() {
        assert_eq!(NodeType::TechnicalIndicator.as_str(), "technicalIndicator");
        assert_eq!(NodeType::from("orderType".to_string()), NodeType::OrderType);
        assert_eq!(
            NodeType::from("payoffChart".to_string()),
            NodeType::Other("payoffChart".to_string())
        );
    }

    #[test]
    fn test_unknown_node_type_kept_verbatim() {
        let node: Node = serde_json::from_value(json!({
            "id": "chart-1",
            "type": "payoffChart",
            "data": {}
        }))
        .unwrap();
        assert_eq!(node.node_type, NodeType::Other("payoffChart".to_string()));
        assert_eq!(serde_json::to_value(&node).unwrap()["type"], "payoffChart");
    }

    #[test]
    fn test_node_type_categories() {
        assert!(NodeType::Stock.is_instrument());
        assert!(NodeType::PriceCondition.is_entry());
        assert!(NodeType::StopLoss.is_exit());
        assert!(!NodeType::OrderType.is_entry());
    }

    #[test]
    fn test_edge_id_omitted_when_absent() {
        let value = serde_json::to_value(Edge::new("a", "b")).unwrap();
        assert_eq!(value, json!({"source": "a", "target": "b"}));

        let value = serde_json::to_value(Edge::new("a", "b").with_id("e1")).unwrap();
        assert_eq!(value["id"], "e1");
    }

    #[test]
    fn test_metadata_wire_format() {
        let created = "2025-09-13T14:00:00Z".parse().unwrap();
        let value = serde_json::to_value(StrategyMetadata::created_at(created, 1)).unwrap();
        assert_eq!(
            value,
            json!({
                "created": "2025-09-13T14:00:00Z",
                "lastModified": "2025-09-13T14:00:00Z",
                "version": 1
            })
        );
    }

    #[test]
    fn test_export_timestamps_kept_verbatim() {
        let metadata: StrategyMetadata = serde_json::from_value(json!({
            "created": "2025-09-13T14:00:00.000Z",
            "lastModified": "not a timestamp",
            "version": 2
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&metadata).unwrap()["created"],
            "2025-09-13T14:00:00.000Z"
        );
        assert_eq!(
            metadata.created_time(),
            Some("2025-09-13T14:00:00Z".parse().unwrap())
        );
        assert_eq!(metadata.last_modified_time(), None);
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let raw = json!({
            "id": "s",
            "name": "n",
            "nodes": [{
                "id": "stock-1",
                "type": "stock",
                "position": {"x": 100, "y": 100},
                "width": 180,
                "data": {"symbol": "AAPL"}
            }],
            "edges": [{"id": "e1", "source": "stock-1", "target": "stock-1", "sourceHandle": "out", "animated": true}],
            "metadata": {
                "created": "2025-09-13T14:00:00.000Z",
                "lastModified": "2025-09-13T14:00:00.000Z",
                "version": 1,
                "risk_metrics": {"var": 0.02}
            },
            "tags": ["demo"]
        });

        let strategy: Strategy = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(strategy.nodes[0].extra["width"], 180);
        assert_eq!(strategy.description, None);
        assert_eq!(serde_json::to_value(&strategy).unwrap(), raw);
    }

    #[test]
    fn test_node_data_key_order_preserved() {
        let node: Node = serde_json::from_str(
            r#"{"id":"c","type":"priceCondition","data":{"operator":"less_than","value":30,"blockType":"x"}}"#,
        )
        .unwrap();
        let keys: Vec<&String> = node.data.keys().collect();
        assert_eq!(keys, vec!["operator", "value", "blockType"]);
    }
}
