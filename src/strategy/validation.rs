//! Structural checks for a strategy graph
//!
//! Findings are advisory. The backtest server owns the authoritative
//! checks; the probe only reports what it sees before sending.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::types::{Node, NodeType, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub node_id: Option<String>,
    /// Index into `Strategy::edges`
    pub edge_index: Option<usize>,
    pub message: String,
}

impl ValidationIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            node_id: None,
            edge_index: None,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(message)
        }
    }

    fn on_node(mut self, node_id: &str) -> Self {
        self.node_id = Some(node_id.to_string());
        self
    }

    fn on_edge(mut self, index: usize) -> Self {
        self.edge_index = Some(index);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(node_id) = &self.node_id {
            write!(f, " (node {})", node_id)?;
        }
        if let Some(index) = self.edge_index {
            write!(f, " (edge #{})", index)?;
        }
        Ok(())
    }
}

/// Validate the graph structure and node contents of a strategy
pub fn validate(strategy: &Strategy) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_composition(strategy, &mut issues);

    let mut seen = HashSet::new();
    for node in &strategy.nodes {
        if !seen.insert(node.id.as_str()) {
            issues.push(ValidationIssue::error("Duplicate node id").on_node(&node.id));
        }
    }

    for (index, edge) in strategy.edges.iter().enumerate() {
        if !seen.contains(edge.source.as_str()) {
            issues.push(
                ValidationIssue::error(format!("Edge source '{}' does not exist", edge.source))
                    .on_edge(index),
            );
        }
        if !seen.contains(edge.target.as_str()) {
            issues.push(
                ValidationIssue::error(format!("Edge target '{}' does not exist", edge.target))
                    .on_edge(index),
            );
        }
    }

    if let Some(node_id) = find_cycle(strategy) {
        issues.push(ValidationIssue::error("Circular dependency detected").on_node(&node_id));
    }

    for node in &strategy.nodes {
        check_node(node, &mut issues);
    }

    let metadata = &strategy.metadata;
    if metadata.created_time().is_none() {
        issues.push(ValidationIssue::warning(format!(
            "Metadata 'created' is not an RFC 3339 timestamp: {}",
            metadata.created
        )));
    }
    if metadata.last_modified_time().is_none() {
        issues.push(ValidationIssue::warning(format!(
            "Metadata 'lastModified' is not an RFC 3339 timestamp: {}",
            metadata.last_modified
        )));
    }

    if strategy.nodes.len() > 1 {
        let connected: HashSet<&str> = strategy
            .edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        for node in &strategy.nodes {
            if !connected.contains(node.id.as_str()) {
                issues.push(
                    ValidationIssue::warning("Node is not connected to the strategy")
                        .on_node(&node.id),
                );
            }
        }
    }

    issues
}

fn check_composition(strategy: &Strategy, issues: &mut Vec<ValidationIssue>) {
    let has = |pred: fn(&NodeType) -> bool| strategy.nodes.iter().any(|n| pred(&n.node_type));

    if !has(NodeType::is_instrument) {
        issues.push(ValidationIssue::error(
            "Strategy must have at least one trading instrument (Stock or Option Leg)",
        ));
    }
    if !has(NodeType::is_entry) {
        issues.push(ValidationIssue::error(
            "Strategy must have at least one entry condition (Price Condition or Technical Indicator)",
        ));
    }
    if !has(NodeType::is_exit) {
        issues.push(ValidationIssue::warning(
            "Strategy has no exit condition (Profit Target or Stop Loss)",
        ));
    }
}

/// Per-type checks on node `data`
fn check_node(node: &Node, issues: &mut Vec<ValidationIssue>) {
    match node.node_type {
        NodeType::Stock => {
            if !has_text(node, "symbol") {
                issues.push(ValidationIssue::error("Stock node requires a symbol").on_node(&node.id));
            }
        }
        NodeType::OptionLeg => {
            if !has_text(node, "underlying") {
                issues.push(
                    ValidationIssue::error("Option leg requires an underlying symbol")
                        .on_node(&node.id),
                );
            }
            if !positive_number(node.data.get("strike")) {
                issues.push(
                    ValidationIssue::error("Option leg requires a valid strike price")
                        .on_node(&node.id),
                );
            }
            if !has_text(node, "expiry") {
                issues.push(
                    ValidationIssue::error("Option leg requires an expiry date").on_node(&node.id),
                );
            }
        }
        _ => {}
    }
}

fn has_text(node: &Node, key: &str) -> bool {
    node.data_str(key).map_or(false, |s| !s.trim().is_empty())
}

/// Accepts numbers and numeric strings, as the builder's form inputs emit both
fn positive_number(value: Option<&Value>) -> bool {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.map_or(false, |n| n > 0.0)
}

/// Depth-first search over outgoing edges; returns the first node found on a cycle
fn find_cycle(strategy: &Strategy) -> Option<String> {
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &strategy.edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        InProgress,
        Done,
    }

    fn visit<'a>(
        node: &'a str,
        outgoing: &HashMap<&'a str, Vec<&'a str>>,
        marks: &mut HashMap<&'a str, Mark>,
    ) -> bool {
        match marks.get(node) {
            Some(Mark::InProgress) => return true,
            Some(Mark::Done) => return false,
            None => {}
        }
        marks.insert(node, Mark::InProgress);
        if let Some(targets) = outgoing.get(node) {
            for &target in targets {
                if visit(target, outgoing, marks) {
                    return true;
                }
            }
        }
        marks.insert(node, Mark::Done);
        false
    }

    let mut marks = HashMap::new();
    strategy
        .nodes
        .iter()
        .find(|n| visit(n.id.as_str(), &outgoing, &mut marks))
        .map(|n| n.id.clone())
}
