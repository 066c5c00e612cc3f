//! Load a strategy exported by the strategy builder

use std::path::Path;
use tracing::debug;

use super::types::Strategy;
use crate::common::errors::{ProbeError, Result};

/// Read a strategy from a JSON file in the backtest wire format
pub fn load_strategy(path: impl AsRef<Path>) -> Result<Strategy> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ProbeError::Configuration(format!(
            "Cannot read strategy file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let strategy: Strategy = serde_json::from_str(&contents)?;
    debug!(
        "Loaded strategy '{}' from {} ({} nodes, {} edges)",
        strategy.id,
        path.display(),
        strategy.nodes.len(),
        strategy.edges.len()
    );
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::sample::test_strategy;

    #[test]
    fn test_load_exported_strategy() {
        let path = std::env::temp_dir().join(format!("strategy_{}.json", std::process::id()));
        std::fs::write(&path, test_strategy().to_pretty_json().unwrap()).unwrap();

        let loaded = load_strategy(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, test_strategy());
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = load_strategy("/nonexistent/strategy.json").unwrap_err();
        assert!(matches!(err, ProbeError::Configuration(_)));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let path = std::env::temp_dir().join(format!("bad_strategy_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"id": "x", "nodes": "#).unwrap();

        let err = load_strategy(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, ProbeError::JsonParse(_)));
    }
}
