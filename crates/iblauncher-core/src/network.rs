//! Network node lookup over caller-supplied records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diagnostics::DiagnosticSink;
use crate::error::NetworkNodeError;

const NETWORK_NODES_KEY: &str = "NetworkNodes";

/// One network node record, identified by its `Name`.
///
/// All other fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl NetworkNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Map::new(),
        }
    }

    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }
}

/// An ordered collection of network nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NetworkNodes(Vec<NetworkNode>);

impl NetworkNodes {
    /// Parse either a JSON array of nodes or an object with a `NetworkNodes` array.
    pub fn from_json(input: &str) -> Result<Self, NetworkNodeError> {
        let value: Value = serde_json::from_str(input)?;
        let nodes = match value {
            Value::Array(nodes) => Value::Array(nodes),
            Value::Object(mut map) => match map.remove(NETWORK_NODES_KEY) {
                Some(nodes @ Value::Array(_)) => nodes,
                _ => return Err(NetworkNodeError::InvalidShape),
            },
            _ => return Err(NetworkNodeError::InvalidShape),
        };
        Ok(Self(serde_json::from_value(nodes)?))
    }

    pub fn as_slice(&self) -> &[NetworkNode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shorthand for [`get_network_node`] over this collection.
    pub fn get(
        &self,
        name: &str,
        verbose: bool,
        diagnostics: &dyn DiagnosticSink,
    ) -> Option<&NetworkNode> {
        get_network_node(name, &self.0, verbose, diagnostics)
    }
}

impl From<Vec<NetworkNode>> for NetworkNodes {
    fn from(nodes: Vec<NetworkNode>) -> Self {
        Self(nodes)
    }
}

/// Find the node named `name`.
///
/// Duplicates produce a warning and the first match wins. A missing node is
/// only reported when `verbose` is set.
pub fn get_network_node<'a>(
    name: &str,
    nodes: &'a [NetworkNode],
    verbose: bool,
    diagnostics: &dyn DiagnosticSink,
) -> Option<&'a NetworkNode> {
    if name.is_empty() {
        return None;
    }

    let mut matches = nodes.iter().filter(|node| node.name == name);
    let Some(first) = matches.next() else {
        tracing::debug!(name, "NetworkNode not found");
        if verbose {
            diagnostics.info(&format!("NetworkNode '{name}' not found."));
        }
        return None;
    };

    if matches.next().is_some() {
        tracing::warn!(name, "Duplicate NetworkNode name");
        diagnostics.warning(&format!("NetworkNode '{name}' is not unique, taking first."));
    }
    Some(first)
}
