//! Node command handler.

use anyhow::{Context, Result};
use std::path::Path;

use iblauncher_core::{NetworkNodes, StdoutSink};

/// Print the node named `name` from `file` as pretty JSON.
///
/// Returns `false` if no such node exists.
pub fn execute(name: &str, file: &Path) -> Result<bool> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read network nodes from '{}'", file.display()))?;
    let nodes = NetworkNodes::from_json(&content)
        .with_context(|| format!("Failed to parse network nodes in '{}'", file.display()))?;

    // Always report a miss; finding the node is the whole command
    let Some(node) = nodes.get(name, true, &StdoutSink) else {
        return Ok(false);
    };
    println!("{}", serde_json::to_string_pretty(node)?);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn nodes_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_found_and_missing() {
        let file = nodes_file(r#"{"NetworkNodes": [{"Name": "ECU1", "Id": 1}]}"#);

        assert!(execute("ECU1", file.path()).unwrap());
        assert!(!execute("ECU2", file.path()).unwrap());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let file = nodes_file("not json");
        let err = execute("ECU1", file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse network nodes"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(execute("ECU1", Path::new("/nonexistent/nodes.json")).is_err());
    }
}
