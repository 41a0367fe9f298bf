use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Environment variables of the process, optionally merged with a `.env` file.
///
/// Variables already set in the process win over the file.
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        for (key, value) in parse_env_content(&content)? {
            self.vars.entry(key).or_insert(value);
        }
        Ok(())
    }

    pub fn all(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

/// Parses `KEY=VALUE` lines. Blank lines and `#` comments are skipped, an
/// `export ` prefix is accepted, and matching outer quotes are removed.
fn parse_env_content(content: &str) -> Result<Vec<(String, String)>, CliError> {
    let mut pairs = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid env file: malformed line {} (expected KEY=VALUE)",
                line_num + 1
            )));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Config(format!(
                "Invalid env file: empty key at line {}",
                line_num + 1
            )));
        }

        pairs.push((key.to_string(), unquote(value.trim()).to_string()));
    }

    Ok(pairs)
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(value)
}
