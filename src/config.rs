// Secret Dotenv Configuration Module
//
// Resolves which secret to fetch, from which region, and where to write it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Secret fetched when nothing else is configured.
pub const DEFAULT_SECRET_ID: &str = "backend-env";

/// AWS region used when nothing else is configured.
pub const DEFAULT_REGION: &str = "us-east-2";

/// Output file written when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "/mnt/.env";

fn default_secret_id() -> String {
    DEFAULT_SECRET_ID.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

/// Runtime settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Name or ARN of the secret in AWS Secrets Manager
    #[serde(default = "default_secret_id")]
    pub secret_id: String,

    /// AWS region hosting the secret (e.g., "us-east-2")
    #[serde(default = "default_region")]
    pub region: String,

    /// Path of the dotenv file to write
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            secret_id: default_secret_id(),
            region: default_region(),
            output: default_output(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        // Empty or comment-only documents are null, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Option<Settings> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        Ok(settings.unwrap_or_default())
    }

    /// Apply command-line overrides on top of the current values.
    pub fn with_overrides(
        mut self,
        secret_id: Option<String>,
        region: Option<String>,
        output: Option<String>,
    ) -> Self {
        if let Some(secret_id) = secret_id {
            self.secret_id = secret_id;
        }
        if let Some(region) = region {
            self.region = region;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.secret_id.trim().is_empty() {
            anyhow::bail!("Secret id cannot be empty");
        }

        if self.region.trim().is_empty() {
            anyhow::bail!("Region cannot be empty");
        }

        if self.output.trim().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }

        Ok(())
    }

    /// Get the output path with a bare `~` or `~/` prefix expanded to the
    /// home directory. `~user` forms are left as written.
    pub fn output_path(&self) -> Result<PathBuf> {
        let rest = if self.output == "~" {
            ""
        } else if let Some(rest) = self.output.strip_prefix("~/") {
            rest
        } else {
            return Ok(PathBuf::from(&self.output));
        };

        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(rest.trim_start_matches('/')))
    }
}
