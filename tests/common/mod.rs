//! Common testing utilities for Secret Dotenv integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test context that manages a temporary directory.
pub struct TestContext {
    /// Path to temporary directory
    pub temp_path: PathBuf,
    /// The temporary directory (kept to prevent early deletion)
    _temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with a temporary directory.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path().to_path_buf();

        Ok(Self {
            temp_path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a test file with content.
    #[allow(dead_code)]
    pub fn create_file(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let file_path = self.temp_path.join(name);
        fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Read a file from the temp directory.
    #[allow(dead_code)]
    pub fn read(&self, name: &str) -> anyhow::Result<String> {
        Ok(fs::read_to_string(self.temp_path.join(name))?)
    }

    /// Get the path to a file in the temp directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_path.join(name)
    }
}

/// Mock `GetSecretValue` payloads for testing.
pub struct MockSecret;

impl MockSecret {
    /// A `SecretString` holding a flat JSON object of string values.
    #[allow(dead_code)]
    pub fn string_payload(secrets: &[(impl AsRef<str>, impl AsRef<str>)]) -> String {
        let mut json_data = serde_json::Map::new();
        for (key, value) in secrets {
            json_data.insert(key.as_ref().to_string(), serde_json::json!(value.as_ref()));
        }

        serde_json::Value::Object(json_data).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_string_payload() {
        let payload = MockSecret::string_payload(&[("KEY1", "value1"), ("KEY2", "value 2")]);
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(json["KEY1"], "value1");
        assert_eq!(json["KEY2"], "value 2");
    }

    #[test]
    fn test_test_context_create_file() {
        let ctx = TestContext::new().unwrap();
        let file_path = ctx.create_file("test.txt", "Hello, World!").unwrap();

        assert!(file_path.exists());
        assert_eq!(ctx.read("test.txt").unwrap(), "Hello, World!");
    }
}
