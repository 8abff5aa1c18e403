//! Keys must reach the dotenv file in the order the secret's JSON lists them.

use secret_dotenv::cloud::aws::decode_secret;
use secret_dotenv::dotenv::write_env_file;
use tempfile::TempDir;

#[test]
fn test_json_key_order_preserved() {
    // Deliberately non-alphabetical
    let payload = r#"{
  "SERVICE_NAME": "backend",
  "API_URL": "https://api.example.com",
  "WORKERS": 4,
  "DB_HOST": "localhost",
  "CACHE_TTL": 300,
  "BANNER": "welcome to staging",
  "DEBUG": false
}"#;

    let secret = decode_secret(Some(payload), None).unwrap();
    let secrets = secret.as_map().unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    write_env_file(secrets, &path).unwrap();

    let result = std::fs::read_to_string(&path).unwrap();
    let keys: Vec<&str> = result
        .lines()
        .map(|line| line.split_once('=').unwrap().0)
        .collect();

    assert_eq!(
        keys,
        vec![
            "SERVICE_NAME",
            "API_URL",
            "WORKERS",
            "DB_HOST",
            "CACHE_TTL",
            "BANNER",
            "DEBUG"
        ]
    );

    assert!(result.contains("WORKERS=4\n"));
    assert!(result.contains("BANNER=\"welcome to staging\"\n"));
    assert!(result.contains("DEBUG=false\n"));
}
