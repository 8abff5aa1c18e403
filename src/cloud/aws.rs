//! AWS Secrets Manager integration using the official Rust SDK.
//!
//! # Credentials
//!
//! - **Ambient only**: credentials come from the SDK's default provider chain
//!   (environment, shared profile, instance role, ...)
//! - **No retries of our own**: a failed call is reported once
//!
//! # Payloads
//!
//! - `SecretString` is parsed as a JSON object of key/value pairs
//! - `SecretBinary` is decoded as UTF-8 text and returned as-is

use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::error::ProvideErrorMetadata;
use aws_sdk_secretsmanager::Client;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

/// Contents of a fetched secret.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretValue {
    /// String-backed secret, parsed from its JSON object.
    Map(Map<String, Value>),
    /// Binary-backed secret, decoded as UTF-8.
    Text(String),
}

impl SecretValue {
    /// Borrow the key/value pairs, if this secret has any.
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            SecretValue::Map(map) => Some(map),
            SecretValue::Text(_) => None,
        }
    }
}

/// Errors returned while fetching a secret.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Secrets Manager can't decrypt the protected secret text using the provided KMS key.")]
    DecryptionFailure,

    #[error("An error occurred on the server side.")]
    InternalServiceError,

    #[error("You provided an invalid value for a parameter.")]
    InvalidParameter,

    #[error("You provided a parameter value that is not valid for the current state of the resource.")]
    InvalidRequest,

    #[error("We can't find the resource that you asked for.")]
    ResourceNotFound,

    /// Any other service or transport failure, exactly as the SDK reported it.
    #[error(transparent)]
    Service(aws_sdk_secretsmanager::Error),

    #[error("Secret string is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Secret string must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Secret binary is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Secret has neither a string nor a binary value")]
    EmptyResponse,
}

impl FetchError {
    /// Map a Secrets Manager error code to its descriptive error.
    ///
    /// Returns `None` for codes this crate does not describe.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DecryptionFailureException" => Some(FetchError::DecryptionFailure),
            "InternalServiceErrorException" => Some(FetchError::InternalServiceError),
            "InvalidParameterException" => Some(FetchError::InvalidParameter),
            "InvalidRequestException" => Some(FetchError::InvalidRequest),
            "ResourceNotFoundException" => Some(FetchError::ResourceNotFound),
            _ => None,
        }
    }
}

/// Turn an SDK error into a [`FetchError`].
///
/// The five documented `GetSecretValue` codes get a descriptive error; any
/// other error is passed through untouched in [`FetchError::Service`].
pub fn classify_error<E>(err: E) -> FetchError
where
    E: ProvideErrorMetadata + Into<aws_sdk_secretsmanager::Error>,
{
    let known = err.code().and_then(FetchError::from_code);

    match known {
        Some(known) => {
            debug!(code = ?err.code(), "Secrets Manager returned a known error code");
            known
        }
        None => FetchError::Service(err.into()),
    }
}

/// Decode a `GetSecretValue` payload.
///
/// The string payload wins when both are present.
pub fn decode_secret(
    secret_string: Option<&str>,
    secret_binary: Option<&[u8]>,
) -> Result<SecretValue, FetchError> {
    if let Some(text) = secret_string {
        return match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(SecretValue::Map(map)),
            other => Err(FetchError::NotAnObject(json_kind(&other))),
        };
    }

    if let Some(bytes) = secret_binary {
        let text = String::from_utf8(bytes.to_vec())?;
        return Ok(SecretValue::Text(text));
    }

    Err(FetchError::EmptyResponse)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build a Secrets Manager client for `region` from the ambient AWS config.
pub async fn client_for_region(region: &str) -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;

    Client::new(&config)
}

/// Fetch a secret with an existing client.
pub async fn fetch_secret(client: &Client, secret_id: &str) -> Result<SecretValue, FetchError> {
    debug!(secret_id, "Requesting secret value");

    let response = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .map_err(classify_error)?;

    let secret = decode_secret(
        response.secret_string(),
        response.secret_binary().map(|blob| -> &[u8] { blob.as_ref() }),
    )?;

    match &secret {
        SecretValue::Map(map) => info!(secret_id, keys = map.len(), "Fetched string secret"),
        SecretValue::Text(_) => info!(secret_id, "Fetched binary secret"),
    }

    Ok(secret)
}

/// Fetch a secret by name or ARN from the given region.
///
/// # Example
///
/// ```no_run
/// use secret_dotenv::cloud::aws::get_secret;
///
/// # async fn run() -> anyhow::Result<()> {
/// let secret = get_secret("backend-env", "us-east-2").await?;
/// # Ok(())
/// # }
/// ```
pub async fn get_secret(secret_id: &str, region: &str) -> Result<SecretValue, FetchError> {
    let client = client_for_region(region).await;
    fetch_secret(&client, secret_id).await
}
