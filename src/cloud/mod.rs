//! Cloud integration module for pulling secrets from managed stores.
//!
//! # Supported Platforms
//!
//! - AWS Secrets Manager (via the AWS SDK)

pub mod aws;

pub use aws::{get_secret, FetchError, SecretValue};
