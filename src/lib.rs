//! Secret Dotenv - fetch a secret from AWS Secrets Manager and write it out
//! as environment variables.
//!
//! The fetcher lives in [`cloud::aws`], the writer in [`dotenv`], and the
//! runtime settings in [`config`].

pub mod cloud;
pub mod config;
pub mod dotenv;
