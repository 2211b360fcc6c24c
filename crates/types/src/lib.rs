#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for retrial
//!
//! This crate provides the immutable value types shared by every other crate:
//! dependency coordinates, SHA-512 content hashes, and the structured diff
//! produced when live dependencies are compared against saved ones.

pub mod dependency;
pub mod diff;
pub mod hash;

pub use dependency::{Checksums, DependencyKey, LiveDependency, SavedDependency};
pub use diff::{DependencyDiff, HashDiff};
pub use hash::Sha512Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing the textual form of a value type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid dependency key '{input}': {reason}")]
    InvalidKey { input: String, reason: String },

    #[error("invalid SHA-512 hash '{input}': {reason}")]
    InvalidHash { input: String, reason: String },
}

/// How command results are written to stdout
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    #[default]
    Tty,
    Json,
}

/// Whether console output is colored
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    #[default]
    Auto,
    Never,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}
