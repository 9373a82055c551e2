//! Configuration module for the plan inspector.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing `.tfinspect.yaml`
//! - Environment variable overrides
//! - Validation of configuration values

mod spec;
mod parser;
mod validator;

pub use spec::{DisplayConfig, FilterConfig, InspectorConfig};
pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, find_config_file};
pub use validator::{ConfigValidator, ValidationError};
