//! Configuration module for vidnotes
//!
//! Handles loading settings from a TOML file and capability keys from the
//! environment.

mod settings;

pub use settings::{
    ExtractionSettings, GeneralSettings, LlmSettings, Settings, OPENAI_KEY_ENV,
    SILICONFLOW_KEY_ENV,
};
