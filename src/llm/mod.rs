//! LLM module for vidnotes
//!
//! Key-point generation through OpenAI-compatible chat completion APIs
//! (SiliconFlow or OpenAI).

mod client;
mod openai;
mod parse;
mod profile;
mod prompts;

pub use client::{build_provider, LlmProvider};
pub use openai::ChatCompletionsClient;
pub use parse::parse_key_points;
pub use profile::{resolve, ProviderKind, ProviderProfile};
pub use prompts::build_key_points_prompt;
