//! LLM module for sikum
//!
//! Chat completion providers (OpenAI, Gemini) and the fixed summary prompt.

mod client;
mod gemini;
mod openai;
mod prompts;

pub use client::{build_provider, ChatMessage, ChatRequest, LlmProvider};
pub use gemini::{GeminiClient, DEFAULT_GEMINI_MODEL};
pub use openai::{OpenAiClient, DEFAULT_OPENAI_MODEL};
pub use prompts::build_summary_messages;
