//! Summarization pipeline
//!
//! Transcript file -> text -> prompt -> model response -> summary document.
//! Every failure is reported as a [`SummaryOutcome`] message.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::extract::extract_text;
use crate::llm::{build_provider, build_summary_messages, ChatRequest, LlmProvider};
use crate::llm::DEFAULT_OPENAI_MODEL;
use crate::summary::render_summary;
use crate::SikumError;

/// Reported when no API key is configured.
pub const MSG_MISSING_API_KEY: &str = "API key not found.";
/// Reported for unsupported, empty or unreadable input files.
pub const MSG_INVALID_FILE: &str = "קובץ לא תקין או לא נתמך";
/// Reported when the summary document is ready.
pub const MSG_READY: &str = "הסיכום מוכן להורדה";
const ERROR_PREFIX: &str = "שגיאה";

/// Appended to the input's base name to form the output file name.
pub const OUTPUT_SUFFIX: &str = "_SUMMARY";

/// Sampling temperature for summary requests.
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Result of one summarization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub path: Option<PathBuf>,
    pub message: String,
}

impl SummaryOutcome {
    fn ready(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            message: MSG_READY.to_string(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }
}

/// Output location for a given input file: `<dir>/<base name>_SUMMARY.docx`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let base = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{base}{OUTPUT_SUFFIX}.docx"))
}

/// Runs one transcript through extraction, the model and the renderer.
pub struct Summarizer {
    provider: Option<Box<dyn LlmProvider>>,
    model: String,
    output_dir: PathBuf,
}

impl Summarizer {
    /// Create a summarizer; `None` means no API key is configured.
    pub fn new(provider: Option<Box<dyn LlmProvider>>) -> Self {
        Self {
            provider,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            output_dir: std::env::temp_dir(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(build_provider(settings)?)
            .with_model(settings.llm.effective_model())
            .with_output_dir(settings.output_dir()))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Summarize the transcript at `input`. Never fails; errors become messages.
    pub async fn summarize_file(&self, input: &Path) -> SummaryOutcome {
        let Some(provider) = self.provider.as_deref() else {
            tracing::warn!("Refusing to summarize {}: no API key", input.display());
            return SummaryOutcome::failed(MSG_MISSING_API_KEY);
        };

        let transcript = match extract_text(input) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Could not extract text from {}: {}", input.display(), e);
                return SummaryOutcome::failed(MSG_INVALID_FILE);
            }
        };

        match self.summarize_transcript(provider, input, &transcript).await {
            Ok(path) => SummaryOutcome::ready(path),
            Err(e) => {
                tracing::warn!("Summarizing {} failed: {}", input.display(), e);
                SummaryOutcome::failed(format!("{ERROR_PREFIX}: {e}"))
            }
        }
    }

    async fn summarize_transcript(
        &self,
        provider: &dyn LlmProvider,
        input: &Path,
        transcript: &str,
    ) -> crate::Result<PathBuf> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: build_summary_messages(transcript),
            temperature: SUMMARY_TEMPERATURE,
        };

        tracing::info!(
            "Requesting summary from {} ({} transcript characters)",
            self.model,
            transcript.chars().count()
        );
        let summary = provider
            .complete(request)
            .await
            .map_err(|e| SikumError::Collaborator(format!("{e:#}")))?;

        let out_path = output_path_for(input, &self.output_dir);
        render_summary(&summary, &out_path)?;
        Ok(out_path)
    }
}
