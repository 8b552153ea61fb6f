use std::fmt;

use serde::{ Deserialize, Serialize };

use crate::errors::{ ErrorKind, MathError };
use crate::models::latex::QualityAssessment;
use crate::models::problem::{ Classification, Solution, Transcription };

/// Pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Validation of the caller's input before any model call
    Input,
    Guardrail,
    Transcribing,
    Classifying,
    Solving,
    Generating,
    Reviewing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "Input",
            Stage::Guardrail => "Guardrail",
            Stage::Transcribing => "Transcribing",
            Stage::Classifying => "Classifying",
            Stage::Solving => "Solving",
            Stage::Generating => "Generating",
            Stage::Reviewing => "Reviewing",
        };
        write!(f, "{}", name)
    }
}

/// Everything a successful run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub problem_text: String,
    /// Present only for image runs
    pub transcription: Option<Transcription>,
    /// Final snippet, after any accepted review correction
    pub latex: String,
    pub latex_description: String,
    pub classification: Classification,
    pub solution: Solution,
    pub quality: QualityAssessment,
}

impl PipelineOutput {
    pub fn quality_issues(&self) -> &[String] {
        &self.quality.issues
    }
}

/// Why a run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFailure {
    pub stage: Stage,
    pub kind: ErrorKind,
    pub message: String,
}

impl PipelineFailure {
    pub fn from_error(stage: Stage, error: &MathError) -> Self {
        Self {
            stage,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}: {}", self.stage, self.kind, self.message)
    }
}

/// Outcome of one pipeline run: a populated result or a single error, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineResult {
    Completed(PipelineOutput),
    Failed(PipelineFailure),
}

impl PipelineResult {
    pub fn output(&self) -> Option<&PipelineOutput> {
        match self {
            PipelineResult::Completed(output) => Some(output),
            PipelineResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&PipelineFailure> {
        match self {
            PipelineResult::Completed(_) => None,
            PipelineResult::Failed(failure) => Some(failure),
        }
    }

    /// The single user-facing error message, when the run failed
    pub fn error_message(&self) -> Option<String> {
        self.failure().map(|f| f.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Completed(_))
    }
}
