use serde::{ Deserialize, Serialize };
use serde_json::{ json, Value };

use crate::traits::model_client::StructuredOutput;

/// LaTeX snippet produced by the generation stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatexResult {
    pub latex_code: String,
    pub description: String,
}

/// Verdict of the quality review stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub is_correct: bool,
    pub issues: Vec<String>,
    /// Replacement snippet, when the reviewer offers one
    pub corrected_latex: Option<String>,
}

impl QualityAssessment {
    /// The corrected snippet exactly as offered, ignoring blank offers
    pub fn correction(&self) -> Option<&str> {
        self.corrected_latex.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Output of the local brace/environment balance checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxReport {
    pub valid: bool,
    pub issues: Vec<String>,
}

/// One entry of the static formula table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaEntry {
    pub key: String,
    pub name: String,
    pub latex: String,
    pub description: String,
}

/// Result of a formula table lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaLookup {
    pub found: bool,
    pub results: Vec<FormulaEntry>,
}

impl StructuredOutput for LatexResult {
    const SCHEMA_NAME: &'static str = "latex_result";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "latex_code": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["latex_code", "description"],
            "additionalProperties": false
        })
    }
}

impl StructuredOutput for QualityAssessment {
    const SCHEMA_NAME: &'static str = "quality_assessment";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "is_correct": { "type": "boolean" },
                "issues": { "type": "array", "items": { "type": "string" } },
                "corrected_latex": { "type": ["string", "null"] }
            },
            "required": ["is_correct", "issues", "corrected_latex"],
            "additionalProperties": false
        })
    }
}
