use serde::{ Deserialize, Serialize };
use serde_json::{ json, Value };

use crate::traits::model_client::StructuredOutput;

/// Verbatim rendering of the math visible in an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcription {
    /// False when the image holds no recognizable math problem
    pub is_valid: bool,
    pub text: String,
}

/// Subject category and difficulty, as labelled by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub difficulty: String,
    pub reasoning: String,
}

/// Ordered solution steps and the final answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Empty when the problem is not solvable
    pub steps: Vec<String>,
    pub final_answer: String,
}

/// Answer of the pre-stage math-only guardrail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailVerdict {
    pub is_math_problem: bool,
    pub reason: String,
}

impl StructuredOutput for Transcription {
    const SCHEMA_NAME: &'static str = "transcription";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "is_valid": { "type": "boolean" },
                "text": { "type": "string" }
            },
            "required": ["is_valid", "text"],
            "additionalProperties": false
        })
    }
}

impl StructuredOutput for Classification {
    const SCHEMA_NAME: &'static str = "classification";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": { "type": "string" },
                "difficulty": { "type": "string" },
                "reasoning": { "type": "string" }
            },
            "required": ["category", "difficulty", "reasoning"],
            "additionalProperties": false
        })
    }
}

impl StructuredOutput for Solution {
    const SCHEMA_NAME: &'static str = "solution";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "steps": { "type": "array", "items": { "type": "string" } },
                "final_answer": { "type": "string" }
            },
            "required": ["steps", "final_answer"],
            "additionalProperties": false
        })
    }
}

impl StructuredOutput for GuardrailVerdict {
    const SCHEMA_NAME: &'static str = "guardrail_verdict";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "is_math_problem": { "type": "boolean" },
                "reason": { "type": "string" }
            },
            "required": ["is_math_problem", "reason"],
            "additionalProperties": false
        })
    }
}
