use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{ json, Value };

use crate::errors::{ MathError, MathResult };
use crate::traits::model_client::{ ModelClient, ModelRequest, StructuredOutput };

/// Failure a stub should raise for a given schema
#[derive(Debug, Clone)]
pub enum StubFailure {
    Invocation(String),
    Schema(String),
}

/// Deterministic model that answers by schema name and records every request
pub struct StubModelClient {
    responses: HashMap<String, Value>,
    failures: HashMap<String, StubFailure>,
    /// Tool calls to make (by tool name) before answering a request
    tool_calls: Vec<(String, Value)>,
    requests: Mutex<Vec<ModelRequest>>,
    tool_outputs: Mutex<Vec<Value>>,
}

impl StubModelClient {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failures: HashMap::new(),
            tool_calls: Vec::new(),
            requests: Mutex::new(Vec::new()),
            tool_outputs: Mutex::new(Vec::new()),
        }
    }

    pub fn respond<T: StructuredOutput>(mut self, value: Value) -> Self {
        self.responses.insert(T::SCHEMA_NAME.to_string(), value);
        self
    }

    pub fn fail<T: StructuredOutput>(mut self, failure: StubFailure) -> Self {
        self.failures.insert(T::SCHEMA_NAME.to_string(), failure);
        self
    }

    pub fn with_tool_call(mut self, tool: &str, arguments: Value) -> Self {
        self.tool_calls.push((tool.to_string(), arguments));
        self
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_schemas(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.output_schema.name.clone())
            .collect()
    }

    pub fn tool_outputs(&self) -> Vec<Value> {
        self.tool_outputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    async fn invoke(&self, request: &ModelRequest) -> MathResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let schema = request.output_schema.name.as_str();

        for (name, arguments) in &self.tool_calls {
            if let Some(tool) = request.tools.iter().find(|t| t.name() == name) {
                let output = tool
                    .call(arguments)
                    .unwrap_or_else(|e| json!({ "error": e.to_string() }));
                self.tool_outputs.lock().unwrap().push(output);
            }
        }

        if let Some(failure) = self.failures.get(schema) {
            return Err(match failure {
                StubFailure::Invocation(msg) => MathError::ModelInvocation(msg.clone()),
                StubFailure::Schema(msg) => MathError::schema_violation(schema, msg.clone()),
            });
        }

        self.responses
            .get(schema)
            .cloned()
            .ok_or_else(|| MathError::ModelInvocation(format!("stub has no response for {}", schema)))
    }
}

pub const DERIVATIVE_PROBLEM: &str = "Find the derivative of f(x) = x^3 + 2x^2 - 4x + 7";

/// Stub answering every text stage for the derivative problem
pub fn derivative_stub() -> StubModelClient {
    use crate::models::latex::{ LatexResult, QualityAssessment };
    use crate::models::problem::{ Classification, Solution };

    StubModelClient::new()
        .respond::<Classification>(
            json!({
            "category": "calculus",
            "difficulty": "medium",
            "reasoning": "Differentiating a polynomial"
        })
        )
        .respond::<Solution>(
            json!({
            "steps": ["apply power rule term by term", "combine results"],
            "final_answer": "3x^2+4x-7"
        })
        )
        .respond::<LatexResult>(
            json!({
            "latex_code": "3x^2+4x-7",
            "description": "Derivative of f"
        })
        )
        .respond::<QualityAssessment>(
            json!({
            "is_correct": true,
            "issues": [],
            "corrected_latex": null
        })
        )
}
