use std::sync::Arc;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ MathError, MathResult };
use crate::models::image::ImageRef;
use crate::traits::tool::Tool;

/// A type the model can be asked to produce as structured JSON
pub trait StructuredOutput: DeserializeOwned + Send {
    /// Name sent alongside the schema; also used to route stub responses in tests
    const SCHEMA_NAME: &'static str;

    /// JSON schema in strict structured-output form
    fn json_schema() -> Value;
}

/// Required shape of the model's answer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: String,
    pub schema: Value,
}

impl OutputSchema {
    pub fn of<T: StructuredOutput>() -> Self {
        Self {
            name: T::SCHEMA_NAME.to_string(),
            schema: T::json_schema(),
        }
    }
}

/// Content handed to the model after the instructions
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    Text(String),
    Image(ImageRef),
}

/// One structured model call
#[derive(Clone)]
pub struct ModelRequest {
    pub instructions: String,
    pub input: ModelInput,
    pub output_schema: OutputSchema,
    /// Local tools the model may call before answering
    pub tools: Vec<Arc<dyn Tool>>,
    /// Overrides the client's default model
    pub model: Option<String>,
}

impl ModelRequest {
    pub fn for_output<T: StructuredOutput>(instructions: impl Into<String>, input: ModelInput) -> Self {
        Self {
            instructions: instructions.into(),
            input,
            output_schema: OutputSchema::of::<T>(),
            tools: Vec::new(),
            model: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }
}

impl std::fmt::Debug for ModelRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRequest")
            .field("schema", &self.output_schema.name)
            .field("input", &self.input)
            .field("tools", &self.tool_names())
            .field("model", &self.model)
            .finish()
    }
}

/// Capability boundary to a hosted language model
///
/// Implementations make a single attempt per call. Transport, auth and
/// timeout failures are `MathError::ModelInvocation`; an answer that is not
/// JSON conforming to the requested schema is `MathError::SchemaViolation`.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run the request and return the model's structured answer as raw JSON
    async fn invoke(&self, request: &ModelRequest) -> MathResult<Value>;
}

/// Invoke the model and deserialize its answer into `T`
pub async fn invoke_structured<T, C>(client: &C, request: ModelRequest) -> MathResult<T>
    where T: StructuredOutput, C: ModelClient + ?Sized
{
    let value = client.invoke(&request).await?;
    serde_json::from_value(value).map_err(|e| MathError::schema_violation(T::SCHEMA_NAME, e.to_string()))
}
