use serde_json::Value;

use crate::errors::MathResult;

/// A local function the model may call while producing its answer
pub trait Tool: Send + Sync {
    /// Name the model uses to call the tool
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object
    fn parameters(&self) -> Value;

    /// Run the tool on the model-supplied arguments
    fn call(&self, arguments: &Value) -> MathResult<Value>;
}
