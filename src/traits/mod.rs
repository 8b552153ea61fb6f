pub mod model_client;
pub mod tool;
pub mod pipeline;

// Re-export traits
pub use model_client::{
    invoke_structured,
    ModelClient,
    ModelInput,
    ModelRequest,
    OutputSchema,
    StructuredOutput,
};
pub use tool::Tool;
pub use pipeline::MathPipeline;
