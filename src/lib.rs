pub mod models;
pub mod traits;
pub mod errors;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use errors::{ ErrorKind, MathError, MathResult };
pub use implementations::config::{ ModelConfig, PipelineConfig };
pub use implementations::latex_tools::{ check_latex_syntax, lookup_formula };
pub use implementations::openai_client::OpenAiModelClient;
pub use implementations::pipeline::{ MathOrchestrator, PipelineOptions };
pub use models::{
    image::ImageRef,
    problem::{ Classification, GuardrailVerdict, Solution, Transcription },
    latex::{ FormulaEntry, FormulaLookup, LatexResult, QualityAssessment, SyntaxReport },
    pipeline::{ PipelineFailure, PipelineOutput, PipelineResult, Stage },
};
pub use traits::{
    invoke_structured,
    MathPipeline,
    ModelClient,
    ModelInput,
    ModelRequest,
    OutputSchema,
    StructuredOutput,
    Tool,
};
