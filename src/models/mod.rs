pub mod image;
pub mod problem;
pub mod latex;
pub mod pipeline;

// Re-export common model types
pub use image::ImageRef;
pub use problem::{ Classification, GuardrailVerdict, Solution, Transcription };
pub use latex::{ FormulaEntry, FormulaLookup, LatexResult, QualityAssessment, SyntaxReport };
pub use pipeline::{ PipelineFailure, PipelineOutput, PipelineResult, Stage };
