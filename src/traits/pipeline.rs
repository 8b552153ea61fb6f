use async_trait::async_trait;

use crate::models::image::ImageRef;
use crate::models::pipeline::PipelineResult;

/// Entry points consumed by the presentation layer
///
/// Neither call returns an error: every stage failure is folded into
/// `PipelineResult::Failed`.
#[async_trait]
pub trait MathPipeline {
    /// Transcribe, classify, solve, typeset and review an image
    async fn run_on_image(&self, image: &ImageRef) -> PipelineResult;

    /// Same as `run_on_image`, using `text` as the problem text
    async fn run_on_text(&self, text: &str) -> PipelineResult;
}
