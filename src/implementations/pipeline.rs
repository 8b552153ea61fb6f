use async_trait::async_trait;
use log::{ info, warn };

use crate::errors::MathError;
use crate::implementations::config::PipelineConfig;
use crate::implementations::latex_tools::check_latex_syntax;
use crate::implementations::stages;
use crate::models::image::ImageRef;
use crate::models::latex::{ LatexResult, QualityAssessment };
use crate::models::pipeline::{ PipelineFailure, PipelineOutput, PipelineResult, Stage };
use crate::models::problem::Transcription;
use crate::traits::model_client::ModelClient;
use crate::traits::pipeline::MathPipeline;

/// Switches that shape a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOptions {
    pub guardrail: bool,
    pub parallel_analysis: bool,
    pub vision_model: Option<String>,
}

impl From<&PipelineConfig> for PipelineOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            guardrail: config.guardrail,
            parallel_analysis: config.parallel_analysis,
            vision_model: Some(config.vision_model().to_string()),
        }
    }
}

/// Runs the stages in order and folds any failure into `PipelineResult::Failed`
///
/// Holds no per-run state, so one orchestrator can serve concurrent runs.
pub struct MathOrchestrator<C: ModelClient> {
    client: C,
    options: PipelineOptions,
}

fn failed_at(stage: Stage) -> impl FnOnce(MathError) -> PipelineFailure {
    move |error| {
        warn!("Stage {} failed: {}", stage, error);
        PipelineFailure::from_error(stage, &error)
    }
}

/// Swap in the reviewer's correction whenever one is offered
///
/// The correction is kept verbatim. An unbalanced correction is still used,
/// with the balance checker's findings appended to the review issues.
fn apply_review(latex: LatexResult, mut quality: QualityAssessment) -> (String, QualityAssessment) {
    let Some(correction) = quality.correction().map(str::to_string) else {
        return (latex.latex_code, quality);
    };

    info!("Using corrected LaTeX from quality review");
    let report = check_latex_syntax(&correction);
    if !report.valid {
        warn!("Corrected LaTeX does not balance");
        quality.issues.push(
            format!("Corrected LaTeX failed the syntax check: {}", report.issues.join("; "))
        );
    }
    (correction, quality)
}

impl<C: ModelClient> MathOrchestrator<C> {
    pub fn new(client: C, options: PipelineOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    async fn guard(&self, text: &str) -> Result<(), PipelineFailure> {
        if !self.options().guardrail {
            return Ok(());
        }
        stages::guard(&self.client, text).await.map_err(failed_at(Stage::Guardrail))
    }

    /// Classifying → Solving → Generating → Reviewing
    async fn analyse(
        &self,
        problem_text: String,
        transcription: Option<Transcription>
    ) -> Result<PipelineOutput, PipelineFailure> {
        let (classification, solution) = if self.options().parallel_analysis {
            let (classification, solution) = tokio::join!(
                stages::classify(&self.client, &problem_text),
                stages::solve(&self.client, &problem_text)
            );
            (
                classification.map_err(failed_at(Stage::Classifying))?,
                solution.map_err(failed_at(Stage::Solving))?,
            )
        } else {
            let classification = stages
                ::classify(&self.client, &problem_text).await
                .map_err(failed_at(Stage::Classifying))?;
            let solution = stages
                ::solve(&self.client, &problem_text).await
                .map_err(failed_at(Stage::Solving))?;
            (classification, solution)
        };

        let latex = stages
            ::generate_latex(&self.client, &problem_text).await
            .map_err(failed_at(Stage::Generating))?;
        let quality = stages
            ::review_latex(&self.client, &latex.latex_code).await
            .map_err(failed_at(Stage::Reviewing))?;

        let latex_description = latex.description.clone();
        let (latex, quality) = apply_review(latex, quality);

        Ok(PipelineOutput {
            problem_text,
            transcription,
            latex,
            latex_description,
            classification,
            solution,
            quality,
        })
    }

    async fn image_flow(&self, image: &ImageRef) -> Result<PipelineOutput, PipelineFailure> {
        let transcription = stages
            ::transcribe(&self.client, image, self.options().vision_model.clone()).await
            .map_err(failed_at(Stage::Transcribing))?;
        self.guard(&transcription.text).await?;
        let problem_text = transcription.text.clone();
        self.analyse(problem_text, Some(transcription)).await
    }

    async fn text_flow(&self, text: &str) -> Result<PipelineOutput, PipelineFailure> {
        if text.trim().is_empty() {
            return Err(
                failed_at(Stage::Input)(
                    MathError::InputValidation("problem text is empty".to_string())
                )
            );
        }
        self.guard(text).await?;
        self.analyse(text.to_string(), None).await
    }
}

fn finish(outcome: Result<PipelineOutput, PipelineFailure>) -> PipelineResult {
    match outcome {
        Ok(output) => {
            info!("Pipeline run completed");
            PipelineResult::Completed(output)
        }
        Err(failure) => PipelineResult::Failed(failure),
    }
}

#[async_trait]
impl<C: ModelClient> MathPipeline for MathOrchestrator<C> {
    async fn run_on_image(&self, image: &ImageRef) -> PipelineResult {
        info!("Starting image pipeline run");
        finish(self.image_flow(image).await)
    }

    async fn run_on_text(&self, text: &str) -> PipelineResult {
        info!("Starting text pipeline run");
        finish(self.text_flow(text).await)
    }
}
