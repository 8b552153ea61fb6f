//! The individual model-backed pipeline stages.
//!
//! Each stage is a plain async function of its input and a `ModelClient`,
//! so tests can drive them with a deterministic stub.

use log::{ debug, info };

use crate::errors::{ MathError, MathResult };
use crate::implementations::latex_tools::latex_toolbox;
use crate::models::image::ImageRef;
use crate::models::latex::{ LatexResult, QualityAssessment };
use crate::models::problem::{ Classification, GuardrailVerdict, Solution, Transcription };
use crate::traits::model_client::{ invoke_structured, ModelClient, ModelInput, ModelRequest };

pub const TRANSCRIPTION_INSTRUCTIONS: &str =
    r#"
You transcribe images of mathematical content. Write out, in plain English and standard
math notation, exactly what is visible in the image: every expression, equation, label and
instruction, in reading order.

Rules:
- Transcribe verbatim. Do NOT solve, simplify, evaluate or annotate anything.
- Keep exponents, subscripts, fractions and roots unambiguous, e.g. x^2, a_1, (x+1)/(x-1), sqrt(2).
- Set is_valid to false and text to an empty string if the image contains no mathematical content.
"#;

pub const CLASSIFICATION_INSTRUCTIONS: &str =
    r#"
You classify math problems. Given the problem text, return:
- category: the subject area, e.g. arithmetic, algebra, geometry, trigonometry, calculus,
  linear algebra, probability, statistics, number theory
- difficulty: one of easy, medium or hard
- reasoning: one or two sentences explaining the choice
"#;

pub const SOLUTION_INSTRUCTIONS: &str =
    r#"
You solve math problems step by step. Given the problem text, return:
- steps: an ordered list of short, self-contained solution steps
- final_answer: the final result only

If the problem cannot be solved as stated, return an empty steps list and explain why in
final_answer.
"#;

pub const LATEX_INSTRUCTIONS: &str =
    r#"
You typeset math problems as LaTeX for a renderer that supports only a fixed command set.
Given the problem text, return latex_code holding the mathematics and a short description.

Allowed: \frac, \sqrt, sub/superscripts, \sum, \prod, \int, \lim, standard functions
(\sin, \cos, \tan, \log, \ln, \exp), Greek letters, \cdot, \times, \pm, \leq, \geq, \neq,
\left/\right delimiters, and the environments matrix, pmatrix, bmatrix and cases.

Forbidden: \newcommand, \renewcommand, \def, \usepackage, \documentclass and any command
outside the allowed set. Do not wrap the snippet in $ or \[ \].

You may call lookup_formula to get the canonical form of a well-known formula, and you
should call check_latex_syntax on your snippet before answering.
"#;

pub const REVIEW_INSTRUCTIONS: &str =
    r#"
You review LaTeX snippets for a renderer that supports only basic math commands and the
matrix, pmatrix, bmatrix and cases environments. Given a snippet, return:
- is_correct: true if it is well-formed and uses only supported commands
- issues: each problem found; empty when is_correct is true
- corrected_latex: a fixed snippet when you found issues, otherwise null

A correction must never change the mathematical meaning of the snippet.
"#;

pub const GUARDRAIL_INSTRUCTIONS: &str =
    r#"
You decide whether a user's input is a mathematical problem or mathematical content.
Return is_math_problem and a one-sentence reason.
"#;

/// Transcribe the math visible in an image
pub async fn transcribe<C: ModelClient + ?Sized>(
    client: &C,
    image: &ImageRef,
    model: Option<String>
) -> MathResult<Transcription> {
    info!("Transcribing {}", image);
    let request = ModelRequest::for_output::<Transcription>(
        TRANSCRIPTION_INSTRUCTIONS.trim(),
        ModelInput::Image(image.clone())
    ).with_model(model);

    let transcription: Transcription = invoke_structured(client, request).await?;
    if !transcription.is_valid || transcription.text.trim().is_empty() {
        return Err(
            MathError::InputValidation(
                "image does not contain a recognizable math problem".to_string()
            )
        );
    }

    debug!("Transcription: {}", transcription.text);
    Ok(transcription)
}

pub async fn classify<C: ModelClient + ?Sized>(
    client: &C,
    problem_text: &str
) -> MathResult<Classification> {
    info!("Classifying problem");
    let request = ModelRequest::for_output::<Classification>(
        CLASSIFICATION_INSTRUCTIONS.trim(),
        ModelInput::Text(problem_text.to_string())
    );
    let classification: Classification = invoke_structured(client, request).await?;
    debug!("Classified as {} / {}", classification.category, classification.difficulty);
    Ok(classification)
}

pub async fn solve<C: ModelClient + ?Sized>(client: &C, problem_text: &str) -> MathResult<Solution> {
    info!("Solving problem");
    let request = ModelRequest::for_output::<Solution>(
        SOLUTION_INSTRUCTIONS.trim(),
        ModelInput::Text(problem_text.to_string())
    );
    let solution: Solution = invoke_structured(client, request).await?;
    debug!("Solution has {} step(s)", solution.steps.len());
    Ok(solution)
}

/// Typeset the problem, offering the syntax checker and formula lookup as tools
pub async fn generate_latex<C: ModelClient + ?Sized>(
    client: &C,
    problem_text: &str
) -> MathResult<LatexResult> {
    info!("Generating LaTeX");
    let request = ModelRequest::for_output::<LatexResult>(
        LATEX_INSTRUCTIONS.trim(),
        ModelInput::Text(problem_text.to_string())
    ).with_tools(latex_toolbox());
    invoke_structured(client, request).await
}

pub async fn review_latex<C: ModelClient + ?Sized>(
    client: &C,
    latex: &str
) -> MathResult<QualityAssessment> {
    info!("Reviewing LaTeX");
    let request = ModelRequest::for_output::<QualityAssessment>(
        REVIEW_INSTRUCTIONS.trim(),
        ModelInput::Text(latex.to_string())
    );
    let assessment: QualityAssessment = invoke_structured(client, request).await?;
    debug!("Review found {} issue(s)", assessment.issues.len());
    Ok(assessment)
}

/// Pre-stage filter; a reject becomes `MathError::GuardrailRejected`
pub async fn guard<C: ModelClient + ?Sized>(client: &C, text: &str) -> MathResult<()> {
    info!("Running math guardrail");
    let request = ModelRequest::for_output::<GuardrailVerdict>(
        GUARDRAIL_INSTRUCTIONS.trim(),
        ModelInput::Text(text.to_string())
    );
    let verdict: GuardrailVerdict = invoke_structured(client, request).await?;
    if verdict.is_math_problem {
        Ok(())
    } else {
        Err(MathError::GuardrailRejected(verdict.reason))
    }
}
