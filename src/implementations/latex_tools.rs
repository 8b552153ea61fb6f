use std::sync::Arc;

use log::debug;
use serde_json::{ json, Value };

use crate::errors::{ MathError, MathResult };
use crate::models::latex::{ FormulaEntry, FormulaLookup, SyntaxReport };
use crate::traits::tool::Tool;

/// key, name, latex, description
const FORMULAS: &[(&str, &str, &str, &str)] = &[
    (
        "quadratic",
        "Quadratic Formula",
        r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}",
        "Solutions of the equation ax^2 + bx + c = 0",
    ),
    (
        "pythagorean",
        "Pythagorean Theorem",
        "a^2 + b^2 = c^2",
        "Relation between the legs and hypotenuse of a right triangle",
    ),
    (
        "derivative",
        "Definition of the Derivative",
        r"f'(x) = \lim_{h \to 0} \frac{f(x+h) - f(x)}{h}",
        "Limit definition of the derivative of a function",
    ),
    (
        "integral",
        "Fundamental Theorem of Calculus",
        r"\int_a^b f(x)\,dx = F(b) - F(a)",
        "Evaluates a definite integral through an antiderivative",
    ),
    (
        "area_circle",
        "Area of a Circle",
        r"A = \pi r^2",
        "Area enclosed by a circle of radius r",
    ),
    (
        "binomial",
        "Binomial Theorem",
        r"(a + b)^n = \sum_{k=0}^{n} \binom{n}{k} a^{n-k} b^k",
        "Expansion of an integer power of a sum",
    ),
];

/// An open `{` group and the command it is an argument of, if any
struct OpenGroup {
    command: Option<String>,
}

/// Check that braces and environments in a LaTeX snippet balance
///
/// Every `{` and `}` counts toward the brace balance, escaped or not. Escaped
/// braces never open or close a command argument. Environments are only
/// counted, not matched by name, so `\begin{pmatrix}..\end{cases}` passes.
pub fn check_latex_syntax(latex: &str) -> SyntaxReport {
    let chars: Vec<char> = latex.chars().collect();
    let mut opening = 0usize;
    let mut closing = 0usize;
    let mut begins = 0usize;
    let mut ends = 0usize;
    let mut stack: Vec<OpenGroup> = Vec::new();
    // Command whose argument list may continue with the next `{`
    let mut pending_command: Option<String> = None;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].is_ascii_alphabetic() {
                    end += 1;
                }
                if end == start {
                    // Control symbol such as \{ \} \\ or \,
                    match chars.get(start) {
                        Some('{') => opening += 1,
                        Some('}') => closing += 1,
                        _ => {}
                    }
                    pending_command = None;
                    i = start + 1;
                    continue;
                }
                let name: String = chars[start..end].iter().collect();
                match name.as_str() {
                    "begin" => begins += 1,
                    "end" => ends += 1,
                    _ => {}
                }
                pending_command = Some(name);
                i = end;
                continue;
            }
            '{' => {
                opening += 1;
                stack.push(OpenGroup { command: pending_command.take() });
            }
            '}' => {
                closing += 1;
                pending_command = stack.pop().and_then(|group| group.command);
            }
            _ => {
                pending_command = None;
            }
        }
        i += 1;
    }

    let mut issues = Vec::new();
    if opening != closing {
        issues.push(
            format!("Unbalanced braces: {} opening '{{' vs {} closing '}}'", opening, closing)
        );
    }
    if begins != ends {
        issues.push(
            format!("Unbalanced environments: {} \\begin vs {} \\end", begins, ends)
        );
    }
    for group in &stack {
        if let Some(command) = &group.command {
            issues.push(format!("Unclosed argument for command \\{}", command));
        }
    }

    debug!("LaTeX syntax check found {} issue(s)", issues.len());
    SyntaxReport {
        valid: issues.is_empty(),
        issues,
    }
}

/// Case-insensitive substring search over the formula table
///
/// Matches the query against each entry's key, name and description. A blank
/// query matches nothing.
pub fn lookup_formula(query: &str) -> FormulaLookup {
    let needle = query.trim().to_lowercase();
    let results: Vec<FormulaEntry> = if needle.is_empty() {
        Vec::new()
    } else {
        FORMULAS.iter()
            .filter(|(key, name, _, description)| {
                key.to_lowercase().contains(&needle) ||
                    name.to_lowercase().contains(&needle) ||
                    description.to_lowercase().contains(&needle)
            })
            .map(|(key, name, latex, description)| FormulaEntry {
                key: key.to_string(),
                name: name.to_string(),
                latex: latex.to_string(),
                description: description.to_string(),
            })
            .collect()
    };

    FormulaLookup {
        found: !results.is_empty(),
        results,
    }
}

fn string_argument<'a>(tool: &str, arguments: &'a Value, field: &str) -> MathResult<&'a str> {
    arguments[field]
        .as_str()
        .ok_or_else(||
            MathError::InputValidation(
                format!("tool {} expects a string argument '{}'", tool, field)
            )
        )
}

fn to_tool_value<T: serde::Serialize>(tool: &str, value: &T) -> MathResult<Value> {
    serde_json::to_value(value).map_err(|e| MathError::schema_violation(tool, e.to_string()))
}

/// Exposes `check_latex_syntax` to the model
pub struct SyntaxCheckTool;

impl Tool for SyntaxCheckTool {
    fn name(&self) -> &str {
        "check_latex_syntax"
    }

    fn description(&self) -> &str {
        "Check that a LaTeX snippet has balanced braces and \\begin/\\end environments and no unclosed command arguments."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "latex": { "type": "string", "description": "LaTeX snippet to check" }
            },
            "required": ["latex"],
            "additionalProperties": false
        })
    }

    fn call(&self, arguments: &Value) -> MathResult<Value> {
        let latex = string_argument(self.name(), arguments, "latex")?;
        to_tool_value(self.name(), &check_latex_syntax(latex))
    }
}

/// Exposes `lookup_formula` to the model
pub struct FormulaLookupTool;

impl Tool for FormulaLookupTool {
    fn name(&self) -> &str {
        "lookup_formula"
    }

    fn description(&self) -> &str {
        "Look up the canonical LaTeX of a well-known formula, e.g. quadratic, pythagorean or derivative."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Formula name or topic" }
            },
            "required": ["query"],
            "additionalProperties": false
        })
    }

    fn call(&self, arguments: &Value) -> MathResult<Value> {
        let query = string_argument(self.name(), arguments, "query")?;
        to_tool_value(self.name(), &lookup_formula(query))
    }
}

/// Tools offered to the LaTeX generation stage
pub fn latex_toolbox() -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(SyntaxCheckTool), Arc::new(FormulaLookupTool)]
}
