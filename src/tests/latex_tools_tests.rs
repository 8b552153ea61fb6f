#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::implementations::latex_tools::{
        check_latex_syntax,
        latex_toolbox,
        lookup_formula,
        FormulaLookupTool,
        SyntaxCheckTool,
    };
    use crate::traits::tool::Tool;

    #[test]
    fn test_balanced_snippets_are_valid() {
        let snippets = [
            "3x^2+4x-7",
            r"\frac{-b \pm \sqrt{b^2 - 4ac}}{2a}",
            r"\sum_{k=0}^{n} \binom{n}{k} a^{n-k} b^k",
            r"\begin{cases} x & x \geq 0 \\ -x & x < 0 \end{cases}",
            r"\left\{ x \mid x > 0 \right\}",
            r"\int_a^b f(x)\,dx",
            "",
        ];

        for snippet in snippets {
            let report = check_latex_syntax(snippet);
            assert!(report.valid, "{} should be valid: {:?}", snippet, report.issues);
            assert!(report.issues.is_empty());
        }
    }

    #[test]
    fn test_unbalanced_braces_are_reported() {
        let report = check_latex_syntax(r"\frac{1{2}");

        assert!(!report.valid);
        assert!(
            report.issues.iter().any(|i| i.starts_with("Unbalanced braces: 2 opening")),
            "{:?}",
            report.issues
        );
    }

    #[test]
    fn test_unclosed_command_argument_is_reported() {
        let report = check_latex_syntax(r"x + \sqrt{2");

        assert!(!report.valid);
        assert!(report.issues.contains(&r"Unclosed argument for command \sqrt".to_string()));
    }

    #[test]
    fn test_extra_closing_brace_is_reported() {
        let report = check_latex_syntax("x^{2}}");

        assert!(!report.valid);
        assert_eq!(report.issues, vec!["Unbalanced braces: 1 opening '{' vs 2 closing '}'"]);
    }

    #[test]
    fn test_environment_counts_must_match() {
        let report = check_latex_syntax(r"\begin{pmatrix} a & b \\ c & d");

        assert!(!report.valid);
        assert!(report.issues.iter().any(|i| i.starts_with("Unbalanced environments: 1")));
    }

    #[test]
    fn test_mismatched_environment_names_pass() {
        // Environments are counted, not matched by name
        let report = check_latex_syntax(r"\begin{pmatrix}a\end{cases}");

        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_escaped_braces_count_toward_balance() {
        assert!(check_latex_syntax(r"\{ 1, 2 \}").valid);

        // One `{` and one `}` in total, whatever escapes them
        let report = check_latex_syntax(r"\{x}");
        assert!(report.valid, "{:?}", report.issues);

        let report = check_latex_syntax(r"\left\{ x");
        assert_eq!(report.issues, vec!["Unbalanced braces: 1 opening '{' vs 0 closing '}'"]);
    }

    #[test]
    fn test_escaped_brace_does_not_open_argument() {
        // Only the raw balance is off; no command argument is left open
        let report = check_latex_syntax(r"\sqrt\{ 2");

        assert!(!report.valid);
        assert_eq!(report.issues, vec!["Unbalanced braces: 1 opening '{' vs 0 closing '}'"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lookup = lookup_formula("Pythagorean");

        assert!(lookup.found);
        let entry = lookup.results
            .iter()
            .find(|e| e.key == "pythagorean")
            .expect("pythagorean entry");
        assert_eq!(entry.latex, "a^2 + b^2 = c^2");
    }

    #[test]
    fn test_lookup_matches_description() {
        let lookup = lookup_formula("right triangle");

        assert!(lookup.found);
        assert_eq!(lookup.results.len(), 1);
        assert_eq!(lookup.results[0].key, "pythagorean");
    }

    #[test]
    fn test_lookup_returns_all_matches() {
        let keys: Vec<String> = lookup_formula("derivative")
            .results.into_iter()
            .map(|e| e.key)
            .collect();

        assert_eq!(keys, vec!["derivative", "integral"]);
    }

    #[test]
    fn test_lookup_unknown_topic() {
        let lookup = lookup_formula("nonexistent-topic");

        assert!(!lookup.found);
        assert!(lookup.results.is_empty());
    }

    #[test]
    fn test_blank_lookup_matches_nothing() {
        assert!(!lookup_formula("   ").found);
    }

    #[test]
    fn test_syntax_tool_call() {
        let output = SyntaxCheckTool.call(&json!({ "latex": r"\frac{1{2}" })).unwrap();

        assert_eq!(output["valid"], json!(false));
        assert!(output["issues"].as_array().is_some_and(|issues| !issues.is_empty()));
    }

    #[test]
    fn test_formula_tool_call() {
        let output = FormulaLookupTool.call(&json!({ "query": "quadratic" })).unwrap();

        assert_eq!(output["found"], json!(true));
        assert_eq!(output["results"][0]["name"], json!("Quadratic Formula"));
    }

    #[test]
    fn test_tool_rejects_missing_argument() {
        let err = FormulaLookupTool.call(&json!({ "topic": "quadratic" })).unwrap_err();
        assert!(err.to_string().contains("'query'"));
    }

    #[test]
    fn test_toolbox_parameters_are_objects() {
        for tool in latex_toolbox() {
            let parameters = tool.parameters();
            assert_eq!(parameters["type"], json!("object"));
            assert!(parameters["required"].as_array().is_some_and(|r| r.len() == 1));
        }
    }
}
