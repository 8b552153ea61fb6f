#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::test;

    use crate::errors::ErrorKind;
    use crate::models::latex::QualityAssessment;
    use crate::models::problem::Classification;
    use crate::tests::stub_model::StubModelClient;
    use crate::traits::model_client::{
        invoke_structured,
        ModelInput,
        ModelRequest,
        OutputSchema,
        StructuredOutput,
    };

    #[test]
    async fn test_invoke_structured_deserializes() {
        let client = StubModelClient::new().respond::<Classification>(
            json!({ "category": "algebra", "difficulty": "easy", "reasoning": "linear equation" })
        );
        let request = ModelRequest::for_output::<Classification>(
            "classify",
            ModelInput::Text("2x = 4".to_string())
        );

        let classification: Classification = invoke_structured(&client, request).await.unwrap();
        assert_eq!(classification.category, "algebra");
    }

    #[test]
    async fn test_invoke_structured_schema_violation() {
        let client = StubModelClient::new().respond::<Classification>(json!({ "category": "algebra" }));
        let request = ModelRequest::for_output::<Classification>(
            "classify",
            ModelInput::Text("2x = 4".to_string())
        );

        let err = invoke_structured::<Classification, _>(&client, request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
        assert!(err.to_string().contains("classification"));
    }

    #[test]
    async fn test_quality_assessment_null_correction() {
        let assessment: QualityAssessment = serde_json
            ::from_value(json!({ "is_correct": true, "issues": [], "corrected_latex": null }))
            .unwrap();

        assert!(assessment.corrected_latex.is_none());
        assert!(assessment.correction().is_none());
    }

    #[test]
    async fn test_output_schemas_are_strict() {
        let schemas = [
            OutputSchema::of::<Classification>(),
            OutputSchema::of::<QualityAssessment>(),
        ];
        for schema in schemas {
            assert_eq!(schema.schema["additionalProperties"], json!(false));
            let required = schema.schema["required"].as_array().unwrap().len();
            let properties = schema.schema["properties"].as_object().unwrap().len();
            assert_eq!(required, properties, "{}", schema.name);
        }
        assert_eq!(Classification::SCHEMA_NAME, "classification");
    }
}
