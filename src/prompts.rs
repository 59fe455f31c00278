pub const DIAGNOSIS: &str = include_str!("../data/prompts/diagnosis.txt");

/// Fields the model must always return.
pub const REQUIRED_FIELDS: &[&str] = &[
    "diseaseName",
    "isHealthy",
    "description",
    "causes",
    "treatment",
    "prevention",
];

/// Output schema declared to the model, in Gemini's OpenAPI subset.
pub fn diagnosis_schema() -> serde_json::Value {
    let string_list = |description: &str| {
        serde_json::json!({
            "type": "ARRAY",
            "items": { "type": "STRING" },
            "description": description,
        })
    };

    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "diseaseName": {
                "type": "STRING",
                "description": "The common name of the identified disease (e.g., 'Common Rust', 'Healthy', 'Northern Corn Leaf Blight', 'Gray Leaf Spot').",
            },
            "isHealthy": {
                "type": "BOOLEAN",
                "description": "True if the plant is identified as healthy, otherwise false.",
            },
            "description": {
                "type": "STRING",
                "description": "A detailed but concise description of the condition.",
            },
            "causes": string_list("A list of common causes for the disease."),
            "treatment": string_list("A list of recommended steps or methods for treatment."),
            "prevention": string_list("A list of measures to prevent this disease in the future."),
            "error": {
                "type": "STRING",
                "description": "An error message if diagnosis is not possible (e.g., 'Unable to diagnose. Please provide a clear image of a corn leaf.').",
                "nullable": true,
            },
        },
        "required": REQUIRED_FIELDS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_all_diseases() {
        assert!(DIAGNOSIS.contains("Common Rust"));
        assert!(DIAGNOSIS.contains("Northern Corn Leaf Blight"));
        assert!(DIAGNOSIS.contains("Gray Leaf Spot"));
    }

    #[test]
    fn test_schema_requires_fields_but_not_error() {
        let schema = diagnosis_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert_eq!(required, REQUIRED_FIELDS);
        assert!(!required.contains(&"error"));
        assert_eq!(schema["properties"]["error"]["nullable"], true);
        assert_eq!(schema["properties"]["causes"]["type"], "ARRAY");
    }
}
