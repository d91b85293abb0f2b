use crate::domain::common::{ApiEndpoint, ModelType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrintKind {
    Label,
    Report,
}

impl PrintKind {
    pub fn label(&self) -> &'static str {
        match self {
            PrintKind::Label => "Print Label",
            PrintKind::Report => "Print Report",
        }
    }

    pub fn template_endpoint(&self) -> ApiEndpoint {
        match self {
            PrintKind::Label => ApiEndpoint::LabelTemplateList,
            PrintKind::Report => ApiEndpoint::ReportTemplateList,
        }
    }

    pub fn print_endpoint(&self) -> ApiEndpoint {
        match self {
            PrintKind::Label => ApiEndpoint::LabelPrint,
            PrintKind::Report => ApiEndpoint::ReportPrint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub pk: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model_type: Option<ModelType>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintRequest {
    pub template: i64,
    pub items: Vec<i64>,
}

/// Data output record created by a print request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintResponse {
    pub pk: i64,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

/// Query for the templates applicable to a model kind
pub fn template_query(model: ModelType) -> Vec<(&'static str, String)> {
    vec![
        ("model_type", model.name().to_string()),
        ("enabled", "true".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_per_kind() {
        assert_eq!(PrintKind::Label.print_endpoint().url(None), "/api/label/print/");
        assert_eq!(
            PrintKind::Report.template_endpoint().url(None),
            "/api/report/template/"
        );
    }

    #[test]
    fn test_print_response_without_output() {
        let resp: PrintResponse = serde_json::from_str(r#"{"pk": 3}"#).unwrap();
        assert!(!resp.complete);
        assert_eq!(resp.output, None);
    }
}
