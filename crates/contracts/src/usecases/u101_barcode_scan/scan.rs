use crate::domain::common::ModelType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeScanRequest {
    pub barcode: String,
}

/// Assign a custom barcode to an instance: `{"barcode": "...", "stocklocation": 7}`
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeLinkRequest {
    pub barcode: String,
    pub model: ModelType,
    pub pk: i64,
}

impl BarcodeLinkRequest {
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("barcode".into(), Value::String(self.barcode.clone()));
        body.insert(self.model.name().into(), Value::from(self.pk));
        Value::Object(body)
    }
}

/// Remove the custom barcode of an instance: `{"stocklocation": 7}`
pub fn barcode_unlink_body(model: ModelType, pk: i64) -> Value {
    let mut body = Map::new();
    body.insert(model.name().into(), Value::from(pk));
    Value::Object(body)
}

/// Raw scan response.
///
/// The matched instance is stored under the key of its model kind, alongside
/// `success` / `error` messages and plugin details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarcodeScanResponse(pub Map<String, Value>);

/// A scan response resolved to one model kind
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBarcode {
    pub model: ModelType,
    pub pk: i64,
    pub instance: Value,
    pub message: Option<String>,
}

impl BarcodeScanResponse {
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    pub fn success(&self) -> Option<&str> {
        self.0.get("success").and_then(Value::as_str)
    }

    /// Model kinds present in the response
    pub fn matched_models(&self) -> Vec<ModelType> {
        ModelType::ALL
            .into_iter()
            .filter(|m| self.0.get(m.name()).map(Value::is_object).unwrap_or(false))
            .collect()
    }

    /// Resolves the response to an instance of `expected`.
    ///
    /// Fails with the server's error message, or when the barcode matched a
    /// different model kind.
    pub fn resolve(&self, expected: ModelType) -> Result<ResolvedBarcode, String> {
        if let Some(error) = self.error() {
            return Err(error.to_string());
        }

        let Some(entry) = self.0.get(expected.name()).and_then(Value::as_object) else {
            let found = self.matched_models();
            return Err(match found.first() {
                Some(other) => format!(
                    "Barcode matched a {} but a {} was expected",
                    other.label(),
                    expected.label()
                ),
                None => "No match found for barcode".to_string(),
            });
        };

        let pk = entry
            .get("pk")
            .and_then(Value::as_i64)
            .or_else(|| {
                entry
                    .get("instance")
                    .and_then(|i| i.get("pk"))
                    .and_then(Value::as_i64)
            })
            .ok_or_else(|| format!("{} response is missing a primary key", expected.label()))?;

        Ok(ResolvedBarcode {
            model: expected,
            pk,
            instance: entry.get("instance").cloned().unwrap_or(Value::Null),
            message: self.success().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> BarcodeScanResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_resolve_expected_model() {
        let resp = response(json!({
            "stockitem": {"pk": 15, "instance": {"pk": 15, "quantity": 4.0}},
            "success": "Match found for barcode data",
            "plugin": "InvenTreeBarcode"
        }));
        let resolved = resp.resolve(ModelType::StockItem).unwrap();
        assert_eq!(resolved.pk, 15);
        assert_eq!(resolved.instance["quantity"], json!(4.0));
        assert_eq!(resolved.message.as_deref(), Some("Match found for barcode data"));
    }

    #[test]
    fn test_resolve_wrong_model() {
        let resp = response(json!({"part": {"pk": 3, "instance": {"pk": 3}}}));
        let err = resp.resolve(ModelType::StockLocation).unwrap_err();
        assert_eq!(err, "Barcode matched a Part but a Stock Location was expected");
    }

    #[test]
    fn test_resolve_server_error() {
        let resp = response(json!({"error": "No match found for barcode data"}));
        assert_eq!(
            resp.resolve(ModelType::StockItem).unwrap_err(),
            "No match found for barcode data"
        );
    }

    #[test]
    fn test_pk_from_instance() {
        let resp = response(json!({"stocklocation": {"instance": {"pk": 2}}}));
        assert_eq!(resp.resolve(ModelType::StockLocation).unwrap().pk, 2);
    }

    #[test]
    fn test_link_bodies() {
        let link = BarcodeLinkRequest {
            barcode: "ABC".into(),
            model: ModelType::StockLocation,
            pk: 7,
        };
        assert_eq!(link.to_body(), json!({"barcode": "ABC", "stocklocation": 7}));
        assert_eq!(
            barcode_unlink_body(ModelType::StockLocation, 7),
            json!({"stocklocation": 7})
        );
    }
}
