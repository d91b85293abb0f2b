use contracts::domain::common::ModelType;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Multi-line or long text
    Text,
    String,
    /// Yes / No badge
    Boolean,
    /// Pk of another record; shows `model_field` of that record and links to it
    Link {
        model: ModelType,
        model_field: &'static str,
    },
}

/// Resolved value of a row, ready to render
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Text(String),
    /// Text preceded by a record-specific icon
    IconText { icon: String, text: String },
    Bool(bool),
    Link {
        model: ModelType,
        pk: i64,
        model_field: &'static str,
        /// Known when the record embeds `<name>_detail`; fetched otherwise
        label: Option<String>,
    },
    Empty,
}

impl DetailValue {
    /// Text to put on the clipboard
    pub fn copy_text(&self) -> Option<String> {
        match self {
            DetailValue::Text(s) | DetailValue::IconText { text: s, .. } => Some(s.clone()),
            DetailValue::Link { label, .. } => label.clone(),
            _ => None,
        }
    }
}

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type Formatter = Arc<dyn Fn(&Value) -> DetailValue + Send + Sync>;

#[derive(Clone)]
pub struct DetailsField {
    pub name: &'static str,
    pub label: String,
    pub kind: FieldKind,
    pub icon: Option<&'static str>,
    pub copy: bool,
    pub(super) hidden: Option<Predicate>,
    pub(super) formatter: Option<Formatter>,
}

impl fmt::Debug for DetailsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailsField")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("hidden", &self.hidden.is_some())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl DetailsField {
    fn new(name: &'static str, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name,
            label: label.into(),
            kind,
            icon: None,
            copy: false,
            hidden: None,
            formatter: None,
        }
    }

    pub fn text(name: &'static str, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn string(name: &'static str, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::String)
    }

    pub fn boolean(name: &'static str, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn link(
        name: &'static str,
        label: impl Into<String>,
        model: ModelType,
        model_field: &'static str,
    ) -> Self {
        Self::new(name, label, FieldKind::Link { model, model_field })
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn copyable(mut self) -> Self {
        self.copy = true;
        self
    }

    /// Unconditionally hidden when `hidden` is true
    pub fn hidden(self, hidden: bool) -> Self {
        self.hidden_when(move |_| hidden)
    }

    pub fn hidden_when(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.hidden = Some(Arc::new(predicate));
        self
    }

    /// Computes the value from the whole record instead of looking up `name`
    pub fn formatted(
        mut self,
        formatter: impl Fn(&Value) -> DetailValue + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn is_hidden(&self, item: &Value) -> bool {
        self.hidden.as_ref().map(|p| p(item)).unwrap_or(false)
    }
}
