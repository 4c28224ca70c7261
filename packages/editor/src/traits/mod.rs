//! # Traits
//!
//! Property editors bound to part of a component's state.
//!
//! A [`TraitDef`] lives on a component type and describes the control: its
//! kind, whether it targets an HTML attribute or a first-class property, and
//! how commits are timed. Reads and writes go through a [`TraitBinding`];
//! traits without a custom binding use [`DefaultBinding`].
//!
//! A [`TraitControl`] is the per-control instance created for one component.
//! It owns the debounce handle when the trait's commit policy asks for one.

pub mod binding;
pub mod control;
pub mod stack;

pub use binding::{DefaultBinding, TraitBinding, TraitContext, UpdateLog, UpdateSink};
pub use control::{CommitOutcome, TraitControl};
pub use stack::ChildListBinding;

use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Settle window for debounced commits
pub const DEFAULT_COMMIT_SETTLE: Duration = Duration::from_millis(500);

pub type TraitResult<T> = Result<T, TraitError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraitError {
    #[error("Malformed input for trait `{name}`: {reason}")]
    Malformed { name: String, reason: String },

    #[error("Trait `{name}` expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("Trait `{name}` is bound to component {expected}, not {found}")]
    WrongComponent {
        name: String,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl TraitError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        TraitError::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn type_mismatch(name: impl Into<String>, expected: &'static str) -> Self {
        TraitError::TypeMismatch {
            name: name.into(),
            expected,
        }
    }
}

/// Entry of a select trait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub name: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

/// Editor widget used for a trait
#[derive(Debug, Clone, PartialEq)]
pub enum TraitKind {
    Text,
    /// Writes `value_true` when checked; `value_false` or nothing when not
    Checkbox {
        value_true: Option<String>,
        value_false: Option<String>,
    },
    Select { options: Vec<SelectOption> },
    /// Numeric input; `units` empty means unitless
    Number { units: Vec<String> },
    Color,
    Code { language: String },
    Href,
    /// List of rows mapped onto child components
    Stack { properties: Vec<String> },
}

impl TraitKind {
    pub fn name(&self) -> &'static str {
        match self {
            TraitKind::Text => "text",
            TraitKind::Checkbox { .. } => "checkbox",
            TraitKind::Select { .. } => "select",
            TraitKind::Number { .. } => "number",
            TraitKind::Color => "color",
            TraitKind::Code { .. } => "code",
            TraitKind::Href => "href",
            TraitKind::Stack { .. } => "stack",
        }
    }
}

/// One row of a stack trait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRow {
    pub id: String,
    pub label: String,
}

impl StackRow {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Value shown by, and committed from, a trait control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TraitValue {
    Empty,
    Text(String),
    Bool(bool),
    Number { value: f64, unit: Option<String> },
    Rows(Vec<StackRow>),
}

impl TraitValue {
    pub fn text(value: impl Into<String>) -> Self {
        TraitValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TraitValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => TraitValue::Empty,
            Value::Bool(b) => TraitValue::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(|value| TraitValue::Number { value, unit: None })
                .unwrap_or(TraitValue::Empty),
            Value::String(s) => TraitValue::Text(s.clone()),
            other => TraitValue::Text(other.to_string()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            TraitValue::Empty => Value::Null,
            TraitValue::Text(text) => Value::String(text.clone()),
            TraitValue::Bool(b) => Value::Bool(*b),
            TraitValue::Number { value, unit: None } => serde_json::json!(value),
            TraitValue::Number {
                value,
                unit: Some(unit),
            } => Value::String(format!("{}{}", value, unit)),
            TraitValue::Rows(rows) => serde_json::json!(rows),
        }
    }
}

/// When a control's commit reaches the component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    #[default]
    Immediate,
    Debounced { wait: Duration, leading: bool },
}

impl CommitPolicy {
    /// Trailing commit after [`DEFAULT_COMMIT_SETTLE`]
    pub fn settled() -> Self {
        CommitPolicy::Debounced {
            wait: DEFAULT_COMMIT_SETTLE,
            leading: false,
        }
    }
}

/// Trait declaration attached to a component type
#[derive(Debug, Clone)]
pub struct TraitDef {
    pub name: String,
    pub label: Option<String>,
    pub kind: TraitKind,
    /// Target a first-class property instead of an HTML attribute
    pub change_prop: bool,
    pub commit: CommitPolicy,
    pub binding: Option<Arc<dyn TraitBinding>>,
}

impl TraitDef {
    pub fn new(name: impl Into<String>, kind: TraitKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            change_prop: false,
            commit: CommitPolicy::Immediate,
            binding: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, TraitKind::Text)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TraitKind::Checkbox {
                value_true: None,
                value_false: None,
            },
        )
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::new(name, TraitKind::Select { options })
    }

    pub fn number<I, S>(name: impl Into<String>, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            TraitKind::Number {
                units: units.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn color(name: impl Into<String>) -> Self {
        Self::new(name, TraitKind::Color)
    }

    pub fn code(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(
            name,
            TraitKind::Code {
                language: language.into(),
            },
        )
    }

    pub fn href(name: impl Into<String>) -> Self {
        Self::new(name, TraitKind::Href)
    }

    pub fn stack<I, S>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            TraitKind::Stack {
                properties: properties.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Checkbox value written when checked
    pub fn value_true(mut self, value: impl Into<String>) -> Self {
        if let TraitKind::Checkbox { value_true, .. } = &mut self.kind {
            *value_true = Some(value.into());
        }
        self
    }

    /// Checkbox value written when unchecked
    pub fn value_false(mut self, value: impl Into<String>) -> Self {
        if let TraitKind::Checkbox { value_false, .. } = &mut self.kind {
            *value_false = Some(value.into());
        }
        self
    }

    pub fn change_prop(mut self) -> Self {
        self.change_prop = true;
        self
    }

    pub fn commit(mut self, policy: CommitPolicy) -> Self {
        self.commit = policy;
        self
    }

    pub fn binding(mut self, binding: impl TraitBinding + 'static) -> Self {
        self.binding = Some(Arc::new(binding));
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn resolved_binding(&self) -> &dyn TraitBinding {
        match &self.binding {
            Some(binding) => binding.as_ref(),
            None => &DefaultBinding,
        }
    }
}

/// `"title"` declares a text trait on the `title` attribute
impl From<&str> for TraitDef {
    fn from(name: &str) -> Self {
        TraitDef::text(name)
    }
}

impl From<String> for TraitDef {
    fn from(name: String) -> Self {
        TraitDef::text(name)
    }
}
