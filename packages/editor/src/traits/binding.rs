use super::{TraitDef, TraitError, TraitKind, TraitResult, TraitValue};
use crate::component::{Component, ComponentId};
use crate::registry::Registry;
use std::fmt;

/// Receives change notifications for committed traits
pub trait UpdateSink {
    fn component_updated(&mut self, component: ComponentId, property: &str);
}

/// Sink that records notifications in order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateLog {
    pub updates: Vec<(ComponentId, String)>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl UpdateSink for UpdateLog {
    fn component_updated(&mut self, component: ComponentId, property: &str) {
        self.updates.push((component, property.to_string()));
    }
}

/// Everything a binding may touch while a commit runs
pub struct TraitContext<'a> {
    pub component: &'a mut Component,
    pub registry: &'a Registry,
    pub trait_def: &'a TraitDef,
    sink: &'a mut dyn UpdateSink,
}

impl<'a> TraitContext<'a> {
    pub fn new(
        component: &'a mut Component,
        registry: &'a Registry,
        trait_def: &'a TraitDef,
        sink: &'a mut dyn UpdateSink,
    ) -> Self {
        Self {
            component,
            registry,
            trait_def,
            sink,
        }
    }

    /// Tell the host the component changed
    pub fn emit_update(&mut self) {
        self.sink
            .component_updated(self.component.id(), &self.trait_def.name);
    }

    pub fn malformed(&self, reason: impl Into<String>) -> TraitError {
        TraitError::malformed(self.trait_def.name.clone(), reason)
    }
}

/// Read/write contract between a trait control and a component.
///
/// `set_value` must validate before mutating: an `Err` means the component
/// was left untouched. A successful commit emits exactly one update.
pub trait TraitBinding: fmt::Debug + Send + Sync {
    fn get_value(&self, trait_def: &TraitDef, component: &Component) -> TraitValue;

    fn set_value(&self, ctx: &mut TraitContext<'_>, value: TraitValue) -> TraitResult<()>;
}

/// Maps a trait 1:1 onto an attribute, or a property when `change_prop` is set
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBinding;

impl DefaultBinding {
    fn raw(trait_def: &TraitDef, component: &Component) -> Option<String> {
        if trait_def.change_prop {
            return component.get_prop(&trait_def.name).map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        }
        component.get_attribute(&trait_def.name).map(str::to_string)
    }

    /// Validated text to store, `None` to clear
    fn encode(trait_def: &TraitDef, value: TraitValue) -> TraitResult<Option<String>> {
        let name = trait_def.name.as_str();
        match (&trait_def.kind, value) {
            (TraitKind::Stack { .. }, _) => Err(TraitError::malformed(
                name,
                "stack traits need a child list binding",
            )),
            (TraitKind::Checkbox { value_true, value_false }, TraitValue::Bool(checked)) => {
                Ok(if checked {
                    Some(value_true.clone().unwrap_or_default())
                } else {
                    value_false.clone()
                })
            }
            (TraitKind::Checkbox { .. }, _) => Err(TraitError::type_mismatch(name, "boolean")),
            (_, TraitValue::Empty) => Ok(None),
            (TraitKind::Select { options }, TraitValue::Text(choice)) => {
                if options.iter().any(|o| o.value == choice) {
                    Ok(Some(choice))
                } else {
                    Err(TraitError::malformed(name, format!("`{}` is not an option", choice)))
                }
            }
            (TraitKind::Number { units }, TraitValue::Number { value, unit }) => {
                encode_number(name, units, value, unit).map(Some)
            }
            (TraitKind::Number { units }, TraitValue::Text(text)) => {
                let (value, unit) = parse_number(&text).ok_or_else(|| {
                    TraitError::malformed(name, format!("`{}` is not a number", text))
                })?;
                encode_number(name, units, value, unit).map(Some)
            }
            (TraitKind::Number { .. }, _) => Err(TraitError::type_mismatch(name, "number")),
            (_, TraitValue::Text(text)) => Ok(Some(text)),
            (_, _) => Err(TraitError::type_mismatch(name, "text")),
        }
    }
}

fn encode_number(
    name: &str,
    units: &[String],
    value: f64,
    unit: Option<String>,
) -> TraitResult<String> {
    if !value.is_finite() {
        return Err(TraitError::malformed(name, "number is not finite"));
    }
    match unit {
        Some(unit) if !units.iter().any(|u| *u == unit) => Err(TraitError::malformed(
            name,
            format!("unit `{}` is not allowed", unit),
        )),
        Some(unit) => Ok(format!("{}{}", value, unit)),
        None => Ok(value.to_string()),
    }
}

/// Split `12.5px` into value and unit
fn parse_number(text: &str) -> Option<(f64, Option<String>)> {
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let value = number.parse::<f64>().ok()?;
    let unit = unit.trim();
    Some((value, (!unit.is_empty()).then(|| unit.to_string())))
}

impl TraitBinding for DefaultBinding {
    fn get_value(&self, trait_def: &TraitDef, component: &Component) -> TraitValue {
        let raw = Self::raw(trait_def, component);
        match &trait_def.kind {
            TraitKind::Checkbox { value_true, .. } => TraitValue::Bool(match (raw, value_true) {
                (None, _) => false,
                (Some(raw), Some(expected)) => raw == *expected,
                (Some(raw), None) => raw != "false",
            }),
            TraitKind::Number { .. } => raw
                .as_deref()
                .and_then(parse_number)
                .map(|(value, unit)| TraitValue::Number { value, unit })
                .unwrap_or(TraitValue::Empty),
            TraitKind::Stack { .. } => TraitValue::Rows(Vec::new()),
            _ => raw.map(TraitValue::Text).unwrap_or(TraitValue::Empty),
        }
    }

    fn set_value(&self, ctx: &mut TraitContext<'_>, value: TraitValue) -> TraitResult<()> {
        let encoded = Self::encode(ctx.trait_def, value)?;
        let name = ctx.trait_def.name.clone();

        match (ctx.trait_def.change_prop, encoded) {
            (true, Some(text)) => ctx.component.set_prop(name, serde_json::Value::String(text)),
            (true, None) => {
                ctx.component.props.shift_remove(&name);
            }
            (false, Some(text)) => ctx.component.set_attribute(name, text),
            (false, None) => {
                ctx.component.remove_attribute(&name);
            }
        }
        ctx.emit_update();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RegistryBuilder, TypeDefinition};
    use crate::traits::SelectOption;

    fn registry() -> Registry {
        let mut builder = RegistryBuilder::new();
        builder.register(TypeDefinition::new("default")).unwrap();
        builder.build().unwrap()
    }

    fn commit(
        def: &TraitDef,
        component: &mut Component,
        value: TraitValue,
    ) -> (TraitResult<()>, UpdateLog) {
        let registry = registry();
        let mut log = UpdateLog::new();
        let result = {
            let mut ctx = TraitContext::new(component, &registry, def, &mut log);
            DefaultBinding.set_value(&mut ctx, value)
        };
        (result, log)
    }

    #[test]
    fn test_checkbox_writes_value_true() {
        let def = TraitDef::checkbox("loading").value_true("lazy");
        let mut img = Component::new("image", "img");

        let (result, log) = commit(&def, &mut img, TraitValue::Bool(true));
        assert!(result.is_ok());
        assert_eq!(img.get_attribute("loading"), Some("lazy"));
        assert_eq!(DefaultBinding.get_value(&def, &img), TraitValue::Bool(true));
        assert_eq!(log.len(), 1);

        commit(&def, &mut img, TraitValue::Bool(false)).0.unwrap();
        assert_eq!(img.get_attribute("loading"), None);
    }

    #[test]
    fn test_select_prop_routes_tag_name() {
        let def = TraitDef::select(
            "tagName",
            vec![SelectOption::new("h1", "One"), SelectOption::new("h2", "Two")],
        )
        .change_prop();
        let mut heading = Component::new("heading", "h1");

        commit(&def, &mut heading, TraitValue::text("h2")).0.unwrap();
        assert_eq!(heading.tag_name, "h2");
        assert_eq!(DefaultBinding.get_value(&def, &heading), TraitValue::text("h2"));
    }

    #[test]
    fn test_invalid_select_leaves_component_untouched() {
        let def = TraitDef::select("tagName", vec![SelectOption::new("h1", "One")]).change_prop();
        let mut heading = Component::new("heading", "h1");

        let (result, log) = commit(&def, &mut heading, TraitValue::text("marquee"));
        assert!(matches!(result, Err(TraitError::Malformed { .. })));
        assert_eq!(heading.tag_name, "h1");
        assert!(log.is_empty());
    }

    #[test]
    fn test_number_units() {
        let def = TraitDef::number("width", ["px", "%"]);
        let mut c = Component::new("default", "div");

        commit(&def, &mut c, TraitValue::text("12px")).0.unwrap();
        assert_eq!(c.get_attribute("width"), Some("12px"));
        assert_eq!(
            DefaultBinding.get_value(&def, &c),
            TraitValue::Number {
                value: 12.0,
                unit: Some("px".into())
            }
        );

        let (result, _) = commit(&def, &mut c, TraitValue::text("3em"));
        assert!(result.is_err());
        let (result, _) = commit(&def, &mut c, TraitValue::text("abc"));
        assert!(result.is_err());
        assert_eq!(c.get_attribute("width"), Some("12px"));
    }

    #[test]
    fn test_empty_text_removes_attribute() {
        let def = TraitDef::text("title");
        let mut c = Component::new("default", "div");
        commit(&def, &mut c, TraitValue::text("Hello")).0.unwrap();
        commit(&def, &mut c, TraitValue::Empty).0.unwrap();
        assert_eq!(c.get_attribute("title"), None);
    }
}
