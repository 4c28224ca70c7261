//! Component type declarations and their resolved form

use super::blueprint::{Blueprint, Content};
use super::recognizer::Recognizer;
use crate::traits::TraitDef;
use indexmap::IndexMap;
use serde_json::Value;

/// List-valued default: appended to the parent's list unless `clear` is set
#[derive(Debug, Clone, PartialEq)]
pub struct FieldList<T> {
    pub clear: bool,
    pub items: Vec<T>,
}

impl<T> Default for FieldList<T> {
    fn default() -> Self {
        Self {
            clear: false,
            items: Vec::new(),
        }
    }
}

impl<T: Clone> FieldList<T> {
    pub fn append(items: Vec<T>) -> Self {
        Self { clear: false, items }
    }

    pub fn replace(items: Vec<T>) -> Self {
        Self { clear: true, items }
    }

    pub fn merge_onto(&self, inherited: &mut Vec<T>) {
        if self.clear {
            inherited.clear();
        }
        inherited.extend(self.items.iter().cloned());
    }
}

/// Which component types are accepted on the other side of a nesting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestingRule {
    Any,
    Never,
    Types(Vec<String>),
}

impl NestingRule {
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NestingRule::Types(types.into_iter().map(Into::into).collect())
    }

    pub fn accepts(&self, type_id: &str) -> bool {
        match self {
            NestingRule::Any => true,
            NestingRule::Never => false,
            NestingRule::Types(types) => types.iter().any(|t| t == type_id),
        }
    }
}

/// Placeholder styling shown while a component has no children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    Enabled,
    Styled {
        style_in: Option<String>,
        style_out: Option<String>,
    },
}

/// Resize handles offered on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resizable {
    pub ratio_default: bool,
    pub tc: bool,
    pub cl: bool,
    pub cr: bool,
    pub bc: bool,
}

impl Resizable {
    /// Corner handles only, keeping aspect ratio
    pub fn corners() -> Self {
        Self {
            ratio_default: true,
            tc: false,
            cl: false,
            cr: false,
            bc: false,
        }
    }
}

impl Default for Resizable {
    fn default() -> Self {
        Self {
            ratio_default: false,
            tc: true,
            cl: true,
            cr: true,
            bc: true,
        }
    }
}

/// Partial defaults declared by one type; unset fields are inherited
#[derive(Debug, Clone, Default)]
pub struct TypeDefaults {
    pub tag_name: Option<String>,
    /// Merged key by key over the parent's attributes
    pub attributes: IndexMap<String, String>,
    pub draggable: Option<NestingRule>,
    pub droppable: Option<NestingRule>,
    /// Scoped CSS shipped with the type
    pub styles: Option<String>,
    pub traits: FieldList<TraitDef>,
    pub stylable: FieldList<String>,
    pub components: Option<Content>,
    pub copyable: Option<bool>,
    pub removable: Option<bool>,
    pub highlightable: Option<bool>,
    pub layerable: Option<bool>,
    pub empty_state: Option<EmptyState>,
    pub resizable: Option<Resizable>,
    /// Properties forced on every direct child
    pub child_props: IndexMap<String, Value>,
}

/// A component type as registered
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub id: String,
    pub extends: Option<String>,
    pub recognizer: Option<Recognizer>,
    pub defaults: TypeDefaults,
}

impl TypeDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extends: None,
            recognizer: None,
            defaults: TypeDefaults::default(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn recognize(mut self, recognizer: Recognizer) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.defaults.tag_name = Some(tag.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.attributes.insert(name.into(), value.into());
        self
    }

    pub fn draggable(mut self, rule: NestingRule) -> Self {
        self.defaults.draggable = Some(rule);
        self
    }

    pub fn droppable(mut self, rule: NestingRule) -> Self {
        self.defaults.droppable = Some(rule);
        self
    }

    pub fn styles(mut self, css: impl Into<String>) -> Self {
        self.defaults.styles = Some(css.into());
        self
    }

    /// Traits appended to the inherited list
    pub fn traits<I, T>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TraitDef>,
    {
        self.defaults.traits = FieldList::append(traits.into_iter().map(Into::into).collect());
        self
    }

    /// Traits replacing the inherited list
    pub fn only_traits<I, T>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TraitDef>,
    {
        self.defaults.traits = FieldList::replace(traits.into_iter().map(Into::into).collect());
        self
    }

    pub fn stylable<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults.stylable = FieldList::append(props.into_iter().map(Into::into).collect());
        self
    }

    pub fn components(mut self, content: Content) -> Self {
        self.defaults.components = Some(content);
        self
    }

    pub fn child(self, blueprint: Blueprint) -> Self {
        self.components(Content::Components(vec![blueprint]))
    }

    pub fn copyable(mut self, value: bool) -> Self {
        self.defaults.copyable = Some(value);
        self
    }

    pub fn removable(mut self, value: bool) -> Self {
        self.defaults.removable = Some(value);
        self
    }

    pub fn highlightable(mut self, value: bool) -> Self {
        self.defaults.highlightable = Some(value);
        self
    }

    pub fn layerable(mut self, value: bool) -> Self {
        self.defaults.layerable = Some(value);
        self
    }

    pub fn empty_state(mut self, state: EmptyState) -> Self {
        self.defaults.empty_state = Some(state);
        self
    }

    pub fn resizable(mut self, resizable: Resizable) -> Self {
        self.defaults.resizable = Some(resizable);
        self
    }

    pub fn child_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.defaults.child_props.insert(name.into(), value);
        self
    }
}

/// Fully merged view of a type along its `extends` chain
#[derive(Debug, Clone)]
pub struct ResolvedType {
    pub id: String,
    /// Type ids from the root ancestor down to this type
    pub lineage: Vec<String>,
    pub recognizer: Option<Recognizer>,
    pub tag_name: String,
    pub attributes: IndexMap<String, String>,
    pub draggable: NestingRule,
    pub droppable: NestingRule,
    pub styles: Option<String>,
    pub traits: Vec<TraitDef>,
    pub stylable: Vec<String>,
    pub components: Option<Content>,
    pub copyable: bool,
    pub removable: bool,
    pub highlightable: bool,
    pub layerable: bool,
    pub empty_state: Option<EmptyState>,
    pub resizable: Option<Resizable>,
    pub child_props: IndexMap<String, Value>,
}

impl ResolvedType {
    fn base(id: &str) -> Self {
        Self {
            id: id.to_string(),
            lineage: Vec::new(),
            recognizer: None,
            tag_name: "div".to_string(),
            attributes: IndexMap::new(),
            draggable: NestingRule::Any,
            droppable: NestingRule::Any,
            styles: None,
            traits: Vec::new(),
            stylable: Vec::new(),
            components: None,
            copyable: true,
            removable: true,
            highlightable: true,
            layerable: true,
            empty_state: None,
            resizable: None,
            child_props: IndexMap::new(),
        }
    }

    /// Fold a chain of definitions, root ancestor first
    pub(crate) fn from_chain(chain: &[&TypeDefinition]) -> Self {
        let id = chain.last().map(|d| d.id.as_str()).unwrap_or_default();
        let mut resolved = Self::base(id);

        for def in chain {
            resolved.apply(def);
        }
        resolved
    }

    fn apply(&mut self, def: &TypeDefinition) {
        let d = &def.defaults;
        self.lineage.push(def.id.clone());

        if let Some(recognizer) = &def.recognizer {
            self.recognizer = Some(recognizer.clone());
        }
        if let Some(tag) = &d.tag_name {
            self.tag_name = tag.clone();
        }
        for (name, value) in &d.attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
        if let Some(rule) = &d.draggable {
            self.draggable = rule.clone();
        }
        if let Some(rule) = &d.droppable {
            self.droppable = rule.clone();
        }
        if d.styles.is_some() {
            self.styles = d.styles.clone();
        }
        d.traits.merge_onto(&mut self.traits);
        d.stylable.merge_onto(&mut self.stylable);
        if d.components.is_some() {
            self.components = d.components.clone();
        }
        self.copyable = d.copyable.unwrap_or(self.copyable);
        self.removable = d.removable.unwrap_or(self.removable);
        self.highlightable = d.highlightable.unwrap_or(self.highlightable);
        self.layerable = d.layerable.unwrap_or(self.layerable);
        if d.empty_state.is_some() {
            self.empty_state = d.empty_state.clone();
        }
        if d.resizable.is_some() {
            self.resizable = d.resizable;
        }
        for (name, value) in &d.child_props {
            self.child_props.insert(name.clone(), value.clone());
        }
    }

    pub fn is_a(&self, type_id: &str) -> bool {
        self.lineage.iter().any(|t| t == type_id)
    }

    pub fn trait_names(&self) -> Vec<&str> {
        self.traits.iter().map(|t| t.name.as_str()).collect()
    }
}
