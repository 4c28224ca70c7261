//! # Component Type Registry
//!
//! Declares block kinds by overriding the defaults of the kinds they extend.
//!
//! ## Design
//!
//! Registration happens on a [`RegistryBuilder`] during plugin setup. Each
//! type stores only the defaults it declares; resolution folds the `extends`
//! chain from the root ancestor down:
//!
//! - scalars (tag name, recognizer, styles, flags, nesting rules) are replaced
//! - attributes merge key by key, the descendant wins
//! - traits and stylable properties append unless the descendant clears them
//!
//! Registering an id twice replaces the first definition in place. Types
//! extending it pick up the new definition because nothing is resolved until
//! [`RegistryBuilder::build`] freezes the table into a [`Registry`].
//!
//! Recognition walks types in registration order and the first match wins.

pub mod blueprint;
pub mod definition;
pub mod recognizer;

pub use blueprint::{Blueprint, Content};
pub use definition::{
    EmptyState, FieldList, NestingRule, Resizable, ResolvedType, TypeDefaults, TypeDefinition,
};
pub use recognizer::Recognizer;

use crate::component::{
    parse_inline_style, Component, COMMENT_TYPE, DEFAULT_TYPE, TEXTNODE_TYPE,
};
use indexmap::{IndexMap, IndexSet};
use pagecraft_markup::{parse_html, Element, Node, ParseError};
use thiserror::Error;
use tracing::{debug, info};

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Component type not found: {id}")]
    TypeNotFound { id: String },

    #[error("Component type `{id}` extends itself: {}", .chain.join(" -> "))]
    ExtendsCycle { id: String, chain: Vec<String> },

    #[error("Invalid component markup: {0}")]
    Markup(#[from] ParseError),
}

impl RegistryError {
    pub fn type_not_found(id: impl Into<String>) -> Self {
        RegistryError::TypeNotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::TypeNotFound { .. })
    }
}

/// Mutable registration table used while plugins load
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: IndexMap<String, TypeDefinition>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a type.
    ///
    /// Fails with [`RegistryError::TypeNotFound`] when `extends` names a type
    /// that is not registered; nothing is stored in that case.
    pub fn register(&mut self, definition: TypeDefinition) -> RegistryResult<()> {
        if let Some(parent) = &definition.extends {
            if !self.types.contains_key(parent) {
                return Err(RegistryError::type_not_found(parent.clone()));
            }
        }

        let replaced = self.types.contains_key(&definition.id);
        debug!(
            type_id = %definition.id,
            extends = ?definition.extends,
            replaced,
            "Registered component type"
        );
        // `insert` keeps the original slot for existing keys
        self.types.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Definition as registered, without inherited defaults
    pub fn get_type(&self, id: &str) -> RegistryResult<&TypeDefinition> {
        self.types
            .get(id)
            .ok_or_else(|| RegistryError::type_not_found(id))
    }

    pub fn has_type(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn resolve(&self, id: &str) -> RegistryResult<ResolvedType> {
        resolve_chain(&self.types, id)
    }

    /// Resolve every type and freeze the table
    pub fn build(self) -> RegistryResult<Registry> {
        let mut resolved = IndexMap::with_capacity(self.types.len());
        for id in self.types.keys() {
            resolved.insert(id.clone(), resolve_chain(&self.types, id)?);
        }

        info!(types = resolved.len(), "Component registry frozen");

        Ok(Registry {
            definitions: self.types,
            resolved,
        })
    }
}

fn resolve_chain(
    types: &IndexMap<String, TypeDefinition>,
    id: &str,
) -> RegistryResult<ResolvedType> {
    let mut chain: Vec<&TypeDefinition> = Vec::new();
    let mut seen: IndexSet<&str> = IndexSet::new();
    let mut cursor = Some(id);

    while let Some(current) = cursor {
        if !seen.insert(current) {
            let mut cycle: Vec<String> = seen.iter().map(|s| s.to_string()).collect();
            cycle.push(current.to_string());
            return Err(RegistryError::ExtendsCycle {
                id: id.to_string(),
                chain: cycle,
            });
        }
        let definition = types
            .get(current)
            .ok_or_else(|| RegistryError::type_not_found(current))?;
        chain.push(definition);
        cursor = definition.extends.as_deref();
    }

    chain.reverse();
    Ok(ResolvedType::from_chain(&chain))
}

/// Immutable, fully resolved component types
#[derive(Debug)]
pub struct Registry {
    definitions: IndexMap<String, TypeDefinition>,
    resolved: IndexMap<String, ResolvedType>,
}

impl Registry {
    /// Lookup that treats absence as an error
    pub fn get_type(&self, id: &str) -> RegistryResult<&ResolvedType> {
        self.resolved
            .get(id)
            .ok_or_else(|| RegistryError::type_not_found(id))
    }

    /// Lookup for optional types
    pub fn find_type(&self, id: &str) -> Option<&ResolvedType> {
        self.resolved.get(id)
    }

    pub fn definition(&self, id: &str) -> Option<&TypeDefinition> {
        self.definitions.get(id)
    }

    /// Type ids in registration order
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.resolved.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Type id an imported element maps to
    pub fn recognize(&self, element: &Element) -> &str {
        self.resolved
            .values()
            .find(|t| t.recognizer.as_ref().is_some_and(|r| r.matches(element)))
            .map(|t| t.id.as_str())
            .unwrap_or(DEFAULT_TYPE)
    }

    pub fn recognize_node<'a>(&'a self, node: &Node) -> &'a str {
        match node {
            Node::Element(element) => self.recognize(element),
            Node::Text { .. } => TEXTNODE_TYPE,
            Node::Comment { .. } => COMMENT_TYPE,
        }
    }

    /// Whether `child_type` may be dropped inside `parent_type`; unknown types never nest
    pub fn can_nest(&self, parent_type: &str, child_type: &str) -> bool {
        match (self.find_type(parent_type), self.find_type(child_type)) {
            (Some(parent), Some(child)) => {
                parent.droppable.accepts(child_type) && child.draggable.accepts(parent_type)
            }
            _ => false,
        }
    }

    /// Build a component instance from a blueprint
    pub fn instantiate(&self, blueprint: &Blueprint) -> RegistryResult<Component> {
        let resolved = self.get_type(&blueprint.type_id)?;
        let tag = blueprint
            .tag_name
            .clone()
            .unwrap_or_else(|| resolved.tag_name.clone());
        let mut component = Component::new(resolved.id.clone(), tag);

        component.attributes = resolved.attributes.clone();
        for (name, value) in &blueprint.attributes {
            component.set_attribute(name.clone(), value.clone());
        }
        component.style = blueprint.style.clone();
        for (name, value) in &blueprint.props {
            component.set_prop(name.clone(), value.clone());
        }

        let content = blueprint.content.as_ref().or(resolved.components.as_ref());
        if let Some(content) = content {
            self.fill(&mut component, content)?;
        }
        self.adopt_children(&mut component);
        Ok(component)
    }

    fn fill(&self, component: &mut Component, content: &Content) -> RegistryResult<()> {
        match content {
            Content::Text(text) if component.is_content_node() => {
                component.content = text.clone();
            }
            Content::Text(text) => {
                component.children = vec![Component::text(text.clone())];
            }
            Content::Markup(markup) => {
                let nodes = parse_html(markup)?;
                component.children = self.import_nodes(&nodes)?;
            }
            Content::Components(blueprints) => {
                component.children = blueprints
                    .iter()
                    .map(|b| self.instantiate(b))
                    .collect::<RegistryResult<_>>()?;
            }
        }
        Ok(())
    }

    /// Parse markup and import it as component instances
    pub fn import_html(&self, markup: &str) -> RegistryResult<Vec<Component>> {
        let nodes = parse_html(markup)?;
        self.import_nodes(&nodes)
    }

    /// Map parsed nodes onto component types through recognition
    pub fn import_nodes(&self, nodes: &[Node]) -> RegistryResult<Vec<Component>> {
        nodes.iter().map(|node| self.import_node(node)).collect()
    }

    fn import_node(&self, node: &Node) -> RegistryResult<Component> {
        let element = match node {
            Node::Element(element) => element,
            Node::Text { content } => return Ok(Component::text(content.clone())),
            Node::Comment { content } => return Ok(Component::comment(content.clone())),
        };

        let resolved = self.get_type(self.recognize(element))?;
        let mut component = Component::new(resolved.id.clone(), element.tag.to_ascii_lowercase());
        component.attributes = resolved.attributes.clone();
        for (name, value) in &element.attributes {
            if name == "style" {
                component.style = parse_inline_style(value);
            } else {
                component.set_attribute(name.clone(), value.clone());
            }
        }

        component.children = self.import_nodes(&element.children)?;
        self.adopt_children(&mut component);
        Ok(component)
    }

    /// Apply the parent type's forced child properties to its direct children
    pub fn adopt_children(&self, component: &mut Component) {
        let Some(resolved) = self.find_type(&component.type_id) else {
            return;
        };
        if resolved.child_props.is_empty() {
            return;
        }
        for child in &mut component.children {
            for (name, value) in &resolved.child_props {
                child.set_prop(name.clone(), value.clone());
            }
        }
    }

    /// Scoped CSS of every distinct type used in the tree, in first-use order
    pub fn collect_styles<'a>(&'a self, root: &Component) -> Vec<&'a str> {
        let mut used: IndexSet<&str> = IndexSet::new();
        root.walk(&mut |c| {
            used.insert(c.type_id.as_str());
        });

        used.iter()
            .filter_map(|id| self.find_type(id))
            .filter_map(|t| t.styles.as_deref())
            .collect()
    }

    /// Trait list of a type, empty for unknown types
    pub fn traits_of(&self, type_id: &str) -> &[crate::traits::TraitDef] {
        self.find_type(type_id)
            .map(|t| t.traits.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        builder
            .register(TypeDefinition::new("default").traits(["id", "title"]))
            .unwrap();
        builder
    }

    #[test]
    fn test_extends_appends_traits() {
        let mut builder = base();
        builder
            .register(TypeDefinition::new("a").extends("default").traits(["alt"]))
            .unwrap();
        builder
            .register(TypeDefinition::new("b").extends("a").traits(["title"]))
            .unwrap();

        let b = builder.resolve("b").unwrap();
        // No deduplication
        assert_eq!(b.trait_names(), vec!["id", "title", "alt", "title"]);
        assert_eq!(b.lineage, vec!["default", "a", "b"]);
    }

    #[test]
    fn test_clear_replaces_inherited_traits() {
        let mut builder = base();
        builder
            .register(TypeDefinition::new("a").extends("default").only_traits(["href"]))
            .unwrap();
        assert_eq!(builder.resolve("a").unwrap().trait_names(), vec!["href"]);
    }

    #[test]
    fn test_attributes_merge_per_key() {
        let mut builder = base();
        builder
            .register(
                TypeDefinition::new("a")
                    .attribute("class", "a")
                    .attribute("role", "x"),
            )
            .unwrap();
        builder
            .register(TypeDefinition::new("b").extends("a").attribute("class", "b"))
            .unwrap();

        let b = builder.resolve("b").unwrap();
        assert_eq!(b.attributes["class"], "b");
        assert_eq!(b.attributes["role"], "x");
    }

    #[test]
    fn test_reregister_replaces_and_keeps_position() {
        let mut builder = base();
        builder.register(TypeDefinition::new("t").tag_name("p")).unwrap();
        builder
            .register(TypeDefinition::new("child").extends("t"))
            .unwrap();
        builder.register(TypeDefinition::new("t").tag_name("span")).unwrap();

        let ids: Vec<_> = builder.type_ids().collect();
        assert_eq!(ids, vec!["default", "t", "child"]);
        assert_eq!(builder.resolve("child").unwrap().tag_name, "span");
    }

    #[test]
    fn test_missing_parent_aborts_registration() {
        let mut builder = base();
        let err = builder
            .register(TypeDefinition::new("orphan").extends("missing"))
            .unwrap_err();
        assert_eq!(err, RegistryError::type_not_found("missing"));
        assert!(!builder.has_type("orphan"));
    }

    #[test]
    fn test_cycle_from_reregistration() {
        let mut builder = base();
        builder.register(TypeDefinition::new("a")).unwrap();
        builder.register(TypeDefinition::new("b").extends("a")).unwrap();
        builder.register(TypeDefinition::new("a").extends("b")).unwrap();

        assert!(matches!(
            builder.resolve("a"),
            Err(RegistryError::ExtendsCycle { .. })
        ));
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_first_registered_recognizer_wins() {
        let mut builder = base();
        builder
            .register(TypeDefinition::new("first").recognize(Recognizer::tag_names(["div"])))
            .unwrap();
        builder
            .register(TypeDefinition::new("second").recognize(Recognizer::class("box")))
            .unwrap();
        let registry = builder.build().unwrap();

        let el = Element::new("div").with_attribute("class", "box");
        assert_eq!(registry.recognize(&el), "first");
        assert_eq!(registry.recognize(&Element::new("p")), DEFAULT_TYPE);
    }

    #[test]
    fn test_can_nest() {
        let mut builder = base();
        builder.register(TypeDefinition::new("wrapper")).unwrap();
        builder
            .register(
                TypeDefinition::new("section")
                    .draggable(NestingRule::types(["wrapper"]))
                    .droppable(NestingRule::types(["container"])),
            )
            .unwrap();
        builder
            .register(TypeDefinition::new("container").draggable(NestingRule::Never))
            .unwrap();
        let registry = builder.build().unwrap();

        assert!(registry.can_nest("wrapper", "section"));
        assert!(!registry.can_nest("default", "section"));
        assert!(!registry.can_nest("section", "container"));
        assert!(!registry.can_nest("section", "default"));
        assert!(!registry.can_nest("wrapper", "nope"));
    }

    #[test]
    fn test_instantiate_default_components_and_child_props() {
        let mut builder = base();
        builder.register(TypeDefinition::new("textnode")).unwrap();
        builder
            .register(TypeDefinition::new("inner").attribute("class", "inner"))
            .unwrap();
        builder
            .register(
                TypeDefinition::new("outer")
                    .tag_name("section")
                    .child(Blueprint::new("inner"))
                    .child_prop("layerable", json!(false)),
            )
            .unwrap();
        let registry = builder.build().unwrap();

        let outer = registry.instantiate(&Blueprint::new("outer")).unwrap();
        assert_eq!(outer.tag_name, "section");
        assert_eq!(outer.children.len(), 1);
        assert_eq!(outer.children[0].get_attribute("class"), Some("inner"));
        assert!(!outer.children[0].flag("layerable", true));

        let custom = registry
            .instantiate(&Blueprint::new("outer").text("hi"))
            .unwrap();
        assert_eq!(custom.inner_html(), "hi");
    }

    #[test]
    fn test_import_html_uses_recognition() {
        let mut builder = base();
        builder
            .register(
                TypeDefinition::new("heading")
                    .recognize(Recognizer::tag_names(["h1", "h2"]))
                    .attribute("class", "gjs-heading"),
            )
            .unwrap();
        let registry = builder.build().unwrap();

        let imported = registry
            .import_html(r#"<h2 style="color: red">Hi</h2><p>x</p>"#)
            .unwrap();
        assert_eq!(imported[0].type_id, "heading");
        assert_eq!(imported[0].tag_name, "h2");
        assert_eq!(imported[0].style["color"], "red");
        assert_eq!(imported[0].children[0].type_id, TEXTNODE_TYPE);
        assert_eq!(imported[1].type_id, DEFAULT_TYPE);
    }

    #[test]
    fn test_collect_styles_first_use_order() {
        let mut builder = base();
        builder.register(TypeDefinition::new("a").styles(".a{}")).unwrap();
        builder.register(TypeDefinition::new("b").styles(".b{}")).unwrap();
        let registry = builder.build().unwrap();

        let mut root = Component::new("default", "div");
        root.children.push(Component::new("b", "div"));
        root.children.push(Component::new("a", "div"));
        root.children.push(Component::new("b", "div"));
        assert_eq!(registry.collect_styles(&root), vec![".b{}", ".a{}"]);
    }
}
