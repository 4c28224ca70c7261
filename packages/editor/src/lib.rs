//! # Pagecraft Editor
//!
//! Headless core of the page builder: component types, property editors
//! ("traits"), the block catalog and the project's pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ plugins: register types + blocks            │
//! │  - BasicPlugin, FormsPlugin, WebPlugin      │
//! └─────────────────────────────────────────────┘
//!                     ↓ (builder pass, once)
//! ┌─────────────────────────────────────────────┐
//! │ Registry (Arc, immutable)   BlockCatalog    │
//! │  - extends merge, recognition, nesting      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Editor: pages own component trees           │
//! │  - drop blocks, import markup               │
//! │  - TraitControl commits (optionally         │
//! │    debounced) through trait bindings        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Pages own instances**: registry and catalog hold blueprints only
//! 2. **Explicit time**: debounced commits fire when the host polls
//! 3. **All or nothing**: a rejected commit leaves the component untouched
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Editor, EditorConfig, TraitValue};
//!
//! let mut editor = Editor::init(EditorConfig::default())?;
//! let page = editor.pages()[0].id.clone();
//! let root = editor.pages()[0].root.id();
//!
//! let heading = editor.drop_block(&page, root, "heading", None)?;
//! let mut controls = editor.trait_controls(&page, heading)?;
//! let size = controls.iter_mut().find(|c| c.name() == "tagName").unwrap();
//! editor.commit_trait(&page, size, TraitValue::text("h2"))?;
//! ```

pub mod blocks;
pub mod component;
pub mod config;
pub mod debounce;
mod editor;
mod errors;
pub mod events;
pub mod page;
pub mod plugins;
pub mod registry;
pub mod selectors;
pub mod traits;

pub use blocks::{Block, BlockCatalog, BlockProps, Position};
pub use component::{Component, ComponentId};
pub use config::EditorConfig;
pub use debounce::{debounce, Clock, Debounced, Debouncer, Edge, ManualClock, SystemClock};
pub use editor::Editor;
pub use errors::{EditorError, EditorResult};
pub use events::{EditorEvent, EventBus, SubscriptionId};
pub use page::{Page, PageId, Project};
pub use plugins::{Plugin, PluginContext, PluginError, PluginOptions, ProjectType};
pub use registry::{
    Blueprint, Content, Registry, RegistryBuilder, RegistryError, ResolvedType, TypeDefinition,
};
pub use traits::{
    CommitOutcome, CommitPolicy, StackRow, TraitControl, TraitDef, TraitError, TraitKind,
    TraitValue,
};
