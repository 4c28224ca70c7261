//! # Editor Facade
//!
//! Bootstraps plugins into a frozen registry and block catalog, owns the
//! project's pages and routes trait commits to the components they target.

use crate::blocks::{BlockCatalog, BlockProps};
use crate::component::{Component, ComponentId, WRAPPER_TYPE};
use crate::config::{EditorConfig, DEFAULT_INITIAL_HTML, DEFAULT_PAGE_NAME};
use crate::debounce::{Clock, SystemClock};
use crate::errors::{EditorError, EditorResult};
use crate::events::{
    run_event, stop_event, EditorEvent, EventBus, SubscriptionId, COMPONENT_ADD, COMPONENT_UPDATE,
};
use crate::page::{Page, PageId, Project};
use crate::plugins::{load_plugins, Plugin, PluginContext, PluginOptions};
use crate::registry::{Blueprint, Registry, RegistryBuilder};
use crate::selectors::escape_name;
use crate::traits::{CommitOutcome, TraitControl, TraitValue};
use pagecraft_markup::{parse_html, parse_html_lenient, Node};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Editor {
    config: EditorConfig,
    registry: Arc<Registry>,
    blocks: Arc<BlockCatalog>,
    project: Project,
    events: EventBus,
    clock: Rc<dyn Clock>,
}

impl Editor {
    /// Load the configured preset and seed the first page
    pub fn init(config: EditorConfig) -> EditorResult<Self> {
        Self::with_clock(config, Rc::new(SystemClock))
    }

    pub fn with_clock(config: EditorConfig, clock: Rc<dyn Clock>) -> EditorResult<Self> {
        let plugins = config.project_type.plugins();
        Self::with_plugins(config, &plugins, clock)
    }

    pub fn with_plugins(
        config: EditorConfig,
        plugins: &[Box<dyn Plugin>],
        clock: Rc<dyn Clock>,
    ) -> EditorResult<Self> {
        let options = PluginOptions {
            block: BlockProps::basic(),
            commit_settle: config.commit_settle(),
        };

        let mut types = RegistryBuilder::new();
        let mut blocks = BlockCatalog::new();
        {
            let mut ctx = PluginContext::new(&mut types, &mut blocks, &options);
            load_plugins(plugins, &mut ctx)?;
        }
        let registry = Arc::new(types.build()?);

        let mut editor = Self {
            config,
            registry,
            blocks: Arc::new(blocks),
            project: Project::new(),
            events: EventBus::new(),
            clock,
        };

        let seed = parse_page_markup(editor.config.seed_html())
            .or_else(|| parse_page_markup(DEFAULT_INITIAL_HTML))
            .unwrap_or_default();
        editor.insert_page(PageId::generate(), DEFAULT_PAGE_NAME.to_string(), &seed)?;

        info!(
            project_type = %editor.config.project_type,
            types = editor.registry.len(),
            blocks = editor.blocks.len(),
            "Editor initialized"
        );
        Ok(editor)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn blocks(&self) -> &Arc<BlockCatalog> {
        &self.blocks
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn pages(&self) -> &[Page] {
        self.project.pages()
    }

    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.project.get(id)
    }

    pub fn add_page(&mut self, name: impl Into<String>) -> EditorResult<PageId> {
        self.add_page_with_html(name, "")
    }

    pub fn add_page_with_html(
        &mut self,
        name: impl Into<String>,
        html: &str,
    ) -> EditorResult<PageId> {
        self.add_page_with_id(PageId::generate(), name, html)
    }

    /// Add a page from a markup fragment
    ///
    /// Unbalanced markup is repaired with a warning. Markup that cannot be
    /// parsed at all leaves the page empty.
    pub fn add_page_with_id(
        &mut self,
        id: PageId,
        name: impl Into<String>,
        html: &str,
    ) -> EditorResult<PageId> {
        if self.project.get(&id).is_some() {
            return Err(EditorError::DuplicatePage(id));
        }
        let nodes = parse_page_markup(html).unwrap_or_default();
        self.insert_page(id, name.into(), &nodes)
    }

    fn insert_page(&mut self, id: PageId, name: String, nodes: &[Node]) -> EditorResult<PageId> {
        let mut root = self.registry.instantiate(&Blueprint::new(WRAPPER_TYPE))?;
        root.children = self.registry.import_nodes(nodes)?;
        self.registry.adopt_children(&mut root);

        let page = self.project.add(Page::new(id, name, root));
        debug!(page = %page.id, name = %page.name, "Added page");
        Ok(page.id.clone())
    }

    pub fn remove_page(&mut self, id: &PageId) -> EditorResult<Page> {
        self.project
            .remove(id)
            .ok_or_else(|| EditorError::PageNotFound(id.clone()))
    }

    pub fn rename_page(&mut self, id: &PageId, name: impl Into<String>) -> EditorResult<()> {
        if self.project.rename(id, name) {
            Ok(())
        } else {
            Err(EditorError::PageNotFound(id.clone()))
        }
    }

    pub fn parse_html(&self, text: &str) -> EditorResult<Vec<Node>> {
        Ok(parse_html(text)?)
    }

    pub fn component(&self, page: &PageId, id: ComponentId) -> Option<&Component> {
        self.project.get(page)?.root.find(id)
    }

    /// Append imported markup to a component's children
    pub fn import_html(
        &mut self,
        page: &PageId,
        parent: ComponentId,
        html: &str,
    ) -> EditorResult<Vec<ComponentId>> {
        let imported = self.registry.import_html(html)?;
        let ids = imported.iter().map(Component::id).collect();
        let parent = find_component(&mut self.project, page, parent)?;
        parent.children.extend(imported);
        self.registry.adopt_children(parent);
        Ok(ids)
    }

    /// Replace a component's children with imported markup
    pub fn set_inner_html(
        &mut self,
        page: &PageId,
        id: ComponentId,
        html: &str,
    ) -> EditorResult<()> {
        let imported = self.registry.import_html(html)?;
        let component = find_component(&mut self.project, page, id)?;
        component.replace_children(imported);
        self.registry.adopt_children(component);
        self.events.emit(
            COMPONENT_UPDATE,
            &EditorEvent::ComponentUpdate {
                component: id,
                property: "components".to_string(),
            },
        );
        Ok(())
    }

    /// Instantiate a block inside `parent` at `index` (appended when `None`)
    pub fn drop_block(
        &mut self,
        page: &PageId,
        parent: ComponentId,
        block_id: &str,
        index: Option<usize>,
    ) -> EditorResult<ComponentId> {
        let component = self
            .blocks
            .instantiate(block_id, &self.registry)
            .ok_or_else(|| EditorError::BlockNotFound(block_id.to_string()))??;

        let target = find_component(&mut self.project, page, parent)?;
        if !self.registry.can_nest(&target.type_id, &component.type_id) {
            return Err(EditorError::CannotNest {
                parent: target.type_id.clone(),
                child: component.type_id.clone(),
            });
        }

        let id = component.id();
        let type_id = component.type_id.clone();
        let at = index.unwrap_or(target.children.len()).min(target.children.len());
        target.children.insert(at, component);
        self.registry.adopt_children(target);

        debug!(block = block_id, component = %id, parent = %parent, "Dropped block");
        self.events.emit(
            COMPONENT_ADD,
            &EditorEvent::ComponentAdd {
                page: page.clone(),
                component: id,
                type_id,
            },
        );
        Ok(id)
    }

    pub fn remove_component(&mut self, page: &PageId, id: ComponentId) -> EditorResult<Component> {
        let root = &mut self
            .project
            .get_mut(page)
            .ok_or_else(|| EditorError::PageNotFound(page.clone()))?
            .root;
        root.remove(id).ok_or_else(|| EditorError::ComponentNotFound {
            page: page.clone(),
            component: id,
        })
    }

    /// Add an escaped class name; returns the name actually used
    pub fn add_class(
        &mut self,
        page: &PageId,
        id: ComponentId,
        name: &str,
    ) -> EditorResult<String> {
        let escaped = escape_name(name);
        let component = find_component(&mut self.project, page, id)?;
        component.add_class(&escaped);
        self.events.emit(
            COMPONENT_UPDATE,
            &EditorEvent::ComponentUpdate {
                component: id,
                property: "class".to_string(),
            },
        );
        Ok(escaped)
    }

    /// One control per resolved trait of the component's type
    pub fn trait_controls(
        &self,
        page: &PageId,
        id: ComponentId,
    ) -> EditorResult<Vec<TraitControl>> {
        let component = self.component(page, id).ok_or_else(|| EditorError::ComponentNotFound {
            page: page.clone(),
            component: id,
        })?;
        let resolved = self.registry.get_type(&component.type_id)?;

        Ok(resolved
            .traits
            .iter()
            .map(|def| TraitControl::new(def.clone(), id, self.clock.clone()))
            .collect())
    }

    pub fn trait_value(&self, page: &PageId, control: &TraitControl) -> EditorResult<TraitValue> {
        let component = self
            .component(page, control.component_id())
            .ok_or_else(|| EditorError::ComponentNotFound {
                page: page.clone(),
                component: control.component_id(),
            })?;
        Ok(control.value(component))
    }

    pub fn commit_trait(
        &mut self,
        page: &PageId,
        control: &mut TraitControl,
        value: TraitValue,
    ) -> EditorResult<CommitOutcome> {
        let component = find_component(&mut self.project, page, control.component_id())?;
        Ok(control.commit(value, component, &self.registry, &mut self.events))
    }

    pub fn poll_trait(
        &mut self,
        page: &PageId,
        control: &mut TraitControl,
    ) -> EditorResult<Option<CommitOutcome>> {
        let component = find_component(&mut self.project, page, control.component_id())?;
        Ok(control.poll(component, &self.registry, &mut self.events))
    }

    pub fn flush_trait(
        &mut self,
        page: &PageId,
        control: &mut TraitControl,
    ) -> EditorResult<Option<CommitOutcome>> {
        let component = find_component(&mut self.project, page, control.component_id())?;
        Ok(control.flush(component, &self.registry, &mut self.events))
    }

    pub fn on(
        &mut self,
        event: impl Into<String>,
        handler: impl FnMut(&EditorEvent) + 'static,
    ) -> SubscriptionId {
        self.events.on(event, handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.events.off(id)
    }

    /// Emit `run:<command>`
    pub fn run_command(&mut self, command: &str) -> usize {
        self.command_event(command, true)
    }

    /// Emit `stop:<command>`
    pub fn stop_command(&mut self, command: &str) -> usize {
        self.command_event(command, false)
    }

    fn command_event(&mut self, command: &str, running: bool) -> usize {
        let name = if running { run_event(command) } else { stop_event(command) };
        self.events.emit(
            &name,
            &EditorEvent::Command {
                command: command.to_string(),
                running,
            },
        )
    }
}

/// Parse page markup leniently; `None` when it cannot be repaired
fn parse_page_markup(html: &str) -> Option<Vec<Node>> {
    match parse_html_lenient(html) {
        Ok(recovered) => {
            for err in &recovered.errors {
                warn!(error = %err, "Repaired malformed page markup");
            }
            Some(recovered.nodes)
        }
        Err(err) => {
            warn!(error = %err, "Discarding unparseable page markup");
            None
        }
    }
}

fn find_component<'a>(
    project: &'a mut Project,
    page: &PageId,
    id: ComponentId,
) -> EditorResult<&'a mut Component> {
    project
        .get_mut(page)
        .ok_or_else(|| EditorError::PageNotFound(page.clone()))?
        .root
        .find_mut(id)
        .ok_or_else(|| EditorError::ComponentNotFound {
            page: page.clone(),
            component: id,
        })
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("config", &self.config)
            .field("types", &self.registry.len())
            .field("blocks", &self.blocks.len())
            .field("pages", &self.project.len())
            .finish()
    }
}
