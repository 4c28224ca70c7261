//! Pages and the project that orders them.
//!
//! The first page is the project's index; nothing about a page's exported
//! filename is stored here.

use crate::component::Component;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PAGE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        PageId(id.into())
    }

    /// Fresh id of the form `page-<n>`
    pub fn generate() -> Self {
        PageId(format!("page-{}", NEXT_PAGE.fetch_add(1, Ordering::Relaxed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        PageId::new(id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub root: Component,
}

impl Page {
    pub fn new(id: PageId, name: impl Into<String>, root: Component) -> Self {
        Self {
            id,
            name: name.into(),
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    pages: Vec<Page>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, page: Page) -> &mut Page {
        self.pages.push(page);
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn remove(&mut self, id: &PageId) -> Option<Page> {
        let index = self.index_of(id)?;
        Some(self.pages.remove(index))
    }

    pub fn get(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| &p.id == id)
    }

    pub fn get_str(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id.as_str() == id)
    }

    pub fn index_of(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == id)
    }

    pub fn rename(&mut self, id: &PageId, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(page) => {
                page.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Move a page to `to` (clamped); returns false for unknown ids
    pub fn move_page(&mut self, id: &PageId, to: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let page = self.pages.remove(from);
        let to = to.min(self.pages.len());
        self.pages.insert(to, page);
        true
    }

    pub fn first(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Pages in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, name: &str) -> Page {
        Page::new(PageId::new(id), name, Component::new("wrapper", "body"))
    }

    #[test]
    fn test_order_and_move() {
        let mut project = Project::new();
        project.add(page("home", "Home page"));
        project.add(page("about", "About Us"));
        project.add(page("faq", "F.A.Q.!"));

        assert!(project.move_page(&"faq".into(), 0));
        let names: Vec<_> = project.pages().iter().map(Page::name).collect();
        assert_eq!(names, vec!["F.A.Q.!", "Home page", "About Us"]);
        assert!(!project.move_page(&"nope".into(), 0));
    }

    #[test]
    fn test_remove_and_rename() {
        let mut project = Project::new();
        project.add(page("home", "Home page"));
        project.add(page("about", "About"));

        assert!(project.rename(&"about".into(), "About Us"));
        assert_eq!(project.get_str("about").unwrap().name, "About Us");
        assert!(project.remove(&"home".into()).is_some());
        assert_eq!(project.first().unwrap().id.as_str(), "about");
        assert!(project.remove(&"home".into()).is_none());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(PageId::generate(), PageId::generate());
    }
}
