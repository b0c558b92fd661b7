//! Name-keyed table of tool implementations.

use std::collections::HashMap;
use tracing::debug;

use super::catalog;
use super::tools::{self, ToolFn};

#[derive(Clone, Default)]
pub struct ToolRegistry {
    handlers: HashMap<&'static str, ToolFn>,
}

impl ToolRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Every tool in the catalog, wired to its implementation.
    pub fn wordpress() -> Self {
        let mut registry = Self::new();
        registry.register(catalog::CREATE_POST, tools::create_post);
        registry.register(catalog::UPDATE_POST, tools::update_post);
        registry.register(catalog::GET_POST, tools::get_post);
        registry.register(catalog::LIST_POSTS, tools::list_posts);
        registry.register(catalog::DELETE_POST, tools::delete_post);
        registry.register(catalog::LIST_CATEGORIES, tools::list_categories);
        registry.register(catalog::LIST_TAGS, tools::list_tags);
        registry.register(catalog::UPLOAD_MEDIA, tools::upload_media);
        registry
    }

    /// Register a handler, replacing any previous one under the same name.
    pub fn register(&mut self, name: &'static str, handler: ToolFn) {
        debug!("Registering tool: {}", name);
        self.handlers.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<ToolFn> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
