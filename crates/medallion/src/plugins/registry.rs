//! Extractor registration and lookup.
//!
//! The registry is the dispatch table of the batch pipeline: a blob name is
//! reduced to its extension and the extension selects an extractor. Adding a
//! format means registering another [`DocumentExtractor`].

use crate::core::naming::file_extension;
use crate::plugins::DocumentExtractor;
use crate::{MedallionError, Result};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Validate a plugin name before registration.
///
/// # Rules
///
/// - Name cannot be empty
/// - Name cannot contain whitespace
fn validate_plugin_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MedallionError::validation("Plugin name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(MedallionError::validation(format!(
            "Plugin name '{}' cannot contain whitespace",
            name
        )));
    }

    Ok(())
}

/// Registry for document extractor plugins.
///
/// Manages extractors with extension and priority-based selection.
pub struct DocumentExtractorRegistry {
    extractors: HashMap<String, BTreeMap<i32, Arc<dyn DocumentExtractor>>>,
    name_index: HashMap<String, Vec<(String, i32)>>,
}

impl DocumentExtractorRegistry {
    /// Create a new empty extractor registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            name_index: HashMap::new(),
        }
    }

    /// Register a document extractor for every extension it supports.
    ///
    /// Registering a second extractor with the same name replaces the first.
    ///
    /// # Errors
    ///
    /// - `Validation` if the plugin name or one of its extensions is invalid
    /// - whatever `initialize()` returns
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        let name = extractor.name().to_string();
        let priority = extractor.priority();
        let extensions: Vec<String> = extractor
            .supported_extensions()
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();

        validate_plugin_name(&name)?;

        if extensions.iter().any(|ext| ext.is_empty()) {
            return Err(MedallionError::validation(format!(
                "Extractor '{}' declares an empty extension",
                name
            )));
        }

        extractor.initialize()?;

        if self.name_index.contains_key(&name) {
            self.remove(&name)?;
        }

        let mut index_entries = Vec::with_capacity(extensions.len());

        for extension in extensions {
            self.extractors
                .entry(extension.clone())
                .or_default()
                .insert(priority, Arc::clone(&extractor));
            index_entries.push((extension, priority));
        }

        tracing::debug!(
            extractor = %name,
            priority,
            extensions = ?index_entries.iter().map(|(ext, _)| ext.as_str()).collect::<Vec<_>>(),
            "Registered document extractor"
        );

        self.name_index.insert(name, index_entries);

        Ok(())
    }

    /// Get the highest priority extractor for an extension (without the dot).
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` if nothing is registered for the extension.
    pub fn get(&self, extension: &str) -> Result<Arc<dyn DocumentExtractor>> {
        self.extractors
            .get(extension)
            .and_then(|priority_map| priority_map.values().next_back())
            .cloned()
            .ok_or_else(|| MedallionError::UnsupportedFormat(extension.to_string()))
    }

    /// Select the extractor for a blob name by its extension.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` carrying the blob name when the name has no
    /// extension or no extractor handles it.
    pub fn get_for_name(&self, name: &str) -> Result<Arc<dyn DocumentExtractor>> {
        file_extension(name)
            .and_then(|ext| self.get(ext).ok())
            .ok_or_else(|| MedallionError::UnsupportedFormat(name.to_string()))
    }

    /// Whether a blob name would be routed to some extractor.
    pub fn supports(&self, name: &str) -> bool {
        self.get_for_name(name).is_ok()
    }

    /// List all registered extractor names.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.name_index.keys().cloned().collect();
        names.sort();
        names
    }

    /// List every extension with at least one extractor, sorted.
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.extractors.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    /// Remove an extractor from the registry, calling its `shutdown()`.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index_entries = match self.name_index.remove(name) {
            Some(entries) => entries,
            None => return Ok(()),
        };

        let mut extractor_to_shutdown: Option<Arc<dyn DocumentExtractor>> = None;

        for (extension, priority) in index_entries {
            if let Some(priority_map) = self.extractors.get_mut(&extension) {
                if let Some(extractor) = priority_map.remove(&priority)
                    && extractor_to_shutdown.is_none()
                {
                    extractor_to_shutdown = Some(extractor);
                }

                if priority_map.is_empty() {
                    self.extractors.remove(&extension);
                }
            }
        }

        if let Some(extractor) = extractor_to_shutdown {
            extractor.shutdown()?;
        }

        Ok(())
    }

    /// Shutdown all extractors and clear the registry.
    pub fn shutdown_all(&mut self) -> Result<()> {
        for name in self.list() {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for DocumentExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global document extractor registry singleton.
pub static DOCUMENT_EXTRACTOR_REGISTRY: Lazy<Arc<RwLock<DocumentExtractorRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(DocumentExtractorRegistry::new())));

/// Get the global document extractor registry.
pub fn get_document_extractor_registry() -> Arc<RwLock<DocumentExtractorRegistry>> {
    DOCUMENT_EXTRACTOR_REGISTRY.clone()
}
