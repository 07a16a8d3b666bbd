//! Base plugin trait definition.

use crate::Result;

/// Base trait that all plugins must implement.
///
/// Provides identification and lifecycle hooks. Plugins are shared as
/// `Arc<dyn ...>` across tasks, so they must be `Send + Sync` and take `&self`
/// in every hook; use interior mutability for state.
///
/// # Example
///
/// ```rust
/// use medallion::plugins::Plugin;
/// use medallion::Result;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// struct MyPlugin {
///     initialized: AtomicBool,
/// }
///
/// impl Plugin for MyPlugin {
///     fn name(&self) -> &str {
///         "my-plugin"
///     }
///
///     fn version(&self) -> String {
///         "1.0.0".to_string()
///     }
///
///     fn initialize(&self) -> Result<()> {
///         self.initialized.store(true, Ordering::Release);
///         Ok(())
///     }
///
///     fn shutdown(&self) -> Result<()> {
///         self.initialized.store(false, Ordering::Release);
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Unique, kebab-case identifier (e.g. `"docx-extractor"`).
    fn name(&self) -> &str;

    /// Semantic version of this plugin.
    fn version(&self) -> String;

    /// Called once when the plugin is registered.
    ///
    /// # Errors
    ///
    /// The plugin is not registered if this returns an error.
    fn initialize(&self) -> Result<()>;

    /// Called when the plugin is removed from its registry.
    fn shutdown(&self) -> Result<()>;

    fn description(&self) -> &str {
        ""
    }
}
