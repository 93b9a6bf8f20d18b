//! Named result handlers.
//!
//! Handlers are registered up front in a lookup table keyed by name and
//! injected into the runner, which resolves a case's configured name once
//! and caches the outcome for the rest of the run. An unknown name is not
//! an error at this layer; the runner treats it as a passthrough.

use crate::decoration::HandlerOptions;
use crate::runner::CaseResult;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Handler function type for case results.
pub type HandlerFn = Arc<dyn Fn(&CaseResult) + Send + Sync>;

/// Registration table mapping handler names to callbacks.
///
/// Two tiers: [`Self::register`] fills the preferred tier,
/// [`Self::register_fallback`] the secondary one. Resolution consults the
/// preferred tier first, so a fallback entry only answers for a name no
/// preferred entry claims.
#[derive(Default)]
pub struct HandlerRegistry {
    preferred: HashMap<String, HandlerFn>,
    fallback: HashMap<String, HandlerFn>,
}

impl HandlerRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler in the preferred tier.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&CaseResult) + Send + Sync + 'static,
    {
        self.preferred.insert(name.into(), Arc::new(handler));
    }

    /// Register a handler in the fallback tier, consulted only when the
    /// preferred tier has no entry for the name.
    pub fn register_fallback<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&CaseResult) + Send + Sync + 'static,
    {
        self.fallback.insert(name.into(), Arc::new(handler));
    }

    /// Look up a handler by name, preferred tier first.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<HandlerFn> {
        self.preferred
            .get(name)
            .or_else(|| self.fallback.get(name))
            .cloned()
    }

    /// Whether any tier has an entry for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.preferred.contains_key(name) || self.fallback.contains_key(name)
    }

    /// Number of registered handlers across both tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.preferred.len() + self.fallback.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preferred.is_empty() && self.fallback.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("preferred", &self.preferred.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A handler declaration bound to its memoized resolution.
///
/// The first [`Self::resolve`] call performs the lookup and caches the
/// answer, hit or miss; later calls return the cached handle without
/// touching the registry. Resolution is a pure function of the declared
/// name, so racing initializers would cache the same answer.
pub struct HandlerBinding {
    options: HandlerOptions,
    resolved: OnceLock<Option<HandlerFn>>,
}

impl HandlerBinding {
    /// Bind a declaration, deferring the lookup to first use.
    #[must_use]
    pub fn new(options: HandlerOptions) -> Self {
        Self {
            options,
            resolved: OnceLock::new(),
        }
    }

    /// The declaration this binding was created from.
    #[must_use]
    pub const fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// Resolve the declared name against the registry, memoized.
    #[must_use]
    pub fn resolve(&self, registry: &HandlerRegistry) -> Option<HandlerFn> {
        self.resolved
            .get_or_init(|| {
                let found = registry.resolve(self.options.handler());
                tracing::debug!(
                    handler = self.options.handler(),
                    found = found.is_some(),
                    "resolved result handler"
                );
                found
            })
            .clone()
    }

    /// Whether the lookup has happened yet.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("options", &self.options)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
