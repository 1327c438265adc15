//! Resolver configuration.

use crate::FieldRole;

/// Configuration for mapping upstream keys onto canonical roles.
///
/// The default configuration holds exactly the fixed vocabulary of
/// [`FieldRole::VOCABULARY`]. Extra aliases extend a role's terms without changing
/// the order in which roles are tried.
///
/// # Examples
///
/// ```
/// use docmeta::{FieldRole, ResolverConfig};
///
/// let mut config = ResolverConfig::new();
/// config
///     .add_alias(FieldRole::Keywords, "index terms")
///     .add_alias(FieldRole::Authors, "creator");
/// ```
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Terms per role, in the order roles are tried
    pub(crate) vocabulary: Vec<(FieldRole, Vec<String>)>,
    /// Whether wrapper containers such as `METADATA` are unwrapped
    pub(crate) unwrap_wrappers: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverConfig {
    /// Creates a new configuration with the default vocabulary
    #[must_use]
    pub fn new() -> Self {
        Self {
            vocabulary: FieldRole::VOCABULARY
                .iter()
                .map(|(role, term)| (*role, vec![term.to_string()]))
                .collect(),
            unwrap_wrappers: true,
        }
    }

    /// Adds an extra term that resolves to `role`. Aliases for
    /// [`FieldRole::Content`] are ignored, since content is what remains unmatched.
    pub fn add_alias(&mut self, role: FieldRole, alias: &str) -> &mut Self {
        let alias = alias.trim();
        if alias.is_empty() {
            return self;
        }
        if let Some((_, terms)) = self
            .vocabulary
            .iter_mut()
            .find(|(candidate, _)| *candidate == role)
        {
            terms.push(alias.to_string());
        }
        self
    }

    /// Sets whether wrapper containers are unwrapped before matching
    pub fn set_unwrap_wrappers(&mut self, unwrap: bool) -> &mut Self {
        self.unwrap_wrappers = unwrap;
        self
    }

    /// Returns the terms configured for a role
    pub fn terms(&self, role: FieldRole) -> &[String] {
        self.vocabulary
            .iter()
            .find(|(candidate, _)| *candidate == role)
            .map(|(_, terms)| terms.as_slice())
            .unwrap_or_default()
    }
}
