// Identifier types shared by the world generation hooks.

use std::{
    borrow::Cow,
    fmt::{self, Display},
    str::FromStr,
};

/// Errors produced when parsing a [`ResourceLocation`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceLocationError {
    /// More than one `:` separator.
    #[error("invalid resource location: {0}")]
    Malformed(String),
    /// The namespace contains characters outside `[a-z0-9_.-]`.
    #[error("invalid namespace: {0}")]
    Namespace(String),
    /// The path contains characters outside `[a-z0-9_.-/]`.
    #[error("invalid path: {0}")]
    Path(String),
}

/// A namespaced identifier such as `dungeons_world:creeper_woods`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocation {
    /// The part before the `:`.
    pub namespace: Cow<'static, str>,
    /// The part after the `:`.
    pub path: Cow<'static, str>,
}

impl ResourceLocation {
    /// Namespace of the base game, assumed when none is given.
    pub const VANILLA_NAMESPACE: &'static str = "minecraft";
    /// Namespace of the mod's own content.
    pub const DUNGEONS_NAMESPACE: &'static str = "dungeons_world";

    /// A location in the vanilla namespace.
    #[must_use]
    pub const fn vanilla_static(path: &'static str) -> Self {
        ResourceLocation {
            namespace: Cow::Borrowed(Self::VANILLA_NAMESPACE),
            path: Cow::Borrowed(path),
        }
    }

    /// A location in the mod namespace.
    #[must_use]
    pub const fn dungeons_static(path: &'static str) -> Self {
        ResourceLocation {
            namespace: Cow::Borrowed(Self::DUNGEONS_NAMESPACE),
            path: Cow::Borrowed(path),
        }
    }

    /// `[a-z0-9_.-]`
    #[must_use]
    pub fn valid_namespace_char(namespace_char: char) -> bool {
        namespace_char == '_'
            || namespace_char == '-'
            || namespace_char.is_ascii_lowercase()
            || namespace_char.is_ascii_digit()
            || namespace_char == '.'
    }

    /// Namespace characters plus `/`.
    #[must_use]
    pub fn valid_path_char(path_char: char) -> bool {
        Self::valid_namespace_char(path_char) || path_char == '/'
    }

    /// Whether every character is a valid namespace character.
    #[must_use]
    pub fn validate_namespace(namespace: &str) -> bool {
        namespace.chars().all(Self::valid_namespace_char)
    }

    /// Whether every character is a valid path character.
    #[must_use]
    pub fn validate_path(path: &str) -> bool {
        path.chars().all(Self::valid_path_char)
    }
}

impl Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceLocation {
    type Err = ResourceLocationError;

    /// Parses `namespace:path`. A bare `path` falls back to the vanilla namespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, path) = match s.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (Self::VANILLA_NAMESPACE, s),
        };
        if path.contains(':') {
            return Err(ResourceLocationError::Malformed(s.to_string()));
        }
        if !Self::validate_namespace(namespace) {
            return Err(ResourceLocationError::Namespace(namespace.to_string()));
        }
        if !Self::validate_path(path) {
            return Err(ResourceLocationError::Path(path.to_string()));
        }

        Ok(ResourceLocation {
            namespace: Cow::Owned(namespace.to_string()),
            path: Cow::Owned(path.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_namespaced_id() {
        let id: ResourceLocation = "dungeons_world:creeper_woods".parse().unwrap();
        assert_eq!(id, ResourceLocation::dungeons_static("creeper_woods"));
        assert_eq!(id.to_string(), "dungeons_world:creeper_woods");
    }

    #[test]
    fn test_bare_path_uses_vanilla_namespace() {
        let id: ResourceLocation = "forest".parse().unwrap();
        assert_eq!(id, ResourceLocation::vanilla_static("forest"));
    }

    #[test]
    fn test_rejects_invalid_ids() {
        assert_eq!(
            "a:b:c".parse::<ResourceLocation>(),
            Err(ResourceLocationError::Malformed("a:b:c".to_string()))
        );
        assert_eq!(
            "Dungeons:woods".parse::<ResourceLocation>(),
            Err(ResourceLocationError::Namespace("Dungeons".to_string()))
        );
        assert_eq!(
            "dungeons_world:creeper woods".parse::<ResourceLocation>(),
            Err(ResourceLocationError::Path("creeper woods".to_string()))
        );
    }

    #[test]
    fn test_paths_may_contain_slashes() {
        let id: ResourceLocation = "dungeons_world:worldgen/creeper_woods".parse().unwrap();
        assert_eq!(id.path, "worldgen/creeper_woods");
    }
}
