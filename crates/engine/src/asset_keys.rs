use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetKeyError {
    #[error("value must not be empty")]
    Empty,
    #[error("asset path must not start with '/'")]
    LeadingSlash,
    #[error("asset path must not contain '\\\\'")]
    Backslash,
    #[error("asset path must not contain '..'")]
    ParentTraversal,
    #[error("invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Texture identifiers are flat lowercase names such as `ship` or `boss_bullet`.
pub(crate) fn validate_texture_id(identifier: &str) -> Result<(), AssetKeyError> {
    if identifier.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    for ch in identifier.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '-') {
            continue;
        }
        return Err(AssetKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

/// Asset paths are relative to the assets directory, e.g. `sprites/ship.png`.
pub(crate) fn validate_asset_path(path: &str) -> Result<(), AssetKeyError> {
    if path.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    if path.starts_with('/') {
        return Err(AssetKeyError::LeadingSlash);
    }
    if path.contains('\\') {
        return Err(AssetKeyError::Backslash);
    }
    if path.contains("..") {
        return Err(AssetKeyError::ParentTraversal);
    }
    for ch in path.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '/' | '-' | '.') {
            continue;
        }
        return Err(AssetKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_texture_ids() {
        for id in ["ship", "boss_bullet", "health-1", "bg2"] {
            assert!(validate_texture_id(id).is_ok(), "id={id}");
        }
    }

    #[test]
    fn rejects_invalid_texture_ids() {
        for id in ["", "Ship", "a/b", "a.b", "a b"] {
            assert!(validate_texture_id(id).is_err(), "id={id}");
        }
    }

    #[test]
    fn asset_paths_allow_extensions_but_not_traversal() {
        assert!(validate_asset_path("sprites/Ship.png").is_ok());
        assert_eq!(
            validate_asset_path("../ship.png"),
            Err(AssetKeyError::ParentTraversal)
        );
        assert_eq!(
            validate_asset_path("/abs.png"),
            Err(AssetKeyError::LeadingSlash)
        );
        assert_eq!(
            validate_asset_path(r"a\b.png"),
            Err(AssetKeyError::Backslash)
        );
    }
}
