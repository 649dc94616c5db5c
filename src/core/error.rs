use thiserror::Error;

/// Failures the experience knows how to degrade around.
///
/// Only a missing render canvas stops the bootstrap; everything else is
/// logged and the affected feature is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FractureError {
    #[error("failed to load asset `{path}`: {cause}")]
    AssetLoadFailure { path: String, cause: String },
    #[error("failed to decode asset `{path}`: {cause}")]
    AssetDecode { path: String, cause: String },
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
    #[error("missing DOM element #{id}")]
    MissingDomTarget { id: String, required: bool },
}

impl FractureError {
    pub fn load(path: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::AssetLoadFailure {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    pub fn decode(path: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::AssetDecode {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    pub fn missing(id: impl Into<String>, required: bool) -> Self {
        Self::MissingDomTarget {
            id: id.into(),
            required,
        }
    }

    /// True when the experience cannot continue (no canvas to render into).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingDomTarget { required: true, .. })
    }

    /// Path of the asset involved, if any.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            Self::AssetLoadFailure { path, .. } | Self::AssetDecode { path, .. } => Some(path),
            _ => None,
        }
    }
}
