use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure surface of the analysis pipeline.
///
/// Each stage maps its failures onto one variant so the binary can report
/// which dataset broke the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transport failure, non-success status, or a malformed payload.
    #[error("{source_name} fetch failed: {reason}")]
    Fetch {
        source_name: &'static str,
        reason: String,
    },

    /// Local file missing, unreadable, or corrupt.
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// A record lacks an expected field or holds an unparsable value.
    #[error("{record}: field `{field}` {reason}")]
    Validation {
        record: String,
        field: &'static str,
        reason: String,
    },

    /// A chart or summary could not be written.
    #[error("failed to render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },
}

impl PipelineError {
    pub fn fetch(source_name: &'static str, reason: impl ToString) -> Self {
        Self::Fetch {
            source_name,
            reason: reason.to_string(),
        }
    }

    pub fn load(path: &Path, reason: impl ToString) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(record: impl Into<String>, field: &'static str) -> Self {
        Self::Validation {
            record: record.into(),
            field,
            reason: "is missing".to_string(),
        }
    }

    pub fn invalid(record: impl Into<String>, field: &'static str, value: &str) -> Self {
        Self::Validation {
            record: record.into(),
            field,
            reason: format!("has unparsable value {:?}", value),
        }
    }

    pub fn render(path: &Path, reason: impl ToString) -> Self {
        Self::Render {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PipelineError::fetch("metro", "status 503");
        assert_eq!(err.to_string(), "metro fetch failed: status 503");

        let err = PipelineError::missing("tree 42", "common");
        assert_eq!(err.to_string(), "tree 42: field `common` is missing");

        let err = PipelineError::load(Path::new("benches.shp"), "no such file");
        assert_eq!(err.to_string(), "failed to load benches.shp: no such file");
    }
}
