use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems found while loading the asset catalog at startup.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid font entry in {}: {message}", .path.display())]
    FontEntry { path: PathBuf, message: String },

    #[error("Invalid color in {} line {line}: {source}", .path.display())]
    Palette {
        path: PathBuf,
        line: usize,
        #[source]
        source: wcag_palette::ParseColorError,
    },

    #[error("No {0} found")]
    Empty(&'static str),
}

impl AssetLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetLoadError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// The requested filters exclude every available asset. Never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("No available script matches {requested:?}")]
    NoMatchingScripts { requested: Vec<String> },

    #[error("Script '{script}' has no language matching the filters")]
    NoMatchingLanguages { script: String },

    #[error("Script '{script}' has no font matching the filters")]
    NoMatchingFonts { script: String },
}

/// The phrase could not be sized or placed on the chosen background.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutError {
    #[error("Phrase does not fit after trying {iterations} font sizes")]
    NoFit { iterations: u32 },

    #[error("Font size dropped below 1px on a {width}x{height} background")]
    FontTooSmall { width: u32, height: u32 },

    #[error("Phrase produced no visible glyphs")]
    EmptyText,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to decode background {}: {source}", .path.display())]
    Background {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("Rendered text covers no pixels")]
    EmptyMask,

    #[error("No readable color known for {0}")]
    NoContrastCandidate(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Gave up after {attempts} attempts, last error: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: RenderError,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Generation failed: {0}")]
    RetriesExhausted(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::Filter(f) => ApiError::Filter(f),
            e @ GenerateError::RetriesExhausted { .. } => ApiError::RetriesExhausted(e.to_string()),
        }
    }
}

impl ApiError {
    /// Machine-readable error category, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::Filter(_) => "filter",
            ApiError::RetriesExhausted(_) => "retries_exhausted",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Filter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RetriesExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "status": status.as_u16(),
            "kind": self.kind(),
            "error": self.to_string(),
        });
        if matches!(self, ApiError::Filter(_)) {
            body["message"] = json!("Please check your filters");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_messages() {
        let error = FilterError::NoMatchingFonts {
            script: "latin".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Script 'latin' has no font matching the filters"
        );

        let error = FilterError::NoMatchingScripts {
            requested: vec!["klingon".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "No available script matches [\"klingon\"]"
        );
    }

    #[test]
    fn test_layout_error_messages() {
        let error = LayoutError::NoFit { iterations: 64 };
        assert_eq!(
            error.to_string(),
            "Phrase does not fit after trying 64 font sizes"
        );

        let error = LayoutError::FontTooSmall {
            width: 20,
            height: 10,
        };
        assert_eq!(
            error.to_string(),
            "Font size dropped below 1px on a 20x10 background"
        );
    }

    #[test]
    fn test_render_error_from_layout_error() {
        let render_error: RenderError = LayoutError::EmptyText.into();
        assert!(matches!(render_error, RenderError::Layout(LayoutError::EmptyText)));
        assert_eq!(
            render_error.to_string(),
            "Layout error: Phrase produced no visible glyphs"
        );
    }

    #[test]
    fn test_asset_load_error_names_path() {
        let error = AssetLoadError::io(
            "assets/backgrounds",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(error.to_string(), "Failed to read assets/backgrounds: missing");
        assert_eq!(AssetLoadError::Empty("backgrounds").to_string(), "No backgrounds found");
    }

    #[test]
    fn test_generate_error_maps_to_distinct_api_errors() {
        let filter: ApiError = GenerateError::Filter(FilterError::NoMatchingLanguages {
            script: "latin".to_string(),
        })
        .into();
        assert!(matches!(filter, ApiError::Filter(_)));
        assert_eq!(filter.kind(), "filter");

        let exhausted: ApiError = GenerateError::RetriesExhausted {
            attempts: 5,
            last: RenderError::EmptyMask,
        }
        .into();
        assert!(matches!(exhausted, ApiError::RetriesExhausted(_)));
        assert_eq!(exhausted.kind(), "retries_exhausted");
        assert!(exhausted.to_string().contains("5 attempts"));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::InvalidQuery("weights".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Filter(FilterError::NoMatchingFonts {
            script: "latin".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::RetriesExhausted("gave up".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = ApiError::Internal("join".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
