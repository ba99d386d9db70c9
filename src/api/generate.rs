use axum::{
    extract::{Query, State},
    response::Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::{GenerationFilters, GenerationResult};
use crate::services::Generator;

/// Query parameters for /generate, each a comma-separated list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateQuery {
    /// Scripts to draw from, e.g. `latin,korean`
    pub scripts: Option<String>,
    /// Languages within the chosen script
    pub languages: Option<String>,
    /// Numeric font weights, e.g. `400,700`
    pub weights: Option<String>,
    /// Font categories, e.g. `serif,handwriting`
    pub categories: Option<String>,
    /// Font styles: `normal`, `italic`
    pub styles: Option<String>,
}

impl GenerateQuery {
    pub fn into_filters(self) -> Result<GenerationFilters, ApiError> {
        let weights = split_list(self.weights)
            .map(|list| {
                list.iter()
                    .map(|w| {
                        w.parse::<u16>()
                            .map_err(|_| ApiError::InvalidQuery(format!("weight '{w}' is not a number")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(GenerationFilters {
            scripts: split_list(self.scripts),
            languages: split_list(self.languages),
            weights,
            categories: split_list(self.categories),
            styles: split_list(self.styles),
        })
    }
}

fn split_list(value: Option<String>) -> Option<Vec<String>> {
    let list: Vec<String> = value?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    (!list.is_empty()).then_some(list)
}

/// A generated sample with base64-encoded PNGs
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    /// Text composited onto the background crop (PNG, base64)
    pub image: String,
    /// Coverage mask, white text on black (PNG, base64)
    pub mask: String,
    pub text: String,
    /// Lowercase `#rrggbb`
    pub text_color: String,
    pub font_face: String,
    pub family: String,
    pub category: String,
    pub style: String,
    pub italicization: bool,
    pub weight: u16,
    pub script: String,
    pub language: String,
    /// Set when the server saves samples to disk
    pub image_filepath: Option<String>,
    pub mask_filepath: Option<String>,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            image: STANDARD.encode(&result.image_png),
            mask: STANDARD.encode(&result.mask_png),
            text: result.text,
            text_color: result.text_color.to_string(),
            font_face: result.font_face,
            family: result.family,
            category: result.category,
            style: result.style,
            italicization: result.italic,
            weight: result.weight,
            script: result.script,
            language: result.language,
            image_filepath: result.image_path.map(|p| p.display().to_string()),
            mask_filepath: result.mask_path.map(|p| p.display().to_string()),
        }
    }
}

/// Generate one synthetic scene-text sample
///
/// Picks a random background, script, language, font and phrase within the
/// filters, renders the phrase in a readable color and returns the image and
/// its text mask.
#[utoipa::path(
    get,
    path = "/generate",
    params(GenerateQuery),
    responses(
        (status = 200, description = "Sample generated", body = GenerateResponse),
        (status = 400, description = "Malformed query parameter"),
        (status = 422, description = "Filters match no assets"),
        (status = 503, description = "Rendering failed on every attempt"),
    ),
    tag = "Generation"
)]
pub async fn handle_generate(
    State(generator): State<Arc<Generator>>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let filters = query.into_filters()?;
    tracing::debug!(?filters, "Generate request received");

    let result = tokio::task::spawn_blocking(move || generator.generate_random(&filters))
        .await
        .map_err(|e| ApiError::Internal(format!("generation task failed: {e}")))??;

    tracing::info!(
        script = %result.script,
        language = %result.language,
        font = %result.font_face,
        text_color = %result.text_color,
        "Generated sample"
    );
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_into_filters() {
        let query = GenerateQuery {
            scripts: Some("latin, korean,".to_string()),
            weights: Some("400,700".to_string()),
            styles: Some("".to_string()),
            ..Default::default()
        };
        let filters = query.into_filters().unwrap();

        assert_eq!(
            filters.scripts,
            Some(vec!["latin".to_string(), "korean".to_string()])
        );
        assert_eq!(filters.weights, Some(vec![400, 700]));
        assert_eq!(filters.styles, None);
        assert_eq!(filters.languages, None);
    }

    #[test]
    fn test_non_numeric_weight_is_invalid_query() {
        let query = GenerateQuery {
            weights: Some("400,bold".to_string()),
            ..Default::default()
        };
        let err = query.into_filters().unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery(_)));
        assert_eq!(err.kind(), "invalid_query");
    }
}
