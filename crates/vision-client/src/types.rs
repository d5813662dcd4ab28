//! Detection types returned to callers, plus the images:annotate wire format.

use serde::{Deserialize, Serialize};

/// A point relative to image size; both coordinates are expected in `[0, 1]`.
///
/// The API omits a coordinate whose value is zero, so missing fields default to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedVertex {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl NormalizedVertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Polygon around a detected object. The backend normally returns 4 vertices, clockwise from top-left.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    #[serde(default)]
    pub normalized_vertices: Vec<NormalizedVertex>,
}

/// One object found by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedObject {
    /// Knowledge-graph id, e.g. `/m/01yrx` for "Cat".
    #[serde(default)]
    pub mid: String,
    pub name: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub bounding_poly: BoundingPoly,
}

impl LocalizedObject {
    /// Convenience constructor for an axis-aligned box given as normalized corners.
    pub fn with_box(name: &str, score: f32, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            mid: String::new(),
            name: name.to_string(),
            score,
            bounding_poly: BoundingPoly {
                normalized_vertices: vec![
                    NormalizedVertex::new(left, top),
                    NormalizedVertex::new(right, top),
                    NormalizedVertex::new(right, bottom),
                    NormalizedVertex::new(left, bottom),
                ],
            },
        }
    }
}

// --- images:annotate request/response ---

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateRequest<'a> {
    pub requests: Vec<AnnotateImageRequest<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateImageRequest<'a> {
    pub image: ImageContent,
    pub features: Vec<Feature<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageContent {
    /// Base64 of the raw file bytes.
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Feature<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub max_results: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateImageResponse {
    #[serde(default)]
    pub localized_object_annotations: Vec<LocalizedObject>,
    pub error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_vertex_coordinates_default_to_zero() {
        let poly: BoundingPoly = serde_json::from_str(
            r#"{"normalizedVertices": [{}, {"x": 0.5}, {"x": 0.5, "y": 0.25}, {"y": 0.25}]}"#,
        )
        .unwrap();

        assert_eq!(
            poly.normalized_vertices,
            vec![
                NormalizedVertex::new(0.0, 0.0),
                NormalizedVertex::new(0.5, 0.0),
                NormalizedVertex::new(0.5, 0.25),
                NormalizedVertex::new(0.0, 0.25),
            ]
        );
    }

    #[test]
    fn test_request_serializes_feature_type() {
        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: "AAAA".to_string(),
                },
                features: vec![Feature {
                    kind: "OBJECT_LOCALIZATION",
                    max_results: 10,
                }],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["requests"][0]["features"][0]["type"],
            "OBJECT_LOCALIZATION"
        );
        assert_eq!(json["requests"][0]["features"][0]["maxResults"], 10);
        assert_eq!(json["requests"][0]["image"]["content"], "AAAA");
    }
}
