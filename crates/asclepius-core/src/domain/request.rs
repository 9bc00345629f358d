//! Outbound requests to external tools.

use serde::{Deserialize, Serialize};

use super::ImageRef;

/// MIME filter used when asking the picker for an image.
pub const IMAGE_MIME_FILTER: &str = "image/*";

/// Title shown by the picker's chooser.
pub const CHOOSER_TITLE: &str = "Choose a Picture";

/// Extra key carrying the cropped image in an analysis request.
pub const EXTRA_IMAGE_URI: &str = "extra_image_uri";

/// Request code attached to analysis handoffs.
pub const REQUEST_RESULT: u32 = 1001;

/// Request to choose one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    /// MIME type filter, e.g. `image/*`.
    pub mime_filter: String,
    /// Title for the chooser dialog.
    pub title: String,
}

impl PickRequest {
    /// Request for any image type.
    #[must_use]
    pub fn any_image() -> Self {
        Self {
            mime_filter: IMAGE_MIME_FILTER.to_owned(),
            title: CHOOSER_TITLE.to_owned(),
        }
    }

    /// Returns true if a concrete MIME type passes this request's filter.
    ///
    /// Supports exact types and `type/*` wildcards.
    #[must_use]
    pub fn accepts(&self, mime: &str) -> bool {
        if self.mime_filter == "*/*" {
            return true;
        }
        match self.mime_filter.strip_suffix("/*") {
            Some(major) => mime
                .split_once('/')
                .is_some_and(|(m, _)| m.eq_ignore_ascii_case(major)),
            None => self.mime_filter.eq_ignore_ascii_case(mime),
        }
    }
}

/// Request to crop `source` into `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropRequest {
    /// Image to edit.
    pub source: ImageRef,
    /// Where the crop tool must write its result.
    pub destination: ImageRef,
}

/// Handoff payload for the analysis surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Correlates the eventual return signal with this request.
    pub request_code: u32,
    /// String encoding of the cropped image reference.
    #[serde(rename = "extra_image_uri")]
    pub image_uri: String,
}

impl AnalysisRequest {
    /// Builds the handoff for a cropped image.
    #[must_use]
    pub fn for_image(image: &ImageRef) -> Self {
        Self {
            request_code: REQUEST_RESULT,
            image_uri: image.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_any_image_request() {
        let req = PickRequest::any_image();
        assert_eq!(req.mime_filter, "image/*");
        assert_eq!(req.title, "Choose a Picture");
    }

    #[test]
    fn test_wildcard_filter() {
        let req = PickRequest::any_image();
        assert!(req.accepts("image/jpeg"));
        assert!(req.accepts("IMAGE/png"));
        assert!(!req.accepts("video/mp4"));
        assert!(!req.accepts("image"));
    }

    #[test]
    fn test_exact_and_catch_all_filters() {
        let exact = PickRequest {
            mime_filter: "image/png".into(),
            title: String::new(),
        };
        assert!(exact.accepts("image/png"));
        assert!(!exact.accepts("image/jpeg"));

        let all = PickRequest {
            mime_filter: "*/*".into(),
            title: String::new(),
        };
        assert!(all.accepts("application/pdf"));
    }

    #[test]
    fn test_analysis_request_payload() {
        let req = AnalysisRequest::for_image(&ImageRef::from("file:///cache/cropped_img_7.jpg"));
        assert_eq!(req.request_code, 1001);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json[EXTRA_IMAGE_URI], "file:///cache/cropped_img_7.jpg");
    }
}
