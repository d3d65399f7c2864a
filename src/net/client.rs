//! # Submission Backend Client
//!
//! Thin client over the remote Lost & Found backend: multipart upload of
//! found-item reports, search-by-photo for lost items, and the item
//! listing/thumbnail endpoints used after a positive match.
//!
//! The client never retries. A failed request surfaces as a single
//! `Upload` error and the caller keeps its captured images and form state
//! so the user can retry manually.

use log::debug;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{CaptureError, CaptureResult};
use crate::processing::encode::EncodedImage;
use crate::session::FoundReport;

/// Response of the search-by-photo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchOutcome {
    #[serde(rename = "match")]
    pub is_match: bool,
    pub item: Option<String>,
    pub confidence: f64,
}

/// One item in the public found-item listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSummary {
    pub name: String,
    pub thumbnail: String,
}

/// Response of the item listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemListing {
    pub items: Vec<ItemSummary>,
}

/// Response of the per-item image listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderImages {
    pub images: Vec<String>,
}

/// Acknowledgement of a found-item report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportAck {
    pub status: String,
    pub message: String,
}

/// Client bound to one backend base URL.
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// The backend rejects reports with more than six images; the client
    /// enforces the bound before building the request.
    pub const MAX_REPORT_IMAGES: usize = 6;

    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Submit a completed found-item report: the item name plus one JPEG
    /// part per captured slot, in slot order.
    pub async fn report_found(&self, report: &FoundReport) -> CaptureResult<ReportAck> {
        if report.images.len() > Self::MAX_REPORT_IMAGES {
            return Err(CaptureError::upload(format!(
                "at most {} images per report",
                Self::MAX_REPORT_IMAGES
            )));
        }

        let mut form = Form::new().text("item_name", report.item_name.clone());
        for image in &report.images {
            form = form.part("files", jpeg_part(image)?);
        }

        debug!(
            "submitting found-item report '{}' with {} images",
            report.item_name,
            report.images.len()
        );
        let response = self
            .http
            .post(format!("{}/found", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Search the found-item database with a single query photo.
    pub async fn search_lost(&self, image: &EncodedImage) -> CaptureResult<SearchOutcome> {
        let form = Form::new().part("file", jpeg_part(image)?);

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Fetch the public item listing, one representative thumbnail each.
    pub async fn list_items(&self) -> CaptureResult<ItemListing> {
        let response = self
            .http
            .get(format!("{}/items-list", self.base_url))
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Fetch the image references for one item, used to show the match
    /// result after a positive search.
    pub async fn folder_images(&self, folder: &str) -> CaptureResult<FolderImages> {
        let response = self
            .http
            .get(format!("{}/get-folder-images", self.base_url))
            .query(&[("folder", folder)])
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }
}

fn jpeg_part(image: &EncodedImage) -> CaptureResult<Part> {
    Part::bytes(image.bytes().to_vec())
        .file_name(format!("slot_{}.jpg", image.slot()))
        .mime_str(EncodedImage::MIME)
        .map_err(|e| CaptureError::upload(e.to_string()))
}

fn check_status(response: reqwest::Response) -> CaptureResult<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(CaptureError::upload(format!(
            "backend returned {}",
            response.status()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = BackendClient::new("https://backend.example/");
        assert_eq!(client.base_url, "https://backend.example");
    }

    #[test]
    fn test_search_outcome_wire_shape() {
        let outcome: SearchOutcome =
            serde_json::from_str(r#"{"match": true, "item": "black-wallet", "confidence": 0.912}"#)
                .unwrap();
        assert!(outcome.is_match);
        assert_eq!(outcome.item.as_deref(), Some("black-wallet"));
        assert!((outcome.confidence - 0.912).abs() < 1e-9);

        // A no-match response may carry a null item.
        let outcome: SearchOutcome =
            serde_json::from_str(r#"{"match": false, "item": null, "confidence": 0.31}"#).unwrap();
        assert!(!outcome.is_match);
        assert!(outcome.item.is_none());
    }

    #[test]
    fn test_item_listing_wire_shape() {
        let listing: ItemListing = serde_json::from_str(
            r#"{"items": [{"name": "airpods-case", "thumbnail": "https://signed.example/x"}]}"#,
        )
        .unwrap();
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].name, "airpods-case");
    }

    #[tokio::test]
    async fn test_report_image_bound_enforced() {
        let client = BackendClient::new("http://127.0.0.1:1");
        let mut report = crate::session::FoundReport {
            item_name: "wallet".into(),
            ..Default::default()
        };
        for slot in 0..7 {
            report
                .images
                .push(make_jpeg(slot).expect("test jpeg encodes"));
        }
        let error = client.report_found(&report).await.unwrap_err();
        assert_eq!(error.category(), "upload");
    }

    fn make_jpeg(slot: usize) -> CaptureResult<EncodedImage> {
        use crate::capture::source::RgbFrame;
        use crate::processing::crop::AspectRatio;
        use std::sync::Arc;

        let frame = RgbFrame {
            data: Arc::new(vec![5u8; 24 * 32 * 3]),
            width: 24,
            height: 32,
        };
        crate::processing::encode::capture_jpeg(&frame, AspectRatio::PORTRAIT_3_4, 90, slot)
    }
}
