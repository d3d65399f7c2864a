// # Net Module
//
// HTTP client for the submission backend. Treated as a black box:
// one request, one response, no retry.

pub mod client;

pub use client::{BackendClient, FolderImages, ItemListing, ItemSummary, ReportAck, SearchOutcome};
