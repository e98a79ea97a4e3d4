//! # cfzone
//!
//! A Cloudflare v4 DNS management client with batch orchestration.
//!
//! The crate is organized as four layers:
//!
//! - [`transport`] — HTTP plumbing behind the [`Transport`] trait: builds
//!   the request, attaches one of two credential header shapes, and hands
//!   back the raw status and body. Swappable for tests.
//! - Response normalization — every response is folded into a single
//!   [`Result`]: HTTP 401/403/5xx map directly to errors, everything else
//!   goes through Cloudflare's `{success, result, errors}` envelope.
//! - [`CloudflareClient`] — one method per API operation: credential
//!   verification, accounts, zones, and DNS records. List operations
//!   aggregate all pages via [`paginate::collect_all_pages`].
//! - [`batch`] — sequential multi-record runs (add, field-level edit)
//!   with independent per-item outcomes; a failed item never aborts the
//!   rest of the batch.
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cfzone::{CloudflareClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CloudflareClient::new(Credentials::ApiToken {
//!         token: "your-token".to_string(),
//!     })?;
//!
//!     client.verify_credentials().await?;
//!
//!     for zone in client.list_zones().await? {
//!         println!("{} ({:?})", zone.name, zone.status);
//!         for record in client.list_records(&zone.id).await? {
//!             println!(
//!                 "  {} {} -> {}",
//!                 record.name,
//!                 record.data.record_type(),
//!                 record.data.content()
//!             );
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Batch Runs
//!
//! ```rust,no_run
//! # use cfzone::*;
//! # async fn example(client: &CloudflareClient) {
//! let items = vec![BatchAddItem {
//!     name: "www.example.com".to_string(),
//!     ttl: 1,
//!     proxied: true,
//!     data: RecordData::A { address: "192.0.2.1".to_string() },
//! }];
//! let report = batch::run_batch_add(client, "zone-id", &items).await;
//! println!("{} ok, {} failed", report.succeeded, report.failed);
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Errors are
//! data, not panics; batch runs additionally fold per-item errors into
//! [`BatchOutcome`] messages instead of propagating them.

mod api;
pub mod batch;
mod error;
pub mod paginate;
pub mod transport;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, Result};

// Re-export the client and its page-size constants
pub use api::{CloudflareClient, MAX_PAGE_SIZE_RECORDS, MAX_PAGE_SIZE_ZONES};

// Re-export the transport seam for test doubles
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport, TransportFailure};

// Re-export types
pub use types::{
    Account, BatchAddItem, BatchEdit, BatchOutcome, BatchReport, BatchStatus, ContentReplace,
    CreateRecordRequest, Credentials, DnsRecord, DnsRecordType, PageRequest, RecordData,
    UpdateRecordRequest, Zone, ZoneStatus,
};
