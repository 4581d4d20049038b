//! Backend module for fetching statistics
//!
//! The backend talks to the covidtracking.com API off the UI thread and
//! hands decoded series back through a channel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                        ┌──────────────────┐
//! │   UI thread     │  FetchMessage (x2)     │  fetch-worker    │
//! │  (CovidTracker  │◄───────────────────────│  tokio runtime   │
//! │   App / store)  │     crossbeam          │  CovidClient     │
//! └─────────────────┘                        └──────────────────┘
//! ```
//!
//! - [`CovidClient`] - reqwest client issuing the two GET requests
//! - [`spawn_fetches`] - runs both requests concurrently on a background thread
//! - [`FetchBridge`] - UI-side receiver drained once per frame

pub mod fetcher;
pub mod worker;

pub use fetcher::{decode_records, CovidClient};
pub use worker::{spawn_fetches, FetchBridge, FetchMessage};
