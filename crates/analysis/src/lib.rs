//! Price-comparison analysis pipeline.
//!
//! Text flows through four stages:
//!
//! 1. [`extract`] turns raw document text into [`PriceRecord`]s using a fixed
//!    positional grammar; [`ingest`] accepts already-structured JSON instead.
//! 2. [`aggregate`] groups a [`Dataset`] by retailer or category, in
//!    first-seen order, and selects the lowest-priced group.
//! 3. [`insights`] and [`dialogue`] send a [`summary::DataSummary`] (never raw
//!    records) to an [`LlmClient`](pricelens_llm::LlmClient), and fall back to
//!    computed text when the collaborator reports exhausted quota.
//! 4. [`charts`] projects the dataset into chart-ready series.
//!
//! Nothing here reads the environment or keeps state between calls; clients,
//! model names and prompt definitions are passed in.

pub mod aggregate;
pub mod charts;
pub mod dialogue;
pub mod extract;
pub mod ingest;
pub mod insights;
pub mod record;
mod request;
pub mod summary;

#[cfg(test)]
mod tests;

pub use aggregate::{GroupStat, GroupStats};
pub use charts::{build_charts, ChartData};
pub use dialogue::DialogueResponder;
pub use extract::extract;
pub use ingest::{ingest_json, IngestedBatch};
pub use insights::{
    InsightOptions, InsightReport, InsightSource, InsightStats, InsightSynthesizer,
    Recommendation,
};
pub use record::{Dataset, PriceRecord};
pub use summary::DataSummary;
