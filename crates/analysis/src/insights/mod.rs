//! Insight synthesis with a computed fallback.
//!
//! The synthesizer sends a [`DataSummary`] to the completion service and
//! decodes the reply. When the service reports exhausted quota or rate
//! limiting, it computes the narrative locally instead. Credential and other
//! failures propagate.

pub mod decode;
pub mod fallback;

use crate::aggregate::{average_price_difference, by_retailer, distinct_count, lowest_price_group};
use crate::record::{Dataset, PriceRecord};
use crate::request::completion_request;
use crate::summary::DataSummary;
use pricelens_core::AppResult;
use pricelens_llm::LlmClient;
use pricelens_prompt::{build_prompt, builtin_prompt, PromptDefinition, INSIGHTS_PROMPT_ID};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub use decode::{decode_insights, parse_recommendations, DecodedInsights};
pub use fallback::fallback_sections;

/// Which narrative sections to produce. Product analysis is always produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightOptions {
    pub price_comparison: bool,
    pub market_trends: bool,
    pub predictions: bool,
    pub recommendations: bool,
}

impl InsightOptions {
    /// Every section toggled on.
    pub fn all() -> Self {
        Self {
            price_comparison: true,
            market_trends: true,
            predictions: true,
            recommendations: true,
        }
    }

    /// Section descriptions for the prompt, in a fixed order.
    pub fn requested_sections(&self) -> String {
        let mut sections = Vec::new();
        if self.price_comparison {
            sections.push(r#""priceComparison": Brief retailer price comparison"#);
        }
        if self.market_trends {
            sections.push(r#""marketTrends": Brief pattern/trend identification"#);
        }
        if self.predictions {
            sections.push(r#""predictions": Brief price movement predictions"#);
        }
        if self.recommendations {
            sections.push(
                r#""recommendations": Array of objects with "title" & "description" (max 3)"#,
            );
        }
        sections.push(r#""productAnalysis": Brief product pricing analysis"#);
        sections.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

/// Narrative sections after toggle filtering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsightSections {
    pub price_comparison: Option<String>,
    pub market_trends: Option<String>,
    pub predictions: Option<String>,
    pub recommendations: Vec<Recommendation>,
    pub product_analysis: String,
}

/// Which path produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsightSource {
    #[default]
    Ai,
    Fallback,
}

impl InsightSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }
}

/// Figures computed from the dataset on both paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightStats {
    /// Distinct product+barcode pairs
    pub product_count: usize,
    pub retailer_count: usize,
    pub avg_price_diff: f64,
    /// Empty when there are no retailers
    pub lowest_price_retailer: String,
}

impl InsightStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let retailers = by_retailer(dataset);

        Self {
            product_count: distinct_count(dataset, PriceRecord::product_identity),
            retailer_count: retailers.len(),
            avg_price_diff: average_price_difference(dataset),
            lowest_price_retailer: lowest_price_group(&retailers)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Insight result: toggled sections, recommendations, product analysis and
/// stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_trends: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<String>,
    pub recommendations: Vec<Recommendation>,
    pub product_analysis: String,
    pub stats: InsightStats,
    #[serde(skip)]
    pub source: InsightSource,
}

impl InsightReport {
    fn assemble(sections: InsightSections, stats: InsightStats, source: InsightSource) -> Self {
        Self {
            price_comparison: sections.price_comparison,
            market_trends: sections.market_trends,
            predictions: sections.predictions,
            recommendations: sections.recommendations,
            product_analysis: sections.product_analysis,
            stats,
            source,
        }
    }
}

/// Produces insight reports through a completion client.
pub struct InsightSynthesizer {
    client: Arc<dyn LlmClient>,
    model: String,
    prompt: PromptDefinition,
}

impl InsightSynthesizer {
    /// Create a synthesizer with the built-in insights prompt.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client,
            model: model.into(),
            prompt: builtin_prompt(INSIGHTS_PROMPT_ID)?,
        })
    }

    /// Replace the prompt definition (e.g. a workspace override).
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    /// Build a report for `dataset`.
    ///
    /// Quota and rate-limit failures fall back to computed text; any other
    /// client failure is returned.
    pub async fn synthesize(
        &self,
        dataset: &Dataset,
        options: &InsightOptions,
    ) -> AppResult<InsightReport> {
        let stats = InsightStats::from_dataset(dataset);
        let built = build_prompt(&self.prompt, prompt_variables(dataset, options)?)?;
        let request = completion_request(built, &self.model);

        tracing::debug!(
            provider = self.client.provider_name(),
            model = %self.model,
            "Requesting insights"
        );

        match self.client.complete(&request).await {
            Ok(response) => {
                tracing::info!(path = InsightSource::Ai.as_str(), "Insights generated");
                let sections = decode_insights(&response.content).select(options);
                Ok(InsightReport::assemble(sections, stats, InsightSource::Ai))
            }
            Err(e) if e.is_quota() => {
                tracing::warn!("Completion quota exhausted, using computed insights: {}", e);
                tracing::info!(path = InsightSource::Fallback.as_str(), "Insights generated");
                Ok(InsightReport::assemble(
                    fallback_sections(dataset, options),
                    stats,
                    InsightSource::Fallback,
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Report built without contacting the client.
    pub fn fallback_report(dataset: &Dataset, options: &InsightOptions) -> InsightReport {
        InsightReport::assemble(
            fallback_sections(dataset, options),
            InsightStats::from_dataset(dataset),
            InsightSource::Fallback,
        )
    }
}

fn prompt_variables(
    dataset: &Dataset,
    options: &InsightOptions,
) -> AppResult<HashMap<String, String>> {
    let summary = DataSummary::from_dataset(dataset);
    let join_keys = |keys: Vec<&String>| {
        keys.into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut vars = HashMap::new();
    vars.insert(
        "retailers".to_string(),
        join_keys(summary.retailers.keys().collect()),
    );
    vars.insert(
        "categories".to_string(),
        join_keys(summary.categories.keys().collect()),
    );
    vars.insert(
        "productCount".to_string(),
        summary.summary.product_count.to_string(),
    );
    vars.insert(
        "retailerStats".to_string(),
        serde_json::to_string(&summary.retailers)?,
    );
    vars.insert(
        "categoryStats".to_string(),
        serde_json::to_string(&summary.categories)?,
    );
    vars.insert("sections".to_string(), options.requested_sections());
    Ok(vars)
}
