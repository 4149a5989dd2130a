//! Decoding of free-text insight responses.
//!
//! The chain is pure: a strict JSON decode first (after stripping a Markdown
//! code fence), then a scan for known section headings. Neither step fails;
//! text that fits neither shape decodes to empty sections.

use super::{InsightOptions, InsightSections, Recommendation};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

/// Most recommendations kept from a structured response.
const MAX_RECOMMENDATIONS: usize = 3;

/// Section headings in the order a prose response lists them.
const HEADINGS: [&str; 5] = [
    "Price Comparison",
    "Market Trends",
    "Predictions",
    "Recommendations",
    "Product Analysis",
];

lazy_static! {
    static ref LIST_MARKER: Regex =
        Regex::new(r"(?:^|\s)(\d+)\.\s+").expect("list marker pattern is valid");
    static ref TITLED_ITEM: Regex =
        Regex::new(r"(?s)^(.+?):\s+(.*)$").expect("titled item pattern is valid");
}

/// Every section a response may carry, before toggle filtering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedInsights {
    pub price_comparison: String,
    pub market_trends: String,
    pub predictions: String,
    pub recommendations: Vec<Recommendation>,
    pub product_analysis: String,
}

impl DecodedInsights {
    /// Keep the toggled sections plus product analysis.
    pub fn select(self, options: &InsightOptions) -> InsightSections {
        InsightSections {
            price_comparison: options.price_comparison.then_some(self.price_comparison),
            market_trends: options.market_trends.then_some(self.market_trends),
            predictions: options.predictions.then_some(self.predictions),
            recommendations: if options.recommendations {
                self.recommendations
            } else {
                Vec::new()
            },
            product_analysis: self.product_analysis,
        }
    }
}

/// Decode a completion into sections.
pub fn decode_insights(text: &str) -> DecodedInsights {
    match decode_json(text) {
        Some(decoded) => {
            tracing::debug!("Decoded insights as JSON");
            decoded
        }
        None => {
            tracing::debug!("Response is not JSON, scanning for section headings");
            decode_headings(text)
        }
    }
}

/// Strict structured decode. `None` unless the text is a JSON object.
pub fn decode_json(text: &str) -> Option<DecodedInsights> {
    let value: Value = serde_json::from_str(strip_code_fence(text)).ok()?;
    let object = value.as_object()?;

    let recommendations = match object.get("recommendations") {
        Some(Value::Array(items)) => items.iter().filter_map(recommendation_from_value).collect(),
        Some(Value::String(list)) => parse_recommendations(list),
        _ => Vec::new(),
    };

    Some(DecodedInsights {
        price_comparison: text_field(object, "priceComparison"),
        market_trends: text_field(object, "marketTrends"),
        predictions: text_field(object, "predictions"),
        recommendations: recommendations.into_iter().take(MAX_RECOMMENDATIONS).collect(),
        product_analysis: text_field(object, "productAnalysis"),
    })
}

/// Prose decode by known headings.
///
/// Headings match case-sensitively at their first occurrence. A section runs
/// to the next heading found after it, or to the end of the text.
pub fn decode_headings(text: &str) -> DecodedInsights {
    let positions: Vec<Option<usize>> = HEADINGS.iter().map(|h| text.find(h)).collect();

    DecodedInsights {
        price_comparison: section(text, &positions, 0).to_string(),
        market_trends: section(text, &positions, 1).to_string(),
        predictions: section(text, &positions, 2).to_string(),
        recommendations: parse_recommendations(section(text, &positions, 3)),
        product_analysis: section(text, &positions, 4).to_string(),
    }
}

fn section<'a>(text: &'a str, positions: &[Option<usize>], index: usize) -> &'a str {
    let Some(start) = positions[index] else {
        return "";
    };
    let body_start = start + HEADINGS[index].len();
    let body_end = positions
        .iter()
        .flatten()
        .copied()
        .filter(|&p| p >= body_start)
        .min()
        .unwrap_or(text.len());

    clean_body(&text[body_start..body_end])
}

/// Parse "1. Title: Description 2. Title: Description" lists.
///
/// Items without a "Title: Description" shape are dropped.
pub fn parse_recommendations(text: &str) -> Vec<Recommendation> {
    let markers: Vec<(usize, usize)> = LIST_MARKER
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, body_start))| {
            let body_end = markers.get(i + 1).map(|&(s, _)| s).unwrap_or(text.len());
            titled_item(text[body_start..body_end].trim())
        })
        .collect()
}

fn titled_item(item: &str) -> Option<Recommendation> {
    let caps = TITLED_ITEM.captures(item)?;
    let title = caps.get(1)?.as_str().trim();
    if title.is_empty() {
        return None;
    }

    Some(Recommendation {
        title: title.to_string(),
        description: caps.get(2)?.as_str().trim().to_string(),
    })
}

fn recommendation_from_value(value: &Value) -> Option<Recommendation> {
    match value {
        Value::Object(fields) => Some(Recommendation {
            title: text_field(fields, "title"),
            description: text_field(fields, "description"),
        }),
        Value::String(item) => Some(titled_item(item).unwrap_or_else(|| Recommendation {
            title: item.trim().to_string(),
            description: String::new(),
        })),
        _ => None,
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Trim heading punctuation around a section body.
///
/// A bold heading ("**Heading**:") leaves its closing `**` at the start of the
/// body and the next heading's opening `**` at the end. Bold text inside the
/// body is kept.
fn clean_body(body: &str) -> &str {
    let body = body
        .trim_start_matches('*')
        .trim_start_matches(|c: char| c == ':' || c == '#' || c.is_whitespace())
        .trim_end_matches(|c: char| c == '#' || c.is_whitespace());

    let rest = body.trim_end_matches('*');
    if rest.len() < body.len() && (rest.is_empty() || rest.ends_with(char::is_whitespace)) {
        rest.trim_end()
    } else {
        body
    }
}
