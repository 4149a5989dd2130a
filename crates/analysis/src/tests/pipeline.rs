//! Extraction through synthesis and dialogue against a scripted client.

use super::fixtures::sample_dataset;
use crate::dialogue::DialogueResponder;
use crate::insights::{InsightOptions, InsightSource, InsightSynthesizer};
use pricelens_core::AppError;
use pricelens_llm::{LlmClient, ScriptedClient, ScriptedReply};
use std::sync::Arc;

fn synthesizer(client: &Arc<ScriptedClient>) -> InsightSynthesizer {
    let client: Arc<dyn LlmClient> = client.clone();
    InsightSynthesizer::new(client, "gpt-3.5-turbo").unwrap()
}

fn responder(client: &Arc<ScriptedClient>) -> DialogueResponder {
    let client: Arc<dyn LlmClient> = client.clone();
    DialogueResponder::new(client, "gpt-3.5-turbo").unwrap()
}

#[tokio::test]
async fn test_quota_falls_back_after_one_call() {
    let client = Arc::new(ScriptedClient::quota_exhausted());
    let report = synthesizer(&client)
        .synthesize(&sample_dataset(), &InsightOptions::default())
        .await
        .unwrap();

    assert_eq!(client.call_count(), 1);
    assert_eq!(report.source, InsightSource::Fallback);
    assert!(report.price_comparison.is_none());
    assert!(report.recommendations.is_empty());
    assert!(report.product_analysis.contains("2 categories"));

    assert_eq!(report.stats.product_count, 2);
    assert_eq!(report.stats.retailer_count, 2);
    assert_eq!(report.stats.lowest_price_retailer, "A");
    assert!((report.stats.avg_price_diff - 7.5).abs() < 1e-9);
}

#[test]
fn test_fallback_report_with_all_sections() {
    let report = InsightSynthesizer::fallback_report(&sample_dataset(), &InsightOptions::all());

    assert_eq!(
        report.price_comparison.as_deref(),
        Some("Based on the data, A appears to have the most competitive pricing overall.")
    );
    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.recommendations[0].title, "Compare Prices");
}

#[tokio::test]
async fn test_auth_failure_propagates() {
    let client = Arc::new(ScriptedClient::new([ScriptedReply::Auth(
        "Incorrect API key provided".to_string(),
    )]));
    let result = synthesizer(&client)
        .synthesize(&sample_dataset(), &InsightOptions::all())
        .await;

    assert!(matches!(result, Err(AppError::LlmAuth(_))));
}

#[tokio::test]
async fn test_unknown_failure_propagates() {
    let client = Arc::new(ScriptedClient::new([ScriptedReply::Failure(
        "upstream returned 500".to_string(),
    )]));
    let result = synthesizer(&client)
        .synthesize(&sample_dataset(), &InsightOptions::all())
        .await;

    assert!(matches!(result, Err(AppError::Llm(_))));
}

#[tokio::test]
async fn test_heading_response_fills_toggled_sections() {
    let client = Arc::new(ScriptedClient::text(
        "Price Comparison: A is about 7% cheaper.\n\
         Market Trends: Bakery prices vary more than dairy.\n\
         Recommendations:\n1. Shop A: lower baskets overall\n\
         Product Analysis: Rye Bread has the widest spread.",
    ));
    let options = InsightOptions {
        price_comparison: true,
        recommendations: true,
        ..InsightOptions::default()
    };

    let report = synthesizer(&client)
        .synthesize(&sample_dataset(), &options)
        .await
        .unwrap();

    assert_eq!(report.source, InsightSource::Ai);
    assert_eq!(
        report.price_comparison.as_deref(),
        Some("A is about 7% cheaper.")
    );
    assert!(report.market_trends.is_none());
    assert!(report.predictions.is_none());
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].title, "Shop A");
    assert_eq!(report.product_analysis, "Rye Bread has the widest spread.");
    assert_eq!(report.stats.lowest_price_retailer, "A");
}

#[tokio::test]
async fn test_json_response() {
    let client = Arc::new(ScriptedClient::text(
        r#"{"marketTrends":"Stable","productAnalysis":"Milk is cheapest at A","predictions":"ignored"}"#,
    ));
    let options = InsightOptions {
        market_trends: true,
        ..InsightOptions::default()
    };

    let report = synthesizer(&client)
        .synthesize(&sample_dataset(), &options)
        .await
        .unwrap();

    assert_eq!(report.market_trends.as_deref(), Some("Stable"));
    assert!(report.predictions.is_none());
    assert_eq!(report.product_analysis, "Milk is cheapest at A");
}

#[tokio::test]
async fn test_insights_request_carries_summary_not_records() {
    let client = Arc::new(ScriptedClient::text("{}"));
    synthesizer(&client)
        .synthesize(&sample_dataset(), &InsightOptions::all())
        .await
        .unwrap();

    let request = &client.requests()[0];
    assert_eq!(request.model, "gpt-3.5-turbo");
    assert_eq!(request.max_tokens, Some(800));
    assert_eq!(request.temperature, Some(0.5));
    assert!(request.prompt.contains("Retailers: B, A"));
    assert!(request.prompt.contains(r#""recommendations": Array of objects"#));
    assert!(!request.prompt.contains("Whole Milk"));
    assert!(!request.prompt.contains("5901234123457"));
}

#[tokio::test]
async fn test_dialogue_answers_from_client() {
    let client = Arc::new(ScriptedClient::text("Retailer A is cheapest."));
    let answer = responder(&client)
        .respond("Which retailer is cheapest?", &sample_dataset())
        .await
        .unwrap();

    assert_eq!(answer, "Retailer A is cheapest.");

    let request = &client.requests()[0];
    assert_eq!(request.prompt, "Which retailer is cheapest?");
    assert_eq!(request.max_tokens, Some(500));
    assert!(request
        .system
        .as_deref()
        .unwrap()
        .contains(r#""retailerCount":2"#));
}

#[tokio::test]
async fn test_dialogue_quota_fallback() {
    let client = Arc::new(ScriptedClient::quota_exhausted());
    let answer = responder(&client)
        .respond("Where should I shop?", &sample_dataset())
        .await
        .unwrap();

    assert_eq!(client.call_count(), 1);
    assert!(answer.contains("- Your data contains 4 entries"));
    assert!(answer.contains("- Retailers: B, A"));
    assert!(answer.contains("- Product categories: DAIRY, BAKERY"));
    assert!(answer.contains("- Number of unique products: 2"));
}

#[tokio::test]
async fn test_dialogue_propagates_auth_and_unknown() {
    let client = Arc::new(ScriptedClient::new([
        ScriptedReply::Auth("bad key".to_string()),
        ScriptedReply::Failure("timeout".to_string()),
    ]));
    let responder = responder(&client);
    let data = sample_dataset();

    assert!(matches!(
        responder.respond("q", &data).await,
        Err(AppError::LlmAuth(_))
    ));
    assert!(matches!(
        responder.respond("q", &data).await,
        Err(AppError::Llm(_))
    ));
}

#[tokio::test]
async fn test_dialogue_rejects_empty_question() {
    let client = Arc::new(ScriptedClient::default());
    let result = responder(&client).respond("   ", &sample_dataset()).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(client.call_count(), 0);
}
