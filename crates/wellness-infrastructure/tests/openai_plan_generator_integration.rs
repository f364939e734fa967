use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wellness_domain::dass::Dass21Scores;
use wellness_domain::plan::PlanGenerator;
use wellness_domain::shared::DomainError;
use wellness_infrastructure::config::{LlmConfig, TimeoutConfig};
use wellness_infrastructure::llm::OpenAiPlanGenerator;

fn config_for(server: &MockServer) -> LlmConfig {
    LlmConfig {
        api_key: Some("sk-test".to_string()),
        base_url: Url::parse(&format!("{}/v1/", server.uri())).expect("mock url"),
        model: "gpt-4o-mini".to_string(),
        temperature: 0.4,
    }
}

#[tokio::test]
async fn generator_returns_parsed_plan_json() {
    let server = MockServer::start().await;
    let plan = json!({
        "label": "[Verified]",
        "activity_plan": [{ "date": "2025-06-01", "Morning": { "activity": "Walk" } }]
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": plan.to_string() } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator =
        OpenAiPlanGenerator::new(&config_for(&server), &TimeoutConfig::default()).expect("generator");
    let scores = Dass21Scores::new(Some(8), Some(6), Some(12)).expect("scores");

    let generated = generator.generate(&scores).await.expect("generate");
    assert_eq!(generated, plan);
}

#[tokio::test]
async fn generator_maps_error_status_to_external_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let generator =
        OpenAiPlanGenerator::new(&config_for(&server), &TimeoutConfig::default()).expect("generator");

    let err = generator
        .generate(&Dass21Scores::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ExternalService(_)));
}

#[tokio::test]
async fn generator_rejects_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let generator =
        OpenAiPlanGenerator::new(&config_for(&server), &TimeoutConfig::default()).expect("generator");

    let err = generator
        .generate(&Dass21Scores::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ExternalService(_)));
}
