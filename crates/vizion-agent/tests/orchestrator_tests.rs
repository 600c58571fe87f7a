// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the generation cycle against mock providers.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::Semaphore;
use vizion_agent::{FALLBACK_EXPLANATION, GenerationState, Rejection, SubmitOutcome};
use vizion_core::{
    Completion, FontFamily, HexColor, ProviderErrorKind, ProviderId, ProviderMetadata, Role,
    SourceDocument, StyleSettings, VizionError,
};
use vizion_test_utils::{TestHarness, site_json};

async fn wait_until_generating(harness: &TestHarness) {
    while harness.orchestrator.state() != GenerationState::Generating {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn each_generation_replaces_the_document_wholesale() {
    let harness = TestHarness::builder()
        .with_mock_responses(
            ProviderId::OpenRouter,
            vec![
                site_json("<h1>One</h1>", "h1 { color: red; }", "console.log(1)", "first"),
                site_json("<h2>Two</h2>", "h2 { color: blue; }", "", "second"),
            ],
        )
        .build();

    harness.submit("make a heading").await;
    assert_eq!(
        harness.orchestrator.current().await,
        SourceDocument::new("<h1>One</h1>", "h1 { color: red; }", "console.log(1)")
    );

    harness.submit("change it").await;
    // Nothing from the first document survives, including its script.
    assert_eq!(
        harness.orchestrator.current().await,
        SourceDocument::new("<h2>Two</h2>", "h2 { color: blue; }", "")
    );
}

#[tokio::test]
async fn log_grows_by_two_on_success_and_failure() {
    let harness = TestHarness::builder()
        .with_mock_responses(
            ProviderId::OpenRouter,
            vec![
                site_json("<p>a</p>", "p{}", "", "done"),
                "this is not json".to_string(),
            ],
        )
        .build();

    assert!(matches!(
        harness.submit("first").await,
        SubmitOutcome::Generated { .. }
    ));
    assert_eq!(harness.orchestrator.history().await.len(), 2);

    let outcome = harness.submit("second").await;
    let SubmitOutcome::Failed { entry, error } = outcome else {
        panic!("expected parse failure");
    };
    assert!(matches!(error, VizionError::Parse(_)));
    assert!(entry.is_error);
    assert_eq!(entry.role, Role::Assistant);
    assert_eq!(entry.content, "Error: AI response was not valid JSON. Please try again.");

    let history = harness.orchestrator.history().await;
    assert_eq!(history.len(), 4);
    assert_eq!(history[2].content, "second");
    // The failed turn left the document from the first generation in place.
    assert_eq!(harness.orchestrator.current().await.html, "<p>a</p>");
}

#[tokio::test]
async fn provider_error_becomes_one_error_entry() {
    let harness = TestHarness::builder().build();
    let mock = harness.provider(ProviderId::OpenRouter).unwrap();
    mock.add_reply(Err(VizionError::from_status(
        ProviderId::OpenRouter,
        404,
        "No endpoints found for google/gemini-9",
    )))
    .await;

    let outcome = harness.submit("hello").await;
    let SubmitOutcome::Failed { entry, error } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(error.provider_kind(), Some(ProviderErrorKind::ModelUnavailable));
    assert!(entry.content.starts_with("Error: OpenRouter endpoint error."));
    assert_eq!(harness.orchestrator.current().await, SourceDocument::placeholder());
    assert_eq!(harness.orchestrator.state(), GenerationState::Idle);
}

#[tokio::test]
async fn missing_explanation_uses_fallback() {
    let harness = TestHarness::builder()
        .with_mock_responses(
            ProviderId::DeepSeek,
            vec![r#"{"html":"<p>x</p>","css":"p{}"}"#.to_string()],
        )
        .build();

    let outcome = harness
        .orchestrator
        .submit("tiny site", ProviderId::DeepSeek)
        .await;
    let SubmitOutcome::Generated { entry } = outcome else {
        panic!("expected success");
    };
    assert_eq!(entry.content, FALLBACK_EXPLANATION);
    assert!(!entry.is_error);
}

#[tokio::test]
async fn request_carries_committed_history_and_current_document() {
    let harness = TestHarness::builder()
        .with_mock_responses(
            ProviderId::Gemini,
            vec![
                site_json("<main>v1</main>", "main{}", "", "built v1"),
                site_json("<main>v2</main>", "main{}", "", "built v2"),
            ],
        )
        .build();

    harness
        .orchestrator
        .submit("build v1", ProviderId::Gemini)
        .await;
    harness
        .orchestrator
        .submit("build v2", ProviderId::Gemini)
        .await;

    let requests = harness.provider(ProviderId::Gemini).unwrap().requests().await;
    assert_eq!(requests.len(), 2);

    assert!(requests[0].history.is_empty());
    assert_eq!(requests[0].document, SourceDocument::placeholder());

    // The in-flight instruction travels separately, never inside history.
    let second = &requests[1];
    assert_eq!(second.instruction, "build v2");
    assert_eq!(second.document.html, "<main>v1</main>");
    let contents: Vec<&str> = second.history.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["build v1", "built v1"]);
}

#[tokio::test]
async fn provider_metadata_is_stored_and_replayed() {
    let harness = TestHarness::builder().build();
    let mock = harness.provider(ProviderId::OpenRouter).unwrap();
    let metadata = ProviderMetadata::new(
        ProviderId::OpenRouter,
        serde_json::json!({"reasoning_details": [{"type": "reasoning.text", "text": "hmm"}]}),
    );
    mock.add_reply(Ok(Completion {
        text: site_json("<p>r</p>", "", "", "reasoned"),
        provider_metadata: Some(metadata.clone()),
    }))
    .await;

    harness.submit("think first").await;
    harness.submit("again").await;

    let history = harness.orchestrator.history().await;
    assert_eq!(history[1].provider_metadata.as_ref(), Some(&metadata));

    let requests = mock.requests().await;
    assert_eq!(requests[1].history[1].provider_metadata.as_ref(), Some(&metadata));
}

#[tokio::test]
async fn unconfigured_provider_fails_without_crashing() {
    let harness = TestHarness::builder()
        .without_provider(ProviderId::DeepSeek)
        .build();

    let outcome = harness
        .orchestrator
        .submit("hello", ProviderId::DeepSeek)
        .await;
    let SubmitOutcome::Failed { error, .. } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(error.provider_kind(), Some(ProviderErrorKind::Unconfigured));
    assert!(harness.provider(ProviderId::DeepSeek).is_none());
    assert_eq!(harness.orchestrator.history().await.len(), 2);

    // Other providers keep working.
    assert!(matches!(
        harness.submit("hello again").await,
        SubmitOutcome::Generated { .. }
    ));
}

#[tokio::test]
async fn concurrent_submit_is_rejected() {
    let gate = Arc::new(Semaphore::new(0));
    let harness = TestHarness::builder().with_gate(Arc::clone(&gate)).build();

    let orchestrator = Arc::clone(&harness.orchestrator);
    let first = tokio::spawn(async move {
        orchestrator
            .submit("first request", ProviderId::OpenRouter)
            .await
    });

    wait_until_generating(&harness).await;

    let second = harness.submit("second request").await;
    assert!(matches!(second, SubmitOutcome::Rejected(Rejection::Busy)));
    assert_eq!(harness.orchestrator.new_project().await, Err(Rejection::Busy));

    // Only the in-flight user entry exists while the call is parked.
    assert_eq!(harness.orchestrator.history().await.len(), 1);

    gate.add_permits(1);
    let first = first.await.unwrap();
    assert!(matches!(first, SubmitOutcome::Generated { .. }));

    let history = harness.orchestrator.history().await;
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|e| e.content != "second request"));
    assert_eq!(harness.orchestrator.state(), GenerationState::Idle);
}

#[tokio::test]
async fn aborted_generation_releases_the_guard() {
    let gate = Arc::new(Semaphore::new(0));
    let harness = TestHarness::builder().with_gate(Arc::clone(&gate)).build();

    let orchestrator = Arc::clone(&harness.orchestrator);
    let task = tokio::spawn(async move {
        orchestrator
            .submit("never finishes", ProviderId::OpenRouter)
            .await
    });
    wait_until_generating(&harness).await;

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert_eq!(harness.orchestrator.state(), GenerationState::Idle);

    gate.add_permits(1);
    assert!(matches!(
        harness.submit("retry").await,
        SubmitOutcome::Generated { .. }
    ));
}

#[tokio::test]
async fn style_applied_mid_generation_is_superseded() {
    let gate = Arc::new(Semaphore::new(0));
    let harness = TestHarness::builder()
        .with_gate(Arc::clone(&gate))
        .with_mock_responses(
            ProviderId::OpenRouter,
            vec![site_json(
                "<p>new</p>",
                ":root { --primary: #000000; }",
                "",
                "fresh",
            )],
        )
        .build();

    let orchestrator = Arc::clone(&harness.orchestrator);
    let task = tokio::spawn(async move {
        orchestrator
            .submit("new design", ProviderId::OpenRouter)
            .await
    });
    wait_until_generating(&harness).await;

    let settings = StyleSettings {
        primary_color: HexColor::from_str("#ff0000").unwrap(),
        font_family: FontFamily::Poppins,
    };
    assert!(harness.orchestrator.apply_style(&settings).await);
    assert!(harness.orchestrator.current().await.css.contains("Poppins"));

    gate.add_permits(1);
    task.await.unwrap();

    assert_eq!(
        harness.orchestrator.current().await.css,
        ":root { --primary: #000000; }"
    );
}

#[tokio::test]
async fn new_project_clears_log_and_document() {
    let harness = TestHarness::builder().build();
    harness.submit("something").await;
    assert_eq!(harness.orchestrator.history().await.len(), 2);

    harness.orchestrator.new_project().await.unwrap();

    assert!(harness.orchestrator.history().await.is_empty());
    assert_eq!(harness.orchestrator.current().await, SourceDocument::placeholder());
}
