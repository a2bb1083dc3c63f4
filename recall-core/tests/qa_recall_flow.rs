//! QA tests for the recall flow against the live API.
//!
//! These tests verify the end-to-end dialogue with real model
//! responses: first-question generation, answer analysis, and hint
//! behavior. They spend tokens, so they are ignored by default.
//!
//! Run with: `ANTHROPIC_API_KEY=$ANTHROPIC_API_KEY cargo test -p recall-core qa_recall_flow -- --ignored --nocapture`

use recall_core::{Phase, RecallSession, SessionConfig};

/// Load environment variables from .env file
fn setup() {
    let _ = dotenvy::dotenv();
}

/// Check if API key is available
fn has_api_key() -> bool {
    std::env::var("ANTHROPIC_API_KEY").is_ok()
}

const STORY: &str = "Last June was my granddaughter's graduation. It rained all \
morning, so the ceremony moved from the courtyard into the great hall. She wore \
a blue gown and we ate lunch together afterwards.";

#[tokio::test]
#[ignore]
async fn test_first_question_avoids_forbidden_words() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: ANTHROPIC_API_KEY not set");
        return;
    }

    let mut session =
        RecallSession::new(SessionConfig::new()).expect("session should build with key set");

    let question = session
        .begin(STORY, "graduation, rain, hall")
        .await
        .expect("begin should produce a first question");

    println!("First question: {question}");

    assert_eq!(session.phase(), Phase::Recalling);
    assert!(!question.trim().is_empty());

    // The forbidden list bars the target and every waiting fragment.
    let lowered = question.to_lowercase();
    for forbidden in ["graduation", "rain", "hall"] {
        assert!(
            !lowered.contains(forbidden),
            "question leaked forbidden word {forbidden:?}: {question}"
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_direct_answer_is_recognized() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: ANTHROPIC_API_KEY not set");
        return;
    }

    let mut session =
        RecallSession::new(SessionConfig::new()).expect("session should build with key set");

    session
        .begin(STORY, "graduation, rain")
        .await
        .expect("begin should produce a first question");

    let turn = session
        .answer("It was my granddaughter's graduation day.")
        .await
        .expect("answer should process");

    println!("Newly recalled: {:?}", turn.newly_recalled);
    println!("Reply: {:?}", turn.messages.first());

    assert!(
        turn.newly_recalled.iter().any(|f| f == "graduation"),
        "expected the analyzer to spot the stated fragment, got {:?}",
        turn.newly_recalled
    );
    assert!(session.token_usage().total > 0);
}

#[tokio::test]
#[ignore]
async fn test_blank_answer_draws_a_hint() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: ANTHROPIC_API_KEY not set");
        return;
    }

    let mut session =
        RecallSession::new(SessionConfig::new()).expect("session should build with key set");

    session
        .begin(STORY, "graduation, rain")
        .await
        .expect("begin should produce a first question");

    let turn = session
        .answer("I'm sorry, nothing comes to mind.")
        .await
        .expect("answer should process");

    println!("Hint: {:?}", turn.messages.first());

    assert!(turn.newly_recalled.is_empty());
    assert!(turn.revealed.is_none());
    assert_eq!(session.phase(), Phase::Recalling);
}
