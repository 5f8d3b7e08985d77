//! Turn controller integration tests
//!
//! Drives `TurnController::run` directly against an in-memory database and
//! a scripted completion client.

mod helpers;

use std::sync::Arc;

use futures::StreamExt;
use helpers::{setup, turn_reply, ScriptedCompletionClient, TestContext};
use internlink_iv::db::{responses, sessions};
use internlink_iv::models::{TurnEvent, TurnProgress, TurnRequest};
use internlink_iv::services::{CompletionClient, QuestionSource, TurnController, TurnError};
use internlink_iv::utils::{count_question_markers, MathStep};

fn request(session_id: &str, question: &str, answer: &str) -> TurnRequest {
    TurnRequest {
        session_id: session_id.to_string(),
        user_response: answer.to_string(),
        current_question: question.to_string(),
        interview_category: "technology".to_string(),
        interview_subcategory: "software-development".to_string(),
        difficulty_level: "beginner".to_string(),
        math_steps: None,
    }
}

async fn run_turn(
    ctx: &TestContext,
    client: Option<Arc<ScriptedCompletionClient>>,
    caller: Result<String, TurnError>,
    request: TurnRequest,
) -> Vec<TurnEvent> {
    let client = client.map(|c| c as Arc<dyn CompletionClient>);
    TurnController::new(ctx.pool.clone(), client, QuestionSource::default())
        .run(caller, request)
        .collect()
        .await
}

fn assert_single_terminal(events: &[TurnEvent]) {
    assert_eq!(events.first(), Some(&TurnEvent::Start));
    let terminal = events.iter().filter(|e| e.is_terminal()).count();
    assert_eq!(terminal, 1, "expected exactly one terminal frame: {:?}", events);
    assert!(events.last().map(TurnEvent::is_terminal).unwrap_or(false));
}

#[tokio::test]
async fn test_turn_returns_acknowledgment_and_next_question() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("technology", "software-development", "beginner").await.unwrap();
    let client = ScriptedCompletionClient::with_replies([turn_reply(
        "Building a game is a great start.",
        "What did you find hardest about it?",
    )]);

    let events = run_turn(
        &ctx,
        Some(client.clone()),
        Ok(ctx.user_id.clone()),
        request(&session_id, "What got you interested in programming?", "I built a game."),
    )
    .await;

    assert_single_terminal(&events);
    assert_eq!(
        events[1],
        TurnEvent::Progress {
            progress: TurnProgress::new(1)
        }
    );
    assert_eq!(
        events[2],
        TurnEvent::Done {
            acknowledgment: "Building a game is a great start.".to_string(),
            next_question: "What did you find hardest about it?".to_string(),
            progress: TurnProgress::new(1),
        }
    );

    let rows = responses::list_for_session(&ctx.pool, &session_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].answer, "I built a game.");

    let session = sessions::load_session(&ctx.pool, &session_id).await.unwrap().unwrap();
    assert_eq!(
        session.transcript,
        "Q1: What got you interested in programming?\nA1: I built a game.\n"
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0].messages.last().unwrap().content;
    assert!(prompt.contains("Suggested next question"));
    assert!(prompt.contains("I built a game."));
}

#[tokio::test]
async fn test_twelfth_answer_completes_and_thirteenth_is_not_recorded() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("technology", "", "beginner").await.unwrap();
    ctx.seed_turns(&session_id, 11).await.unwrap();

    let client = ScriptedCompletionClient::with_replies([turn_reply(
        "Thanks for a great interview.",
        "This question must not be shown.",
    )]);

    let events = run_turn(
        &ctx,
        Some(client.clone()),
        Ok(ctx.user_id.clone()),
        request(&session_id, "Final question?", "Final answer."),
    )
    .await;

    assert_single_terminal(&events);
    assert_eq!(
        events.last().unwrap(),
        &TurnEvent::Complete {
            acknowledgment: Some("Thanks for a great interview.".to_string()),
            progress: TurnProgress::new(12),
        }
    );
    assert_eq!(ctx.response_count(&session_id).await.unwrap(), 12);

    // A 13th submission ends immediately without a question or a new row
    let events = run_turn(
        &ctx,
        Some(client.clone()),
        Ok(ctx.user_id.clone()),
        request(&session_id, "Extra question?", "Extra answer."),
    )
    .await;

    assert_eq!(
        events,
        vec![
            TurnEvent::Start,
            TurnEvent::Complete {
                acknowledgment: None,
                progress: TurnProgress::new(12),
            },
        ]
    );
    assert_eq!(ctx.response_count(&session_id).await.unwrap(), 12);
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn test_sequential_submissions_never_exceed_twelve_rows() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("business", "marketing", "intermediate").await.unwrap();
    let replies: Vec<String> = (1..=15)
        .map(|n| turn_reply("Good.", &format!("Follow-up question {}?", n)))
        .collect();
    let client = ScriptedCompletionClient::with_replies(replies);

    let mut question = "Tell me about yourself.".to_string();
    let mut completions = 0;
    for n in 1..=15 {
        let events = run_turn(
            &ctx,
            Some(client.clone()),
            Ok(ctx.user_id.clone()),
            request(&session_id, &question, &format!("Answer {}", n)),
        )
        .await;

        assert_single_terminal(&events);
        match events.last().unwrap() {
            TurnEvent::Done { next_question, progress, .. } => {
                assert_eq!(progress.answered, n);
                question = next_question.clone();
            }
            TurnEvent::Complete { .. } => completions += 1,
            other => panic!("unexpected terminal frame {:?}", other),
        }
    }

    assert_eq!(completions, 4);
    assert_eq!(ctx.response_count(&session_id).await.unwrap(), 12);
    assert_eq!(client.calls().len(), 12);

    let session = sessions::load_session(&ctx.pool, &session_id).await.unwrap().unwrap();
    assert_eq!(count_question_markers(&session.transcript), 12);
}

#[tokio::test]
async fn test_transcript_markers_count_toward_the_limit() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("technology", "", "beginner").await.unwrap();
    ctx.seed_transcript_only(&session_id, 12).await.unwrap();

    let client = ScriptedCompletionClient::new();
    let events = run_turn(
        &ctx,
        Some(client.clone()),
        Ok(ctx.user_id.clone()),
        request(&session_id, "Q?", "A."),
    )
    .await;

    assert!(matches!(events.last(), Some(TurnEvent::Complete { acknowledgment: None, .. })));
    assert_eq!(ctx.response_count(&session_id).await.unwrap(), 0);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_two_line_text_reply_is_split() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("healthcare", "medicine", "beginner").await.unwrap();
    let client = ScriptedCompletionClient::with_replies([
        "That shows real empathy.\nHow do you stay calm under pressure?",
    ]);

    let events = run_turn(
        &ctx,
        Some(client),
        Ok(ctx.user_id.clone()),
        request(&session_id, "Why healthcare?", "I volunteer at a clinic."),
    )
    .await;

    assert_eq!(
        events.last().unwrap(),
        &TurnEvent::Done {
            acknowledgment: "That shows real empathy.".to_string(),
            next_question: "How do you stay calm under pressure?".to_string(),
            progress: TurnProgress::new(1),
        }
    );
}

#[tokio::test]
async fn test_unparseable_reply_falls_back_to_bank_question() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("math", "algebra", "beginner").await.unwrap();
    let client = ScriptedCompletionClient::with_replies(["{\"unexpected\": true}"]);

    let events = run_turn(
        &ctx,
        Some(client),
        Ok(ctx.user_id.clone()),
        TurnRequest {
            interview_category: "math".to_string(),
            interview_subcategory: "algebra".to_string(),
            ..request(&session_id, "Solve 2x + 5 = 17 and explain each step.", "x = 6")
        },
    )
    .await;

    let bank = QuestionSource::default().questions_for("math", "algebra", "beginner");
    match events.last().unwrap() {
        TurnEvent::Done { acknowledgment, next_question, .. } => {
            assert_eq!(acknowledgment, "Thanks for sharing that.");
            assert!(bank.iter().any(|q| *q == next_question.as_str()));
            assert_ne!(next_question, "Solve 2x + 5 = 17 and explain each step.");
        }
        other => panic!("unexpected terminal frame {:?}", other),
    }
}

#[tokio::test]
async fn test_math_steps_survive_missing_math_column() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("math", "algebra", "beginner").await.unwrap();
    sqlx::query("ALTER TABLE interview_responses DROP COLUMN math_submission")
        .execute(&ctx.pool)
        .await
        .unwrap();

    let client = ScriptedCompletionClient::with_replies([turn_reply("Correct!", "Next one?")]);
    let events = run_turn(
        &ctx,
        Some(client),
        Ok(ctx.user_id.clone()),
        TurnRequest {
            user_response: String::new(),
            math_steps: Some(vec![
                MathStep::explained("2x + 5 = 17", "given"),
                MathStep::explained("2x = 12", "subtract 5"),
                MathStep::new(r"x = \frac{12}{2} = 6"),
            ]),
            ..request(&session_id, "Solve 2x + 5 = 17", "")
        },
    )
    .await;

    assert!(matches!(events.last(), Some(TurnEvent::Done { .. })));

    let rows = responses::list_for_session(&ctx.pool, &session_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].math_submission.is_none());
    assert!(rows[0].answer.starts_with("Step 1: 2x + 5 = 17 (reason: given)"));

    let session = sessions::load_session(&ctx.pool, &session_id).await.unwrap().unwrap();
    assert!(session.transcript.starts_with("Q1: Solve 2x + 5 = 17\nA1: Step 1:"));
    assert_eq!(count_question_markers(&session.transcript), 1);
}

#[tokio::test]
async fn test_math_submission_stored_as_json() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("math", "statistics", "beginner").await.unwrap();
    let client = ScriptedCompletionClient::with_replies([turn_reply("Nice.", "Next?")]);

    run_turn(
        &ctx,
        Some(client),
        Ok(ctx.user_id.clone()),
        TurnRequest {
            math_steps: Some(vec![MathStep::new("(4 + 8 + 6 + 10) / 4 = 7")]),
            ..request(&session_id, "Find the mean", "The mean is 7")
        },
    )
    .await;

    let rows = responses::list_for_session(&ctx.pool, &session_id).await.unwrap();
    let stored: Vec<MathStep> =
        serde_json::from_str(rows[0].math_submission.as_deref().unwrap()).unwrap();
    assert_eq!(stored, vec![MathStep::new("(4 + 8 + 6 + 10) / 4 = 7")]);
    assert!(rows[0].answer.starts_with("The mean is 7\nStep 1:"));
}

#[tokio::test]
async fn test_missing_completion_config_is_an_error_frame() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("technology", "", "beginner").await.unwrap();

    let events = run_turn(&ctx, None, Ok(ctx.user_id.clone()), request(&session_id, "Q?", "A.")).await;

    assert_single_terminal(&events);
    match events.last().unwrap() {
        TurnEvent::Error { error } => assert!(error.contains("not configured")),
        other => panic!("unexpected terminal frame {:?}", other),
    }
    assert_eq!(ctx.response_count(&session_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_other_users_session_is_rejected() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("technology", "", "beginner").await.unwrap();
    let (other_user, _) = ctx.other_user().await.unwrap();
    let client = ScriptedCompletionClient::new();

    let events = run_turn(&ctx, Some(client.clone()), Ok(other_user), request(&session_id, "Q?", "A.")).await;
    assert!(matches!(events.last(), Some(TurnEvent::Error { .. })));

    let events = run_turn(
        &ctx,
        Some(client.clone()),
        Ok(ctx.user_id.clone()),
        request("no-such-session", "Q?", "A."),
    )
    .await;
    match events.last().unwrap() {
        TurnEvent::Error { error } => assert!(error.contains("not found")),
        other => panic!("unexpected terminal frame {:?}", other),
    }

    let events = run_turn(
        &ctx,
        Some(client.clone()),
        Err(TurnError::Unauthenticated("Missing Authorization header".to_string())),
        request(&session_id, "Q?", "A."),
    )
    .await;
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], TurnEvent::Error { .. }));

    assert!(client.calls().is_empty());
    assert_eq!(ctx.response_count(&session_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_completion_failure_ends_turn_without_recording() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("technology", "", "beginner").await.unwrap();
    let client = ScriptedCompletionClient::new();
    client.push_failure(429);

    let events = run_turn(&ctx, Some(client), Ok(ctx.user_id.clone()), request(&session_id, "Q?", "A.")).await;

    assert_single_terminal(&events);
    assert!(matches!(events[1], TurnEvent::Progress { .. }));
    match events.last().unwrap() {
        TurnEvent::Error { error } => assert!(error.contains("429")),
        other => panic!("unexpected terminal frame {:?}", other),
    }
    assert_eq!(ctx.response_count(&session_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_context_window_is_last_six_turns() {
    let ctx = setup().await.unwrap();
    let session_id = ctx.new_session("technology", "", "beginner").await.unwrap();
    ctx.seed_turns(&session_id, 8).await.unwrap();
    let client = ScriptedCompletionClient::with_replies([turn_reply("Ok.", "Next?")]);

    run_turn(
        &ctx,
        Some(client.clone()),
        Ok(ctx.user_id.clone()),
        request(&session_id, "Ninth question?", "Ninth answer."),
    )
    .await;

    let calls = client.calls();
    let messages = &calls[0].messages;
    assert_eq!(messages.len(), 6 * 2 + 1);
    assert_eq!(messages[0].content, "Seeded question number 3?");
    assert!(messages.last().unwrap().content.contains("Question 9 of 12"));
}
