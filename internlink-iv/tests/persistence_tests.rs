//! On-disk database persistence across restarts

mod helpers;

use std::sync::Arc;

use futures::StreamExt;
use helpers::{score_reply, turn_reply, ScriptedCompletionClient};
use internlink_common::api::create_user;
use internlink_common::db::{init_database, SessionStatus};
use internlink_iv::db::{responses, sessions};
use internlink_iv::models::{CompleteSessionRequest, TurnEvent, TurnRequest};
use internlink_iv::services::{CompletionClient, QuestionSource, SessionCompleter, TurnController};

#[tokio::test]
async fn test_turns_and_scores_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("internlink.db");

    let pool = init_database(&db_path).await.unwrap();
    let user_id = create_user(&pool, "disk@example.com").await.unwrap();
    let session_id = sessions::create_session(&pool, &user_id, "creative", "media-production", "beginner")
        .await
        .unwrap();

    let client = ScriptedCompletionClient::with_replies([turn_reply(
        "A short film is a great first project.",
        "What story would you tell next?",
    )]);
    let frames: Vec<TurnEvent> = TurnController::new(
        pool.clone(),
        Some(client as Arc<dyn CompletionClient>),
        QuestionSource::default(),
    )
    .run(
        Ok(user_id.clone()),
        TurnRequest {
            session_id: session_id.clone(),
            user_response: "I made a short film with friends.".to_string(),
            current_question: "What kind of videos do you like to make?".to_string(),
            interview_category: "creative".to_string(),
            interview_subcategory: "media-production".to_string(),
            difficulty_level: "beginner".to_string(),
            math_steps: None,
        },
    )
    .collect()
    .await;
    assert!(matches!(frames.last(), Some(TurnEvent::Done { .. })));
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    let rows = responses::list_for_session(&pool, &session_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].answer, "I made a short film with friends.");

    let client = ScriptedCompletionClient::with_replies([score_reply(74)]);
    let completer = SessionCompleter::new(pool.clone(), Some(client as Arc<dyn CompletionClient>));
    let response = completer
        .complete_session(
            &user_id,
            &CompleteSessionRequest {
                session_id: session_id.clone(),
                duration_seconds: Some(300),
                questions_answered: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.overall_score, 74);
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    let session = sessions::load_session(&pool, &session_id).await.unwrap().unwrap();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.overall_score, Some(74));
    assert_eq!(session.duration_seconds, Some(300));
    assert!(session.transcript.contains("Q1: What kind of videos do you like to make?"));
}
