//! Test Helper Utilities
//!
//! Shared fixtures for internlink-iv integration tests

#![allow(dead_code)]

pub mod scripted_client;

pub use scripted_client::ScriptedCompletionClient;

use anyhow::Result;
use internlink_common::api::{create_user, issue_token};
use internlink_common::db::init_memory_database;
use internlink_iv::db::responses::{insert_response, NewResponse};
use internlink_iv::db::sessions::{append_transcript, create_session};
use internlink_iv::utils::format_turn;
use sqlx::SqlitePool;

/// A database with one registered user
pub struct TestContext {
    pub pool: SqlitePool,
    pub user_id: String,
    pub token: String,
}

pub async fn setup() -> Result<TestContext> {
    let pool = init_memory_database().await?;
    let user_id = create_user(&pool, "intern@example.com").await?;
    let token = issue_token(&pool, &user_id).await?;
    Ok(TestContext {
        pool,
        user_id,
        token,
    })
}

impl TestContext {
    pub async fn new_session(&self, category: &str, subcategory: &str, difficulty: &str) -> Result<String> {
        Ok(create_session(&self.pool, &self.user_id, category, subcategory, difficulty).await?)
    }

    /// Second user with a token, for ownership tests
    pub async fn other_user(&self) -> Result<(String, String)> {
        let user_id = create_user(&self.pool, "someone-else@example.com").await?;
        let token = issue_token(&self.pool, &user_id).await?;
        Ok((user_id, token))
    }

    /// Record `count` answered turns as both rows and transcript entries
    pub async fn seed_turns(&self, session_id: &str, count: usize) -> Result<()> {
        for n in 1..=count {
            let question = format!("Seeded question number {}?", n);
            let answer = format!("Seeded answer {}", n);
            insert_response(
                &self.pool,
                &NewResponse {
                    session_id,
                    question: &question,
                    category: "technology",
                    answer: &answer,
                    math_submission: None,
                },
                true,
            )
            .await?;
            append_transcript(&self.pool, session_id, &format_turn(n, &question, &answer)).await?;
        }
        Ok(())
    }

    /// Record `count` turns in the transcript only
    pub async fn seed_transcript_only(&self, session_id: &str, count: usize) -> Result<()> {
        for n in 1..=count {
            let entry = format_turn(n, &format!("Transcript question {}?", n), &format!("Answer {}", n));
            append_transcript(&self.pool, session_id, &entry).await?;
        }
        Ok(())
    }

    pub async fn response_count(&self, session_id: &str) -> Result<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM interview_responses WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await?)
    }
}

/// A complete, valid scoring reply
pub fn score_reply(overall: i64) -> String {
    let domain = |score: i64| serde_json::json!({"score": score, "recommendation": "Explore this path."});
    serde_json::json!({
        "skill_score": 68,
        "experience_score": 55,
        "personality_score": 84,
        "overall_score": overall,
        "summary": "Clear communicator with growing technical skills.",
        "feedback": "Use specific examples from projects.",
        "tags": ["communicator", "curious"],
        "domain_fit": {
            "business_finance": domain(52),
            "technology_engineering": domain(81),
            "education_nonprofit": domain(63),
            "healthcare_sciences": domain(40),
            "creative_media": domain(58)
        }
    })
    .to_string()
}

/// A valid turn reply
pub fn turn_reply(acknowledgment: &str, next_question: &str) -> String {
    serde_json::json!({
        "acknowledgment": acknowledgment,
        "next_question": next_question,
    })
    .to_string()
}
