//! Intern profile reads and score write-back

use internlink_common::db::InternProfile;
use internlink_common::{time, Result};
use sqlx::SqlitePool;

use crate::models::ScoreResult;

/// Load the profile fields used for scoring
pub async fn load_profile(pool: &SqlitePool, user_id: &str) -> Result<Option<InternProfile>> {
    let profile = sqlx::query_as::<_, InternProfile>(
        r#"
        SELECT user_id, full_name, email, phone, school, grade_level, city, skills,
               experience, bio, portfolio_url, linkedin_url, achievements, languages
        FROM interns
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Write scores and career-domain fit onto the intern row
///
/// Returns the number of rows updated; zero means the user has no profile.
pub async fn store_scores(pool: &SqlitePool, user_id: &str, scores: &ScoreResult) -> Result<u64> {
    let tags = serde_json::to_string(&scores.tags)
        .map_err(|e| internlink_common::Error::Internal(format!("Failed to serialize tags: {}", e)))?;
    let fit = &scores.domain_fit;

    let result = sqlx::query(
        r#"
        UPDATE interns SET
            skill_score = ?,
            experience_score = ?,
            personality_score = ?,
            overall_score = ?,
            ai_summary = ?,
            ai_feedback = ?,
            ai_tags = ?,
            business_finance_score = ?,
            business_finance_recommendation = ?,
            technology_engineering_score = ?,
            technology_engineering_recommendation = ?,
            education_nonprofit_score = ?,
            education_nonprofit_recommendation = ?,
            healthcare_sciences_score = ?,
            healthcare_sciences_recommendation = ?,
            creative_media_score = ?,
            creative_media_recommendation = ?,
            scored_at = ?
        WHERE user_id = ?
        "#,
    )
    .bind(scores.skill_score)
    .bind(scores.experience_score)
    .bind(scores.personality_score)
    .bind(scores.overall_score)
    .bind(&scores.summary)
    .bind(&scores.feedback)
    .bind(tags)
    .bind(fit.business_finance.score)
    .bind(&fit.business_finance.recommendation)
    .bind(fit.technology_engineering.score)
    .bind(&fit.technology_engineering.recommendation)
    .bind(fit.education_nonprofit.score)
    .bind(&fit.education_nonprofit.recommendation)
    .bind(fit.healthcare_sciences.score)
    .bind(&fit.healthcare_sciences.recommendation)
    .bind(fit.creative_media.score)
    .bind(&fit.creative_media.recommendation)
    .bind(time::now_storage())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Insert or replace the editable profile fields (used by tools and tests)
pub async fn upsert_profile(pool: &SqlitePool, profile: &InternProfile) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO interns (
            user_id, full_name, email, phone, school, grade_level, city, skills,
            experience, bio, portfolio_url, linkedin_url, achievements, languages
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            full_name = excluded.full_name,
            email = excluded.email,
            phone = excluded.phone,
            school = excluded.school,
            grade_level = excluded.grade_level,
            city = excluded.city,
            skills = excluded.skills,
            experience = excluded.experience,
            bio = excluded.bio,
            portfolio_url = excluded.portfolio_url,
            linkedin_url = excluded.linkedin_url,
            achievements = excluded.achievements,
            languages = excluded.languages
        "#,
    )
    .bind(&profile.user_id)
    .bind(&profile.full_name)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.school)
    .bind(&profile.grade_level)
    .bind(&profile.city)
    .bind(&profile.skills)
    .bind(&profile.experience)
    .bind(&profile.bio)
    .bind(&profile.portfolio_url)
    .bind(&profile.linkedin_url)
    .bind(&profile.achievements)
    .bind(&profile.languages)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DomainFit, DomainScore};
    use internlink_common::api::create_user;
    use internlink_common::db::init_memory_database;

    fn domain(score: i64) -> DomainScore {
        DomainScore {
            score,
            recommendation: format!("fit {}", score),
        }
    }

    fn scores() -> ScoreResult {
        ScoreResult {
            skill_score: 71,
            experience_score: 60,
            personality_score: 88,
            overall_score: 74,
            summary: "Curious and organized.".to_string(),
            feedback: "Give more concrete examples.".to_string(),
            tags: vec!["curious".to_string(), "organized".to_string()],
            domain_fit: DomainFit {
                business_finance: domain(50),
                technology_engineering: domain(80),
                education_nonprofit: domain(65),
                healthcare_sciences: domain(40),
                creative_media: domain(55),
            },
        }
    }

    #[tokio::test]
    async fn test_store_scores_requires_profile_row() {
        let pool = init_memory_database().await.unwrap();
        let user_id = create_user(&pool, "a@example.com").await.unwrap();

        assert_eq!(store_scores(&pool, &user_id, &scores()).await.unwrap(), 0);

        upsert_profile(
            &pool,
            &InternProfile {
                user_id: user_id.clone(),
                full_name: Some("Ada".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(store_scores(&pool, &user_id, &scores()).await.unwrap(), 1);

        let (overall, tech, tags): (i64, i64, String) = sqlx::query_as(
            "SELECT overall_score, technology_engineering_score, ai_tags FROM interns WHERE user_id = ?",
        )
        .bind(&user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(overall, 74);
        assert_eq!(tech, 80);
        assert_eq!(tags, r#"["curious","organized"]"#);
    }

    #[tokio::test]
    async fn test_load_profile() {
        let pool = init_memory_database().await.unwrap();
        let user_id = create_user(&pool, "b@example.com").await.unwrap();
        assert!(load_profile(&pool, &user_id).await.unwrap().is_none());

        upsert_profile(
            &pool,
            &InternProfile {
                user_id: user_id.clone(),
                school: Some("Central High".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let profile = load_profile(&pool, &user_id).await.unwrap().unwrap();
        assert_eq!(profile.school.as_deref(), Some("Central High"));
        assert!(profile.bio.is_none());
    }
}
