//! Interview report page
//!
//! Renders a completed (or in-progress) session as a self-contained HTML
//! document. All session text is model- or user-supplied, so every
//! interpolated value goes through [`escape_html`].

use internlink_common::db::{InterviewResponse, InterviewSession};

use crate::utils::parse_turns;

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the report for one session
///
/// Q/A pairs come from `responses`; when there are none, the transcript is
/// parsed instead.
pub fn render_report(session: &InterviewSession, responses: &[InterviewResponse]) -> String {
    let turns: Vec<(String, String)> = if responses.is_empty() {
        parse_turns(&session.transcript)
            .into_iter()
            .map(|t| (t.question, t.answer))
            .collect()
    } else {
        responses
            .iter()
            .map(|r| (r.question.clone(), r.answer.clone()))
            .collect()
    };

    let notice = if session.needs_feedback {
        r#"<div class="notice">Detailed feedback for this interview is not available yet. The score shown is provisional; regenerate the report to get full feedback.</div>"#
    } else {
        ""
    };

    let status = if session.is_completed() {
        "Completed"
    } else {
        "In progress"
    };

    let tags: String = session
        .tag_list()
        .iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
        .collect();

    let transcript: String = turns
        .iter()
        .enumerate()
        .map(|(i, (q, a))| {
            format!(
                r#"<div class="turn"><div class="question">Q{n}. {q}</div><pre class="answer">{a}</pre></div>"#,
                n = i + 1,
                q = escape_html(q),
                a = escape_html(a)
            )
        })
        .collect();

    let subtitle = if session.subcategory.trim().is_empty() {
        escape_html(&session.category)
    } else {
        format!(
            "{} / {}",
            escape_html(&session.category),
            escape_html(&session.subcategory)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Interview Report</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            max-width: 860px;
            margin: 0 auto;
            padding: 24px;
            color: #222;
        }}
        h1 {{ color: #2b5fd9; margin-bottom: 4px; }}
        .subtitle {{ color: #666; margin-bottom: 24px; }}
        .scores {{ display: flex; gap: 16px; margin-bottom: 24px; }}
        .score {{
            flex: 1;
            border: 1px solid #ddd;
            border-radius: 8px;
            padding: 12px;
            text-align: center;
        }}
        .score .value {{ font-size: 28px; font-weight: 600; }}
        .score.overall .value {{ color: #2b5fd9; }}
        .notice {{
            background: #fff4d6;
            border: 1px solid #f0c36d;
            border-radius: 6px;
            padding: 12px;
            margin-bottom: 24px;
        }}
        .tag {{
            display: inline-block;
            background: #eef2fb;
            border-radius: 10px;
            padding: 2px 10px;
            margin: 0 6px 6px 0;
            font-size: 13px;
        }}
        .turn {{ border-top: 1px solid #eee; padding: 12px 0; }}
        .question {{ font-weight: 600; }}
        .answer {{ white-space: pre-wrap; font-family: inherit; margin: 6px 0 0 0; }}
        footer {{ color: #999; font-size: 12px; margin-top: 32px; }}
    </style>
</head>
<body>
    <h1>Interview Report</h1>
    <div class="subtitle">{subtitle} &middot; {difficulty} &middot; {status}</div>
    {notice}
    <div class="scores">
        <div class="score overall"><div class="label">Overall</div><div class="value">{overall}</div></div>
        <div class="score"><div class="label">Skills</div><div class="value">{skill}</div></div>
        <div class="score"><div class="label">Experience</div><div class="value">{experience}</div></div>
        <div class="score"><div class="label">Personality</div><div class="value">{personality}</div></div>
    </div>
    <h2>Summary</h2>
    <p>{summary}</p>
    <h2>Feedback</h2>
    <p>{feedback}</p>
    <div class="tags">{tags}</div>
    <h2>Questions and Answers</h2>
    {transcript}
    <footer>Session {session_id} &middot; {questions} questions &middot; {duration} &middot; internlink-iv {version}</footer>
</body>
</html>
"#,
        subtitle = subtitle,
        difficulty = escape_html(&session.difficulty),
        status = status,
        notice = notice,
        overall = score_text(session.overall_score),
        skill = score_text(session.skill_score),
        experience = score_text(session.experience_score),
        personality = score_text(session.personality_score),
        summary = escape_html(session.summary.as_deref().unwrap_or("Not available yet.")),
        feedback = escape_html(session.feedback.as_deref().unwrap_or("Not available yet.")),
        tags = tags,
        transcript = transcript,
        session_id = escape_html(&session.id),
        questions = turns.len(),
        duration = duration_text(session.duration_seconds),
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn score_text(score: Option<i64>) -> String {
    score.map_or_else(|| "&ndash;".to_string(), |s| s.to_string())
}

fn duration_text(seconds: Option<i64>) -> String {
    match seconds {
        Some(s) if s >= 60 => format!("{} min {} s", s / 60, s % 60),
        Some(s) => format!("{} s", s),
        None => "duration unknown".to_string(),
    }
}
