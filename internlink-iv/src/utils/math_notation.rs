//! Structured math work → linear notation
//!
//! Learners can submit their work as an ordered list of steps whose content
//! is LaTeX-flavoured (`\frac{1}{2}`, `x^{2}`, ...). The completion API and
//! the transcript only see plain text, so steps are rendered one per line as
//! `Step N: <linear content> (reason: <explanation>)`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static STEP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Step \d+:").expect("step marker regex is valid"));

/// One step of a structured math submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathStep {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl MathStep {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            explanation: None,
        }
    }

    pub fn explained(content: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            explanation: Some(explanation.into()),
        }
    }
}

/// Render steps as numbered lines, one `Step N:` marker per step
pub fn to_linear_notation(steps: &[MathStep]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let content = linearize(&step.content);
            let explanation = step
                .explanation
                .as_deref()
                .map(collapse_whitespace)
                .filter(|e| !e.is_empty());
            match explanation {
                Some(why) => format!("Step {}: {} (reason: {})", i + 1, content, why),
                None => format!("Step {}: {}", i + 1, content),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of `Step N:` markers at line starts
pub fn count_step_markers(text: &str) -> usize {
    STEP_MARKER.find_iter(text).count()
}

/// Convert LaTeX-ish math to a single line of plain notation
///
/// Handles nested groups, so `\frac{\sqrt{x}}{2}` becomes `(sqrt(x))/(2)`.
/// Unknown commands are kept by name (`\sin` → `sin`).
pub fn linearize(latex: &str) -> String {
    let chars: Vec<char> = latex.chars().collect();
    let mut pos = 0;
    let raw = parse_sequence(&chars, &mut pos, false);
    collapse_whitespace(&raw)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_sequence(chars: &[char], pos: &mut usize, in_group: bool) -> String {
    let mut out = String::new();
    while *pos < chars.len() {
        let c = chars[*pos];
        match c {
            '}' if in_group => {
                *pos += 1;
                return out;
            }
            '{' => {
                *pos += 1;
                out.push_str(&parse_sequence(chars, pos, true));
            }
            '\\' => {
                *pos += 1;
                out.push_str(&parse_command(chars, pos));
            }
            '^' | '_' => {
                *pos += 1;
                let arg = parse_argument(chars, pos);
                out.push(c);
                if arg.chars().count() == 1 {
                    out.push_str(&arg);
                } else {
                    out.push('(');
                    out.push_str(&arg);
                    out.push(')');
                }
            }
            '$' => *pos += 1,
            _ => {
                out.push(c);
                *pos += 1;
            }
        }
    }
    out
}

/// A single argument: `{group}`, `\command`, or one character
fn parse_argument(chars: &[char], pos: &mut usize) -> String {
    while *pos < chars.len() && chars[*pos].is_whitespace() {
        *pos += 1;
    }
    match chars.get(*pos) {
        Some('{') => {
            *pos += 1;
            collapse_whitespace(&parse_sequence(chars, pos, true))
        }
        Some('\\') => {
            *pos += 1;
            parse_command(chars, pos).trim().to_string()
        }
        Some(c) => {
            *pos += 1;
            c.to_string()
        }
        None => String::new(),
    }
}

fn parse_command(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_alphabetic() {
        *pos += 1;
    }
    let name: String = chars[start..*pos].iter().collect();

    if name.is_empty() {
        // Escaped symbol: \{ \} \% \\ \, \;
        return match chars.get(*pos) {
            Some(c) => {
                *pos += 1;
                match c {
                    '\\' | ',' | ';' | ':' | '!' => " ".to_string(),
                    other => other.to_string(),
                }
            }
            None => String::new(),
        };
    }

    match name.as_str() {
        "frac" | "dfrac" | "tfrac" => {
            let numerator = parse_argument(chars, pos);
            let denominator = parse_argument(chars, pos);
            format!("({})/({})", numerator, denominator)
        }
        "sqrt" => {
            let index = if chars.get(*pos) == Some(&'[') {
                *pos += 1;
                let start = *pos;
                while *pos < chars.len() && chars[*pos] != ']' {
                    *pos += 1;
                }
                let inner: String = chars[start..*pos].iter().collect();
                *pos = (*pos + 1).min(chars.len());
                Some(linearize(&inner))
            } else {
                None
            };
            let radicand = parse_argument(chars, pos);
            match index {
                Some(n) => format!("root({}, {})", radicand, n),
                None => format!("sqrt({})", radicand),
            }
        }
        "cdot" | "times" | "ast" => " * ".to_string(),
        "div" => " / ".to_string(),
        "pm" => " +/- ".to_string(),
        "le" | "leq" => " <= ".to_string(),
        "ge" | "geq" => " >= ".to_string(),
        "ne" | "neq" => " != ".to_string(),
        "approx" => " ~ ".to_string(),
        "to" | "rightarrow" | "implies" | "Rightarrow" => " => ".to_string(),
        "left" | "right" => String::new(),
        "quad" | "qquad" => " ".to_string(),
        "text" | "mathrm" | "mathbf" | "operatorname" => parse_argument(chars, pos),
        "infty" => "infinity".to_string(),
        "degree" | "circ" => "deg".to_string(),
        other => other.to_string(),
    }
}
