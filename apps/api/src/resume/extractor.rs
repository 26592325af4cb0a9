//! Heuristic resume extractor.
//!
//! Recovers a structured draft (name, email, links, experience, education) from
//! plain text pulled out of an uploaded resume. There is no grammar here, only
//! line-based pattern heuristics: every input produces a result, and fields the
//! heuristics cannot determine come back empty or as placeholder literals for a
//! human to fix.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::resume::models::{ExtractionResult, ResumeEducation, ResumeExperience};

/// Company used when a pipe line has no segment after the pipe.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
/// Company of the single fallback entry produced when no pipe lines are found.
pub const FALLBACK_COMPANY: &str = "Parsed Experience (Review Required)";
pub const UNKNOWN_ROLE: &str = "Unknown Role";
pub const UNKNOWN_SCHOOL: &str = "Unknown School";
pub const UNKNOWN_DEGREE: &str = "Degree";

pub const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work history", "employment"];
pub const EDUCATION_KEYWORDS: &[&str] = &["education", "academic"];

/// Lines that end a section when they appear alone (optionally with a trailing colon).
const SECTION_STOP_HEADERS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "languages",
];

const NAME_MAX_CHARS: usize = 50;
/// A section header line must be strictly shorter than this.
const SECTION_HEADER_MAX_CHARS: usize = 30;

const BULLET_MARKERS: &[char] = &['•', '-', '*'];
/// Hyphen, en dash, em dash.
const DATE_SEPARATORS: &[char] = &['-', '\u{2013}', '\u{2014}'];

static RE_EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").ok());
static RE_LINKEDIN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"linkedin\.com/in/([a-zA-Z0-9_-]+)").ok());
static RE_GITHUB: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"github\.com/([a-zA-Z0-9_-]+)").ok());
static RE_WEBSITE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"https?://\S+").ok());
static RE_DATE_HINT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9]{4}|present|current").ok());

/// Extracts a best-effort resume draft from raw document text. Never fails.
pub fn extract_resume_data(text: &str) -> ExtractionResult {
    let lines: Vec<&str> = text
        .split('\n')
        .map(trim_line)
        .filter(|line| !line.is_empty())
        .collect();

    let name: String = lines
        .first()
        .map(|line| line.chars().take(NAME_MAX_CHARS).collect())
        .unwrap_or_default();

    let email = first_match(&RE_EMAIL, text)
        .map(|c| c[0].to_string())
        .unwrap_or_default();
    let linkedin = first_match(&RE_LINKEDIN, text)
        .map(|c| format!("https://linkedin.com/in/{}", &c[1]))
        .unwrap_or_default();
    let github = first_match(&RE_GITHUB, text)
        .map(|c| format!("https://github.com/{}", &c[1]))
        .unwrap_or_default();
    let website = first_match(&RE_WEBSITE, text)
        .map(|c| c[0].to_string())
        .unwrap_or_default();

    let experience = parse_experience(&extract_section(&lines, EXPERIENCE_KEYWORDS));
    let education = parse_education(&extract_section(&lines, EDUCATION_KEYWORDS));

    ExtractionResult {
        name,
        email,
        linkedin,
        github,
        website,
        raw_text: text.to_string(),
        experience,
        education,
    }
}

/// Isolates the lines of a section.
///
/// The section starts after the first short line containing any of `keywords`
/// (case-insensitive) and runs until a line that is exactly a known section
/// header. Returns an empty list when no start line exists.
pub fn extract_section<'a>(lines: &[&'a str], keywords: &[&str]) -> Vec<&'a str> {
    let start = lines.iter().position(|line| {
        let lower = line.to_lowercase();
        keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
            && line.chars().count() < SECTION_HEADER_MAX_CHARS
    });

    let Some(start) = start else {
        return Vec::new();
    };

    lines[start + 1..]
        .iter()
        .take_while(|line| !is_stop_header(line))
        .copied()
        .collect()
}

/// Parses isolated experience lines into entries, treating each `Role | Company`
/// line as the start of a job.
pub fn parse_experience(lines: &[&str]) -> Vec<ResumeExperience> {
    let mut entries = Vec::new();
    let mut current: Option<ResumeExperience> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = trim_line(lines[i]);

        if line.contains('|') {
            if let Some(done) = current.take() {
                entries.push(done);
            }

            let mut entry = open_entry(line, entries.len());

            // A date line directly under the header is consumed, not kept as a bullet.
            if let Some(next) = lines.get(i + 1).map(|l| trim_line(l)) {
                if looks_like_date_range(next) {
                    let (start, end) = split_date_range(next);
                    entry.start_date = start.to_string();
                    entry.end_date = end.to_string();
                    i += 1;
                }
            }

            current = Some(entry);
        } else if let Some(entry) = current.as_mut() {
            let bullet = strip_bullet(line);
            if !bullet.is_empty() {
                entry.description.push(bullet.to_string());
            }
        }

        i += 1;
    }

    match current {
        Some(entry) => entries.push(entry),
        None if !lines.is_empty() => entries.push(ResumeExperience {
            id: "exp-0".to_string(),
            company: FALLBACK_COMPANY.to_string(),
            position: UNKNOWN_ROLE.to_string(),
            description: lines.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }),
        None => {}
    }

    entries
}

/// Produces at most one education entry: school from the first line, degree from
/// the second.
pub fn parse_education(lines: &[&str]) -> Vec<ResumeEducation> {
    if lines.is_empty() {
        return Vec::new();
    }

    vec![ResumeEducation {
        id: "edu-0".to_string(),
        school: lines.first().unwrap_or(&UNKNOWN_SCHOOL).to_string(),
        degree: lines.get(1).unwrap_or(&UNKNOWN_DEGREE).to_string(),
        ..Default::default()
    }]
}

/// Whitespace plus the byte-order mark, which PDF text layers sometimes carry.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

fn trim_line(line: &str) -> &str {
    line.trim_matches(is_blank)
}

fn first_match<'t>(re: &Option<Regex>, text: &'t str) -> Option<Captures<'t>> {
    re.as_ref()?.captures(text)
}

fn is_stop_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    let bare = lower.strip_suffix(':').unwrap_or(&lower);
    SECTION_STOP_HEADERS.iter().any(|header| *header == bare)
}

fn open_entry(line: &str, index: usize) -> ResumeExperience {
    let parts: Vec<&str> = line.split('|').map(trim_line).collect();
    let position = parts.first().copied().unwrap_or_default();
    let company = if parts.len() > 1 {
        parts[1..].join(" | ")
    } else {
        UNKNOWN_COMPANY.to_string()
    };

    ResumeExperience {
        id: format!("exp-{index}"),
        company,
        position: position.to_string(),
        ..Default::default()
    }
}

fn looks_like_date_range(line: &str) -> bool {
    first_match(&RE_DATE_HINT, line).is_some()
}

/// Splits `start - end` on the first dash. Parts beyond the second are dropped;
/// a line without a dash is all start date.
fn split_date_range(line: &str) -> (&str, &str) {
    let mut parts = line.split(DATE_SEPARATORS);
    match (parts.next(), parts.next()) {
        (Some(start), Some(end)) => (trim_line(start), trim_line(end)),
        _ => (line, ""),
    }
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix(BULLET_MARKERS)
        .map(|rest| rest.trim_start_matches(is_blank))
        .unwrap_or(line)
}
