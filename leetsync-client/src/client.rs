//! Cookie-session HTTP client for the judge's REST API.
//!
//! Authentication is a pair of cookies (`LEETCODE_SESSION`, `csrftoken`)
//! lifted from a logged-in browser session; this tool never drives a login
//! flow itself. Submissions are fetched page by page from
//! `/api/submissions/` and filtered down to accepted records with code and
//! an identifying slug before they ever reach the sync engine.

use std::path::PathBuf;

use serde::Deserialize;

use leetsync_core::config::Config;
use leetsync_core::filename;
use leetsync_core::types::{Language, ProblemId, Submission};
use leetsync_sync::{BoxError, SubmissionSource};

use crate::error::ClientError;
use crate::problems::{self, ProblemMap};

const BASE_URL: &str = "https://leetcode.com";
const PAGE_SIZE: u32 = 20;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SubmissionsPage {
    #[serde(default)]
    submissions_dump: Vec<RawSubmission>,
    #[serde(default)]
    has_next: bool,
}

#[derive(Debug, Deserialize)]
struct RawSubmission {
    #[serde(default)]
    title: String,
    #[serde(default)]
    title_slug: String,
    #[serde(default)]
    status_display: String,
    #[serde(default)]
    lang: String,
    #[serde(default)]
    code: String,
}

// ---------------------------------------------------------------------------
// Language normalization
// ---------------------------------------------------------------------------

/// Map the judge's language display tag to a folder-friendly normalized tag.
///
/// Total: unknown tags are slugified rather than rejected.
pub fn normalize_language(lang: &str) -> Language {
    let lower = lang.to_ascii_lowercase();
    let tag = match lower.as_str() {
        "cpp" | "c++" => "cpp",
        "python" | "python3" => "python",
        "java" => "java",
        "c" => "c",
        "go" | "golang" => "go",
        "rust" => "rust",
        other => return Language::from(filename::slugify(other)),
    };
    Language::from(tag)
}

// ---------------------------------------------------------------------------
// Upstream filtering
// ---------------------------------------------------------------------------

/// Reduce one raw API page to the records the sync core may see: accepted
/// only, code and identifying slug present, language normalized, slug
/// resolved to a question id (or the `"0"` sentinel when unmapped).
fn accepted_submissions(page: &SubmissionsPage, id_map: &ProblemMap) -> Vec<Submission> {
    page.submissions_dump
        .iter()
        .filter(|raw| raw.status_display == "Accepted")
        .filter(|raw| !raw.code.is_empty() && !raw.title_slug.is_empty())
        .map(|raw| {
            let problem_id = id_map
                .get(&raw.title_slug)
                .map(|id| ProblemId::from(id.as_str()))
                .unwrap_or_else(ProblemId::unknown);
            Submission {
                problem_id,
                title: raw.title.clone(),
                language: normalize_language(&raw.lang),
                code: raw.code.clone(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Judge-side collaborator: fetches accepted submissions over HTTP.
pub struct LeetCodeClient {
    agent: ureq::Agent,
    base_url: String,
    cookie_header: String,
    csrf_token: String,
    home: PathBuf,
    refresh_problems: bool,
}

impl LeetCodeClient {
    pub fn new(config: &Config, home: PathBuf, refresh_problems: bool) -> Self {
        let cookie_header = format!(
            "LEETCODE_SESSION={}; csrftoken={}",
            config.leetcode_session, config.csrf_token
        );
        Self {
            agent: ureq::Agent::new(),
            base_url: BASE_URL.to_owned(),
            cookie_header,
            csrf_token: config.csrf_token.clone(),
            home,
            refresh_problems,
        }
    }

    fn get(&self, path: &str) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .agent
            .get(&url)
            .set("Cookie", &self.cookie_header)
            .set("x-csrftoken", &self.csrf_token)
            .set("Referer", &self.base_url)
            .call()?;
        Ok(response.into_string().map_err(|e| ClientError::Io {
            path: PathBuf::from(url),
            source: e,
        })?)
    }

    /// Resolve the slug → question-id map, from cache unless a refresh was
    /// requested or no cache exists yet.
    fn problem_map(&self) -> Result<ProblemMap, ClientError> {
        if !self.refresh_problems {
            if let Some(cached) = problems::load_cache_at(&self.home)? {
                log::debug!("using cached problem metadata ({} entries)", cached.len());
                return Ok(cached);
            }
        }

        log::info!("fetching problem metadata from the judge");
        let body = self.get("/api/problems/algorithms/")?;
        let map = problems::parse_listing(&body)?;
        problems::save_cache_at(&self.home, &map)?;
        Ok(map)
    }

    /// Fetch every accepted submission, oldest pages last (the API returns
    /// newest first). Filters out non-accepted records and anything missing
    /// code or an identifying slug; those never reach the sync core.
    fn fetch_all(&self) -> Result<Vec<Submission>, ClientError> {
        let id_map = self.problem_map()?;

        let mut submissions = Vec::new();
        let mut offset = 0u32;
        loop {
            let body = self.get(&format!(
                "/api/submissions/?offset={offset}&limit={PAGE_SIZE}"
            ))?;
            let page: SubmissionsPage = serde_json::from_str(&body)?;
            if page.submissions_dump.is_empty() {
                break;
            }

            submissions.extend(accepted_submissions(&page, &id_map));

            if !page.has_next {
                break;
            }
            offset += PAGE_SIZE;
        }

        log::info!("collected {} accepted submissions", submissions.len());
        Ok(submissions)
    }
}

impl SubmissionSource for LeetCodeClient {
    fn fetch_accepted_submissions(&mut self) -> Result<Vec<Submission>, BoxError> {
        Ok(self.fetch_all()?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_judge_language_tags() {
        assert_eq!(normalize_language("python3"), Language::from("python"));
        assert_eq!(normalize_language("golang"), Language::from("go"));
        assert_eq!(normalize_language("C++"), Language::from("cpp"));
        assert_eq!(normalize_language("rust"), Language::from("rust"));
    }

    #[test]
    fn unknown_language_tags_are_slugified() {
        assert_eq!(
            normalize_language("MS SQL Server"),
            Language::from("ms_sql_server")
        );
        assert_eq!(normalize_language("kotlin"), Language::from("kotlin"));
    }

    #[test]
    fn parses_submissions_page() {
        let body = r#"{
            "submissions_dump": [
                {"title": "Two Sum", "title_slug": "two-sum",
                 "status_display": "Accepted", "lang": "python3",
                 "code": "class Solution: pass"},
                {"title": "Two Sum", "title_slug": "two-sum",
                 "status_display": "Wrong Answer", "lang": "python3",
                 "code": "class Solution: pass"}
            ],
            "has_next": false
        }"#;
        let page: SubmissionsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.submissions_dump.len(), 2);
        assert!(!page.has_next);
        assert_eq!(page.submissions_dump[0].status_display, "Accepted");
    }

    #[test]
    fn empty_page_parses_with_defaults() {
        let page: SubmissionsPage = serde_json::from_str("{}").unwrap();
        assert!(page.submissions_dump.is_empty());
        assert!(!page.has_next);
    }

    fn raw(title: &str, slug: &str, status: &str, lang: &str, code: &str) -> RawSubmission {
        RawSubmission {
            title: title.to_owned(),
            title_slug: slug.to_owned(),
            status_display: status.to_owned(),
            lang: lang.to_owned(),
            code: code.to_owned(),
        }
    }

    fn id_map() -> ProblemMap {
        ProblemMap::from([("two-sum".to_owned(), "1".to_owned())])
    }

    #[test]
    fn non_accepted_records_never_reach_the_core() {
        let page = SubmissionsPage {
            submissions_dump: vec![
                raw("Two Sum", "two-sum", "Wrong Answer", "python3", "pass"),
                raw("Two Sum", "two-sum", "Time Limit Exceeded", "python3", "pass"),
                raw("Two Sum", "two-sum", "Accepted", "python3", "pass"),
            ],
            has_next: false,
        };
        let subs = accepted_submissions(&page, &id_map());
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].problem_id, ProblemId::from("1"));
        assert_eq!(subs[0].language, Language::from("python"));
    }

    #[test]
    fn records_missing_code_or_slug_are_dropped() {
        let page = SubmissionsPage {
            submissions_dump: vec![
                raw("Two Sum", "two-sum", "Accepted", "python3", ""),
                raw("Two Sum", "", "Accepted", "python3", "pass"),
            ],
            has_next: false,
        };
        assert!(accepted_submissions(&page, &id_map()).is_empty());
    }

    #[test]
    fn unmapped_slug_falls_back_to_unknown_sentinel() {
        let page = SubmissionsPage {
            submissions_dump: vec![raw(
                "Mystery Problem",
                "mystery-problem",
                "Accepted",
                "cpp",
                "// code",
            )],
            has_next: false,
        };
        let subs = accepted_submissions(&page, &id_map());
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].problem_id, ProblemId::unknown());
        assert_eq!(subs[0].title, "Mystery Problem");
    }
}
