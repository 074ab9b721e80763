//! InMemoryApi - the content API served from memory, for tests and offline
//! development.
//!
//! Implements the same endpoint table as the real server, including page
//! slicing for posts and TSV bulk creation. Every request is logged, and
//! failures can be injected with [`InMemoryApi::fail_next`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;

use super::{reason_phrase, ApiRequest, Method, RequestBody, Transport, TransportError};
use crate::model::{DailyDevotion, DailyPost};
use crate::mutation::{TSV_FIELD, TSV_HEADER};

const DEFAULT_PAGE_SIZE: usize = 10;

struct ApiState {
    posts: Vec<DailyPost>,
    devotions: Vec<DailyDevotion>,
    next_post_id: u64,
    next_devotion_id: u64,
    page_size: usize,
    failures: VecDeque<(u16, String)>,
    log: Vec<String>,
}

/// In-memory content API. Clone-friendly via Arc; clones share state.
#[derive(Clone)]
pub struct InMemoryApi {
    state: Arc<Mutex<ApiState>>,
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Serve posts `page_size` per page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(ApiState {
                posts: Vec::new(),
                devotions: Vec::new(),
                next_post_id: 1,
                next_devotion_id: 1,
                page_size: page_size.max(1),
                failures: VecDeque::new(),
                log: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ApiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a post directly, bypassing the request log.
    pub fn seed_post(&self, opening_hook: &str, date_posted: &str) -> DailyPost {
        let mut state = self.lock();
        let post = DailyPost {
            id: state.next_post_id,
            opening_hook: opening_hook.to_string(),
            personal_question: String::new(),
            biblical_qa: String::new(),
            reflection: String::new(),
            story: String::new(),
            prayer: String::new(),
            activity_guide: String::new(),
            series_title: None,
            theme: None,
            date_posted: date_posted.to_string(),
        };
        state.next_post_id += 1;
        state.posts.push(post.clone());
        post
    }

    /// Insert a devotion directly, bypassing the request log.
    pub fn seed_devotion(&self, citation: &str, verse_content: &str, date_posted: &str) -> DailyDevotion {
        let mut state = self.lock();
        let devotion = DailyDevotion {
            id: state.next_devotion_id,
            citation: citation.to_string(),
            verse_content: verse_content.to_string(),
            date_posted: date_posted.to_string(),
        };
        state.next_devotion_id += 1;
        state.devotions.push(devotion.clone());
        devotion
    }

    /// Make the next request fail with `status` and `{"detail": detail}`.
    /// Queued failures are consumed in order.
    pub fn fail_next(&self, status: u16, detail: impl Into<String>) {
        self.lock().failures.push_back((status, detail.into()));
    }

    /// Every request received so far, as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.lock().log.clone()
    }

    pub fn posts(&self) -> Vec<DailyPost> {
        self.lock().posts.clone()
    }

    pub fn devotions(&self) -> Vec<DailyDevotion> {
        self.lock().devotions.clone()
    }

    fn handle(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        let mut state = self.lock();
        state.log.push(request.to_string());
        if let Some((status, detail)) = state.failures.pop_front() {
            return Err(error(status, &detail));
        }

        let (path, query) = request
            .path
            .split_once('?')
            .unwrap_or((request.path.as_str(), ""));
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["posts"]) => state.list_posts(page_param(query)),
            (Method::Get, ["posts", id]) => {
                let id = parse_id(id)?;
                let post = state.posts.iter().find(|p| p.id == id);
                post.map(to_json).unwrap_or_else(|| Err(error(404, "Post not found")))
            }
            (Method::Post, ["posts"]) => state.create_posts(&request.body),
            (Method::Delete, ["posts", id]) => {
                let id = parse_id(id)?;
                let before = state.posts.len();
                state.posts.retain(|p| p.id != id);
                if state.posts.len() == before {
                    return Err(error(404, "Post not found"));
                }
                Ok(Value::Null)
            }
            (Method::Get, ["devotions"]) => to_json(&state.devotions),
            (Method::Get, ["devotions", id]) => {
                let id = parse_id(id)?;
                let devotion = state.devotions.iter().find(|d| d.id == id);
                devotion
                    .map(to_json)
                    .unwrap_or_else(|| Err(error(404, "Devotion not found")))
            }
            (Method::Post, ["devotions"]) => state.create_devotion(&request.body),
            (Method::Delete, ["devotions", id]) => {
                let id = parse_id(id)?;
                let before = state.devotions.len();
                state.devotions.retain(|d| d.id != id);
                if state.devotions.len() == before {
                    return Err(error(404, "Devotion not found"));
                }
                Ok(Value::Null)
            }
            _ => Err(error(404, "Not Found")),
        }
    }
}

impl Transport for InMemoryApi {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.handle(&request)
    }
}

impl ApiState {
    fn list_posts(&self, page: u32) -> Result<Value, TransportError> {
        let total_pages = self.posts.len().div_ceil(self.page_size).max(1);
        let start = (page as usize - 1) * self.page_size;
        let posts: Vec<&DailyPost> = self.posts.iter().skip(start).take(self.page_size).collect();
        Ok(serde_json::json!({
            "posts": posts,
            "page": page,
            "total_pages": total_pages,
        }))
    }

    fn create_posts(&mut self, body: &RequestBody) -> Result<Value, TransportError> {
        let rows = match body {
            RequestBody::Form(_) => vec![[
                body.field("opening_hook").unwrap_or(""),
                body.field("personal_question").unwrap_or(""),
                body.field("biblical_qa").unwrap_or(""),
                body.field("reflection").unwrap_or(""),
                body.field("story").unwrap_or(""),
                body.field("prayer").unwrap_or(""),
                body.field("activity_guide").unwrap_or(""),
                body.field("date_posted").unwrap_or(""),
            ]
            .map(str::to_string)],
            RequestBody::File(part) if part.field == TSV_FIELD => parse_tsv(&part.bytes)?,
            _ => return Err(error(422, "Expected form fields or a tsv_file upload")),
        };

        let mut created = Vec::with_capacity(rows.len());
        for [opening_hook, personal_question, biblical_qa, reflection, story, prayer, activity_guide, date] in rows {
            let post = DailyPost {
                id: self.next_post_id,
                opening_hook,
                personal_question,
                biblical_qa,
                reflection,
                story,
                prayer,
                activity_guide,
                series_title: None,
                theme: None,
                date_posted: date_or_today(&date),
            };
            self.next_post_id += 1;
            self.posts.push(post.clone());
            created.push(post);
        }
        to_json(&created)
    }

    fn create_devotion(&mut self, body: &RequestBody) -> Result<Value, TransportError> {
        let citation = body.field("citation").unwrap_or("").trim();
        let verse_content = body.field("verse_content").unwrap_or("").trim();
        if citation.is_empty() || verse_content.is_empty() {
            return Err(error(422, "citation and verse_content are required"));
        }
        let devotion = DailyDevotion {
            id: self.next_devotion_id,
            citation: citation.to_string(),
            verse_content: verse_content.to_string(),
            date_posted: date_or_today(body.field("date_posted").unwrap_or("")),
        };
        self.next_devotion_id += 1;
        self.devotions.push(devotion.clone());
        to_json(&devotion)
    }
}

/// Server-side TSV parsing: header must match, every row needs 8 columns.
/// Nothing is created if any row is invalid.
fn parse_tsv(bytes: &[u8]) -> Result<Vec<[String; 8]>, TransportError> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));
    let header: Vec<&str> = lines
        .next()
        .unwrap_or("")
        .trim_start_matches('\u{feff}')
        .split('\t')
        .map(str::trim)
        .collect();
    if header != TSV_HEADER {
        return Err(error(400, "Invalid TSV header"));
    }

    let mut rows = Vec::new();
    for (n, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        let row: [String; 8] = cols
            .iter()
            .map(|c| c.trim().to_string())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| {
                error(
                    422,
                    &format!("Row {}: expected {} columns, found {}", n + 2, TSV_HEADER.len(), cols.len()),
                )
            })?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(error(422, "TSV file has no rows"));
    }
    Ok(rows)
}

fn error(status: u16, detail: &str) -> TransportError {
    TransportError::Status {
        status,
        reason: reason_phrase(status).to_string(),
        detail: detail.to_string(),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, TransportError> {
    serde_json::to_value(value).map_err(|e| TransportError::Decode { raw: e.to_string() })
}

fn parse_id(raw: &str) -> Result<u64, TransportError> {
    raw.parse()
        .map_err(|_| error(422, &format!("Invalid id: {}", raw)))
}

fn page_param(query: &str) -> u32 {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

fn date_or_today(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
    } else {
        raw.to_string()
    }
}
