use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode, push_optional, Cursor, Draft, Listing, Resource};
use crate::error::ValidationError;
use crate::filter::Searchable;
use crate::mutation::TsvFile;
use crate::transport::{RequestBody, TransportError};

/// A Daily Post lesson.
///
/// `series_title` and `theme` are only returned by some server versions and
/// decode to `None` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPost {
    pub id: u64,
    pub opening_hook: String,
    pub personal_question: String,
    pub biblical_qa: String,
    pub reflection: String,
    pub story: String,
    pub prayer: String,
    pub activity_guide: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub date_posted: String,
}

#[derive(Deserialize)]
struct PostPage {
    posts: Vec<DailyPost>,
    page: u32,
    total_pages: u32,
}

impl Searchable for DailyPost {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.opening_hook.as_str(),
            self.personal_question.as_str(),
            self.biblical_qa.as_str(),
            self.reflection.as_str(),
        ]
    }
}

impl Resource for DailyPost {
    const COLLECTION: &'static str = "posts";
    const NOUN: &'static str = "Post";

    type Draft = PostDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.opening_hook
    }

    fn list_path(page: u32) -> String {
        format!("/posts?page={}", page)
    }

    fn decode_list(body: Value) -> Result<Listing<Self>, TransportError> {
        let page: PostPage = decode(body)?;
        Ok(Listing {
            items: page.posts,
            cursor: Some(Cursor {
                page: page.page,
                total_pages: page.total_pages,
            }),
        })
    }

    fn decode_created(body: Value) -> Result<Vec<Self>, TransportError> {
        decode(body)
    }
}

/// Which tab of the create-post dialog is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostMode {
    #[default]
    Single,
    Tsv,
}

/// Fields of the single-post form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostFields {
    pub opening_hook: String,
    pub personal_question: String,
    pub biblical_qa: String,
    pub reflection: String,
    pub story: String,
    pub prayer: String,
    pub activity_guide: String,
    /// `YYYY-MM-DD`; blank lets the server default to today.
    pub date_posted: String,
}

/// Create form for posts: either one record or a TSV file of many.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub mode: PostMode,
    pub fields: PostFields,
    pub tsv: Option<TsvFile>,
}

impl PostDraft {
    pub fn single(fields: PostFields) -> Self {
        Self {
            mode: PostMode::Single,
            fields,
            tsv: None,
        }
    }

    pub fn bulk(file: TsvFile) -> Self {
        Self {
            mode: PostMode::Tsv,
            fields: PostFields::default(),
            tsv: Some(file),
        }
    }
}

impl Draft for PostDraft {
    type Resource = DailyPost;

    fn validate(&self) -> Result<(), ValidationError> {
        match self.mode {
            PostMode::Single => Ok(()),
            PostMode::Tsv => match &self.tsv {
                Some(file) => file.check_header(),
                None => Err(ValidationError::MissingFile),
            },
        }
    }

    fn to_body(&self) -> RequestBody {
        match (self.mode, &self.tsv) {
            (PostMode::Tsv, Some(file)) => RequestBody::File(file.to_part()),
            _ => {
                let f = &self.fields;
                let mut fields = vec![
                    ("opening_hook".to_string(), f.opening_hook.clone()),
                    ("personal_question".to_string(), f.personal_question.clone()),
                    ("biblical_qa".to_string(), f.biblical_qa.clone()),
                    ("reflection".to_string(), f.reflection.clone()),
                    ("story".to_string(), f.story.clone()),
                    ("prayer".to_string(), f.prayer.clone()),
                    ("activity_guide".to_string(), f.activity_guide.clone()),
                ];
                push_optional(&mut fields, "date_posted", &f.date_posted);
                RequestBody::Form(fields)
            }
        }
    }

    fn success_message(&self) -> &'static str {
        match self.mode {
            PostMode::Single => "Post created.",
            PostMode::Tsv => "Bulk posts uploaded.",
        }
    }
}
