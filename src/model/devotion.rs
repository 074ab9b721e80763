use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode, push_optional, Draft, Listing, Resource};
use crate::error::ValidationError;
use crate::filter::Searchable;
use crate::transport::{RequestBody, TransportError};

/// A Daily Devotion: one scripture passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDevotion {
    pub id: u64,
    pub citation: String,
    pub verse_content: String,
    pub date_posted: String,
}

impl Searchable for DailyDevotion {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.citation.as_str(), self.verse_content.as_str()]
    }
}

impl Resource for DailyDevotion {
    const COLLECTION: &'static str = "devotions";
    const NOUN: &'static str = "Devotion";

    type Draft = DevotionDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.citation
    }

    fn list_path(_page: u32) -> String {
        "/devotions".to_string()
    }

    fn decode_list(body: Value) -> Result<Listing<Self>, TransportError> {
        Ok(Listing {
            items: decode(body)?,
            cursor: None,
        })
    }

    fn decode_created(body: Value) -> Result<Vec<Self>, TransportError> {
        Ok(vec![decode(body)?])
    }
}

/// Create form for devotions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DevotionDraft {
    pub citation: String,
    pub verse_content: String,
    /// `YYYY-MM-DD`; blank lets the server default to today.
    pub date_posted: String,
}

impl Draft for DevotionDraft {
    type Resource = DailyDevotion;

    fn validate(&self) -> Result<(), ValidationError> {
        if self.citation.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "citation",
                message: "Citation is required.",
            });
        }
        if self.verse_content.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "verse_content",
                message: "Verse content is required.",
            });
        }
        Ok(())
    }

    fn to_body(&self) -> RequestBody {
        let mut fields = vec![
            ("citation".to_string(), self.citation.clone()),
            ("verse_content".to_string(), self.verse_content.clone()),
        ];
        push_optional(&mut fields, "date_posted", &self.date_posted);
        RequestBody::Form(fields)
    }

    fn success_message(&self) -> &'static str {
        "Devotion created."
    }
}
