use serde::{Deserialize, Serialize};

/// Metadata block at the top of a chapter file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterFrontmatter {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// youtube id of the chapter video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_author: Option<String>,

    // quiz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<usize>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub slug: String,
    pub title: String,
}
