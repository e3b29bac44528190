use serde::Serialize;

use super::frontmatter::{ChapterFrontmatter, Heading};

pub const TUTORIALS_PREFIX: &str = "/tutorials";

#[derive(Debug, Clone)]
pub struct Chapter {
    /// `/<dir>/<file-stem>/`, unique within the site
    pub slug: String,

    pub frontmatter: ChapterFrontmatter,

    /// markdown after the frontmatter, `###` headings carry `{#id}` anchors
    pub body: String,

    /// page toc
    pub headings: Vec<Heading>,

    pub quiz: Option<ChapterQuiz>,
}

impl Chapter {
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn link(&self) -> String {
        format!("{}{}", TUTORIALS_PREFIX, self.slug)
    }

    pub fn step(&self) -> Step {
        Step {
            title: self.frontmatter.title.clone(),
            link: self.link(),
            description: self.frontmatter.description.clone(),
        }
    }
}

/// The question closing a chapter. The correct index is not checked against the answers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChapterQuiz {
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer_index: Option<usize>,
}

impl ChapterQuiz {
    pub fn from_frontmatter(fm: &ChapterFrontmatter) -> Option<Self> {
        fm.question.as_ref().map(|question| Self {
            question: question.clone(),
            answers: fm.answers.clone(),
            correct_answer_index: fm.correct_answer,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Step {
    pub title: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub fn extract_steps(chapters: &[Chapter]) -> Vec<Step> {
    chapters.iter().map(Chapter::step).collect()
}

/// Step following the one linked as `link`.
pub fn next_chapter<'a>(steps: &'a [Step], link: &str) -> Option<&'a Step> {
    let position = steps.iter().position(|s| s.link == link)?;
    steps.get(position + 1)
}

/// Chapters of one tutorial directory, in reading order.
#[derive(Debug)]
pub struct Tutorial {
    pub key: String,
    pub chapters: Vec<Chapter>,
}

impl Tutorial {
    pub fn steps(&self) -> Vec<Step> {
        extract_steps(&self.chapters)
    }

    pub fn chapter(&self, slug: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.slug == slug)
    }

    pub fn next_chapter(&self, slug: &str) -> Option<&Chapter> {
        let position = self.chapters.iter().position(|c| c.slug == slug)?;
        self.chapters.get(position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(link: &str) -> Step {
        Step {
            title: link.trim_matches('/').to_string(),
            link: link.to_string(),
            description: None,
        }
    }

    #[test]
    fn next_chapter_follows_order() {
        let steps = vec![step("/tutorials/a/"), step("/tutorials/b/"), step("/tutorials/c/")];

        assert_eq!(next_chapter(&steps, "/tutorials/a/"), Some(&steps[1]));
        assert_eq!(next_chapter(&steps, "/tutorials/c/"), None);
        assert_eq!(next_chapter(&steps, "/tutorials/missing/"), None);
    }

    #[test]
    fn quiz_needs_a_question() {
        let mut fm = ChapterFrontmatter {
            title: String::from("Introduction"),
            description: None,
            video_id: None,
            video_author: None,
            question: None,
            answers: vec![String::from("a")],
            correct_answer: Some(0),
        };
        assert_eq!(ChapterQuiz::from_frontmatter(&fm), None);

        fm.question = Some(String::from("Why?"));
        let quiz = ChapterQuiz::from_frontmatter(&fm).unwrap();
        assert_eq!(quiz.correct_answer_index, Some(0));
    }
}
