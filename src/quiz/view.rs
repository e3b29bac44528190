use serde::Serialize;

use super::state::{should_show_next_chapter, should_show_unlock_celebration, QuizReaction};
use crate::content::{ChapterQuiz, Step};

pub const ANSWER_COUNT: usize = 4;
pub const UNLOCK_TITLE: &str = "Unlock the next chapter";
pub const UNLOCKED_MESSAGE: &str = "Well done, you unlocked the next chapter!";

/// Optional detour offered next to the regular next chapter.
pub fn bonus_chapter() -> Step {
    Step {
        title: String::from("Clients"),
        link: String::from("/tutorials/graphql/advanced/0-clients/"),
        description: None,
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AnswerOption<'a> {
    pub index: usize,
    pub text: &'a str,
    pub checked: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NextChapterLink {
    pub step: Step,
    pub is_bonus: bool,
    pub small: bool,
}

/// Render props for the quiz block at the end of a chapter.
#[derive(Debug, Serialize)]
pub struct QuizView<'a> {
    pub question: Option<&'a str>,

    /// empty unless the chapter has exactly four answers
    pub answers: Vec<AnswerOption<'a>>,
    pub show_skip: bool,
    pub show_next_chapter: bool,
    pub show_unlocked: bool,

    /// `Some(remember)` when the skip decision should be offered for remembering
    pub remember_decision: Option<bool>,
    pub next_chapters: Vec<NextChapterLink>,

    /// chapter number, shown with the unlock message
    pub n: usize,
}

pub struct QuizViewInput<'a> {
    pub quiz: Option<&'a ChapterQuiz>,
    pub reaction: &'a QuizReaction,
    pub remember_skipped: bool,
    pub n: usize,
    pub show_bonus: bool,
    pub next_chapter: Option<&'a Step>,
}

impl<'a> QuizView<'a> {
    pub fn new(input: QuizViewInput<'a>) -> Self {
        let QuizViewInput {
            quiz,
            reaction,
            remember_skipped,
            n,
            show_bonus,
            next_chapter,
        } = input;

        let question = quiz.map(|q| q.question.as_str());

        let answers: Vec<AnswerOption> = match quiz {
            Some(q) if q.answers.len() == ANSWER_COUNT => q
                .answers
                .iter()
                .enumerate()
                .map(|(index, text)| AnswerOption {
                    index,
                    text: text.as_str(),
                    checked: reaction.is_checked(index),
                })
                .collect(),
            _ => Vec::new(),
        };

        let show_next_chapter = should_show_next_chapter(reaction);
        let show_unlocked = show_next_chapter
            && !reaction.skipped
            && should_show_unlock_celebration(reaction, question.is_some());

        let mut next_chapters = Vec::new();
        if show_next_chapter {
            if show_bonus {
                next_chapters.push(NextChapterLink {
                    step: bonus_chapter(),
                    is_bonus: true,
                    small: true,
                });
            }
            if let Some(step) = next_chapter {
                next_chapters.push(NextChapterLink {
                    step: step.clone(),
                    is_bonus: false,
                    small: show_bonus,
                });
            }
        }

        Self {
            question,
            show_skip: !answers.is_empty(),
            answers,
            show_next_chapter,
            show_unlocked,
            remember_decision: (show_next_chapter && reaction.skipped).then_some(remember_skipped),
            next_chapters,
            n,
        }
    }
}
