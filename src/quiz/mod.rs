mod action;
pub mod progress;
mod state;
mod store;
mod view;

pub use action::QuizAction;
pub use progress::ProgressError;
pub use state::{
    reduce, replay, should_show_next_chapter, should_show_unlock_celebration, QuizReaction,
    QuizState,
};
pub use store::QuizProgressStore;
pub use view::{
    bonus_chapter, AnswerOption, NextChapterLink, QuizView, QuizViewInput, ANSWER_COUNT,
    UNLOCKED_MESSAGE, UNLOCK_TITLE,
};
