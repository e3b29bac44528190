use super::{
    action::QuizAction,
    state::{reduce, should_show_next_chapter, QuizReaction, QuizState},
};

/// Owns the quiz state of one reading session.
#[derive(Debug, Default)]
pub struct QuizProgressStore {
    state: QuizState,
}

impl QuizProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a snapshot, e.g. one restored by [`super::progress::load`].
    pub fn with_state(state: QuizState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn into_state(self) -> QuizState {
        self.state
    }

    pub fn reaction(&self, path: &str) -> &QuizReaction {
        self.state.reaction(path)
    }

    pub fn remember_skipped(&self) -> bool {
        self.state.remember_skipped
    }

    pub fn is_unlocked(&self, path: &str) -> bool {
        should_show_next_chapter(self.reaction(path))
    }

    pub fn dispatch(&mut self, action: QuizAction) -> &QuizState {
        tracing::debug!(?action, "quiz action");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        &self.state
    }

    pub fn add_answer(&mut self, path: &str, answer_index: usize) -> &QuizState {
        self.dispatch(QuizAction::add_answer(path, answer_index))
    }

    pub fn answer_correctly(&mut self, path: &str) -> &QuizState {
        self.dispatch(QuizAction::answer_correctly(path))
    }

    pub fn skip(&mut self, path: &str) -> &QuizState {
        self.dispatch(QuizAction::skip(path))
    }

    pub fn set_remember_skipped(&mut self, value: bool) -> &QuizState {
        self.dispatch(QuizAction::set_remember_skipped(value))
    }

    pub fn toggle_remember_skipped(&mut self) -> &QuizState {
        let value = !self.state.remember_skipped;
        self.set_remember_skipped(value)
    }

    /// Records a click on answer `answer_index` and marks the chapter solved when it
    /// matches `correct_answer_index`. Returns whether the pick was correct.
    pub fn select_answer(
        &mut self,
        path: &str,
        answer_index: usize,
        correct_answer_index: Option<usize>,
    ) -> bool {
        self.add_answer(path, answer_index);
        let correct = correct_answer_index == Some(answer_index);
        if correct {
            self.answer_correctly(path);
        }
        correct
    }
}
