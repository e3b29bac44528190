use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::action::QuizAction;

static DEFAULT_REACTION: QuizReaction = QuizReaction {
    answer_indices: BTreeSet::new(),
    answered_correctly: false,
    skipped: false,
};

/// What the reader did with the quiz of one chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizReaction {
    /// selected answers, 0-based
    #[serde(rename = "answerIndeces", default)]
    pub answer_indices: BTreeSet<usize>,

    /// set once the correct answer was picked, never cleared
    #[serde(rename = "answeredCorrectly", default)]
    pub answered_correctly: bool,

    #[serde(default)]
    pub skipped: bool,
}

impl QuizReaction {
    pub fn is_checked(&self, answer_index: usize) -> bool {
        self.answer_indices.contains(&answer_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    /// reactions keyed by chapter path
    #[serde(rename = "quizReactions", default)]
    pub quiz_reactions: BTreeMap<String, QuizReaction>,

    /// global, not per chapter
    #[serde(rename = "rememberSkipped", default)]
    pub remember_skipped: bool,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reaction for `path`, or the empty reaction when the chapter was never touched.
    pub fn reaction(&self, path: &str) -> &QuizReaction {
        self.quiz_reactions.get(path).unwrap_or(&DEFAULT_REACTION)
    }

    fn reaction_mut(&mut self, path: String) -> &mut QuizReaction {
        self.quiz_reactions.entry(path).or_default()
    }
}

/// Applies one action. Every action is defined for every state.
pub fn reduce(mut state: QuizState, action: QuizAction) -> QuizState {
    match action {
        QuizAction::AddAnswer { path, answer_index } => {
            state.reaction_mut(path).answer_indices.insert(answer_index);
        }
        QuizAction::AnswerCorrectly { path } => {
            state.reaction_mut(path).answered_correctly = true;
        }
        QuizAction::Skip { path } => {
            state.reaction_mut(path).skipped = true;
        }
        QuizAction::SetRememberSkipped { value } => {
            state.remember_skipped = value;
        }
    }
    state
}

/// Folds a recorded action log onto `state`.
pub fn replay<I>(state: QuizState, actions: I) -> QuizState
where
    I: IntoIterator<Item = QuizAction>,
{
    actions.into_iter().fold(state, reduce)
}

pub fn should_show_next_chapter(reaction: &QuizReaction) -> bool {
    reaction.skipped || reaction.answered_correctly
}

pub fn should_show_unlock_celebration(reaction: &QuizReaction, question_presented: bool) -> bool {
    reaction.answered_correctly && question_presented
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(path: &str, answer_index: usize) -> QuizAction {
        QuizAction::AddAnswer {
            path: path.to_string(),
            answer_index,
        }
    }

    #[test]
    fn unseen_path_reads_as_default() {
        let state = QuizState::new();
        let reaction = state.reaction("/graphql/basics/0-introduction/");

        assert!(reaction.answer_indices.is_empty());
        assert!(!reaction.answered_correctly);
        assert!(!reaction.skipped);
        assert!(state.quiz_reactions.is_empty());
    }

    #[test]
    fn answers_accumulate_as_a_set() {
        let state = replay(QuizState::new(), vec![add("ch1", 2), add("ch1", 0), add("ch1", 2)]);
        let reaction = state.reaction("ch1");

        assert_eq!(reaction.answer_indices, BTreeSet::from([0, 2]));
        assert!(!reaction.answered_correctly);
        assert!(!reaction.skipped);
    }

    #[test]
    fn out_of_range_answer_is_recorded() {
        let state = reduce(QuizState::new(), add("ch1", 17));
        assert!(state.reaction("ch1").is_checked(17));
    }

    #[test]
    fn correct_answer_survives_every_later_action() {
        let mut state = reduce(
            QuizState::new(),
            QuizAction::AnswerCorrectly {
                path: "ch1".to_string(),
            },
        );
        for action in [
            add("ch1", 3),
            QuizAction::Skip {
                path: "ch1".to_string(),
            },
            QuizAction::SetRememberSkipped { value: false },
        ] {
            state = reduce(state, action);
            assert!(state.reaction("ch1").answered_correctly);
        }
    }

    #[test]
    fn remember_flag_leaves_reactions_alone() {
        let state = reduce(QuizState::new(), add("ch1", 1));
        let before = state.quiz_reactions.clone();

        let state = reduce(state, QuizAction::SetRememberSkipped { value: true });
        let state = reduce(state, QuizAction::SetRememberSkipped { value: false });

        assert!(!state.remember_skipped);
        assert_eq!(state.quiz_reactions, before);
    }

    #[test]
    fn celebration_needs_a_question() {
        let reaction = QuizReaction {
            answered_correctly: true,
            ..Default::default()
        };
        assert!(should_show_unlock_celebration(&reaction, true));
        assert!(!should_show_unlock_celebration(&reaction, false));
    }
}
