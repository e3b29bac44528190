use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizAction {
    AddAnswer {
        path: String,
        #[serde(rename = "answerIndex")]
        answer_index: usize,
    },
    AnswerCorrectly {
        path: String,
    },
    Skip {
        path: String,
    },
    SetRememberSkipped {
        value: bool,
    },
}

impl QuizAction {
    pub fn add_answer(path: impl Into<String>, answer_index: usize) -> Self {
        Self::AddAnswer {
            path: path.into(),
            answer_index,
        }
    }

    pub fn answer_correctly(path: impl Into<String>) -> Self {
        Self::AnswerCorrectly { path: path.into() }
    }

    pub fn skip(path: impl Into<String>) -> Self {
        Self::Skip { path: path.into() }
    }

    pub fn set_remember_skipped(value: bool) -> Self {
        Self::SetRememberSkipped { value }
    }

    /// Chapter the action touches, `None` for the global flag.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::AddAnswer { path, .. } | Self::AnswerCorrectly { path } | Self::Skip { path } => {
                Some(path)
            }
            Self::SetRememberSkipped { .. } => None,
        }
    }
}
