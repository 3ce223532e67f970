//! User prompt construction

use domain::{FableRequest, StyleMode};

const MODELLED_INSTRUCTION: &str = "Use vocabulary suitable for 11 year olds. Include 2 or 3 spelling and grammatical errors per paragraph.";
const DEFAULT_INSTRUCTION: &str =
    "Use vocabulary suitable for 11 year olds with good grammar and readability.";

/// Parameters of a single fable prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FablePrompt {
    character1: String,
    character2: String,
    setting: String,
    moral: String,
    style: StyleMode,
}

impl FablePrompt {
    pub fn from_parts(
        character1: impl Into<String>,
        character2: impl Into<String>,
        setting: impl Into<String>,
        moral: impl Into<String>,
        style: StyleMode,
    ) -> Self {
        Self {
            character1: character1.into(),
            character2: character2.into(),
            setting: setting.into(),
            moral: moral.into(),
            style,
        }
    }

    /// Build a prompt from a validated request, keeping values as supplied
    pub fn from_request(request: &FableRequest) -> Self {
        Self::from_parts(
            request.character1(),
            request.character2(),
            request.setting(),
            request.moral(),
            request.style(),
        )
    }

    pub const fn style(&self) -> StyleMode {
        self.style
    }

    /// Style line embedded in the prompt
    pub const fn style_instruction(&self) -> &'static str {
        match self.style {
            StyleMode::Modelled => MODELLED_INSTRUCTION,
            StyleMode::Default => DEFAULT_INSTRUCTION,
        }
    }

    /// The user message sent to the model
    pub fn user_message(&self) -> String {
        format!(
            "Write a short fable (2-3 paragraphs) with:\n\
             - Characters: {} and {}\n\
             - Setting: {}\n\
             - Lesson: {}\n\
             - Style: {}\n\
             \n\
             Keep it concise. End with \"Moral: {}\"",
            self.character1,
            self.character2,
            self.setting,
            self.moral,
            self.style_instruction(),
            self.moral,
        )
    }
}
