//! Localized sentence contract

use crate::Result;
use serde_json::json;

/// A sentence the registry knows how to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message<'a> {
    /// The robot gave no response that day
    NotResponded {
        /// Robot nickname
        nick: &'a str,
    },
    /// The robot responded with a value
    Responded {
        /// Robot nickname
        nick: &'a str,
        /// Recorded response
        response: i64,
    },
    /// Run of positive outcomes
    PositiveCombo {
        /// Streak length
        combo: u64,
    },
    /// Run of negative outcomes
    NegativeCombo {
        /// Absolute streak length
        combo: u64,
    },
}

impl Message<'_> {
    /// Name of the template that renders this message
    pub fn template_name(&self) -> &'static str {
        match self {
            Message::NotResponded { .. } => "reporting_not_responded",
            Message::Responded { .. } => "reporting_yesterday_response",
            Message::PositiveCombo { .. } => "reporting_positive_combo",
            Message::NegativeCombo { .. } => "reporting_negative_combo",
        }
    }

    /// Template arguments
    pub fn data(&self) -> serde_json::Value {
        match *self {
            Message::NotResponded { nick } => json!({ "nick": nick }),
            Message::Responded { nick, response } => json!({ "nick": nick, "response": response }),
            Message::PositiveCombo { combo } | Message::NegativeCombo { combo } => {
                json!({ "combo": combo })
            }
        }
    }
}

/// Word pools for composing random nicknames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameVocabulary {
    /// First word
    pub adjectives: Vec<String>,
    /// Second word
    pub colors: Vec<String>,
    /// Third word
    pub animals: Vec<String>,
}

impl NameVocabulary {
    /// Build a vocabulary from static word lists
    pub fn from_words(adjectives: &[&str], colors: &[&str], animals: &[&str]) -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            adjectives: owned(adjectives),
            colors: owned(colors),
            animals: owned(animals),
        }
    }
}

/// Supplies localized sentences and nickname words
pub trait Localizer: Send + Sync {
    /// Render one sentence
    fn format(&self, message: &Message<'_>) -> Result<String>;

    /// Word pools for [`crate::robot::random_name`]
    fn name_vocabulary(&self) -> &NameVocabulary;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_data() {
        let msg = Message::Responded {
            nick: "Fox",
            response: 7,
        };
        assert_eq!(msg.template_name(), "reporting_yesterday_response");
        assert_eq!(msg.data()["nick"], "Fox");
        assert_eq!(msg.data()["response"], 7);

        let msg = Message::NegativeCombo { combo: 2 };
        assert_eq!(msg.data()["combo"], 2);
    }
}
