//! Handlebars-backed string catalogs

use crate::types::{Localizer, Message, NameVocabulary};
use crate::{PeerHabitError, Result};
use handlebars::Handlebars;

/// Locale codes with a built-in catalog
pub const SUPPORTED_LOCALES: &[&str] = &["ko", "en"];

const KO_TEMPLATES: &[(&str, &str)] = &[
    ("reporting_not_responded", "{{nick}} 님은 어제 응답하지 않았습니다."),
    ("reporting_yesterday_response", "{{nick}} 님은 어제 {{response}}(으)로 응답했습니다."),
    ("reporting_positive_combo", "{{combo}}일 연속 좋은 결과입니다!"),
    ("reporting_negative_combo", "{{combo}}일 연속 아쉬운 결과입니다."),
];

const EN_TEMPLATES: &[(&str, &str)] = &[
    ("reporting_not_responded", "{{nick}} did not respond yesterday."),
    ("reporting_yesterday_response", "{{nick}} responded with {{response}} yesterday."),
    ("reporting_positive_combo", "That makes a positive streak of {{combo}} days!"),
    ("reporting_negative_combo", "That makes a negative streak of {{combo}} days."),
];

const KO_ADJECTIVES: &[&str] = &[
    "멋쟁이", "귀여운", "커다란", "키 큰", "사려깊은", "활발한", "지적인", "용맹한", "개구장이", "여유로운",
];
const KO_COLORS: &[&str] = &[
    "붉은", "푸른", "보랏빛", "주황", "초록", "하늘색", "핑크", "노랑", "형광", "투명",
];
const KO_ANIMALS: &[&str] = &[
    "조랑말", "들소", "맘모스", "코끼리", "판다곰", "독수리", "호랑이", "사자", "반달곰", "돌고래",
];

const EN_ADJECTIVES: &[&str] = &[
    "Dapper", "Cute", "Huge", "Tall", "Thoughtful", "Lively", "Clever", "Brave", "Mischievous",
    "Relaxed",
];
const EN_COLORS: &[&str] = &[
    "Red", "Blue", "Violet", "Orange", "Green", "Sky-blue", "Pink", "Yellow", "Neon", "Clear",
];
const EN_ANIMALS: &[&str] = &[
    "Pony", "Bison", "Mammoth", "Elephant", "Panda", "Eagle", "Tiger", "Lion", "Moon Bear",
    "Dolphin",
];

/// Sentence templates plus nickname vocabulary for one locale
pub struct StringCatalog {
    locale: String,
    handlebars: Handlebars<'static>,
    vocabulary: NameVocabulary,
}

impl StringCatalog {
    /// Build a catalog from template strings keyed by [`Message::template_name`]
    pub fn new(
        locale: impl Into<String>,
        templates: &[(&str, &str)],
        vocabulary: NameVocabulary,
    ) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Plain-text sentences; nicknames must not be HTML-escaped
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, template) in templates {
            handlebars
                .register_template_string(name, *template)
                .map_err(|e| PeerHabitError::template(e.to_string()))?;
        }

        Ok(Self {
            locale: locale.into(),
            handlebars,
            vocabulary,
        })
    }

    /// Korean catalog
    pub fn korean() -> Result<Self> {
        Self::new(
            "ko",
            KO_TEMPLATES,
            NameVocabulary::from_words(KO_ADJECTIVES, KO_COLORS, KO_ANIMALS),
        )
    }

    /// English catalog
    pub fn english() -> Result<Self> {
        Self::new(
            "en",
            EN_TEMPLATES,
            NameVocabulary::from_words(EN_ADJECTIVES, EN_COLORS, EN_ANIMALS),
        )
    }

    /// Catalog for a locale code
    pub fn for_locale(locale: &str) -> Result<Self> {
        match locale {
            "ko" => Self::korean(),
            "en" => Self::english(),
            other => Err(PeerHabitError::config(format!(
                "Unsupported locale '{}'",
                other
            ))),
        }
    }

    /// Locale code
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Localizer for StringCatalog {
    fn format(&self, message: &Message<'_>) -> Result<String> {
        self.handlebars
            .render(message.template_name(), &message.data())
            .map_err(|e| PeerHabitError::template(e.to_string()))
    }

    fn name_vocabulary(&self) -> &NameVocabulary {
        &self.vocabulary
    }
}
