//! Human-readable daily summaries

use crate::types::{Localizer, Message};
use crate::Result;

/// Join the response sentence and, for streaks longer than one, the streak sentence
pub fn compose_summary(
    localizer: &dyn Localizer,
    nick: &str,
    response: Option<i64>,
    combo: i64,
) -> Result<String> {
    let mut sentences = Vec::with_capacity(2);

    sentences.push(match response {
        None => localizer.format(&Message::NotResponded { nick })?,
        Some(response) => localizer.format(&Message::Responded { nick, response })?,
    });

    let streak = combo.unsigned_abs();
    if combo > 1 {
        sentences.push(localizer.format(&Message::PositiveCombo { combo: streak })?);
    } else if combo < -1 {
        sentences.push(localizer.format(&Message::NegativeCombo { combo: streak })?);
    }

    Ok(sentences.join(" "))
}
