//! Random nickname composition

use crate::types::NameVocabulary;
use crate::{PeerHabitError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Compose `<adjective> <color> <animal>` from the vocabulary
pub fn random_name<R: Rng + ?Sized>(vocabulary: &NameVocabulary, rng: &mut R) -> Result<String> {
    let pools = [
        ("adjectives", &vocabulary.adjectives),
        ("colors", &vocabulary.colors),
        ("animals", &vocabulary.animals),
    ];

    let mut words = Vec::with_capacity(pools.len());
    for (pool, candidates) in pools {
        let word = candidates.choose(rng).ok_or_else(|| {
            PeerHabitError::validation(format!("Name vocabulary has no {}", pool))
        })?;
        words.push(word.as_str());
    }
    Ok(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vocab() -> NameVocabulary {
        NameVocabulary::from_words(&["Brave", "Very Tall"], &["Red"], &["Fox", "Moon Bear"])
    }

    #[test]
    fn test_one_word_from_each_pool() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let name = random_name(&vocab, &mut rng).unwrap();
            let adjective = vocab
                .adjectives
                .iter()
                .find(|w| name.starts_with(&format!("{} ", w)))
                .unwrap();
            let animal = vocab
                .animals
                .iter()
                .find(|w| name.ends_with(&format!(" {}", w)))
                .unwrap();
            let color = &name[adjective.len() + 1..name.len() - animal.len() - 1];
            assert_eq!(color, "Red");
            seen.insert(name);
        }
        assert!(seen.contains("Very Tall Red Moon Bear"));
    }

    #[test]
    fn test_empty_pool_is_error() {
        let vocab = NameVocabulary::from_words(&["Brave"], &[], &["Fox"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            random_name(&vocab, &mut rng),
            Err(PeerHabitError::Validation(_))
        ));
    }
}
