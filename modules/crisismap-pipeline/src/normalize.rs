//! Text normalization.
//!
//! Pure and total: any input string maps to a cleaned, lowercased,
//! stopword-free string, possibly empty. Steps run in a fixed order —
//! emoji strip, non-letter strip, lowercase, stopword drop — and the
//! whole function is idempotent, so re-running a batch never changes
//! already-normalized text.

use std::sync::LazyLock;

use regex::Regex;

static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Emoticons, symbols & pictographs, transport & map symbols, flags.
    Regex::new(
        "[\u{1F600}-\u{1F64F}\u{1F300}-\u{1F5FF}\u{1F680}-\u{1F6FF}\u{1F1E0}-\u{1F1FF}]+",
    )
    .unwrap()
});

static NON_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());

/// English stopwords, matched against lowercased tokens. Apostrophes are
/// stripped before tokenization, so only apostrophe-free forms appear here.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
    "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Clean raw post text: strip emoji ranges, drop everything that is not an
/// ASCII letter or whitespace, lowercase, remove English stopwords, and
/// rejoin with single spaces. Text with no surviving tokens yields an
/// empty string, which every downstream stage accepts.
pub fn normalize(text: &str) -> String {
    let text = EMOJI_RE.replace_all(text, "");
    let text = NON_LETTER_RE.replace_all(&text, "");
    let text = text.to_lowercase();

    text.split_whitespace()
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_punctuation_case_and_stopwords() {
        assert_eq!(
            normalize("I feel so lost and anxious, need help"),
            "feel lost anxious need help"
        );
    }

    #[test]
    fn strips_emoji_and_numbers() {
        assert_eq!(normalize("Day 3: still awake \u{1F62D}\u{1F62D} insomnia"), "day still awake insomnia");
    }

    #[test]
    fn emoji_only_input_yields_empty_string() {
        assert_eq!(normalize("\u{1F62D}\u{1F525}\u{1F699}\u{1F1EB}\u{1F1F7}"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("123 !!! ..."), "");
    }

    #[test]
    fn all_stopword_input_yields_empty_string() {
        assert_eq!(normalize("I am so very"), "");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "I feel so lost and anxious, need help",
            "Day 3: still awake \u{1F62D} insomnia!!!",
            "",
            "\u{1F30D}",
            "already clean text",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("feel\t\tlost\n\n  anxious"), "feel lost anxious");
    }
}
