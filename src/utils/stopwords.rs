//! Dictionary-based English stopword removal

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
    "anybody", "anyone", "anything", "anywhere", "are", "aren't", "around", "as", "at", "be",
    "became", "because", "become", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "done", "down", "during", "each", "either", "else", "enough",
    "etc", "even", "ever", "every", "few", "for", "from", "further", "had", "hadn't", "has",
    "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "however", "i",
    "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its",
    "itself", "just", "least", "less", "let's", "many", "may", "me", "might", "more", "most",
    "much", "must", "mustn't", "my", "myself", "neither", "no", "nobody", "none", "nor", "not",
    "nothing", "now", "of", "off", "often", "on", "once", "only", "or", "other", "others",
    "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "perhaps", "quite",
    "rather", "same", "shall", "shan't", "she", "she'd", "she'll", "she's", "should",
    "shouldn't", "since", "so", "some", "somebody", "someone", "something", "sometimes",
    "somewhere", "still", "such", "than", "that", "that's", "the", "their", "theirs", "them",
    "themselves", "then", "there", "there's", "these", "they", "they'd", "they'll", "they're",
    "they've", "this", "those", "though", "through", "thus", "to", "too", "under", "until",
    "up", "upon", "us", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've",
    "were", "weren't", "what", "what's", "whatever", "when", "when's", "where", "where's",
    "whether", "which", "while", "who", "who's", "whom", "whose", "why", "why's", "will",
    "with", "within", "without", "won't", "would", "wouldn't", "yet", "you", "you'd",
    "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

// Slack markup such as <@U123>, <#C123|general> or <https://...|label>
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}']+")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Whether `word` is an English stopword, ignoring case.
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}

/// Lowercase `text`, drop Slack markup and punctuation, and remove English stopwords.
///
/// Anything that is not a letter, digit or apostrophe separates words, so raw line breaks
/// and backslashes never survive into the output.
#[must_use]
pub fn remove_stopwords(text: &str) -> String {
    let lowered = MARKUP.replace_all(text, " ").to_lowercase();

    WORD.find_iter(&lowered)
        .map(|m| m.as_str().trim_matches('\''))
        .filter(|w| !w.is_empty() && !STOPWORDS.contains(*w))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stopword_case_insensitive() {
        assert!(is_stopword("The"));
        assert!(is_stopword("DON'T"));
        assert!(!is_stopword("kubernetes"));
    }

    #[test]
    fn test_remove_stopwords_strips_markup() {
        assert_eq!(
            remove_stopwords("<@U123> can you restart the deploy?"),
            "restart deploy"
        );
    }

    #[test]
    fn test_remove_stopwords_splits_raw_newlines() {
        assert_eq!(remove_stopwords("hello\nworld\r\nagain"), "hello world again");
    }

    #[test]
    fn test_remove_stopwords_keeps_backslash_path_words() {
        assert_eq!(remove_stopwords(r"C:\new\readme.txt"), "c new readme txt");
    }
}
