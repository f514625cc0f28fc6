use slack_history::utils::stopwords::{is_stopword, remove_stopwords};

#[test]
fn test_stopword_scenario() {
    let input = "I love the city";
    let cleaned = remove_stopwords(input);

    assert_eq!(cleaned, "love city");
    assert!(cleaned.split_whitespace().count() < input.split_whitespace().count());
}

#[test]
fn test_stopwords_case_insensitive() {
    assert_eq!(remove_stopwords("THE Server IS Broken"), "server broken");
    assert!(is_stopword("You"));
}

#[test]
fn test_only_stopwords_yields_empty() {
    assert_eq!(remove_stopwords("it is what it is"), "");
}
