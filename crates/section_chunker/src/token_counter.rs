// src/token_counter.rs

/// Counts tokens the way every stage of the chunker does: one token per
/// whitespace-delimited word. This is not a sub-word model tokenizer.
pub struct TokenCounter;

impl TokenCounter {
    /// Number of whitespace-delimited words in `text`.
    pub fn count(text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Whether `text` holds fewer than `min_tokens` words.
    ///
    /// Stops counting as soon as the threshold is reached, so long sections
    /// are not scanned to the end.
    pub fn is_below(text: &str, min_tokens: usize) -> bool {
        text.split_whitespace().take(min_tokens).count() < min_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(TokenCounter::count("This is a test."), 4);
        assert_eq!(TokenCounter::count(""), 0);
        assert_eq!(TokenCounter::count("   \n\t "), 0);
    }

    #[test]
    fn test_mixed_whitespace() {
        assert_eq!(TokenCounter::count("one\ttwo\n\nthree   four"), 4);
    }

    #[test]
    fn test_non_ascii_words() {
        // Vietnamese diacritics stay inside their word
        assert_eq!(TokenCounter::count("Giống lúa chịu mặn"), 4);
    }

    #[test]
    fn test_is_below() {
        assert!(TokenCounter::is_below("a b c", 4));
        assert!(!TokenCounter::is_below("a b c d", 4));
        assert!(!TokenCounter::is_below("", 0));
    }
}
