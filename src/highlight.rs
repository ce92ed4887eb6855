use serde::Serialize;

/// A run of text that either matches the query or does not.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    fn plain(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Splits `text` around every case-insensitive occurrence of `query`.
///
/// Matches are found left to right and never overlap. Joining the segment
/// texts gives back `text` unchanged, original casing included.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    if query.is_empty() {
        return vec![Segment::plain(text)];
    }

    let needle: Vec<char> = query.chars().collect();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        match match_len(&text[pos..], &needle) {
            Some(len) => {
                if plain_start < pos {
                    segments.push(Segment::plain(&text[plain_start..pos]));
                }
                segments.push(Segment::matched(&text[pos..pos + len]));
                pos += len;
                plain_start = pos;
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    if plain_start < text.len() {
        segments.push(Segment::plain(&text[plain_start..]));
    }
    segments
}

/// Byte length of the prefix of `haystack` matching `needle`, if any.
fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for &wanted in needle {
        let (_, c) = chars.next()?;
        if !c.to_lowercase().eq(wanted.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(i, _)| i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn matches(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_empty_query_returns_whole_text() {
        assert_eq!(highlight("Hello", ""), vec![Segment::plain("Hello")]);
    }

    #[test]
    fn test_empty_text() {
        assert!(highlight("", "voice").is_empty());
    }

    #[test]
    fn test_case_insensitive_split() {
        let segments = highlight("Voice actor with a warm voice", "VOICE");
        assert_eq!(
            segments,
            vec![
                Segment::matched("Voice"),
                Segment::plain(" actor with a warm "),
                Segment::matched("voice"),
            ]
        );
    }

    #[test]
    fn test_no_match() {
        let segments = highlight("narrator", "xyz");
        assert_eq!(segments, vec![Segment::plain("narrator")]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let segments = highlight("Rates: $5 (per word) or $.5?", "$.5?");
        assert_eq!(matches(&segments), vec!["$.5?"]);
        assert_eq!(joined(&segments), "Rates: $5 (per word) or $.5?");
    }

    #[test]
    fn test_non_overlapping() {
        let segments = highlight("aaaa", "aa");
        assert_eq!(segments, vec![Segment::matched("aa"), Segment::matched("aa")]);
    }

    #[test]
    fn test_unicode_text() {
        let segments = highlight("Locución en ESPAÑOL y español", "español");
        assert_eq!(matches(&segments), vec!["ESPAÑOL", "español"]);
        assert_eq!(joined(&segments), "Locución en ESPAÑOL y español");
    }

    #[test]
    fn test_join_reproduces_text() {
        let text = "The quick brown fox, the QUICK blue hare";
        for query in ["quick", "the", "e", "fox,", "hare", "zzz", " "] {
            assert_eq!(joined(&highlight(text, query)), text, "query {query:?}");
        }
    }
}
