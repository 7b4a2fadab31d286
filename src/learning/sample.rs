use std::collections::HashMap;

/// Conventional tag marking where a lesson positions the caret initially
pub const START_TAG: &str = "start";

/// Sample code with embedded position tags parsed out.
///
/// Lesson samples embed markers like `<start>` in their source text; parsing
/// strips every marker and records the byte offset it occupied, so lesson
/// scripts can position the caret without hard-coding offsets.
#[derive(Debug, Clone)]
pub struct LessonSample {
    text: String,
    positions: HashMap<String, usize>,
}

impl LessonSample {
    /// Cleaned sample text with all tags removed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Offset recorded for `tag` (first occurrence wins)
    pub fn get_position(&self, tag: &str) -> Option<usize> {
        self.positions.get(tag).copied()
    }

    /// Offset of the conventional start tag
    pub fn start_offset(&self) -> Option<usize> {
        self.get_position(START_TAG)
    }
}

/// Parse sample text, stripping each `<tag>` marker named in `tags` and
/// recording the offset it occupied in the cleaned text.
pub fn parse_lesson_sample(raw: &str, tags: &[&str]) -> LessonSample {
    let mut text = raw.to_string();
    let mut positions = HashMap::new();

    loop {
        let mut earliest: Option<(usize, &str)> = None;
        for tag in tags {
            let marker = format!("<{tag}>");
            if let Some(pos) = text.find(&marker) {
                if earliest.is_none_or(|(p, _)| pos < p) {
                    earliest = Some((pos, tag));
                }
            }
        }
        let Some((pos, tag)) = earliest else {
            break;
        };
        text.replace_range(pos..pos + tag.len() + 2, "");
        positions.entry(tag.to_string()).or_insert(pos);
    }

    LessonSample { text, positions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_tag_stripped_and_recorded() {
        let sample = parse_lesson_sample("def hello\n  <start>puts 'hi'\nend\n", &[START_TAG]);
        assert_eq!(sample.text(), "def hello\n  puts 'hi'\nend\n");
        assert_eq!(sample.start_offset(), Some(12));
    }

    #[test]
    fn test_multiple_tags() {
        let sample = parse_lesson_sample("<start>one <mark>two", &[START_TAG, "mark"]);
        assert_eq!(sample.text(), "one two");
        assert_eq!(sample.start_offset(), Some(0));
        assert_eq!(sample.get_position("mark"), Some(4));
    }

    #[test]
    fn test_untagged_text_unchanged() {
        let sample = parse_lesson_sample("plain text", &[START_TAG]);
        assert_eq!(sample.text(), "plain text");
        assert_eq!(sample.start_offset(), None);
    }

    #[test]
    fn test_unlisted_markup_left_alone() {
        let sample = parse_lesson_sample("Vec<caret> stays", &[START_TAG]);
        assert_eq!(sample.text(), "Vec<caret> stays");
    }
}
