use crate::artifacts::diff::myers::{Edit, MyersDiff};
use crate::artifacts::style;
use derive_new::new;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Lines,
    Chars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Added,
    Removed,
    Unchanged,
}

impl<T> From<&Edit<T>> for SegmentKind {
    fn from(edit: &Edit<T>) -> Self {
        match edit {
            Edit::Insert { .. } => SegmentKind::Added,
            Edit::Delete { .. } => SegmentKind::Removed,
            Edit::Equal { .. } => SegmentKind::Unchanged,
        }
    }
}

/// A run of consecutive lines or characters sharing the same tag.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Segment {
    pub kind: SegmentKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TextDiff {
    granularity: Granularity,
    segments: Vec<Segment>,
}

impl TextDiff {
    /// Character diff when asked for or when neither side has a newline,
    /// line diff otherwise.
    pub fn compute(existing: &str, proposed: &str, chars: bool) -> Self {
        if chars || (!existing.contains('\n') && !proposed.contains('\n')) {
            Self::chars(existing, proposed)
        } else {
            Self::lines(existing, proposed)
        }
    }

    pub fn lines(existing: &str, proposed: &str) -> Self {
        let a = existing.split_inclusive('\n').collect::<Vec<_>>();
        let b = proposed.split_inclusive('\n').collect::<Vec<_>>();

        TextDiff::new(Granularity::Lines, segments(&a, &b))
    }

    pub fn chars(existing: &str, proposed: &str) -> Self {
        let a = existing.chars().collect::<Vec<_>>();
        let b = proposed.chars().collect::<Vec<_>>();

        TextDiff::new(Granularity::Chars, segments(&a, &b))
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_changes(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.kind != SegmentKind::Unchanged)
    }

    fn fmt_lines(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            for line in segment.value.split_inclusive('\n') {
                let text = line.strip_suffix('\n').unwrap_or(line);
                match segment.kind {
                    SegmentKind::Added => writeln!(f, "{}", style::added(&format!("+{text}")))?,
                    SegmentKind::Removed => {
                        writeln!(f, "{}", style::removed(&format!("-{text}")))?
                    }
                    SegmentKind::Unchanged => writeln!(f, " {text}")?,
                }

                if segment.kind != SegmentKind::Unchanged && !line.ends_with('\n') {
                    writeln!(f, "\\ No newline at end of file")?;
                }
            }
        }

        Ok(())
    }

    fn fmt_chars(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Added => {
                    write!(f, "{}", style::added(&format!("{{+{}+}}", segment.value)))?
                }
                SegmentKind::Removed => {
                    write!(f, "{}", style::removed(&format!("[-{}-]", segment.value)))?
                }
                SegmentKind::Unchanged => write!(f, "{}", segment.value)?,
            }
        }

        if self
            .segments
            .last()
            .is_some_and(|segment| !segment.value.ends_with('\n'))
        {
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for TextDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&style::legend())?;
        match self.granularity {
            Granularity::Lines => self.fmt_lines(f),
            Granularity::Chars => self.fmt_chars(f),
        }
    }
}

fn segments<T>(a: &[T], b: &[T]) -> Vec<Segment>
where
    T: Eq + Clone + fmt::Display,
{
    let edits = MyersDiff::new(a, b).diff();

    let mut grouped: Vec<Segment> = Vec::new();
    for edit in &edits {
        let kind = SegmentKind::from(edit);
        let value = edit.value().to_string();
        match grouped.last_mut() {
            Some(last) if last.kind == kind => last.value.push_str(&value),
            _ => grouped.push(Segment::new(kind, value)),
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn plain(diff: &TextDiff) -> String {
        colored::control::set_override(false);
        diff.to_string()
    }

    #[test]
    fn line_diff_groups_changed_runs() {
        let diff = TextDiff::compute("a1\na2\na3\na4", "a1\nb2\nb3\na4", false);

        assert_eq!(diff.granularity(), Granularity::Lines);
        assert_eq!(
            diff.segments(),
            &[
                Segment::new(SegmentKind::Unchanged, "a1\n".to_string()),
                Segment::new(SegmentKind::Removed, "a2\na3\n".to_string()),
                Segment::new(SegmentKind::Added, "b2\nb3\n".to_string()),
                Segment::new(SegmentKind::Unchanged, "a4".to_string()),
            ]
        );
    }

    #[test]
    fn line_diff_renders_prefixed_lines_under_a_legend() {
        let diff = TextDiff::compute("a1\na2\na3\na4", "a1\nb2\nb3\na4", false);

        assert_eq!(
            plain(&diff),
            "+ added\n- removed\n\n a1\n-a2\n-a3\n+b2\n+b3\n a4\n"
        );
    }

    #[test]
    fn missing_trailing_newline_is_flagged() {
        let diff = TextDiff::compute("a\nb\n", "a\nb", false);

        assert_eq!(
            plain(&diff),
            "+ added\n- removed\n\n a\n-b\n+b\n\\ No newline at end of file\n"
        );
    }

    #[rstest]
    #[case("abc", "abd", "+ added\n- removed\n\nab[-c-]{+d+}\n")]
    #[case("", "x", "+ added\n- removed\n\n{+x+}\n")]
    #[case("", "", "+ added\n- removed\n\n")]
    fn single_line_texts_diff_by_character(
        #[case] existing: &str,
        #[case] proposed: &str,
        #[case] expected: &str,
    ) {
        let diff = TextDiff::compute(existing, proposed, false);

        assert_eq!(diff.granularity(), Granularity::Chars);
        assert_eq!(plain(&diff), expected);
    }

    #[test]
    fn character_mode_can_be_forced() {
        let diff = TextDiff::compute("a1\na2", "a1\na3", true);

        assert_eq!(diff.granularity(), Granularity::Chars);
        assert_eq!(plain(&diff), "+ added\n- removed\n\na1\na[-2-]{+3+}\n");
    }

    #[test]
    fn unrelated_single_lines_are_replaced_whole() {
        let (existing, proposed) = ("a".repeat(20_000), "b".repeat(20_000));

        let diff = TextDiff::compute(&existing, &proposed, false);

        assert_eq!(
            diff.segments(),
            &[
                Segment::new(SegmentKind::Removed, existing.clone()),
                Segment::new(SegmentKind::Added, proposed.clone()),
            ]
        );
    }

    #[test]
    fn identical_texts_have_no_changes() {
        let diff = TextDiff::compute("same\ntext\n", "same\ntext\n", false);

        assert!(!diff.has_changes());
    }
}
