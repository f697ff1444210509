use anyhow::Result;
use similar::{ChangeTag, TextDiff};

/// Compares painted screens, reporting a line diff on mismatch
pub struct ScreenComparator;

impl Default for ScreenComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenComparator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare_output(&self, expected: &str, actual: &str) -> Result<()> {
        let expected_clean = self.normalize_output(expected);
        let actual_clean = self.normalize_output(actual);

        if expected_clean == actual_clean {
            return Ok(());
        }

        // Generate diff for debugging
        let diff = TextDiff::from_lines(&expected_clean, &actual_clean);
        let mut diff_output = String::new();

        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            diff_output.push_str(&format!("{sign}{change}"));
        }

        anyhow::bail!(
            "Screen mismatch:\n\nExpected:\n{}\n\nActual:\n{}\n\nDiff:\n{}",
            expected_clean,
            actual_clean,
            diff_output
        )
    }

    /// Compare a screen against expected rows
    pub fn compare_lines<E: AsRef<str>>(&self, expected: &[E], actual: &[String]) -> Result<()> {
        let expected = expected
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        self.compare_output(&expected, &actual.join("\n"))
    }

    pub fn assert_contains(&self, screen: &[String], needle: &str) -> Result<()> {
        if !screen.iter().any(|line| line.contains(needle)) {
            anyhow::bail!(
                "Screen does not contain expected text:\nExpected to find:\n{}\n\nOn screen:\n{}",
                needle,
                screen.join("\n")
            );
        }

        Ok(())
    }

    fn normalize_output(&self, output: &str) -> String {
        let mut lines: Vec<&str> = output.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}
