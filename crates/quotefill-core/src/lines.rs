//! Line-window search over a transcript.
//!
//! Extractors never look at whole-document proximity: a value belongs to a
//! keyword only if it is printed within a few LINES of it. Carriers disagree
//! on whether the label sits above or below the figure, so callers pick
//! `before` / `after` spans per field.

/// A transcript split into lines, borrowed from the source text.
#[derive(Debug, Clone, Default)]
pub struct Lines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Lines<'a> {
    /// Split `text` on line boundaries (`\n` or `\r\n`).
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.lines.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines.iter().copied()
    }

    /// Indices of lines satisfying `pred`, in transcript order.
    pub fn positions<'s, F>(&'s self, mut pred: F) -> impl Iterator<Item = usize> + 's
    where
        F: FnMut(&str) -> bool + 's,
    {
        self.lines
            .iter()
            .enumerate()
            .filter_map(move |(i, line)| pred(*line).then_some(i))
    }

    /// Lines `idx - before ..= idx + after`, clamped to the transcript edges.
    pub fn window(&self, idx: usize, before: usize, after: usize) -> Window<'_, 'a> {
        let start = idx.saturating_sub(before);
        let end = idx.saturating_add(after).saturating_add(1).min(self.lines.len());
        let start = start.min(end);
        Window {
            lines: &self.lines[start..end],
            center: idx.saturating_sub(start),
        }
    }

    /// Owned sub-transcript of `radius` lines either side of `idx`.
    pub fn block(&self, idx: usize, radius: usize) -> Lines<'a> {
        Lines {
            lines: self.window(idx, radius, radius).lines().to_vec(),
        }
    }

    /// Visit the window around `idx` nearest-line-first and return the first hit.
    pub fn scan_near<T, F>(&self, idx: usize, before: usize, after: usize, f: F) -> Option<T>
    where
        F: FnMut(&'a str) -> Option<T>,
    {
        self.window(idx, before, after).nearest_first().find_map(f)
    }
}

/// A contiguous slice of lines around a keyword line.
#[derive(Debug, Clone, Copy)]
pub struct Window<'w, 'a> {
    lines: &'w [&'a str],
    /// Position of the keyword line inside `lines`.
    center: usize,
}

impl<'w, 'a> Window<'w, 'a> {
    /// The window in transcript order.
    pub fn lines(&self) -> &'w [&'a str] {
        self.lines
    }

    /// The window ordered by distance from the keyword line.
    ///
    /// Keyword line first, then `+1, -1, +2, -2, ...`; on equal distance the
    /// line below wins.
    pub fn nearest_first(&self) -> impl Iterator<Item = &'a str> + 'w {
        let lines = self.lines;
        let center = self.center.min(lines.len().saturating_sub(1));
        let reach = lines.len();
        (0..=reach)
            .flat_map(move |d| {
                let below = center.checked_add(d);
                let above = if d == 0 { None } else { center.checked_sub(d) };
                [below, above]
            })
            .flatten()
            .filter(move |&i| i < lines.len())
            .map(move |i| lines[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> String {
        (0..10)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn window_is_contiguous_and_clamped() {
        let text = sample();
        let lines = Lines::new(&text);
        assert_eq!(
            lines.window(5, 2, 1).lines(),
            &["line 3", "line 4", "line 5", "line 6"]
        );
        assert_eq!(lines.window(0, 3, 1).lines(), &["line 0", "line 1"]);
        assert_eq!(lines.window(9, 1, 3).lines(), &["line 8", "line 9"]);
    }

    #[test]
    fn window_asymmetric_bounds() {
        let text = sample();
        let lines = Lines::new(&text);
        assert_eq!(lines.window(4, 0, 2).lines(), &["line 4", "line 5", "line 6"]);
        assert_eq!(lines.window(4, 2, 0).lines(), &["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn nearest_first_alternates_below_then_above() {
        let text = sample();
        let lines = Lines::new(&text);
        let order: Vec<_> = lines.window(5, 2, 3).nearest_first().collect();
        assert_eq!(
            order,
            vec!["line 5", "line 6", "line 4", "line 7", "line 3", "line 8"]
        );
    }

    #[test]
    fn nearest_first_at_edges() {
        let text = sample();
        let lines = Lines::new(&text);
        let order: Vec<_> = lines.window(0, 3, 2).nearest_first().collect();
        assert_eq!(order, vec!["line 0", "line 1", "line 2"]);
        let order: Vec<_> = lines.window(9, 2, 3).nearest_first().collect();
        assert_eq!(order, vec!["line 9", "line 8", "line 7"]);
    }

    #[test]
    fn block_and_scan_near() {
        let text = "a\nb\nKEY\n42\nc";
        let lines = Lines::new(text);
        let block = lines.block(2, 1);
        assert_eq!(block.as_slice(), &["b", "KEY", "42"]);

        let hit = lines.scan_near(2, 3, 3, |l| l.parse::<u32>().ok());
        assert_eq!(hit, Some(42));
    }

    #[test]
    fn positions_in_order() {
        let text = "Collision\nx\ncollision 500";
        let lines = Lines::new(text);
        let found: Vec<_> = lines
            .positions(|l| l.to_lowercase().contains("collision"))
            .collect();
        assert_eq!(found, vec![0, 2]);
    }

    #[test]
    fn empty_transcript() {
        let lines = Lines::new("");
        assert!(lines.is_empty());
        assert_eq!(lines.window(0, 3, 3).nearest_first().count(), 0);
    }
}
