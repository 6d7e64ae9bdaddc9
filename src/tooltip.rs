use crate::model::Commit;
use crate::util::{format_long_date, format_short_time};

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub id: String,
    pub url: Option<String>,
    pub date: String,
    pub time: String,
    pub author: String,
    pub lines: usize,
}

impl TooltipContent {
    pub fn from_commit(commit: &Commit) -> Self {
        Self {
            id: commit.id.clone(),
            url: commit.url.clone(),
            date: format_long_date(&commit.datetime),
            time: format_short_time(&commit.datetime),
            author: commit.author.clone(),
            lines: commit.total_lines,
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Commit", self.id.clone()),
            ("Link", self.url.clone().unwrap_or_default()),
            ("Date", self.date.clone()),
            ("Time", self.time.clone()),
            ("Author", self.author.clone()),
            ("Lines", self.lines.to_string()),
        ]
    }
}

/// Details box for one commit.
///
/// Content, visibility and position are set independently. Hiding keeps the
/// last content, so callers set content before showing.
#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    content: Option<TooltipContent>,
    visible: bool,
    position: (f64, f64),
}

impl Tooltip {
    pub fn set_content(&mut self, commit: Option<&Commit>) {
        if let Some(commit) = commit {
            self.content = Some(TooltipContent::from_commit(commit));
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_commits;
    use crate::aggregate::tests::line;

    #[test]
    fn content_from_commit() {
        let set = group_commits(
            vec![
                line("c1", "2025-02-11T15:05:00+00:00", "a.js", "js", 1),
                line("c1", "2025-02-11T15:05:00+00:00", "a.js", "js", 1),
            ],
            Some("https://github.com/o/r"),
        );
        let mut tip = Tooltip::default();
        tip.set_content(set.commits().first());
        let c = tip.content().unwrap();
        assert_eq!(c.id, "c1");
        assert_eq!(c.url.as_deref(), Some("https://github.com/o/r/commit/c1"));
        assert_eq!(c.date, "Tuesday, February 11, 2025");
        assert_eq!(c.time, "3:05 PM");
        assert_eq!(c.lines, 2);
        assert_eq!(c.rows().len(), 6);
    }

    #[test]
    fn absent_commit_is_noop_and_hide_keeps_content() {
        let set = group_commits(vec![line("c1", "2025-02-11T15:05:00+00:00", "a.js", "js", 1)], None);
        let mut tip = Tooltip::default();
        tip.set_content(None);
        assert!(tip.content().is_none());

        tip.set_content(set.commits().first());
        tip.set_visible(true);
        tip.set_content(None);
        tip.set_visible(false);
        tip.set_visible(false);
        assert!(!tip.is_visible());
        assert_eq!(tip.content().map(|c| c.id.as_str()), Some("c1"));

        tip.set_position(12.0, 4.0);
        assert_eq!(tip.position(), (12.0, 4.0));
    }
}
