use regex::Regex;
use std::sync::OnceLock;

/// Shortcode names with no matching close marker (self-contained embeds).
/// They never open a scope.
pub const ONE_LINER_SHORTCODES: &[&str] = &["partial"];

/// An open marker `{{< name args >}}` / `{{% name args %}}` found in a line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OpenMarker<'a> {
    pub name: &'a str,
    /// Byte column at which the marker starts.
    pub start: usize,
}

/// A close marker `{{< /name >}}` / `{{</ name >}}` / `{{% /name %}}`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CloseMarker<'a> {
    pub name: &'a str,
    /// Byte column one past the end of the marker.
    pub end: usize,
}

fn open_regex() -> &'static Regex {
    static OPEN: OnceLock<Regex> = OnceLock::new();
    OPEN.get_or_init(|| {
        Regex::new(r"\{\{[<%]\s+([A-Za-z0-9_-]+)(.*?)\s*[%>]\}\}").expect("invalid open regex")
    })
}

fn close_regex() -> &'static Regex {
    static CLOSE: OnceLock<Regex> = OnceLock::new();
    CLOSE.get_or_init(|| {
        // The slash may come before or after the whitespace: both
        // `{{< /tab >}}` and `{{</ tab >}}` appear in real documents.
        Regex::new(r"\{\{[<%]\s*/\s*([A-Za-z0-9_-]+)(.*?)\s*[%>]\}\}")
            .expect("invalid close regex")
    })
}

/// All open markers in `line`, left to right. Markers are matched lazily so
/// several shortcodes on one line are recognised individually.
pub(crate) fn open_markers(line: &str) -> Vec<OpenMarker<'_>> {
    open_regex()
        .captures_iter(line)
        .map(|c| {
            let m = c.get(0).expect("match group 0");
            let name = c.get(1).expect("name group").as_str();
            OpenMarker {
                name,
                start: m.start(),
            }
        })
        .collect()
}

/// All close markers in `line`, left to right.
pub(crate) fn close_markers(line: &str) -> Vec<CloseMarker<'_>> {
    close_regex()
        .captures_iter(line)
        .map(|c| {
            let m = c.get(0).expect("match group 0");
            let name = c.get(1).expect("name group").as_str();
            CloseMarker { name, end: m.end() }
        })
        .collect()
}
