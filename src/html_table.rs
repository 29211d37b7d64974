use crate::common::{SizeEntry, StatsSnapshot, TOTAL_ROW_MARKER};
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn regex_table_cell() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>").expect("valid regex literal"))
}

fn regex_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid regex literal"))
}

fn regex_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex literal"))
}

/// Text content of every `<td>` in document order, with nested markup removed.
pub fn table_cells(html: &str) -> Vec<String> {
    regex_table_cell()
        .captures_iter(html)
        .map(|caps| {
            let inner = regex_tag().replace_all(&caps[1], "");
            decode_entities(inner.trim())
        })
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

enum ScanState {
    ExpectName,
    ExpectSize { name: String },
}

/// Pairs package-name cells with the size cell that follows them.
struct CellScanner {
    state: ScanState,
    entries: Vec<SizeEntry>,
    positions: HashMap<String, usize>,
    total: Option<u64>,
}

impl CellScanner {
    fn new() -> Self {
        CellScanner {
            state: ScanState::ExpectName,
            entries: Vec::new(),
            positions: HashMap::new(),
            total: None,
        }
    }

    fn feed(&mut self, cell: &str) {
        if cell.is_empty() {
            return;
        }
        if !regex_integer().is_match(cell) {
            // A name with no size yet is superseded by the next one.
            self.state = ScanState::ExpectSize {
                name: cell.to_string(),
            };
            return;
        }
        let pending = std::mem::replace(&mut self.state, ScanState::ExpectName);
        let size = match cell.parse::<u64>() {
            Ok(size) => size,
            Err(e) => {
                // Negative or too large for a byte count; the pending name goes with it.
                debug!("dropping size cell {cell}: {e}");
                return;
            }
        };
        match pending {
            ScanState::ExpectSize { name } => self.record(name, size),
            ScanState::ExpectName => {
                debug!("dropping size cell {size} with no package name before it");
            }
        }
    }

    fn record(&mut self, name: String, size_bytes: u64) {
        if name.contains(TOTAL_ROW_MARKER) {
            self.total = Some(size_bytes);
            return;
        }
        match self.positions.get(&name) {
            Some(&i) => {
                debug!("{name} listed more than once, keeping the last size");
                self.entries[i].size_bytes = size_bytes;
            }
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push(SizeEntry::new(name, size_bytes));
            }
        }
    }

    fn finish(self) -> StatsSnapshot {
        if let ScanState::ExpectSize { name } = self.state {
            debug!("table ended after {name} without a size");
        }
        StatsSnapshot {
            entries: self.entries,
            total_index_size_bytes: self.total,
        }
    }
}

/// Builds a snapshot from a scraped stats page, keeping table order.
pub fn parse(html: &str) -> StatsSnapshot {
    let mut scanner = CellScanner::new();
    for cell in table_cells(html) {
        scanner.feed(&cell);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cells: &[&str]) -> String {
        let mut html = String::from("<html><body><table>");
        for pair in cells.chunks(2) {
            html.push_str("<tr>");
            for cell in pair {
                html.push_str(&format!("<td>{cell}</td>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table></body></html>");
        html
    }

    #[test]
    fn pairs_names_with_sizes_and_separates_total() {
        let html = table(&["pkg1", "100", "pkg2", "200", "All of PyPI", "1000"]);
        let snapshot = parse(&html);
        assert_eq!(
            snapshot.entries,
            vec![SizeEntry::new("pkg1", 100), SizeEntry::new("pkg2", 200)]
        );
        assert_eq!(snapshot.total_index_size_bytes, Some(1000));
    }

    #[test]
    fn keeps_table_order() {
        let html = table(&["small", "1", "big", "9000", "medium", "50"]);
        let names: Vec<_> = parse(&html).entries.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["small", "big", "medium"]);
    }

    #[test]
    fn size_without_fresh_name_is_dropped() {
        let html = table(&["pkg1", "100", "200", "pkg2", "300"]);
        let snapshot = parse(&html);
        assert_eq!(
            snapshot.entries,
            vec![SizeEntry::new("pkg1", 100), SizeEntry::new("pkg2", 300)]
        );
    }

    #[test]
    fn leading_size_is_dropped() {
        let snapshot = parse(&table(&["42", "pkg", "7"]));
        assert_eq!(snapshot.entries, vec![SizeEntry::new("pkg", 7)]);
    }

    #[test]
    fn negative_size_is_dropped_with_its_name() {
        let snapshot = parse(&table(&["a", "-1", "7", "b", "8"]));
        assert_eq!(snapshot.entries, vec![SizeEntry::new("b", 8)]);
    }

    #[test]
    fn overflowing_size_is_dropped_with_its_name() {
        let snapshot = parse(&table(&["a", "99999999999999999999", "7", "b", "8"]));
        assert_eq!(snapshot.entries, vec![SizeEntry::new("b", 8)]);
    }

    #[test]
    fn signed_positive_size_is_accepted() {
        let snapshot = parse(&table(&["a", "+12"]));
        assert_eq!(snapshot.entries, vec![SizeEntry::new("a", 12)]);
    }

    #[test]
    fn latest_name_wins_when_names_repeat() {
        let snapshot = parse(&table(&["header", "pkg", "7"]));
        assert_eq!(snapshot.entries, vec![SizeEntry::new("pkg", 7)]);
    }

    #[test]
    fn duplicate_name_keeps_first_position() {
        let snapshot = parse(&table(&["a", "1", "b", "2", "a", "3"]));
        assert_eq!(
            snapshot.entries,
            vec![SizeEntry::new("a", 3), SizeEntry::new("b", 2)]
        );
    }

    #[test]
    fn strips_nested_markup_and_attributes() {
        let html = r#"<table>
            <tr><td class="name"><a href="/project/tensorflow/">tensorflow</a></td>
                <td align="right"> 12345 </td></tr>
            <tr><td>All of PyPI</td><td>99999</td></tr>
        </table>"#;
        let snapshot = parse(html);
        assert_eq!(snapshot.entries, vec![SizeEntry::new("tensorflow", 12345)]);
        assert_eq!(snapshot.total_index_size_bytes, Some(99999));
    }

    #[test]
    fn decodes_entities_in_names() {
        assert_eq!(table_cells("<td>a&amp;b</td><td>&lt;x&gt;</td>"), vec!["a&b", "<x>"]);
    }

    #[test]
    fn marker_is_matched_as_substring() {
        let snapshot = parse(&table(&["pkg", "5", "Total: All of PyPI (approx)", "50"]));
        assert_eq!(snapshot.entries, vec![SizeEntry::new("pkg", 5)]);
        assert_eq!(snapshot.total_index_size_bytes, Some(50));
    }

    #[test]
    fn page_without_table_is_empty() {
        let snapshot = parse("<html><body><p>maintenance</p></body></html>");
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_index_size_bytes, None);
    }
}
