//! Line-oriented recursive-descent decoder.
//!
//! The grammar is driven by an indentation stack: every block takes the
//! indentation of its first line, and a block ends at the first line that is
//! shallower than it. Each line is classified before it is split:
//!
//! 1. `-` or `- ...` lines are sequence items (checked first).
//! 2. Anything else inside a mapping block is a `key: value` entry.
//!
//! Nothing in here fails. Lines that do not fit where they appear are dropped
//! and reported through `tracing` at debug level.

use crate::node::{ContentNode, Mapping, Scalar};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    indent: usize,
    content: String,
    number: usize,
}

fn tokenize(text: &str) -> Vec<Line> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let normalized = raw.replace('\t', "  ");
            let content = normalized.trim();
            if content.is_empty() || content.starts_with('#') {
                return None;
            }
            let indent = normalized.len() - normalized.trim_start_matches(' ').len();
            Some(Line {
                indent,
                content: content.to_string(),
                number: idx + 1,
            })
        })
        .collect()
}

/// Decode a whole document. An empty document (or one holding only comments)
/// decodes to an empty mapping.
pub fn parse(text: &str) -> ContentNode {
    let lines = tokenize(text);
    let Some(first) = lines.first() else {
        return ContentNode::default();
    };
    let mut parser = Parser {
        lines: &lines,
        pos: 0,
    };
    let root = parser.block(first.indent);
    if let Some(line) = parser.peek() {
        tracing::debug!(
            line = line.number,
            dropped = lines.len() - parser.pos,
            "ignoring lines outside the document root"
        );
    }
    root
}

struct Parser<'a> {
    lines: &'a [Line],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Line> {
        self.lines.get(self.pos)
    }

    fn block(&mut self, indent: usize) -> ContentNode {
        let Some(line) = self.peek() else {
            return ContentNode::null();
        };
        if line.indent < indent {
            return ContentNode::null();
        }
        if is_sequence_item(&line.content) {
            self.sequence(line.indent)
        } else {
            ContentNode::Mapping(self.mapping(line.indent))
        }
    }

    /// Value for a `key:` with nothing after the colon, where the key starts
    /// at column `key_indent`.
    fn nested_value(&mut self, key_indent: usize) -> ContentNode {
        match self.peek() {
            Some(line) if line.indent > key_indent => self.block(line.indent),
            // `key:` followed by `- item` lines at the key's own column.
            Some(line) if line.indent == key_indent && is_sequence_item(&line.content) => {
                self.sequence(key_indent)
            }
            _ => ContentNode::null(),
        }
    }

    fn sequence(&mut self, indent: usize) -> ContentNode {
        let mut items = Vec::new();
        while let Some(line) = self.peek() {
            if line.indent != indent || !is_sequence_item(&line.content) {
                break;
            }
            self.pos += 1;
            let rest = &line.content[1..];
            let content = rest.trim();
            if content.is_empty() {
                let item = match self.peek() {
                    Some(next) if next.indent > indent => self.block(next.indent),
                    _ => ContentNode::null(),
                };
                items.push(item);
                continue;
            }
            let item_indent = indent + 1 + (rest.len() - rest.trim_start().len());
            match key_separator(content) {
                Some(colon) => {
                    let key = &content[..colon];
                    let value = content[colon + 1..].trim();
                    items.push(self.sequence_entry(indent, item_indent, key, value));
                }
                None => items.push(ContentNode::Scalar(parse_scalar(content))),
            }
        }
        ContentNode::Sequence(items)
    }

    /// A `- key: value` item, plus any further keys of the same item on the
    /// following deeper lines.
    fn sequence_entry(
        &mut self,
        dash_indent: usize,
        item_indent: usize,
        key: &str,
        value: &str,
    ) -> ContentNode {
        let mut entry = Mapping::new();
        let first = if value.is_empty() {
            self.nested_value(item_indent)
        } else {
            ContentNode::Scalar(parse_scalar(value))
        };
        entry.insert(parse_key(key), first);
        if let Some(next) = self.peek()
            && next.indent > dash_indent
        {
            entry.extend(self.mapping(next.indent));
        }
        ContentNode::Mapping(entry)
    }

    fn mapping(&mut self, indent: usize) -> Mapping {
        let mut map = Mapping::new();
        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if is_sequence_item(&line.content) {
                if line.indent == indent {
                    break;
                }
                tracing::debug!(line = line.number, "skipping list item with no owning key");
                self.pos += 1;
                continue;
            }
            self.pos += 1;
            let (key, value) = match mapping_colon(&line.content) {
                Some(colon) => (
                    &line.content[..colon],
                    line.content[colon + 1..].trim(),
                ),
                None => {
                    tracing::debug!(line = line.number, "no key separator, keeping line as a key");
                    (line.content.as_str(), "")
                }
            };
            let value = if value.is_empty() {
                self.nested_value(line.indent)
            } else {
                ContentNode::Scalar(parse_scalar(value))
            };
            map.insert(parse_key(key), value);
        }
        map
    }
}

fn is_sequence_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// Byte offsets of every `:` that is not inside a quoted substring.
fn unquoted_colons(text: &str) -> Vec<usize> {
    let mut in_single = false;
    let mut in_double = false;
    let mut found = Vec::new();
    for (idx, ch) in text.char_indices() {
        match ch {
            '"' if !in_single => in_double = !in_double,
            '\'' if !in_double => in_single = !in_single,
            ':' if !in_single && !in_double => found.push(idx),
            _ => {}
        }
    }
    found
}

fn ends_key(text: &str, colon: usize) -> bool {
    text[colon + 1..]
        .chars()
        .next()
        .is_none_or(char::is_whitespace)
}

/// Unquoted colon followed by whitespace or end of line.
fn key_separator(text: &str) -> Option<usize> {
    unquoted_colons(text)
        .into_iter()
        .find(|&colon| ends_key(text, colon))
}

/// Colon that splits a mapping line, preferring a proper `key: value`
/// separator, then any unquoted colon, then any colon at all (an unbalanced
/// quote such as an apostrophe would otherwise hide it).
fn mapping_colon(text: &str) -> Option<usize> {
    key_separator(text)
        .or_else(|| unquoted_colons(text).first().copied())
        .or_else(|| {
            let colon = text.find(':');
            if colon.is_some() {
                tracing::debug!(text, "splitting at a quoted colon");
            }
            colon
        })
}

fn parse_key(raw: &str) -> String {
    let key = raw.trim();
    unquote(key).unwrap_or_else(|| key.to_string())
}

fn unquote(value: &str) -> Option<String> {
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if value.len() < 2 || !value.ends_with(quote) {
        return None;
    }
    let inner = &value[1..value.len() - 1];
    Some(inner.replace(&format!("\\{quote}"), &quote.to_string()))
}

fn is_number(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

/// Coerce one scalar token. Order matters: null, boolean, number, quoted
/// string, raw string.
pub fn parse_scalar(raw: &str) -> Scalar {
    let value = raw.trim();
    if matches!(value, "null" | "Null" | "NULL") {
        return Scalar::Null;
    }
    if value.eq_ignore_ascii_case("true") {
        return Scalar::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return Scalar::Bool(false);
    }
    if is_number(value)
        && let Ok(number) = value.parse::<f64>()
    {
        return Scalar::Number(number);
    }
    if let Some(inner) = unquote(value) {
        return Scalar::Str(inner);
    }
    Scalar::Str(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn str_node(value: &str) -> ContentNode {
        ContentNode::string(value)
    }

    #[test]
    fn scalar_coercion_order() {
        assert_eq!(parse_scalar("null"), Scalar::Null);
        assert_eq!(parse_scalar("NULL"), Scalar::Null);
        assert_eq!(parse_scalar("nUll"), Scalar::Str("nUll".into()));
        assert_eq!(parse_scalar("TRUE"), Scalar::Bool(true));
        assert_eq!(parse_scalar("False"), Scalar::Bool(false));
        assert_eq!(parse_scalar("42"), Scalar::Number(42.0));
        assert_eq!(parse_scalar("-3.25"), Scalar::Number(-3.25));
        assert_eq!(parse_scalar("+7"), Scalar::Number(7.0));
        assert_eq!(parse_scalar("1."), Scalar::Str("1.".into()));
        assert_eq!(parse_scalar("1e5"), Scalar::Str("1e5".into()));
        assert_eq!(parse_scalar("\"42\""), Scalar::Str("42".into()));
        assert_eq!(parse_scalar("'true'"), Scalar::Str("true".into()));
        assert_eq!(parse_scalar("plain text"), Scalar::Str("plain text".into()));
    }

    #[test]
    fn quoted_scalars_unescape_their_own_quote() {
        assert_eq!(
            parse_scalar(r#""say \"hi\"""#),
            Scalar::Str("say \"hi\"".into())
        );
        assert_eq!(parse_scalar(r"'it\'s'"), Scalar::Str("it's".into()));
        assert_eq!(parse_scalar("\""), Scalar::Str("\"".into()));
        assert_eq!(parse_scalar("\"open"), Scalar::Str("\"open".into()));
    }

    #[test]
    fn colon_inside_quotes_does_not_split() {
        let doc = parse(r#"title: "Senior: Engineer""#);
        assert_eq!(doc.get("title"), Some(&str_node("Senior: Engineer")));
    }

    #[test]
    fn time_like_sequence_items_stay_scalars() {
        let doc = parse(indoc! {"
            hours:
              - 10:30
              - https://example.com
              - role: Lead
        "});
        let items = doc.get("hours").and_then(ContentNode::as_sequence).unwrap();
        assert_eq!(items[0], str_node("10:30"));
        assert_eq!(items[1], str_node("https://example.com"));
        assert_eq!(items[2].get("role"), Some(&str_node("Lead")));
    }

    #[test]
    fn empty_and_comment_only_documents_are_empty_mappings() {
        assert_eq!(parse(""), ContentNode::default());
        assert_eq!(parse("# nothing\n\n   \n"), ContentNode::default());
    }

    #[test]
    fn nested_mappings_and_sequences() {
        let doc = parse(indoc! {"
            personal_info:
              name: Alice
              location: Berlin
            interests:
              - climbing
              - chess
        "});
        assert_eq!(
            doc.path(&["personal_info", "location"]),
            Some(&str_node("Berlin"))
        );
        assert_eq!(
            doc.get("interests").map(ContentNode::string_items),
            Some(vec!["climbing".to_string(), "chess".to_string()])
        );
    }

    #[test]
    fn sequence_items_merge_following_keys() {
        let doc = parse(indoc! {"
            experience:
              - company: Acme
                role: Engineer
                achievements:
                  - Shipped things
                  - Fixed things
              - company: Globex
        "});
        let roles = doc.get("experience").and_then(ContentNode::as_sequence);
        let roles = roles.expect("sequence");
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].get("role"), Some(&str_node("Engineer")));
        assert_eq!(
            roles[0].get("achievements").map(ContentNode::string_items),
            Some(vec!["Shipped things".into(), "Fixed things".into()])
        );
        assert_eq!(roles[1].get("company"), Some(&str_node("Globex")));
    }

    #[test]
    fn item_key_with_nested_block() {
        let doc = parse(indoc! {"
            projects:
              - links:
                  - label: Repo
                    url: https://example.com/repo
                name: Desk
        "});
        let project = &doc.get("projects").and_then(ContentNode::as_sequence).expect("seq")[0];
        assert_eq!(project.get("name"), Some(&str_node("Desk")));
        let link = &project.get("links").and_then(ContentNode::as_sequence).expect("links")[0];
        assert_eq!(link.get("url"), Some(&str_node("https://example.com/repo")));
    }

    #[test]
    fn urls_in_lists_stay_scalars() {
        let doc = parse(indoc! {"
            links:
              - https://example.com
              - mailto:someone@example.com
        "});
        assert_eq!(
            doc.get("links").map(ContentNode::string_items),
            Some(vec![
                "https://example.com".to_string(),
                "mailto:someone@example.com".to_string()
            ])
        );
    }

    #[test]
    fn url_values_split_at_first_separator() {
        let doc = parse("website: https://example.com:8080/path");
        assert_eq!(
            doc.get("website"),
            Some(&str_node("https://example.com:8080/path"))
        );
    }

    #[test]
    fn sequence_at_key_column_belongs_to_key() {
        let doc = parse(indoc! {"
            tags:
            - rust
            - tui
            name: desk
        "});
        assert_eq!(
            doc.get("tags").map(ContentNode::string_items),
            Some(vec!["rust".into(), "tui".into()])
        );
        assert_eq!(doc.get("name"), Some(&str_node("desk")));
    }

    #[test]
    fn bare_dash_holds_nested_block() {
        let doc = parse(indoc! {"
            -
              name: first
            -
            - last
        "});
        let items = doc.as_sequence().expect("sequence");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].get("name"), Some(&str_node("first")));
        assert!(items[1].is_null());
        assert_eq!(items[2], str_node("last"));
    }

    #[test]
    fn tabs_count_as_two_spaces() {
        let doc = parse("contact:\n\temail: a@b.c\n  phone: 123");
        assert_eq!(doc.path(&["contact", "email"]), Some(&str_node("a@b.c")));
        assert_eq!(
            doc.path(&["contact", "phone"]).and_then(ContentNode::as_f64),
            Some(123.0)
        );
    }

    #[test]
    fn empty_value_without_children_is_null() {
        let doc = parse("avatar:\nname: Alice");
        assert_eq!(doc.get("avatar"), Some(&ContentNode::null()));
        assert_eq!(doc.get("name"), Some(&str_node("Alice")));
    }

    #[test]
    fn malformed_indentation_degrades_instead_of_failing() {
        let doc = parse(indoc! {"
            summary:
              - first
                - stray
              - second
            name: kept
        "});
        // The stray item ends the list and is skipped along with the rest of it.
        assert_eq!(
            doc.get("summary").map(ContentNode::string_items),
            Some(vec!["first".to_string()])
        );
        assert_eq!(doc.get("name"), Some(&str_node("kept")));
    }

    #[test]
    fn dedented_trailer_is_dropped() {
        let doc = parse("  a: 1\n  b: 2\nc: 3");
        let map = doc.as_mapping().expect("mapping");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn line_without_colon_becomes_null_key() {
        let doc = parse("loose words\nname: x");
        assert_eq!(doc.get("loose words"), Some(&ContentNode::null()));
        assert_eq!(doc.get("name"), Some(&str_node("x")));
    }

    #[test]
    fn unbalanced_apostrophe_still_splits() {
        let doc = parse("it's: fine");
        assert_eq!(doc.get("it's"), Some(&str_node("fine")));
    }

    #[test]
    fn quoted_keys_are_unquoted() {
        let doc = parse("\"odd: key\": value");
        assert_eq!(doc.get("odd: key"), Some(&str_node("value")));
    }

    #[test]
    fn crlf_line_endings() {
        let doc = parse("a: 1\r\nb: two\r\n");
        assert_eq!(doc.get("b"), Some(&str_node("two")));
    }
}
