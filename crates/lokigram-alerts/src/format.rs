//! MarkdownV2 alert message formatting.
//!
//! Telegram's MarkdownV2 dialect treats a large set of punctuation as
//! syntactically significant; an unescaped occurrence anywhere in a
//! field corrupts rendering or gets the message rejected outright.
//! Every field value is escaped except the log line itself, which is
//! emitted verbatim inside a fenced code block.

use std::collections::HashMap;

/// Characters MarkdownV2 requires to be backslash-escaped.
const MARKDOWN_V2_SPECIALS: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes text for Telegram MarkdownV2.
///
/// Prefixes every special character with a backslash. The transform is
/// not idempotent: escaping twice doubles the backslashes, since `\`
/// itself never needs escaping but the specials it precedes do.
///
/// ```rust
/// use lokigram_alerts::escape_markdown_v2;
///
/// assert_eq!(escape_markdown_v2("a.b_c*d"), r"a\.b\_c\*d");
/// ```
#[must_use]
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIALS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders the alert body for one log entry.
///
/// Fields appear in a fixed order, each only when its source value is
/// non-empty: Level, Labels, Container, Service, the log line, File,
/// Host, IpAddress, Time. The raw label string is shown only when both
/// container and service names are empty, so the reader still gets the
/// stream's context. The log line goes into a triple-backtick block
/// unescaped; everything else passes through [`escape_markdown_v2`].
#[must_use]
pub fn format_alert(
    container_name: &str,
    service_name: &str,
    raw_labels: &str,
    labels: &HashMap<String, String>,
    line: &str,
) -> String {
    let label = |key: &str| labels.get(key).map(String::as_str).unwrap_or_default();

    let mut body = String::new();
    push_field(&mut body, "Level", label("level"));

    if container_name.is_empty() && service_name.is_empty() {
        push_field(&mut body, "Labels", raw_labels);
    }

    push_field(&mut body, "Container", container_name);
    push_field(&mut body, "Service", service_name);

    body.push_str("```\n");
    body.push_str(line);
    body.push_str("\n```\n");

    push_field(&mut body, "File", label("filename"));
    push_field(&mut body, "Host", label("host"));
    push_field(&mut body, "IpAddress", label("ip"));
    push_field(&mut body, "Time", label("time"));

    body
}

/// Appends `*Name:* `value`` with an escaped value, skipping empties.
fn push_field(body: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    body.push('*');
    body.push_str(name);
    body.push_str(":* `");
    body.push_str(&escape_markdown_v2(value));
    body.push_str("`\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    mod escaping {
        use super::*;
        use test_case::test_case;

        #[test]
        fn escapes_every_special_character() {
            let input = "_*[]()~`>#+-=|{}.!";
            let escaped = escape_markdown_v2(input);

            assert_eq!(
                escaped,
                r"\_\*\[\]\(\)\~\`\>\#\+\-\=\|\{\}\.\!"
            );
        }

        #[test_case("a.b_c*d", r"a\.b\_c\*d"; "mixed specials")]
        #[test_case("plain text", "plain text"; "nothing to escape")]
        #[test_case("", ""; "empty input")]
        #[test_case("10.0.0.2", r"10\.0\.0\.2"; "dotted ip")]
        fn escape_cases(input: &str, expected: &str) {
            assert_eq!(escape_markdown_v2(input), expected);
        }

        #[test]
        fn double_escaping_doubles_backslashes() {
            let once = escape_markdown_v2("a.b");
            let twice = escape_markdown_v2(&once);

            assert_eq!(once, r"a\.b");
            assert_eq!(twice, r"a\\.b");
        }

        mod properties {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                #[test]
                fn output_never_contains_unescaped_specials(text in ".*") {
                    let escaped = escape_markdown_v2(&text);
                    let chars: Vec<char> = escaped.chars().collect();
                    for (i, c) in chars.iter().enumerate() {
                        if MARKDOWN_V2_SPECIALS.contains(c) {
                            prop_assert_eq!(chars.get(i.wrapping_sub(1)), Some(&'\\'));
                        }
                    }
                }
            }
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn fields_appear_in_fixed_order() {
            let labels = labels(&[
                ("level", "error"),
                ("filename", "/var/log/app.log"),
                ("host", "node-1"),
                ("ip", "10.0.0.2"),
                ("time", "2024-01-01"),
            ]);

            let body = format_alert("web", "api", "{raw}", &labels, "error: boom");

            let order = [
                "*Level:*",
                "*Container:*",
                "*Service:*",
                "```",
                "*File:*",
                "*Host:*",
                "*IpAddress:*",
                "*Time:*",
            ];
            let mut last = 0;
            for marker in order {
                let at = body[last..]
                    .find(marker)
                    .unwrap_or_else(|| panic!("{marker} missing or out of order in {body}"));
                last += at + marker.len();
            }
        }

        #[test]
        fn empty_fields_are_omitted() {
            let body = format_alert("web", "", "{raw}", &HashMap::new(), "fatal");

            assert!(!body.contains("*Level:*"));
            assert!(!body.contains("*Service:*"));
            assert!(!body.contains("*File:*"));
            assert!(body.contains("*Container:* `web`"));
        }

        #[test]
        fn raw_labels_shown_only_when_container_and_service_are_empty() {
            let with_names = format_alert("web", "api", "{raw}", &HashMap::new(), "fatal");
            let service_only = format_alert("", "api", "{raw}", &HashMap::new(), "fatal");
            let nameless = format_alert("", "", r#"{job="x"}"#, &HashMap::new(), "fatal");

            assert!(!with_names.contains("*Labels:*"));
            assert!(!service_only.contains("*Labels:*"));
            assert!(nameless.contains(r#"*Labels:* `\{job\="x"\}`"#));
        }

        #[test]
        fn line_is_fenced_and_verbatim() {
            let body = format_alert("web", "", "", &HashMap::new(), "error: *cpu* at 99.9%!");

            // The line keeps its MarkdownV2 metacharacters untouched.
            assert!(body.contains("```\nerror: *cpu* at 99.9%!\n```\n"));
        }

        #[test]
        fn field_values_are_escaped() {
            let labels = labels(&[("level", "error.high")]);
            let body = format_alert("web-1", "", "", &labels, "x");

            assert!(body.contains(r"*Level:* `error\.high`"));
            assert!(body.contains(r"*Container:* `web\-1`"));
        }

        #[test]
        fn line_alone_still_produces_a_body() {
            let body = format_alert("", "", "", &HashMap::new(), "warning");

            assert_eq!(body, "```\nwarning\n```\n");
        }
    }
}
