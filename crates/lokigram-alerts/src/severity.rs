//! Severity filtering for log lines.

/// Substrings whose presence marks a line as notification-worthy.
const SEVERITY_NEEDLES: [&str; 3] = ["error", "warning", "fatal"];

/// Returns true if the line warrants a notification.
///
/// This is a deliberately crude textual test: a case-sensitive
/// substring match for `error`, `warning`, or `fatal` anywhere in the
/// line. No severity field is inspected and no word boundaries apply,
/// so `"errorless"` matches and `"ERROR"` does not. That is the policy,
/// not an oversight: it keeps the filter independent of whatever log
/// format upstream containers emit.
#[must_use]
pub fn is_notifiable(line: &str) -> bool {
    SEVERITY_NEEDLES.iter().any(|needle| line.contains(needle))
}
