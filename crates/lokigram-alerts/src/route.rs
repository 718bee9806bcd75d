//! Channel routing.
//!
//! A [`Router`] is an immutable snapshot of the configured rules plus
//! the process-wide default destination. It is built once at startup
//! and shared read-only; a future reload would swap the whole snapshot
//! rather than mutate it in place.

/// A configured routing rule.
#[derive(Debug, Clone)]
pub struct ChannelRule {
    /// Human-readable rule name, used only for logging.
    pub name: String,
    /// Substring matched against a stream's container or service name.
    pub needle: String,
    /// Bot token for this rule's destination. Empty means "use default".
    pub token: String,
    /// Chat id for this rule's destination. Zero means "use default".
    pub chat_id: i64,
}

/// A resolved notification target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Telegram bot token.
    pub token: String,
    /// Telegram chat identifier.
    pub chat_id: i64,
}

/// Routes streams to destinations by first-match-wins needle rules.
#[derive(Debug, Clone)]
pub struct Router {
    rules: Vec<ChannelRule>,
    default: Destination,
}

impl Router {
    /// Creates a router from a rule list and the default destination.
    ///
    /// Rule order is significant: the first matching rule wins.
    #[must_use]
    pub fn new(rules: Vec<ChannelRule>, default: Destination) -> Self {
        Self { rules, default }
    }

    /// Resolves the destination for a stream.
    ///
    /// `container_name` and `service_name` are the stream's routing
    /// labels, empty when absent. The first rule whose needle is a
    /// substring of either wins. No match, or a matched rule carrying
    /// empty credentials, resolves to the default destination, so every
    /// stream is always routable.
    #[must_use]
    pub fn resolve(&self, container_name: &str, service_name: &str) -> Destination {
        for rule in &self.rules {
            if container_name.contains(&rule.needle) || service_name.contains(&rule.needle) {
                // Matching a rule with unset credentials does not fall
                // through to later rules; it goes straight to default.
                if rule.token.is_empty() || rule.chat_id == 0 {
                    break;
                }
                return Destination {
                    token: rule.token.clone(),
                    chat_id: rule.chat_id,
                };
            }
        }
        self.default.clone()
    }

    /// The default destination used when no rule matches.
    #[must_use]
    pub fn default_destination(&self) -> &Destination {
        &self.default
    }

    /// Number of configured rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(token: &str, chat_id: i64) -> Destination {
        Destination {
            token: token.to_string(),
            chat_id,
        }
    }

    fn rule(needle: &str, token: &str, chat_id: i64) -> ChannelRule {
        ChannelRule {
            name: format!("rule-{needle}"),
            needle: needle.to_string(),
            token: token.to_string(),
            chat_id,
        }
    }

    #[test]
    fn matching_container_name_routes_to_rule() {
        let router = Router::new(vec![rule("auth", "111:aaa", 10)], dest("999:zzz", 99));

        assert_eq!(router.resolve("auth-service", ""), dest("111:aaa", 10));
    }

    #[test]
    fn matching_service_name_routes_to_rule() {
        let router = Router::new(vec![rule("auth", "111:aaa", 10)], dest("999:zzz", 99));

        assert_eq!(router.resolve("", "auth_worker"), dest("111:aaa", 10));
    }

    #[test]
    fn no_labels_routes_to_default() {
        let router = Router::new(vec![rule("auth", "111:aaa", 10)], dest("999:zzz", 99));

        assert_eq!(router.resolve("", ""), dest("999:zzz", 99));
    }

    #[test]
    fn no_match_routes_to_default() {
        let router = Router::new(vec![rule("auth", "111:aaa", 10)], dest("999:zzz", 99));

        assert_eq!(router.resolve("billing", "billing"), dest("999:zzz", 99));
    }

    #[test]
    fn first_matching_rule_wins() {
        let router = Router::new(
            vec![rule("api", "111:aaa", 10), rule("api-gateway", "222:bbb", 20)],
            dest("999:zzz", 99),
        );

        assert_eq!(router.resolve("api-gateway", ""), dest("111:aaa", 10));
    }

    #[test]
    fn matched_rule_with_empty_token_falls_back_to_default() {
        let router = Router::new(vec![rule("auth", "", 10)], dest("999:zzz", 99));

        assert_eq!(router.resolve("auth", ""), dest("999:zzz", 99));
    }

    #[test]
    fn matched_rule_with_zero_chat_id_falls_back_to_default() {
        let router = Router::new(vec![rule("auth", "111:aaa", 0)], dest("999:zzz", 99));

        assert_eq!(router.resolve("auth", ""), dest("999:zzz", 99));
    }

    #[test]
    fn unset_credentials_do_not_fall_through_to_later_rules() {
        // The first match decides, even when it forces the default.
        let router = Router::new(
            vec![rule("auth", "", 0), rule("auth", "222:bbb", 20)],
            dest("999:zzz", 99),
        );

        assert_eq!(router.resolve("auth", ""), dest("999:zzz", 99));
    }

    #[test]
    fn empty_needle_matches_everything() {
        let router = Router::new(vec![rule("", "111:aaa", 10)], dest("999:zzz", 99));

        assert_eq!(router.resolve("anything", ""), dest("111:aaa", 10));
    }

    #[test]
    fn no_rules_always_resolves_default() {
        let router = Router::new(Vec::new(), dest("999:zzz", 99));

        assert_eq!(router.resolve("auth", "auth"), dest("999:zzz", 99));
        assert_eq!(router.rule_count(), 0);
    }
}
