use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Greeting,
    StatusQuery,
    ProjectsQuery,
    CommitQuery,
    FunQuery,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentRule {
    pub triggers: &'static [&'static str],
    pub category: IntentCategory,
}

impl IntentRule {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }
}

/// Checked top to bottom; the first rule with a trigger substring wins.
/// Matching is plain substring search, so "this" hits the greeting rule.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        triggers: &["hi", "hello"],
        category: IntentCategory::Greeting,
    },
    IntentRule {
        triggers: &["working", "now"],
        category: IntentCategory::StatusQuery,
    },
    IntentRule {
        triggers: &["project"],
        category: IntentCategory::ProjectsQuery,
    },
    IntentRule {
        triggers: &["commit"],
        category: IntentCategory::CommitQuery,
    },
    IntentRule {
        triggers: &["fun"],
        category: IntentCategory::FunQuery,
    },
];

pub fn classify(message: &str) -> IntentCategory {
    classify_with(INTENT_RULES, message)
}

pub fn classify_with(rules: &[IntentRule], message: &str) -> IntentCategory {
    let lowered = message.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .unwrap_or(IntentCategory::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table_order() {
        let order: Vec<IntentCategory> = INTENT_RULES.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                IntentCategory::Greeting,
                IntentCategory::StatusQuery,
                IntentCategory::ProjectsQuery,
                IntentCategory::CommitQuery,
                IntentCategory::FunQuery,
            ]
        );
        assert!(!order.contains(&IntentCategory::Fallback));
    }

    #[test]
    fn each_category_reachable() {
        assert_eq!(classify("Hello!"), IntentCategory::Greeting);
        assert_eq!(classify("what's up now"), IntentCategory::StatusQuery);
        assert_eq!(classify("show me a project"), IntentCategory::ProjectsQuery);
        assert_eq!(classify("last commit?"), IntentCategory::CommitQuery);
        assert_eq!(classify("tell me a fun fact"), IntentCategory::FunQuery);
    }

    #[test]
    fn falls_back_without_match() {
        assert_eq!(classify("tell me a joke"), IntentCategory::Fallback);
        assert_eq!(classify(""), IntentCategory::Fallback);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(classify("PROJECTS PLEASE"), IntentCategory::ProjectsQuery);
        assert_eq!(classify("Latest COMMIT"), IntentCategory::CommitQuery);
    }

    #[test]
    fn working_on_now_is_status() {
        assert_eq!(
            classify("what's aayush working on now"),
            IntentCategory::StatusQuery
        );
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        // "hi" inside "this" beats "project".
        assert_eq!(classify("this project"), IntentCategory::Greeting);
        // "now" beats "commit".
        assert_eq!(classify("any commit now"), IntentCategory::StatusQuery);
    }

    #[test]
    fn classify_with_custom_table() {
        const RULES: &[IntentRule] = &[IntentRule {
            triggers: &["ship"],
            category: IntentCategory::CommitQuery,
        }];
        assert_eq!(classify_with(RULES, "What did you SHIP"), IntentCategory::CommitQuery);
        assert_eq!(classify_with(RULES, "hello"), IntentCategory::Fallback);
        assert_eq!(classify_with(&[], "hello"), IntentCategory::Fallback);
    }
}
