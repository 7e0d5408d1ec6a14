use folio_schema::StackGuessResponse;

pub const STACK: &[&str] = &[
    "Python",
    "TypeScript",
    "JavaScript",
    "SQL",
    "Go",
    "C#",
    "React",
    "Next.js",
    "Django",
    "FastAPI",
    "Spring Boot",
    "React Native",
    "Tailwind",
    "AWS",
    "Vercel",
    "Supabase",
    "Azure",
    "PostgreSQL",
    "Redshift",
    "Docker",
    "Terraform",
    "GitHub Actions",
    "Kinesis",
    "Glue",
];

const HINTS: &[(&str, &str)] = &[
    ("Next.js", "Meta-framework on top of React."),
    ("FastAPI", "Lightning-fast Python APIs."),
    ("Spring Boot", "Java framework that just runs."),
    ("Redshift", "Columnar warehouse from AWS."),
    ("Kinesis", "AWS stream firehose."),
    ("Glue", "Serverless ETL from AWS."),
];

pub const START_HINT: &str = "Type a tech and press Enter.";
pub const MISS_HINT: &str = "Nope, try another!";

/// Trimmed, lowercase, all whitespace removed: "Spring  boot " == "springboot".
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn lookup(guess: &str) -> Option<&'static str> {
    let wanted = normalize(guess);
    if wanted.is_empty() {
        return None;
    }
    STACK.iter().copied().find(|item| normalize(item) == wanted)
}

pub fn hint_for(item: &str) -> Option<&'static str> {
    HINTS
        .iter()
        .find(|(name, _)| *name == item)
        .map(|(_, hint)| *hint)
}

/// Scores one guess against the items the player already found. Unknown
/// names in `found` are dropped; a repeat guess counts as a miss.
pub fn guess(raw: &str, found: &[String]) -> StackGuessResponse {
    let mut found: Vec<String> = STACK
        .iter()
        .filter(|item| found.iter().any(|f| lookup(f) == Some(**item)))
        .map(|item| item.to_string())
        .collect();

    let (matched, hint) = if normalize(raw).is_empty() {
        (None, START_HINT.to_string())
    } else {
        match lookup(raw) {
            Some(item) if !found.iter().any(|f| f == item) => {
                found.push(item.to_string());
                let hint = match hint_for(item) {
                    Some(h) => format!("✅ {item}: {h}"),
                    None => format!("✅ {item}"),
                };
                (Some(item.to_string()), hint)
            }
            _ => (None, MISS_HINT.to_string()),
        }
    };

    let remaining = STACK.len() - found.len();
    StackGuessResponse {
        matched,
        hint,
        found,
        remaining,
        done: remaining == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_four_items_with_hints_in_stack() {
        assert_eq!(STACK.len(), 24);
        for (name, _) in HINTS {
            assert!(STACK.contains(name), "{name}");
        }
    }

    #[test]
    fn normalize_ignores_case_and_spaces() {
        assert_eq!(normalize("  Spring  Boot "), "springboot");
        assert_eq!(lookup("github actions"), Some("GitHub Actions"));
        assert_eq!(lookup("NEXT.JS"), Some("Next.js"));
        assert_eq!(lookup("next"), None);
        assert_eq!(lookup("   "), None);
    }

    #[test]
    fn hit_with_hint() {
        let resp = guess("kinesis", &[]);
        assert_eq!(resp.matched.as_deref(), Some("Kinesis"));
        assert_eq!(resp.hint, "✅ Kinesis: AWS stream firehose.");
        assert_eq!(resp.found, vec!["Kinesis".to_string()]);
        assert_eq!(resp.remaining, 23);
        assert!(!resp.done);
    }

    #[test]
    fn hit_without_hint() {
        let resp = guess("docker", &[]);
        assert_eq!(resp.hint, "✅ Docker");
    }

    #[test]
    fn repeat_and_unknown_are_misses() {
        let found = vec!["Docker".to_string()];
        let repeat = guess("DOCKER", &found);
        assert_eq!(repeat.matched, None);
        assert_eq!(repeat.hint, MISS_HINT);
        assert_eq!(repeat.found, found);

        let unknown = guess("cobol", &found);
        assert_eq!(unknown.hint, MISS_HINT);
        assert_eq!(unknown.remaining, 23);
    }

    #[test]
    fn empty_guess_changes_nothing() {
        let resp = guess("  ", &["Go".to_string()]);
        assert_eq!(resp.hint, START_HINT);
        assert_eq!(resp.remaining, 23);
    }

    #[test]
    fn bogus_found_entries_are_dropped() {
        let resp = guess("aws", &["Go".into(), "go".into(), "Fortran".into()]);
        assert_eq!(resp.found, vec!["Go".to_string(), "AWS".to_string()]);
        assert_eq!(resp.remaining, 22);
    }

    #[test]
    fn last_item_finishes() {
        let found: Vec<String> = STACK.iter().skip(1).map(|s| s.to_string()).collect();
        let resp = guess("python", &found);
        assert!(resp.done);
        assert_eq!(resp.remaining, 0);
    }
}
