use std::time::Duration;

use super::GameError;

pub const PROMPTS: &[&str] = &[
    "Ship a tiny slice end-to-end. Polish after it's useful.",
    "Make boring ETL on purpose: clear logs, predictable data, no 2am pages.",
    "Small AI tools beat giant demos. Embed, retrieve, act.",
    "Readable code > clever code. Future you is on your team.",
    "Postgres first. Add Redshift when you actually need it.",
    "Glue less, design more. Fewer moving parts, fewer bugs.",
    "Fast feedback loops win. Feature flags, preview deploys, short PRs.",
    "If it's not logged, it never happened. If it's not monitored, it never existed.",
];

const MIN_ELAPSED: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingScore {
    pub correct: usize,
    pub wpm: u32,
    /// Percent, 100 when nothing has been typed.
    pub accuracy: u32,
    pub done: bool,
}

pub fn prompt(index: usize) -> Result<&'static str, GameError> {
    PROMPTS
        .get(index)
        .copied()
        .ok_or(GameError::UnknownPrompt(index))
}

/// Counts characters that match the prompt at the same position. A word is
/// five correct characters; elapsed time is floored at one second.
pub fn score(prompt_index: usize, typed: &str, elapsed: Duration) -> Result<TypingScore, GameError> {
    let target = prompt(prompt_index)?;

    let typed_len = typed.chars().count();
    let correct = typed
        .chars()
        .zip(target.chars())
        .filter(|(a, b)| a == b)
        .count();

    let accuracy = if typed_len == 0 {
        100
    } else {
        (correct as f64 / typed_len as f64 * 100.0).round() as u32
    };

    let minutes = elapsed.max(MIN_ELAPSED).as_secs_f64() / 60.0;
    let wpm = (correct as f64 / 5.0 / minutes).round() as u32;

    Ok(TypingScore {
        correct,
        wpm,
        accuracy,
        done: typed == target,
    })
}
