use folio_schema::{TriviaAnswerResponse, TriviaQuestionView};

use super::GameError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub question: &'static str,
    pub choices: &'static [&'static str],
    pub answer: usize,
    pub explain: Option<&'static str>,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        question: "Where is Aayush based?",
        choices: &["Phoenix • Los Angeles", "Boston • NYC", "Seattle • Austin", "Tempe • San Diego"],
        answer: 0,
        explain: Some("Shown in the hero chip."),
    },
    Question {
        question: "Favorite build style?",
        choices: &[
            "Massive monolith first",
            "Small end-to-end slice, then polish",
            "Microservices immediately",
            "Only front-end demos",
        ],
        answer: 1,
        explain: Some("You say this across the site."),
    },
    Question {
        question: "Current study path?",
        choices: &[
            "BFA: Graphic Design",
            "BS CS & MCS Big Data Systems (accelerated)",
            "MBA: Finance",
            "Physics & Math",
        ],
        answer: 1,
        explain: None,
    },
    Question {
        question: "AI approach you prototype a lot?",
        choices: &["GANs", "RAG + Embeddings", "Transformers from scratch", "AutoML only"],
        answer: 1,
        explain: None,
    },
    Question {
        question: "Go-to starter database?",
        choices: &["MongoDB", "DynamoDB", "PostgreSQL", "Cassandra"],
        answer: 2,
        explain: None,
    },
    Question {
        question: "Cloud/tooling combo you've used?",
        choices: &[
            "Azure + Cosmos + Logic Apps",
            "AWS + Kinesis + Glue + Redshift",
            "GCP + Spanner + Bigtable",
            "On-prem Hadoop",
        ],
        answer: 1,
        explain: None,
    },
    Question {
        question: "Student investing helper project?",
        choices: &["Operational Dashboard", "AIInvestMate", "SafetyGuardian", "StockPay Insights"],
        answer: 1,
        explain: None,
    },
    Question {
        question: "What do you value more than scope?",
        choices: &["Velocity", "Polish", "Headcount", "Revenue"],
        answer: 1,
        explain: None,
    },
    Question {
        question: "CI/CD mindset?",
        choices: &[
            "YOLO to prod",
            "Only manual deploys",
            "Feature flags + short PRs + preview deploys",
            "Monthly scheduled deploys",
        ],
        answer: 2,
        explain: None,
    },
    Question {
        question: "Logging/observability stance?",
        choices: &[
            "Only print statements",
            "Log everything, no dashboards",
            "If it's not logged & monitored, it doesn't exist",
            "Rely on user reports",
        ],
        answer: 2,
        explain: None,
    },
    Question {
        question: "Frontend framework you use a lot?",
        choices: &["Svelte", "React/Next.js", "Vue", "Ember"],
        answer: 1,
        explain: None,
    },
    Question {
        question: "A tiny fun tab on your site?",
        choices: &["Music", "Games", "Gallery", "Shop"],
        answer: 1,
        explain: None,
    },
];

/// Questions without their answers.
pub fn questions() -> Vec<TriviaQuestionView> {
    QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, q)| TriviaQuestionView {
            index,
            question: q.question.to_string(),
            choices: q.choices.iter().map(|c| c.to_string()).collect(),
        })
        .collect()
}

pub fn check(question: usize, choice: usize) -> Result<TriviaAnswerResponse, GameError> {
    let q = QUESTIONS
        .get(question)
        .ok_or(GameError::UnknownQuestion(question))?;
    if choice >= q.choices.len() {
        return Err(GameError::UnknownChoice { question, choice });
    }

    let explain = match q.explain {
        Some(text) => text.to_string(),
        None => format!("Answer: {}", q.choices[q.answer]),
    };

    Ok(TriviaAnswerResponse {
        correct: choice == q.answer,
        answer: q.answer,
        explain,
    })
}

/// Number of correct picks, `picks[i]` answering question `i`. Extra picks
/// beyond the question list are ignored.
pub fn score(picks: &[usize]) -> usize {
    QUESTIONS
        .iter()
        .zip(picks)
        .filter(|(q, pick)| q.answer == **pick)
        .count()
}
