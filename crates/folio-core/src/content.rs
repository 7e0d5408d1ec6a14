use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub summary: &'static str,
    /// Paragraphs. Empty for posts that only have a summary so far.
    pub body: &'static [&'static str],
}

/// List entry for the blog index.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PostSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub summary: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CaseStudy {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub problem: &'static [&'static str],
    pub built: &'static [&'static str],
    pub impact: &'static [&'static str],
    pub stack: &'static [&'static str],
    pub owned: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CaseSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "what-i-actually-do-when-i-build-ai",
        title: "What I actually do when I build AI stuff",
        date: "Oct 2025",
        summary: "I start small, ship a tiny end-to-end loop, and only add the fancy pieces after it's useful.",
        body: &[
            "I don't start with a big plan. I pick one thing a person should be able to do, wire it end to end, and get that working.",
            "Then I clean it up: better prompts when needed, smaller models when possible, or a simple rule if that's enough. I add logs so prod is easy to understand.",
            "Clean inputs and outputs win most days. A boring deploy I can roll back beats a clever one I can't trust. Ship a slice, learn, repeat.",
        ],
    },
    BlogPost {
        slug: "my-quick-checklist-before-i-ship",
        title: "My quick checklist before I ship",
        date: "Oct 2025",
        summary: "A short list I run through before I push: clear readme, good defaults, basic tests, simple logging, and a way to roll back fast.",
        body: &[
            "README with a one-line install and one-line run.",
            "Good defaults: sample env, seed data, local script.",
            "Basic tests for the main path and one edge case.",
            "Simple logging so I can tell what broke and where.",
            "A rollback plan, even if it's just \"revert and redeploy\".",
            "Nothing fancy. Just enough to be calm when I share the link.",
        ],
    },
    BlogPost {
        slug: "one-bug-a-day",
        title: "One bug a day",
        date: "May 2025",
        summary: "Fixing one small bug each day taught me more than any tutorial. It also made the app feel calmer.",
        body: &[],
    },
    BlogPost {
        slug: "the-day-i-deleted-half-the-code",
        title: "The day I deleted half the code",
        date: "Dec 2024",
        summary: "We kept what people used and tossed the rest. The app got faster, and so did the team.",
        body: &[],
    },
];

pub const CASE_STUDIES: &[CaseStudy] = &[
    CaseStudy {
        slug: "operational-dashboard",
        title: "Operational Dashboard",
        summary: "Full-stack sales analytics with simple 30-day forecasts. Helped the team spot trends sooner and keep decisions grounded.",
        problem: &[
            "Leads and deals lived in different places and people made decisions from stale spreadsheets.",
            "The team needed a simple view of the numbers and a light forecast that didn't get in the way.",
        ],
        built: &[
            "A small React + API setup that pulled data on a schedule and cached results for quick loads.",
            "Clear charts for pipeline, conversion, and a basic 30-day projection.",
            "Role-based access with seed data so anyone could try it locally.",
        ],
        impact: &[
            "Gave the team one reliable place to check the week and plan the next one.",
            "Reduced manual spreadsheet updates and made weekly reviews faster.",
        ],
        stack: &["React", "Spring Boot", "PostgreSQL", "Docker", "GitHub Actions"],
        owned: &["frontend UI", "API endpoints", "DB schema", "deploy", "basic tests"],
        code: Some("https://github.com/akumar2408/operationaldashboard/"),
        demo: None,
    },
    CaseStudy {
        slug: "aiinvestmate",
        title: "AIInvestMate",
        summary: "A small app that helps students try investing ideas and learn the basics in a friendly way.",
        problem: &[
            "Students wanted a safe way to try simple investing ideas without real money or complex tools.",
        ],
        built: &[
            "Next.js app with auth, saved portfolios, and quick scenario runs.",
            "Clean forms and guardrails so numbers stay sensible.",
            "Basic content to explain what the model does and doesn't do.",
        ],
        impact: &[
            "Lowered the barrier to experiment and learn.",
            "Made conversations about risk and return more concrete.",
        ],
        stack: &["Next.js", "Supabase", "TypeScript"],
        owned: &["app architecture", "auth + data model", "UI/UX", "deployment"],
        code: Some("https://github.com/akumar2408/AIInvestMate"),
        demo: Some("https://aiinvestmate.vercel.app"),
    },
    CaseStudy {
        slug: "stock-based-comp",
        title: "Stock-Based Compensation System",
        summary: "A small, reliable service for calculating stock-based comp and exporting clean reports.",
        problem: &["Finance needed a simple way to calculate stock-based comp with clean exports."],
        built: &[
            "Small service with clear inputs/outputs and predictable jobs.",
            "Basic tests and a seed script for reliable demos.",
        ],
        impact: &[
            "Cut manual time and reduced spreadsheet errors.",
            "Kept deploys smooth during busy weeks.",
        ],
        stack: &["Python", "FastAPI", "PostgreSQL", "Docker", "GitHub Actions"],
        owned: &["API design", "data model", "tests", "deployment"],
        code: Some("https://github.com/akumar2408/stock-based-comp"),
        demo: None,
    },
    CaseStudy {
        slug: "streaming-etl",
        title: "Safety Guardian: Streaming ETL",
        summary: "A steady pipeline for sensor data with simple transforms and visible errors.",
        problem: &[
            "Sensor data arrived in bursts and dashboards lagged.",
            "Ops needed a pipeline that was simple, visible, and easy to fix.",
        ],
        built: &[
            "A tiny streaming path with clear transforms and a backfill toggle.",
            "Dead-letter queue and metrics so issues were obvious.",
        ],
        impact: &[
            "Fresher data within minutes instead of hours.",
            "On-call triaged faster because logs and metrics were straightforward.",
        ],
        stack: &["AWS Kinesis", "Glue", "Redshift", "Python"],
        owned: &["ETL steps", "infra as code", "alerts", "dashboards"],
        code: None,
        demo: None,
    },
];

pub fn post_summaries() -> Vec<PostSummary> {
    POSTS
        .iter()
        .map(|p| PostSummary {
            slug: p.slug,
            title: p.title,
            date: p.date,
            summary: p.summary,
        })
        .collect()
}

pub fn find_post(slug: &str) -> Option<&'static BlogPost> {
    POSTS.iter().find(|p| p.slug == slug)
}

pub fn case_summaries() -> Vec<CaseSummary> {
    CASE_STUDIES
        .iter()
        .map(|c| CaseSummary {
            slug: c.slug,
            title: c.title,
            summary: c.summary,
        })
        .collect()
}

pub fn find_case_study(slug: &str) -> Option<&'static CaseStudy> {
    CASE_STUDIES.iter().find(|c| c.slug == slug)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub priority: f32,
    pub changefreq: &'static str,
}

/// Static pages first, then every post and case study.
pub fn sitemap_entries(site_url: &str) -> Vec<SitemapEntry> {
    let base = site_url.trim_end_matches('/');
    let entry = |path: &str, priority: f32, changefreq: &'static str| SitemapEntry {
        loc: format!("{base}{path}"),
        priority,
        changefreq,
    };

    let mut entries = vec![
        entry("/", 1.0, "weekly"),
        entry("/projects", 0.8, "monthly"),
        entry("/contact", 0.64, "yearly"),
        entry("/blog", 0.7, "weekly"),
        entry("/games", 0.5, "monthly"),
    ];
    entries.extend(
        POSTS
            .iter()
            .map(|p| entry(&format!("/blog/{}", p.slug), 0.6, "monthly")),
    );
    entries.extend(
        CASE_STUDIES
            .iter()
            .map(|c| entry(&format!("/projects/{}", c.slug), 0.6, "monthly")),
    );
    entries
}

pub fn sitemap_xml(site_url: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for e in sitemap_entries(site_url) {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{:.2}</priority>\n  </url>\n",
            escape_xml(&e.loc),
            e.changefreq,
            e.priority
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
