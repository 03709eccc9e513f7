// src/services/classifier.rs

//! Occupation label to branch classification.
//!
//! Labels are matched against [`BRANCH_RULES`], an ordered table of keyword
//! rules. The first rule that matches decides the branch, so a label holding
//! keywords of two branches lands in whichever comes first in the table.
//! Several generic words ("chef", "service", "tekniker") appear in more than
//! one rule; only their earliest occurrence can ever win.
//!
//! Each rule matches on:
//! - `words`: whole words, bounded by Unicode word boundaries
//! - `fragments`: substrings anywhere in the label
//! - `phrases`: multi-word phrases, bounded by word boundaries

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Branch, JobAd};

/// Keyword rule for a single branch.
#[derive(Debug)]
pub struct BranchRule {
    pub branch: Branch,
    pub words: &'static [&'static str],
    pub fragments: &'static [&'static str],
    pub phrases: &'static [&'static str],
}

/// Classification rules in priority order. Keywords are lower-case.
pub static BRANCH_RULES: &[BranchRule] = &[
    BranchRule {
        branch: Branch::DataIt,
        words: &[
            "data", "it", "ux", "ui", "app", "web", "ai", "ml", "iot", "api",
        ],
        fragments: &[
            "utvecklare", "programmerare", "system", "frontend", "backend", "fullstack",
            "arkitekt", "analytiker", "designer", "tester", "devops", "nätverk", "support",
            "telekommunikation", "programmering", "kodning", "applikation", "mobil", "software",
            "hardware", "databas", "server", "cloud", "blockchain", "säkerhet", "konsult",
            "specialist", "expert", "tekniker", "ingenjör", "konstruktör", "utveckling",
            "forskning", "innovation", "prototyp", "testning", "kvalitet", "kontroll",
            "inspektion", "mätning", "kalibrering", "underhåll", "reparation", "service",
            "felsökning", "diagnostik", "troubleshooting", "felsökare", "chef", "manager",
            "ledare", "supervisor", "koordinator", "planerare", "schemaläggare",
        ],
        phrases: &[
            "data scientist", "data analyst", "business analyst", "cyber security",
            "information security", "quality assurance", "test engineer",
        ],
    },
    BranchRule {
        branch: Branch::Health,
        words: &[
            "hemtjänst", "funktionshinder", "psykiatri", "barnpsykiatri", "geriatri", "onkologi",
            "kardiologi", "neurologi", "ortopedi", "pediatri", "gynekologi", "anestesi", "kirurgi",
            "radiologi", "laboratorium",
        ],
        fragments: &[
            "sjuksköterska", "läkare", "vård", "undersköterska", "sjukgymnast", "medicin",
            "kurator", "psykolog", "terapeut", "barnmorska", "apotekare", "socialarbetare",
            "barnskötare", "omsorg", "logoped", "dietist", "optiker", "audionom", "röntgen",
            "operations", "sjukskrivning", "habilitering",
        ],
        phrases: &[
            "personlig assistent",
        ],
    },
    BranchRule {
        branch: Branch::Sales,
        words: &[
            "sälj", "marknads", "marknadschef", "försäljningschef", "marknadsförare",
            "produktchef", "provision", "butikschef", "butiksledare", "kundservice", "kundtjänst",
        ],
        fragments: &[
            "säljare", "marknadsföring", "manager", "account", "inköp", "handel",
        ],
        phrases: &[
            "sociala medier",
        ],
    },
    BranchRule {
        branch: Branch::Administration,
        words: &[
            "hr",
        ],
        fragments: &[
            "ekonom", "administratör", "receptionist", "sekreterare", "administration", "juridik",
            "advokat", "jurist", "redovisning", "bokföring", "personal", "controller", "revisor",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Construction,
        words: &[
            "rör", "vvs", "kök",
        ],
        fragments: &[
            "bygg", "elektriker", "installation", "anläggning", "murare", "snickare",
            "plåtslagare", "betongarbetare", "takläggare", "kakel", "isolerare", "gipsare",
            "måleri", "målar", "golv", "parkett", "hantverkare", "montör", "tekniker",
            "specialist", "expert", "konsult", "chef", "manager", "ledare", "supervisor",
            "koordinator", "planerare", "schemaläggare", "konstruktör", "arkitekt", "ingenjör",
            "utveckling", "forskning", "innovation", "prototyp", "testning", "kvalitet",
            "kontroll", "inspektion", "mätning", "kalibrering", "underhåll", "reparation",
            "service", "felsökning", "diagnostik", "troubleshooting", "felsökare",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Manufacturing,
        words: &[
            "cnc", "cad", "cam", "plc", "hmi",
        ],
        fragments: &[
            "maskin", "tillverkning", "operatör", "montör", "produktion", "industri", "fabrik",
            "kran", "bulldozer", "traktor", "hjullastare", "elektriker", "automatiker", "svarv",
            "svetsare", "plåtslagare", "plasmaskärning", "laserskärning", "vattenskärning",
            "programmering", "automatisering", "robot", "scada", "teknik", "ingenjör",
            "konstruktör", "designer", "utvecklare", "forskare", "utveckling", "forskning",
            "innovation", "patent", "uppfinning", "prototyp", "testning", "kvalitet", "kontroll",
            "inspektion", "mätning", "kalibrering", "underhåll", "reparation", "service",
            "felsökning", "diagnostik", "troubleshooting", "felsökare", "specialist", "expert",
            "konsult", "chef", "manager", "ledare", "supervisor", "koordinator", "planerare",
            "schemaläggare",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Education,
        words: &[],
        fragments: &[
            "lärare", "pedagog", "forskare", "professor", "docent", "bibliotekarie", "arkivarie",
            "kultur", "musik", "konst", "dans", "teater", "museum", "utbildning", "skola",
            "universitet", "rektor", "adjunkt", "lektor", "doktorand", "vetenskap", "akademi",
            "institut", "centrum", "laboratorium", "laboratorie", "experiment", "studie",
            "undersökning", "analys", "statistik", "rapport", "publication", "artikel", "bok",
            "tidskrift", "konferens", "seminarium", "workshop", "kurs", "utbildare", "instruktör",
            "tränare", "coach", "mentor", "handledare", "supervisor", "examinator", "bedömare",
            "granskare", "evaluator", "utvärderare",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Security,
        words: &[
            "brandkår", "kriminalinspektör",
        ],
        fragments: &[
            "polis", "säkerhet", "vakt", "brandman", "räddning", "militär", "soldat", "officer",
            "kriminalvård", "fängelse", "domare", "åklagare", "kronofogde", "tull",
            "gränsbevakning",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Transport,
        words: &[],
        fragments: &[
            "chaufför", "mekaniker", "transport", "logistik", "truck", "buss", "taxi", "fordon",
            "bil", "motor", "diesel", "garage", "verkstad", "lager", "distribution", "spedition",
            "terminal",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Service,
        words: &[
            "städ", "spa", "kök", "bartender",
        ],
        fragments: &[
            "servering", "kock", "restaurang", "hotell", "turism", "resor", "guide", "reception",
            "städare", "tvätt", "frisör", "skönhet", "massage", "nagel", "kosmetik", "wellness",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Agriculture,
        words: &[
            "trä",
        ],
        fragments: &[
            "jordbruk", "lantbruk", "miljö", "bonde", "farm", "djur", "veterinär", "trädgård",
            "landskap", "natur", "skog", "fisk", "häst", "ridning",
        ],
        phrases: &[],
    },
    BranchRule {
        branch: Branch::Arts,
        words: &[
            "webb", "tv", "marknads", "marknadsföring",
        ],
        fragments: &[
            "design", "konst", "media", "foto", "journalist", "redaktör", "grafisk", "video",
            "film", "reklam", "skådespelare", "statist", "radio", "podcast", "social",
            "copywriter", "illustratör", "animatör", "kameraman", "regissör", "producent",
            "sångare", "kompositör", "musik", "teater", "koreograf", "dans", "artist", "musei",
            "museum", "kultur", "evenemang", "event", "produktion", "redaktion", "publikation",
            "tidskrift", "magasin", "blogg", "content", "innehåll", "kreativ", "kreatör",
        ],
        phrases: &[],
    },
];

/// A classification together with the keyword that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub branch: Branch,
    pub keyword: &'static str,
}

struct CompiledRule {
    branch: Branch,
    fragments: &'static [&'static str],
    bounded: Option<Regex>,
}

impl CompiledRule {
    fn compile(rule: &BranchRule) -> Self {
        let alternatives: Vec<String> = rule
            .words
            .iter()
            .chain(rule.phrases)
            .map(|keyword| regex::escape(keyword))
            .collect();

        let bounded = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
            Some(Regex::new(&pattern).expect("escaped keyword pattern is valid"))
        };

        Self {
            branch: rule.branch,
            fragments: rule.fragments,
            bounded,
        }
    }

    fn find(&self, label: &str) -> Option<&'static str> {
        if let Some(fragment) = self.fragments.iter().find(|f| label.contains(*f)) {
            return Some(*fragment);
        }
        let found = self.bounded.as_ref()?.find(label)?;
        self.keyword_for(found.as_str())
    }

    /// Map matched text back to the static keyword it came from.
    fn keyword_for(&self, matched: &str) -> Option<&'static str> {
        BRANCH_RULES
            .iter()
            .filter(|rule| rule.branch == self.branch)
            .flat_map(|rule| rule.words.iter().chain(rule.phrases))
            .find(|keyword| **keyword == matched)
            .copied()
    }
}

static COMPILED_RULES: LazyLock<Vec<CompiledRule>> =
    LazyLock::new(|| BRANCH_RULES.iter().map(CompiledRule::compile).collect());

/// Classify an occupation label, returning the deciding keyword as well.
pub fn classify_with_reason(label: Option<&str>) -> Option<Classification> {
    let label = label?.trim();
    if label.is_empty() {
        return None;
    }
    let label = label.to_lowercase();

    COMPILED_RULES.iter().find_map(|rule| {
        rule.find(&label).map(|keyword| Classification {
            branch: rule.branch,
            keyword,
        })
    })
}

/// Classify an occupation label into a branch.
///
/// Returns `None` for missing or blank labels and for labels no rule matches.
pub fn classify(label: Option<&str>) -> Option<Branch> {
    classify_with_reason(label).map(|c| c.branch)
}

/// Classify a job ad by its occupation label.
pub fn classify_job(job: &JobAd) -> Option<Branch> {
    classify(job.occupation_label())
}

/// Whether a job belongs to one of the selected branches.
///
/// An empty selection matches every job. With a selection, jobs that cannot
/// be classified never match. Unknown branch names select nothing.
pub fn branch_matches(job: &JobAd, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let Some(branch) = classify_job(job) else {
        return false;
    };
    selected
        .iter()
        .any(|name| Branch::from_label(name) == Some(branch))
}

/// Branches in the order their rules are evaluated.
pub fn rule_order() -> impl Iterator<Item = Branch> {
    BRANCH_RULES.iter().map(|rule| rule.branch)
}
