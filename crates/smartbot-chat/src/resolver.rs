//! Keyword-based reply resolution.
//!
//! Resolution runs in a fixed priority order and the first step that
//! produces a reply wins:
//!
//! 1. exact match of the normalized input against a trigger,
//! 2. first trigger (in declaration order) contained in the input,
//! 3. keyword groups, checked in the order of [`KEYWORD_GROUPS`],
//! 4. a random pick from the table's default sequence.
//!
//! Short triggers such as `"ai"` or `"hi"` match inside unrelated words
//! ("said", "machine"). That behavior is kept as-is.

use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use crate::random::{RandomSource, ThreadRandom};
use crate::table::{normalize, ResponseTable};

/// Reply for inputs that thank the bot.
pub const GRATITUDE_REPLY: &str =
    "You're welcome! I'm glad I could help. Feel free to ask me anything else!";

/// Reply for inputs that say goodbye.
pub const FAREWELL_REPLY: &str =
    "Goodbye! Thanks for trying SmartBot. Come back anytime if you have more questions!";

// =============================================================================
// Keyword groups
// =============================================================================

/// How a group's keywords must appear in the input.
#[derive(Debug, Clone, Copy)]
pub enum KeywordRule {
    /// At least one keyword is a substring of the input.
    Any(&'static [&'static str]),
    /// Every keyword is a substring of the input.
    All(&'static [&'static str]),
}

impl KeywordRule {
    fn matches(&self, input: &str) -> bool {
        match self {
            KeywordRule::Any(words) => words.iter().any(|w| input.contains(w)),
            KeywordRule::All(words) => words.iter().all(|w| input.contains(w)),
        }
    }
}

/// Where a group's reply comes from.
#[derive(Debug, Clone, Copy)]
pub enum GroupReply {
    /// The reply of a table trigger. Skipped if the table lacks it.
    Trigger(&'static str),
    /// A fixed string, independent of the table.
    Literal(&'static str),
}

/// A named heuristic checked after the table scan.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub name: &'static str,
    pub rule: KeywordRule,
    pub reply: GroupReply,
}

/// Heuristic groups in priority order.
pub static KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "greeting",
        rule: KeywordRule::Any(&["hello", "hi", "hey"]),
        reply: GroupReply::Trigger("hello"),
    },
    KeywordGroup {
        name: "identity",
        rule: KeywordRule::Any(&["smartbot", "smart bot"]),
        reply: GroupReply::Trigger("what is smartbot"),
    },
    KeywordGroup {
        name: "mechanism",
        rule: KeywordRule::All(&["how", "work"]),
        reply: GroupReply::Trigger("how does smartbot work"),
    },
    KeywordGroup {
        name: "capabilities",
        rule: KeywordRule::All(&["what", "can"]),
        reply: GroupReply::Trigger("what can you do"),
    },
    KeywordGroup {
        name: "gratitude",
        rule: KeywordRule::Any(&["thanks", "thank"]),
        reply: GroupReply::Literal(GRATITUDE_REPLY),
    },
    KeywordGroup {
        name: "farewell",
        rule: KeywordRule::Any(&["goodbye", "bye"]),
        reply: GroupReply::Literal(FAREWELL_REPLY),
    },
];

// =============================================================================
// Resolution
// =============================================================================

/// Which step produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    Exact { trigger: String },
    Substring { trigger: String },
    Keyword { group: &'static str },
    Fallback { index: usize },
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact { trigger } => write!(f, "exact:{}", trigger),
            MatchKind::Substring { trigger } => write!(f, "substring:{}", trigger),
            MatchKind::Keyword { group } => write!(f, "keyword:{}", group),
            MatchKind::Fallback { index } => write!(f, "fallback:{}", index),
        }
    }
}

/// A reply together with the step that chose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub reply: String,
    pub matched: MatchKind,
}

/// Resolves free-text input to a reply from a [`ResponseTable`].
pub struct ResponseResolver<R = ThreadRandom> {
    table: Cow<'static, ResponseTable>,
    random: R,
}

impl Default for ResponseResolver<ThreadRandom> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseResolver<ThreadRandom> {
    /// Resolver over the built-in table with the thread RNG.
    pub fn builtin() -> Self {
        Self {
            table: Cow::Borrowed(ResponseTable::builtin()),
            random: ThreadRandom,
        }
    }

    /// Resolver over a custom table with the thread RNG.
    pub fn new(table: ResponseTable) -> Self {
        Self::with_random(table, ThreadRandom)
    }
}

impl<R: RandomSource> ResponseResolver<R> {
    /// Resolver over a custom table and random source.
    pub fn with_random(table: ResponseTable, random: R) -> Self {
        Self {
            table: Cow::Owned(table),
            random,
        }
    }

    /// Resolver over the built-in table with a custom random source.
    pub fn builtin_with_random(random: R) -> Self {
        Self {
            table: Cow::Borrowed(ResponseTable::builtin()),
            random,
        }
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// Resolve input to a reply. Never fails.
    pub fn resolve(&self, raw_input: &str) -> String {
        self.resolve_detailed(raw_input).reply
    }

    /// Resolve input and report which step matched.
    pub fn resolve_detailed(&self, raw_input: &str) -> Resolution {
        let input = normalize(raw_input);
        let resolution = self.match_input(&input);
        debug!(matched = %resolution.matched, input_len = input.len(), "Resolved reply");
        resolution
    }

    fn match_input(&self, input: &str) -> Resolution {
        let table = self.table();

        if let Some(reply) = table.get(input) {
            return Resolution {
                reply: reply.to_string(),
                matched: MatchKind::Exact {
                    trigger: input.to_string(),
                },
            };
        }

        if let Some(entry) = table.entries().iter().find(|e| input.contains(&e.trigger)) {
            return Resolution {
                reply: entry.reply.clone(),
                matched: MatchKind::Substring {
                    trigger: entry.trigger.clone(),
                },
            };
        }

        for group in KEYWORD_GROUPS {
            if !group.rule.matches(input) {
                continue;
            }
            let reply = match group.reply {
                GroupReply::Literal(text) => Some(text),
                GroupReply::Trigger(trigger) => table.get(trigger),
            };
            if let Some(reply) = reply {
                return Resolution {
                    reply: reply.to_string(),
                    matched: MatchKind::Keyword { group: group.name },
                };
            }
        }

        let defaults = table.defaults();
        let index = self.random.pick(defaults.len()).min(defaults.len() - 1);
        Resolution {
            reply: defaults[index].clone(),
            matched: MatchKind::Fallback { index },
        }
    }
}

/// Resolve input against the built-in table using the thread RNG.
pub fn resolve(raw_input: &str) -> String {
    ResponseResolver::builtin().resolve(raw_input)
}
