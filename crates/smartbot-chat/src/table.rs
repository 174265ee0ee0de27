//! The knowledge table the resolver matches against.
//!
//! A [`ResponseTable`] is an ordered list of trigger phrases with one reply
//! each, plus a non-empty default sequence used when nothing matches.
//! Declaration order matters: the substring scan returns the first trigger
//! contained in the input, so short triggers such as `"ai"` must keep their
//! position relative to longer ones.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::info;

use crate::error::TableError;

/// Key reserved for the fallback sequence in serialized tables.
pub const DEFAULT_KEY: &str = "default";

// =============================================================================
// Built-in knowledge base
// =============================================================================

static BUILTIN_RESPONSES: &[(&str, &str)] = &[
    // Greetings
    ("hello", "Hello! I'm SmartBot, your AI assistant. How can I help you today?"),
    ("hi", "Hi there! I'm here to help you with any questions you might have. What would you like to know?"),
    ("hey", "Hey! Thanks for trying SmartBot. I'm powered by Gemini AI and ready to assist you."),
    // About SmartBot
    ("what is smartbot", "SmartBot is an AI-powered chatbot built with the Gemini API. I provide real-time query resolution with 50% higher accuracy than traditional chatbots, designed specifically for students and professionals."),
    ("how does smartbot work", "I use the Gemini API for natural language processing to understand your questions and provide accurate, contextual responses. My architecture includes HTML, CSS, and JavaScript for the frontend, with seamless API integration for real-time communication."),
    ("what can you do", "I can help you with a wide range of topics including:\n• Answering questions on various subjects\n• Providing explanations and tutorials\n• Helping with research and learning\n• Offering coding assistance\n• General conversation and support"),
    // Technical questions
    ("gemini api", "The Gemini API is Google's advanced AI model that powers my responses. It provides state-of-the-art natural language understanding and generation capabilities, enabling me to deliver more accurate and contextually relevant answers."),
    ("response time", "My average response time is under 2 seconds! This fast performance is achieved through optimized API calls and efficient processing of your queries."),
    ("accuracy", "I achieve over 50% higher query resolution accuracy compared to traditional chatbots, thanks to the advanced Gemini AI technology and optimized natural language processing."),
    // Educational content
    ("javascript", "JavaScript is a versatile programming language used for web development. It enables interactive web pages and is essential for frontend development. Would you like to know about specific JavaScript concepts or features?"),
    ("python", "Python is a popular programming language known for its simplicity and readability. It's widely used in data science, web development, automation, and AI. What specific Python topic would you like to explore?"),
    ("machine learning", "Machine learning is a subset of AI that enables systems to learn from data without explicit programming. It includes supervised learning, unsupervised learning, and reinforcement learning. Are you interested in a particular ML topic?"),
    ("ai", "Artificial Intelligence (AI) refers to computer systems that can perform tasks typically requiring human intelligence. This includes learning, reasoning, problem-solving, and understanding language - just like what I'm doing right now!"),
    // Study help
    ("study tips", "Here are some effective study tips:\n• Use active recall and spaced repetition\n• Break study sessions into focused chunks (Pomodoro technique)\n• Create mind maps and visual aids\n• Teach concepts to others\n• Take regular breaks and get enough sleep\n• Practice with real problems and examples"),
    ("time management", "Effective time management strategies:\n• Prioritize tasks using the Eisenhower Matrix\n• Set specific, measurable goals\n• Use time-blocking techniques\n• Eliminate distractions during work time\n• Review and adjust your schedule regularly\n• Don't forget to schedule breaks and relaxation time"),
    // Professional development
    ("career advice", "Here's some career advice:\n• Continuously learn and update your skills\n• Build a strong professional network\n• Seek feedback and mentorship\n• Set clear career goals and create action plans\n• Stay adaptable to industry changes\n• Maintain work-life balance for long-term success"),
    ("resume tips", "Resume writing tips:\n• Keep it concise (1-2 pages)\n• Use action verbs and quantify achievements\n• Tailor your resume to each job application\n• Include relevant keywords from job descriptions\n• Highlight your most relevant experience first\n• Proofread carefully for errors"),
    // Technology and coding
    ("web development", "Web development involves creating websites and web applications. It includes frontend (client-side) and backend (server-side) development. Key technologies include HTML, CSS, JavaScript, and various frameworks like React, Angular, or Vue.js. Would you like to know more about any specific aspect?"),
    ("react", "React is a JavaScript library for building user interfaces, particularly web applications. It uses a component-based architecture and virtual DOM for efficient updates. React is maintained by Facebook and is widely used for creating interactive UIs."),
    ("html", "HTML (HyperText Markup Language) is the standard markup language for creating web pages. It provides the structure and content of web pages using elements and tags. HTML works together with CSS for styling and JavaScript for interactivity."),
    ("css", "CSS (Cascading Style Sheets) is used to style and layout web pages. It controls the appearance of HTML elements including colors, fonts, spacing, and positioning. CSS enables responsive design and creates visually appealing user interfaces."),
];

static BUILTIN_DEFAULTS: &[&str] = &[
    "That's an interesting question! While I may not have specific information about that topic, I'm here to help with a wide range of subjects. Could you rephrase your question or ask about something else?",
    "I'm not entirely sure about that specific topic, but I'd be happy to help you with other questions. Feel free to ask about technology, education, career advice, or any other subject you're curious about!",
    "I don't have detailed information about that particular topic at the moment. However, I can assist you with questions about programming, AI, study tips, career advice, and many other subjects. What else would you like to know?",
    "That's outside my current knowledge base, but I'm constantly learning! I can help you with questions about web development, artificial intelligence, educational topics, and professional development. Is there anything else I can assist you with?",
];

static BUILTIN_TABLE: LazyLock<ResponseTable> = LazyLock::new(|| {
    ResponseTable::new(
        BUILTIN_RESPONSES.iter().map(|(t, r)| (t.to_string(), r.to_string())),
        BUILTIN_DEFAULTS.iter().map(|d| d.to_string()),
    )
    .expect("built-in response table is valid")
});

// =============================================================================
// ResponseTable
// =============================================================================

/// A single trigger phrase and its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub trigger: String,
    pub reply: String,
}

/// Ordered trigger table with a fallback sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    entries: Vec<Entry>,
    defaults: Vec<String>,
}

/// On-disk shape of a response table.
#[derive(Debug, Deserialize)]
struct TableFile {
    defaults: Vec<String>,
    #[serde(default)]
    responses: Vec<EntryFile>,
}

#[derive(Debug, Deserialize)]
struct EntryFile {
    trigger: String,
    reply: String,
}

impl ResponseTable {
    /// Build a table, normalizing triggers and checking the invariants.
    ///
    /// Triggers are lower-cased and trimmed. Empty, duplicate, or reserved
    /// (`"default"`) triggers are rejected, as is an empty default sequence.
    pub fn new<E, D>(entries: E, defaults: D) -> Result<Self, TableError>
    where
        E: IntoIterator<Item = (String, String)>,
        D: IntoIterator<Item = String>,
    {
        let defaults: Vec<String> = defaults.into_iter().collect();
        if defaults.is_empty() {
            return Err(TableError::EmptyDefaults);
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::new();
        for (trigger, reply) in entries {
            let trigger = normalize(&trigger);
            if trigger.is_empty() {
                return Err(TableError::EmptyTrigger);
            }
            if trigger == DEFAULT_KEY {
                return Err(TableError::ReservedTrigger);
            }
            if !seen.insert(trigger.clone()) {
                return Err(TableError::DuplicateTrigger(trigger));
            }
            normalized.push(Entry { trigger, reply });
        }

        Ok(Self {
            entries: normalized,
            defaults,
        })
    }

    /// The SmartBot knowledge base, built once per process.
    pub fn builtin() -> &'static ResponseTable {
        &BUILTIN_TABLE
    }

    /// Parse a table from TOML.
    ///
    /// ```toml
    /// defaults = ["Sorry, I don't know that one."]
    ///
    /// [[responses]]
    /// trigger = "hello"
    /// reply = "Hi!"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, TableError> {
        let file: TableFile = toml::from_str(content)?;
        Self::new(
            file.responses.into_iter().map(|e| (e.trigger, e.reply)),
            file.defaults,
        )
    }

    /// Load a table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        info!(
            triggers = table.len(),
            defaults = table.defaults.len(),
            "Response table loaded from {}",
            path.display()
        );
        Ok(table)
    }

    /// Reply for a trigger, if present.
    pub fn get(&self, trigger: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.trigger == trigger)
            .map(|e| e.reply.as_str())
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The fallback sequence. Never empty.
    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    /// Number of triggers, excluding the default sequence.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lower-case and trim, the normalization applied to triggers and queries.
///
/// A byte order mark counts as whitespace at either end.
pub fn normalize(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_lowercase()
}
