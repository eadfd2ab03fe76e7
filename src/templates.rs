//! Content idea templates and the idea generator.
//!
//! Templates contain `{name}` placeholders that are filled from a topic's
//! keyword set. Each render picks one value per distinct placeholder, so a
//! placeholder used twice in a template receives the same value.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::{Error, Result};

/// Idea templates shared by every topic.
pub const IDEA_TEMPLATES: &[&str] = &[
    "Tutorial: How to {verb} with {noun}",
    "A review of {noun}",
    "My top 5 tips for {gerund}",
    "A day in the life of a {role}",
    "Behind the scenes of {activity}",
    "A common mistake to avoid when {gerund}",
    "My workflow for {activity}",
    "Deep Dive: The art of {gerund}",
    "Q&A session about {topic}",
    "Comparing {noun} vs. {noun}",
];

/// Placeholder values for one topic.
#[derive(Debug)]
pub struct TopicKeywords {
    pub topic: &'static str,
    pub verb: &'static [&'static str],
    pub noun: &'static [&'static str],
    pub gerund: &'static [&'static str],
    pub role: &'static [&'static str],
    pub activity: &'static [&'static str],
}

impl TopicKeywords {
    /// Values for a placeholder name. `{topic}` resolves to the topic itself.
    fn choices(&self, placeholder: &str) -> &[&'static str] {
        match placeholder {
            "verb" => self.verb,
            "noun" => self.noun,
            "gerund" => self.gerund,
            "role" => self.role,
            "activity" => self.activity,
            "topic" => std::slice::from_ref(&self.topic),
            _ => &[],
        }
    }
}

/// Topics with registered keyword sets.
pub const TOPIC_KEYWORDS: &[TopicKeywords] = &[
    TopicKeywords {
        topic: "DJing",
        verb: &["mix", "scratch", "beatmatch"],
        noun: &["a new controller", "Serato", "a classic track"],
        gerund: &["mixing", "beatmatching", "preparing a set"],
        role: &["DJ", "turntablist"],
        activity: &["a DJ set", "organizing my library"],
    },
    TopicKeywords {
        topic: "Music Production",
        verb: &["produce", "master", "mix"],
        noun: &["a new plugin", "Ableton Live", "a synth"],
        gerund: &["producing", "mastering", "sound design"],
        role: &["music producer", "sound engineer"],
        activity: &["a new track", "a mastering session"],
    },
    TopicKeywords {
        topic: "Quality Automation",
        verb: &["automate", "test", "debug"],
        noun: &["a new framework", "Selenium", "a test suite"],
        gerund: &["automating", "testing", "debugging"],
        role: &["QA analyst", "automation engineer"],
        activity: &["a test run", "a bug hunt"],
    },
    TopicKeywords {
        topic: "Fatherhood",
        verb: &["manage", "balance", "prepare for"],
        noun: &["a newborn", "a toddler", "family life"],
        gerund: &["parenting", "balancing work and family"],
        role: &["dad", "father"],
        activity: &["a family outing", "a bedtime routine"],
    },
    TopicKeywords {
        topic: "Cooking",
        verb: &["cook", "prepare", "grill"],
        noun: &["a new recipe", "a steak", "a cast iron pan"],
        gerund: &["cooking", "meal prepping", "grilling"],
        role: &["home cook", "chef"],
        activity: &["a dinner party", "a weekly meal prep"],
    },
];

/// Look up the keyword set for a topic (exact match).
pub fn keywords_for(topic: &str) -> Option<&'static TopicKeywords> {
    TOPIC_KEYWORDS.iter().find(|k| k.topic == topic)
}

/// Distinct placeholder names in a template, in first-use order.
fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else { break };
        let name = &after[..end];
        if !names.contains(&name) {
            names.push(name);
        }
        rest = &after[end + 1..];
    }
    names
}

/// Number of distinct ideas a topic can produce across all templates.
pub fn capacity(keywords: &TopicKeywords) -> usize {
    IDEA_TEMPLATES
        .iter()
        .map(|template| {
            placeholders(template)
                .iter()
                .map(|name| keywords.choices(name).len())
                .product::<usize>()
        })
        .sum()
}

/// Fill every placeholder with one random value per distinct name.
fn render<R: Rng + ?Sized>(template: &str, keywords: &TopicKeywords, rng: &mut R) -> String {
    placeholders(template)
        .into_iter()
        .fold(template.to_string(), |text, name| {
            let value = keywords.choices(name).choose(rng).copied().unwrap_or("");
            text.replace(&format!("{{{}}}", name), value)
        })
}

/// Generate `count` distinct ideas for `topic` in discovery order.
///
/// Fails with [`Error::NoTemplates`] for topics without a keyword set and
/// with [`Error::Exhausted`] when the request exceeds what the templates can
/// produce or `max_attempts` renders were not enough.
pub fn generate_ideas<R: Rng + ?Sized>(
    topic: &str,
    count: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    let keywords = keywords_for(topic).ok_or_else(|| Error::NoTemplates(topic.to_string()))?;

    let available = capacity(keywords);
    if count > available {
        return Err(Error::Exhausted {
            requested: count,
            produced: available,
        });
    }

    let mut seen = HashSet::new();
    let mut ideas = Vec::with_capacity(count);
    let mut attempts = 0;
    while ideas.len() < count {
        if attempts >= max_attempts {
            tracing::debug!(topic, attempts, produced = ideas.len(), "idea attempts exhausted");
            return Err(Error::Exhausted {
                requested: count,
                produced: ideas.len(),
            });
        }
        attempts += 1;

        let Some(template) = IDEA_TEMPLATES.choose(rng) else {
            break;
        };
        let idea = render(template, keywords, rng);
        if seen.insert(idea.clone()) {
            ideas.push(idea);
        }
    }

    Ok(ideas)
}
