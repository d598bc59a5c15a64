//! Keyword-triggered writing advice.
//!
//! Queries are matched against an ordered rule table; the first rule whose
//! predicate accepts the query produces the response.

use std::fmt;

use crate::document::Document;

/// Response to an empty query.
pub const NO_QUERY: &str = "No query entered.";

/// A canned piece of advice: a heading followed by bullet points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    /// Introductory line.
    pub heading: String,
    /// Individual points, in display order.
    pub points: Vec<String>,
}

impl Advice {
    fn new(heading: impl Into<String>, points: &[&str]) -> Self {
        Self {
            heading: heading.into(),
            points: points.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading)?;
        for point in &self.points {
            write!(f, "\n  {point}")?;
        }
        Ok(())
    }
}

/// A query prepared for rule matching.
#[derive(Debug, Clone)]
pub struct AdviceQuery<'d> {
    lowered: String,
    character_names: Vec<&'d str>,
}

impl<'d> AdviceQuery<'d> {
    /// Prepare `query`, capturing master character names in codex order.
    pub fn new(query: &str, document: &'d Document) -> Self {
        Self {
            lowered: query.to_lowercase(),
            character_names: document
                .master
                .characters
                .iter()
                .map(|c| c.name.as_str())
                .collect(),
        }
    }

    /// Whether the lower-cased query contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lowered.contains(needle)
    }

    /// Distinct master character names occurring in the query.
    ///
    /// Order follows the master codex, not the query text.
    pub fn mentioned_characters(&self) -> Vec<&'d str> {
        let mut found: Vec<&str> = Vec::new();
        for &name in &self.character_names {
            let lowered = name.to_lowercase();
            if lowered.is_empty() || !self.lowered.contains(&lowered) {
                continue;
            }
            if !found.iter().any(|f| f.to_lowercase() == lowered) {
                found.push(name);
            }
        }
        found
    }
}

/// One entry of the advice rule table.
#[derive(Clone, Copy)]
pub struct AdviceRule {
    /// Short name, for diagnostics.
    pub name: &'static str,
    /// Whether this rule answers the query.
    pub applies: fn(&AdviceQuery<'_>) -> bool,
    /// Produce the response.
    pub respond: fn(&AdviceQuery<'_>) -> Advice,
}

impl fmt::Debug for AdviceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdviceRule").field("name", &self.name).finish()
    }
}

fn asks_about_conflict(query: &AdviceQuery<'_>) -> bool {
    query.mentions("conflict") && query.mentions("between")
}

fn conflict_ideas(query: &AdviceQuery<'_>) -> Advice {
    match query.mentioned_characters().as_slice() {
        [a, b, ..] => Advice {
            heading: format!("Possible conflicts between {a} and {b}:"),
            points: vec![
                format!(
                    "1) Clashing motivations: {a} wants X while {b} needs Y, forcing them to collide."
                ),
                "2) Past secret revealed: one holds a secret that undermines trust.".to_string(),
                "3) Resource/goal competition: both pursue the same scarce resource or position."
                    .to_string(),
                "Consider aligning conflict to your series themes for stronger cohesion."
                    .to_string(),
            ],
        },
        _ => Advice::new(
            "I couldn't identify two character names from the master codex in your query. \
             Try writing both names exactly as they appear in Master Characters.",
            &[],
        ),
    }
}

fn asks_about_stakes(query: &AdviceQuery<'_>) -> bool {
    ["escalate", "escalation", "stakes"]
        .iter()
        .any(|k| query.mentions(k))
}

fn escalation_ideas(_: &AdviceQuery<'_>) -> Advice {
    Advice::new(
        "Ways to escalate stakes:",
        &[
            "- Personal stakes: threaten what the protagonist values most (relationships, reputation, self-image).",
            "- Societal stakes: push the world toward a tipping point (war, famine, collapse).",
            "- Moral stakes: force a choice between two bad options, revealing values.",
            "- Reveal a costly secret that changes goals and alliances.",
        ],
    )
}

fn always(_: &AdviceQuery<'_>) -> bool {
    true
}

fn general_advice(_: &AdviceQuery<'_>) -> Advice {
    Advice::new(
        "General advice:",
        &["Use contrasts: pair proactive characters with reactive ones. Use consequences: \
           each choice should change the world irreversibly. If unsure, describe a scene and \
           ask again for targeted edits."],
    )
}

/// Advice rules in priority order. The last rule always applies.
pub const ADVICE_RULES: &[AdviceRule] = &[
    AdviceRule {
        name: "conflict",
        applies: asks_about_conflict,
        respond: conflict_ideas,
    },
    AdviceRule {
        name: "escalation",
        applies: asks_about_stakes,
        respond: escalation_ideas,
    },
    AdviceRule {
        name: "general",
        applies: always,
        respond: general_advice,
    },
];

impl Document {
    /// Answer a free-text question using [`ADVICE_RULES`].
    pub fn advice(&self, query: &str) -> Advice {
        let query = query.trim();
        if query.is_empty() {
            return Advice::new(NO_QUERY, &[]);
        }
        let prepared = AdviceQuery::new(query, self);
        let rule = ADVICE_RULES
            .iter()
            .find(|rule| (rule.applies)(&prepared))
            .unwrap_or(&ADVICE_RULES[ADVICE_RULES.len() - 1]);
        tracing::debug!(rule = rule.name, "advice rule selected");
        (rule.respond)(&prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codex::CharacterInput;

    fn doc_with(names: &[&str]) -> Document {
        let mut doc = Document::new();
        for name in names {
            doc.create_character(CharacterInput::new(*name, ""));
        }
        doc
    }

    #[test]
    fn empty_query_short_circuits() {
        let doc = doc_with(&[]);
        assert_eq!(doc.advice("   ").heading, NO_QUERY);
    }

    #[test]
    fn conflict_names_follow_codex_order() {
        let doc = doc_with(&["Ava", "Kade"]);
        let advice = doc.advice("What conflicts could arise between Kade and Ava?");
        assert_eq!(advice.heading, "Possible conflicts between Ava and Kade:");
        assert_eq!(advice.points.len(), 4);
        assert!(advice.points[0].contains("Ava wants X while Kade needs Y"));
    }

    #[test]
    fn conflict_needs_two_names() {
        let doc = doc_with(&["Ava", "Kade"]);
        let advice = doc.advice("Any conflict between Ava and the king?");
        assert!(advice.heading.starts_with("I couldn't identify two character names"));
        assert!(advice.points.is_empty());
    }

    #[test]
    fn duplicate_names_count_once() {
        let doc = doc_with(&["Rex", "Rex"]);
        let query = AdviceQuery::new("conflict between Rex and Rex", &doc);
        assert_eq!(query.mentioned_characters(), vec!["Rex"]);
    }

    #[test]
    fn conflict_rule_beats_escalation_rule() {
        let doc = doc_with(&["Ava", "Kade"]);
        let advice = doc.advice("Raise the stakes of the conflict between Ava and Kade");
        assert!(advice.heading.starts_with("Possible conflicts"));
    }

    #[test]
    fn escalation_rule() {
        let doc = doc_with(&[]);
        let advice = doc.advice("How can I ESCALATE things in book 2?");
        assert_eq!(advice.heading, "Ways to escalate stakes:");
        assert_eq!(advice.points.len(), 4);
    }

    #[test]
    fn general_fallback() {
        let doc = doc_with(&[]);
        assert_eq!(doc.advice("Help me with pacing").heading, "General advice:");
    }

    #[test]
    fn each_rule_predicate_in_isolation() {
        let doc = doc_with(&[]);
        let q = AdviceQuery::new("conflict between", &doc);
        assert!((ADVICE_RULES[0].applies)(&q));
        assert!(!(ADVICE_RULES[1].applies)(&q));
        assert!((ADVICE_RULES[2].applies)(&q));
    }
}
