use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Domain-specific contradiction: fires when the claim matches
/// `claim_pattern` and the retrieved article text matches `evidence_pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContradictionRule {
    pub name: String,
    pub claim_pattern: String,
    pub evidence_pattern: String,
    pub reason: String,
}

pub fn default_rules() -> Vec<ContradictionRule> {
    vec![ContradictionRule {
        name: "obama-nationality".into(),
        claim_pattern: r"(?is)\bobama\b.*\b(?:kenyan|born in kenya|not (?:an? )?(?:american|us citizen))\b".into(),
        evidence_pattern: r"(?i)\b(?:born in honolulu|honolulu, hawaii|american politician)\b".into(),
        reason: "Barack Obama was born in Honolulu, Hawaii, and is a natural-born United States citizen".into(),
    }]
}

struct CompiledRule {
    rule: ContradictionRule,
    claim: Regex,
    evidence: Regex,
}

pub struct ContradictionRules {
    compiled: Vec<CompiledRule>,
}

impl ContradictionRules {
    pub fn compile(rules: &[ContradictionRule]) -> Result<Self, ConfigError> {
        let compile = |rule: &ContradictionRule, pattern: &str| {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { rule: rule.name.clone(), source })
        };
        let compiled = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    claim: compile(rule, &rule.claim_pattern)?,
                    evidence: compile(rule, &rule.evidence_pattern)?,
                    rule: rule.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { compiled })
    }

    pub fn first_match(&self, claim: &str, evidence: &str) -> Option<&ContradictionRule> {
        self.compiled
            .iter()
            .find(|c| c.claim.is_match(claim) && c.evidence.is_match(evidence))
            .map(|c| &c.rule)
    }
}

impl Default for ContradictionRules {
    fn default() -> Self {
        Self::compile(&default_rules()).expect("built-in contradiction rules compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTRO: &str = "Barack Hussein Obama II is an American politician who served as the 44th \
        president of the United States. Born in Honolulu, Hawaii, Obama graduated from Columbia University.";

    #[test]
    fn nationality_rule_fires_on_both_matches() {
        let rules = ContradictionRules::default();
        let hit = rules.first_match("Obama is secretly Kenyan, insiders say", INTRO).unwrap();
        assert_eq!(hit.name, "obama-nationality");
    }

    #[test]
    fn rule_needs_matching_evidence() {
        let rules = ContradictionRules::default();
        assert!(rules.first_match("Obama is Kenyan", "Kenya is a country in East Africa.").is_none());
        assert!(rules.first_match("Obama visited Kenya in 2015", INTRO).is_none());
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let bad = ContradictionRule {
            name: "broken".into(),
            claim_pattern: "(unclosed".into(),
            evidence_pattern: ".*".into(),
            reason: "n/a".into(),
        };
        let err = ContradictionRules::compile(&[bad]).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidPattern { ref rule, .. } if rule == "broken"));
    }
}
