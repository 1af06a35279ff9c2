//! Heuristic rule tables
//!
//! Each table is ordered data. Relationship and reason take the first rule
//! that matches anywhere in the text (table order, not text position);
//! sector keeps every matching label; deal size is first-match-wins with
//! numeric extraction; urgency checks tiers in priority order.

use regex::Regex;
use std::sync::LazyLock;

use super::Urgency;

/// A pattern mapped to a fixed label
pub struct LabelRule {
    pub pattern: Regex,
    pub label: &'static str,
}

fn label_rules(table: &[(&str, &'static str)]) -> Vec<LabelRule> {
    table
        .iter()
        .map(|&(pattern, label)| LabelRule {
            pattern: Regex::new(pattern).unwrap(),
            label,
        })
        .collect()
}

pub static RELATIONSHIP_RULES: LazyLock<Vec<LabelRule>> = LazyLock::new(|| {
    label_rules(&[
        (r"(?i)my (?:good )?friend", "Friend"),
        (r"(?i)close friend", "Close friend"),
        (r"(?i)former colleague", "Former colleague"),
        (r"(?i)ex[-\s]?colleague", "Former colleague"),
        (r"(?i)colleague", "Colleague"),
        (r"(?i)coworker|co-worker", "Coworker"),
        (r"(?i)my (?:former )?boss", "Former boss"),
        (r"(?i)investor I (?:met|know)", "Investor contact"),
        (r"(?i)met (?:at|during|in)", "Met at event"),
        (r"(?i)introduced by", "Referred by someone"),
        (r"(?i)referral from", "Referral"),
        (r"(?i)my partner", "Business partner"),
        (r"(?i)business partner", "Business partner"),
        (r"(?i)client", "Client"),
        (r"(?i)founder of", "Founder"),
        (r"(?i)CEO of|CTO of|CFO of", "Executive"),
        (r"(?i)works at|working at", "Works at company"),
        (r"(?i)family", "Family connection"),
        (r"(?i)classmate", "Classmate"),
        (r"(?i)alumni", "Alumni"),
        (r"(?i)mentor", "Mentor"),
        (r"(?i)advisor", "Advisor"),
    ])
});

pub static REASON_RULES: LazyLock<Vec<LabelRule>> = LazyLock::new(|| {
    label_rules(&[
        (r"(?i)looking for funding", "Seeking funding"),
        (r"(?i)raising (?:a )?(?:round|capital|money)", "Raising capital"),
        (r"(?i)fundrais(?:e|ing)", "Fundraising"),
        (r"(?i)seeking investment", "Seeking investment"),
        (r"(?i)wants to connect", "Networking"),
        (r"(?i)potential LP", "Potential LP"),
        (r"(?i)potential investor", "Potential investor"),
        (r"(?i)interested in (?:our|the) fund", "Fund interest"),
        (r"(?i)deal flow", "Deal flow"),
        (r"(?i)co-invest", "Co-investment opportunity"),
        (r"(?i)partnership", "Partnership opportunity"),
        (r"(?i)hiring|looking to hire", "Hiring"),
        (r"(?i)job opportunity", "Job opportunity"),
        (r"(?i)should meet|worth meeting", "Recommended meeting"),
        (r"(?i)intro(?:duction)?", "Introduction request"),
        (r"(?i)check (?:this|them) out", "Review recommended"),
        (r"(?i)great company", "Company recommendation"),
        (r"(?i)interesting (?:company|startup|opportunity)", "Interesting opportunity"),
        (r"(?i)portfolio company", "Portfolio company"),
        (r"(?i)acquisition target", "Acquisition target"),
        (r"(?i)exit(?:ing|ed)?", "Exit-related"),
        (r"(?i)selling", "Selling"),
        (r"(?i)buying", "Buying"),
        (r"(?i)due diligence", "Due diligence"),
    ])
});

pub static SECTOR_RULES: LazyLock<Vec<LabelRule>> = LazyLock::new(|| {
    label_rules(&[
        (r"(?i)fintech", "Fintech"),
        (r"(?i)healthtech|health tech|healthcare", "Healthtech"),
        (r"(?i)edtech|ed tech|education", "Edtech"),
        (r"(?i)proptech|prop tech|real estate tech", "Proptech"),
        (r"(?i)climate tech|cleantech|clean tech", "Climate Tech"),
        (r"(?i)(?:artificial intelligence|AI|machine learning|ML)", "AI/ML"),
        (r"(?i)saas", "SaaS"),
        (r"(?i)b2b", "B2B"),
        (r"(?i)b2c", "B2C"),
        (r"(?i)marketplace", "Marketplace"),
        (r"(?i)e-?commerce", "E-commerce"),
        (r"(?i)crypto|blockchain|web3", "Crypto/Web3"),
        (r"(?i)biotech|bio tech", "Biotech"),
        (r"(?i)deep tech", "Deep Tech"),
        (r"(?i)enterprise", "Enterprise"),
        (r"(?i)consumer", "Consumer"),
        (r"(?i)mobile", "Mobile"),
        (r"(?i)gaming", "Gaming"),
        (r"(?i)media|content", "Media/Content"),
        (r"(?i)logistics|supply chain", "Logistics"),
        (r"(?i)food tech|foodtech", "Foodtech"),
        (r"(?i)insur(?:ance)?tech", "Insurtech"),
        (r"(?i)legal tech|legaltech", "Legaltech"),
        (r"(?i)hr tech|hrtech", "HR Tech"),
        (r"(?i)devtools|developer tools", "Developer Tools"),
        (r"(?i)security|cybersecurity", "Security"),
        (r"(?i)infrastructure", "Infrastructure"),
        (r"(?i)data", "Data"),
    ])
});

/// How a deal-size rule turns a match into a label
pub enum DealSize {
    /// Capture group 1 is a number of millions, scaled by the multiplier
    Amount { multiplier: f64 },
    /// Fixed stage label
    Stage(&'static str),
}

pub struct DealSizeRule {
    pub pattern: Regex,
    pub size: DealSize,
}

pub static DEAL_SIZE_RULES: LazyLock<Vec<DealSizeRule>> = LazyLock::new(|| {
    let amount = |pattern: &str, multiplier: f64| DealSizeRule {
        pattern: Regex::new(pattern).unwrap(),
        size: DealSize::Amount { multiplier },
    };
    let stage = |pattern: &str, label: &'static str| DealSizeRule {
        pattern: Regex::new(pattern).unwrap(),
        size: DealSize::Stage(label),
    };

    vec![
        amount(r"(?i)\$\s*([0-9]+(?:\.[0-9]+)?)\s*[Mm](?:illion|M|m)?", 1.0),
        amount(r"(?i)\$\s*([0-9]+(?:\.[0-9]+)?)\s*[Bb](?:illion|B|b)?", 1000.0),
        amount(
            r"(?i)([0-9]+(?:\.[0-9]+)?)\s*[Mm](?:illion|M|m)?\s*(?:round|raise|raising)",
            1.0,
        ),
        stage(r"(?i)pre-?seed", "Pre-seed"),
        stage(r"(?i)seed(?:\s*round)?", "Seed"),
        stage(r"(?i)series\s*A", "Series A"),
        stage(r"(?i)series\s*B", "Series B"),
        stage(r"(?i)series\s*C", "Series C"),
        stage(r"(?i)growth(?:\s*round)?", "Growth"),
        stage(r"(?i)bridge(?:\s*round)?", "Bridge"),
        stage(r"(?i)series\s*[A-F]", "Series round"),
    ]
});

fn patterns(table: &[&str]) -> Vec<Regex> {
    table.iter().map(|p| Regex::new(p).unwrap()).collect()
}

/// Urgency tiers in priority order
pub static URGENCY_TIERS: LazyLock<Vec<(Urgency, Vec<Regex>)>> = LazyLock::new(|| {
    vec![
        (
            Urgency::Hot,
            patterns(&[
                r"(?i)urgent",
                r"(?i)ASAP",
                r"(?i)time sensitive",
                r"(?i)hot intro",
                r"(?i)hot deal",
                r"(?i)closing soon",
                r"(?i)deadline",
                r"(?i)immediately",
                r"(?i)today",
                r"(?i)now",
                r"(?i)priority",
                r"!{2,}",
                r"(?i)please.*?asap",
                r"URGENT",
                r"HOT",
            ]),
        ),
        (
            Urgency::Warm,
            patterns(&[
                r"(?i)when you (?:can|get a chance)",
                r"(?i)soon",
                r"(?i)this week",
                r"(?i)interested",
                r"(?i)would be great",
                r"(?i)should connect",
                r"(?i)worth a look",
                r"(?i)check it out",
                r"(?i)important",
            ]),
        ),
        (
            Urgency::Cold,
            patterns(&[
                r"(?i)whenever",
                r"(?i)no rush",
                r"(?i)fyi",
                r"(?i)for your info",
                r"(?i)just sharing",
                r"(?i)thought you.d like",
                r"(?i)might be interesting",
                r"(?i)keep in mind",
            ]),
        ),
    ]
});

/// Label of the first rule, in table order, that matches anywhere in `text`
pub fn first_label(text: &str, rules: &[LabelRule]) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.label)
}

/// Labels of every matching rule, in table order, without repeats
pub fn all_labels(text: &str, rules: &[LabelRule]) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for rule in rules {
        if rule.pattern.is_match(text) && !labels.contains(&rule.label) {
            labels.push(rule.label);
        }
    }
    labels
}

/// Deal size of the first matching rule. Amounts render as `$<n>M`.
pub fn deal_size(text: &str) -> Option<String> {
    DEAL_SIZE_RULES.iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        match rule.size {
            DealSize::Amount { multiplier } => {
                let millions: f64 = caps.get(1)?.as_str().parse().ok()?;
                Some(format!("${}M", millions * multiplier))
            }
            DealSize::Stage(label) => Some(label.to_string()),
        }
    })
}

/// First tier with any matching indicator; warm when nothing matches
pub fn urgency(text: &str) -> Urgency {
    URGENCY_TIERS
        .iter()
        .find(|(_, indicators)| indicators.iter().any(|p| p.is_match(text)))
        .map(|(tier, _)| *tier)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_compile() {
        assert_eq!(RELATIONSHIP_RULES.len(), 22);
        assert_eq!(REASON_RULES.len(), 24);
        assert_eq!(SECTOR_RULES.len(), 28);
        assert_eq!(DEAL_SIZE_RULES.len(), 11);
        assert_eq!(URGENCY_TIERS.len(), 3);
    }

    #[test]
    fn test_relationship_uses_table_order() {
        // "colleague" occurs first in the text, but "my friend" is earlier in the table
        let text = "a colleague of mine, and also my friend";
        assert_eq!(first_label(text, &RELATIONSHIP_RULES), Some("Friend"));
    }

    #[test]
    fn test_former_colleague_beats_colleague() {
        assert_eq!(
            first_label("my ex-colleague from Stripe", &RELATIONSHIP_RULES),
            Some("Former colleague")
        );
    }

    #[test]
    fn test_relationship_rules_one_by_one() {
        let cases = [
            ("close friend of the family", "Close friend"),
            ("coworker at Acme", "Coworker"),
            ("my former boss", "Former boss"),
            ("an investor I met last year", "Investor contact"),
            ("we met at Web Summit", "Met at event"),
            ("introduced by Sam", "Referred by someone"),
            ("referral from Sam", "Referral"),
            ("business partner", "Business partner"),
            ("a client", "Client"),
            ("founder of Acme", "Founder"),
            ("CTO of Acme", "Executive"),
            ("works at Acme", "Works at company"),
            ("classmate", "Classmate"),
            ("alumni network", "Alumni"),
            ("mentor", "Mentor"),
            ("advisor", "Advisor"),
        ];
        for (text, label) in cases {
            assert_eq!(first_label(text, &RELATIONSHIP_RULES), Some(label), "{}", text);
        }
    }

    #[test]
    fn test_reason_rules() {
        assert_eq!(
            first_label("they are raising a round", &REASON_RULES),
            Some("Raising capital")
        );
        assert_eq!(
            first_label("Check this out, need intro", &REASON_RULES),
            Some("Introduction request")
        );
        assert_eq!(first_label("potential LP", &REASON_RULES), Some("Potential LP"));
        assert_eq!(first_label("hello", &REASON_RULES), None);
    }

    #[test]
    fn test_sector_keeps_all_matches() {
        assert_eq!(
            all_labels("fintech SaaS for B2B payments", &SECTOR_RULES),
            vec!["Fintech", "SaaS", "B2B"]
        );
        assert!(all_labels("hello", &SECTOR_RULES).is_empty());
    }

    #[test]
    fn test_deal_size_amounts() {
        assert_eq!(deal_size("raising at $1.5B"), Some("$1500M".to_string()));
        assert_eq!(deal_size("a $3M seed"), Some("$3M".to_string()));
        assert_eq!(deal_size("$ 2.5 million"), Some("$2.5M".to_string()));
        assert_eq!(deal_size("doing a 4M round"), Some("$4M".to_string()));
    }

    #[test]
    fn test_deal_size_amount_beats_stage() {
        assert_eq!(deal_size("Series A at $12M"), Some("$12M".to_string()));
    }

    #[test]
    fn test_deal_size_stages() {
        assert_eq!(deal_size("pre-seed stage"), Some("Pre-seed".to_string()));
        assert_eq!(deal_size("seed round"), Some("Seed".to_string()));
        assert_eq!(deal_size("Series B"), Some("Series B".to_string()));
        assert_eq!(deal_size("Series E"), Some("Series round".to_string()));
        assert_eq!(deal_size("bridge round"), Some("Bridge".to_string()));
        assert_eq!(deal_size("growth equity"), Some("Growth".to_string()));
        assert_eq!(deal_size("hello"), None);
    }

    #[test]
    fn test_urgency_tiers() {
        assert_eq!(urgency("urgent but also no rush"), Urgency::Hot);
        assert_eq!(urgency("would be great to chat"), Urgency::Warm);
        assert_eq!(urgency("fyi"), Urgency::Cold);
        assert_eq!(urgency("hello"), Urgency::Warm);
        assert_eq!(urgency("call me!!"), Urgency::Hot);
    }
}
