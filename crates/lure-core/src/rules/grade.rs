use serde::{Deserialize, Serialize};

/// Risk band of a classified candidate, derived from its capped risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Grade {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

/// Lower score bound of each band, highest first.
const BANDS: [(u32, Grade); 4] = [
    (90, Grade::Critical),
    (70, Grade::High),
    (40, Grade::Medium),
    (10, Grade::Low),
];

impl Grade {
    pub fn label(self) -> &'static str {
        match self {
            Grade::Safe => "SAFE",
            Grade::Low => "LOW",
            Grade::Medium => "MEDIUM",
            Grade::High => "HIGH",
            Grade::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn calculate_grade(score: u32) -> Grade {
    BANDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::Safe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::get_default_rules;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(calculate_grade(0), Grade::Safe);
        assert_eq!(calculate_grade(9), Grade::Safe);
        assert_eq!(calculate_grade(10), Grade::Low);
        assert_eq!(calculate_grade(39), Grade::Low);
        assert_eq!(calculate_grade(40), Grade::Medium);
        assert_eq!(calculate_grade(80), Grade::High);
        assert_eq!(calculate_grade(100), Grade::Critical);
    }

    #[test]
    fn test_any_builtin_finding_leaves_safe() {
        for rule in get_default_rules() {
            assert_ne!(calculate_grade(rule.score), Grade::Safe, "{}", rule.id);
        }
    }

    #[test]
    fn test_label_matches_display() {
        assert_eq!(Grade::Medium.to_string(), Grade::Medium.label());
    }
}
