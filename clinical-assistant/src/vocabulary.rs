//! Keyword tables behind the suggestions
//!
//! Keywords are matched as lower-case substrings. Groups are checked in
//! table order and every matching group contributes its entries.

/// A group of keywords and the suggestions it triggers
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup<T: 'static> {
    pub keywords: &'static [&'static str],
    pub suggestions: &'static [T],
}

impl<T> KeywordGroup<T> {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Medication table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedicationEntry {
    pub name: &'static str,
    pub dosage: &'static str,
    pub duration: &'static str,
}

/// Symptom keywords to candidate diagnoses
pub const DIAGNOSIS_GROUPS: &[KeywordGroup<&str>] = &[
    KeywordGroup {
        keywords: &["fièvre", "fever"],
        suggestions: &["Infection virale", "Grippe", "Infection bactérienne"],
    },
    KeywordGroup {
        keywords: &["toux", "cough"],
        suggestions: &["Bronchite", "Asthme", "Infection respiratoire"],
    },
    KeywordGroup {
        keywords: &["mal de tête", "headache"],
        suggestions: &["Migraine", "Tension", "Sinusite"],
    },
    KeywordGroup {
        keywords: &["douleur abdominale", "abdominal pain"],
        suggestions: &["Gastrite", "Appendicite", "Colite"],
    },
    KeywordGroup {
        keywords: &["fatigue"],
        suggestions: &["Anémie", "Hypothyroïdie", "Syndrome de fatigue chronique"],
    },
];

/// Returned when no symptom keyword matches
pub const DIAGNOSIS_FALLBACK: &[&str] = &[
    "Examen clinique nécessaire",
    "Bilan sanguin recommandé",
    "Consultation spécialisée à envisager",
];

pub const MAX_DIAGNOSIS_SUGGESTIONS: usize = 5;

/// Diagnosis keywords to first-line treatments
pub const MEDICATION_GROUPS: &[KeywordGroup<MedicationEntry>] = &[
    KeywordGroup {
        keywords: &["infection", "bactérien"],
        suggestions: &[MedicationEntry {
            name: "Amoxicilline",
            dosage: "500mg 3x/jour",
            duration: "7 jours",
        }],
    },
    KeywordGroup {
        keywords: &["fièvre", "fever", "douleur"],
        suggestions: &[MedicationEntry {
            name: "Paracétamol",
            dosage: "1g 3x/jour",
            duration: "5 jours",
        }],
    },
    KeywordGroup {
        keywords: &["toux", "cough"],
        suggestions: &[MedicationEntry {
            name: "Sirop antitussif",
            dosage: "15ml 3x/jour",
            duration: "5 jours",
        }],
    },
    KeywordGroup {
        keywords: &["hypertension", "hta"],
        suggestions: &[MedicationEntry {
            name: "Amlodipine",
            dosage: "5mg 1x/jour",
            duration: "Traitement continu",
        }],
    },
    KeywordGroup {
        keywords: &["diabète", "diabetes"],
        suggestions: &[MedicationEntry {
            name: "Metformine",
            dosage: "500mg 2x/jour",
            duration: "Traitement continu",
        }],
    },
];

pub const MEDICATION_FALLBACK: MedicationEntry = MedicationEntry {
    name: "Consultation recommandée",
    dosage: "Selon avis médical",
    duration: "À déterminer",
};

pub const SUMMARY_FALLBACK: &str = "Résumé non disponible.";

/// Sentences kept in a summary
pub const SUMMARY_SENTENCES: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lower_case() {
        let diagnosis = DIAGNOSIS_GROUPS.iter().flat_map(|g| g.keywords.iter());
        let medication = MEDICATION_GROUPS.iter().flat_map(|g| g.keywords.iter());
        for keyword in diagnosis.chain(medication) {
            assert_eq!(*keyword, keyword.to_lowercase(), "keyword {keyword} must be lower case");
        }
    }

    #[test]
    fn test_group_matching_is_substring_based() {
        let group = &DIAGNOSIS_GROUPS[2];
        assert!(group.matches("violent mal de tête le matin"));
        assert!(!group.matches("mal au dos"));
    }
}
