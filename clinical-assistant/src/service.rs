use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use utoipa::ToSchema;

use crate::config::AssistantConfig;
use crate::error::AssistantResult;
use crate::vocabulary::{
    MedicationEntry, DIAGNOSIS_FALLBACK, DIAGNOSIS_GROUPS, MAX_DIAGNOSIS_SUGGESTIONS,
    MEDICATION_FALLBACK, MEDICATION_GROUPS, SUMMARY_FALLBACK, SUMMARY_SENTENCES,
};

/// Suggested prescription line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicationSuggestion {
    pub name: String,
    pub dosage: String,
    pub duration: String,
}

impl From<&MedicationEntry> for MedicationSuggestion {
    fn from(entry: &MedicationEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            dosage: entry.dosage.to_string(),
            duration: entry.duration.to_string(),
        }
    }
}

/// Suggestion engine used while documenting a consultation
#[async_trait]
pub trait ClinicalAssistant: Send + Sync {
    /// Candidate diagnoses for free-text symptoms, never empty
    async fn suggest_diagnosis(&self, symptoms: &str) -> AssistantResult<Vec<String>>;

    /// Short summary of consultation notes
    async fn summarize(&self, text: &str) -> AssistantResult<String>;

    /// Treatments for a diagnosis, never empty
    async fn suggest_medication(&self, diagnosis: &str) -> AssistantResult<Vec<MedicationSuggestion>>;
}

/// Deterministic keyword matcher with simulated latency
#[derive(Debug, Clone, Default)]
pub struct KeywordAssistant {
    config: AssistantConfig,
}

impl KeywordAssistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    async fn simulate_latency(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ClinicalAssistant for KeywordAssistant {
    async fn suggest_diagnosis(&self, symptoms: &str) -> AssistantResult<Vec<String>> {
        Self::simulate_latency(self.config.diagnosis_delay).await;
        let suggestions = suggest_diagnosis(symptoms);
        debug!(count = suggestions.len(), "Diagnosis suggestions generated");
        Ok(suggestions)
    }

    async fn summarize(&self, text: &str) -> AssistantResult<String> {
        Self::simulate_latency(self.config.summary_delay).await;
        Ok(summarize(text))
    }

    async fn suggest_medication(&self, diagnosis: &str) -> AssistantResult<Vec<MedicationSuggestion>> {
        Self::simulate_latency(self.config.medication_delay).await;
        let medications = suggest_medication(diagnosis);
        debug!(count = medications.len(), "Medication suggestions generated");
        Ok(medications)
    }
}

/// Diagnoses of every matching symptom group, in table order, at most five
pub fn suggest_diagnosis(symptoms: &str) -> Vec<String> {
    let lowered = symptoms.to_lowercase();

    let mut suggestions: Vec<String> = DIAGNOSIS_GROUPS
        .iter()
        .filter(|group| group.matches(&lowered))
        .flat_map(|group| group.suggestions.iter().map(|s| s.to_string()))
        .collect();

    if suggestions.is_empty() {
        suggestions = DIAGNOSIS_FALLBACK.iter().map(|s| s.to_string()).collect();
    }

    suggestions.truncate(MAX_DIAGNOSIS_SUGGESTIONS);
    suggestions
}

/// First two sentences of `text`, each trimmed, joined with ". "
pub fn summarize(text: &str) -> String {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .take(SUMMARY_SENTENCES)
        .collect();

    if sentences.is_empty() {
        return SUMMARY_FALLBACK.to_string();
    }

    format!("{}.", sentences.join(". "))
}

/// Treatments of every matching diagnosis group, in table order
pub fn suggest_medication(diagnosis: &str) -> Vec<MedicationSuggestion> {
    let lowered = diagnosis.to_lowercase();

    let medications: Vec<MedicationSuggestion> = MEDICATION_GROUPS
        .iter()
        .filter(|group| group.matches(&lowered))
        .flat_map(|group| group.suggestions.iter().map(MedicationSuggestion::from))
        .collect();

    if medications.is_empty() {
        return vec![MedicationSuggestion::from(&MEDICATION_FALLBACK)];
    }
    medications
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_fever_suggests_infections() {
        let suggestions = suggest_diagnosis("Patient avec FIÈVRE élevée");
        assert_eq!(
            suggestions,
            vec!["Infection virale", "Grippe", "Infection bactérienne"]
        );
    }

    #[test]
    fn test_english_keywords_match() {
        let suggestions = suggest_diagnosis("persistent cough at night");
        assert_eq!(suggestions, vec!["Bronchite", "Asthme", "Infection respiratoire"]);
    }

    #[test]
    fn test_multiple_groups_truncated_to_five() {
        let suggestions = suggest_diagnosis("fièvre, toux et fatigue");
        assert_eq!(suggestions.len(), MAX_DIAGNOSIS_SUGGESTIONS);
        assert_eq!(&suggestions[..3], &["Infection virale", "Grippe", "Infection bactérienne"]);
        assert_eq!(&suggestions[3..], &["Bronchite", "Asthme"]);
    }

    #[test]
    fn test_unknown_symptoms_fall_back() {
        assert_eq!(
            suggest_diagnosis("douleur au genou"),
            vec![
                "Examen clinique nécessaire",
                "Bilan sanguin recommandé",
                "Consultation spécialisée à envisager"
            ]
        );
        assert_eq!(suggest_diagnosis("").len(), 3);
    }

    #[test]
    fn test_summary_keeps_two_sentences() {
        assert_eq!(summarize("A. B. C."), "A. B.");
        assert_eq!(
            summarize("Douleur thoracique depuis hier! Pas de fièvre?? Examen normal."),
            "Douleur thoracique depuis hier. Pas de fièvre."
        );
    }

    #[test]
    fn test_summary_of_single_sentence_without_terminator() {
        assert_eq!(summarize("Contrôle tension"), "Contrôle tension.");
    }

    #[test]
    fn test_summary_fallback() {
        assert_eq!(summarize(""), SUMMARY_FALLBACK);
        assert_eq!(summarize(" ... !? "), SUMMARY_FALLBACK);
    }

    #[test]
    fn test_hypertension_suggests_amlodipine() {
        let medications = suggest_medication("HTA essentielle");
        assert_eq!(
            medications,
            vec![MedicationSuggestion {
                name: "Amlodipine".to_string(),
                dosage: "5mg 1x/jour".to_string(),
                duration: "Traitement continu".to_string(),
            }]
        );
    }

    #[test]
    fn test_infection_with_pain_suggests_both() {
        let names: Vec<String> = suggest_medication("Infection urinaire avec douleur")
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Amoxicilline", "Paracétamol"]);
    }

    #[test]
    fn test_unknown_diagnosis_falls_back() {
        let medications = suggest_medication("entorse");
        assert_eq!(medications.len(), 1);
        assert_eq!(medications[0].name, "Consultation recommandée");
        assert_eq!(medications[0].duration, "À déterminer");
    }

    #[test]
    fn test_medication_serializes_flat() {
        let json = serde_json::to_value(&suggest_medication("diabète type 2")[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Metformine",
                "dosage": "500mg 2x/jour",
                "duration": "Traitement continu"
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_delays_are_applied() {
        let assistant = KeywordAssistant::default();
        let started = tokio::time::Instant::now();
        assistant.suggest_diagnosis("toux").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));

        let started = tokio::time::Instant::now();
        assistant.summarize("Note.").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));

        let started = tokio::time::Instant::now();
        assistant.suggest_medication("toux").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_instant_config_skips_delay() {
        let assistant = KeywordAssistant::new(AssistantConfig::instant());
        let started = Instant::now();
        let summary = assistant.summarize("Un. Deux. Trois.").await.unwrap();
        assert_eq!(summary, "Un. Deux.");
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
