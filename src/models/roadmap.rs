use serde::{Deserialize, Serialize};

use crate::models::prediction::Probability;

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub role: String,
    /// Only sent when the deployment expects it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Probability>,
    pub prompt: String,
}

/// Body of a `/chat` reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoadmapResponse {
    #[serde(default)]
    pub advice: Option<String>,
    /// Set by the service instead of `advice` when it rejects the request
    #[serde(default)]
    pub error: Option<String>,
}

/// Read-only session facts captured when result cards are built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadmapContext {
    pub branch: Option<String>,
    pub subjects: Vec<String>,
}

impl RoadmapContext {
    /// Prompt asking the text-generation service for a roadmap
    pub fn prompt(&self, role: &str, probability: Probability) -> String {
        let who = match &self.branch {
            Some(branch) => format!("I am a {} student.", branch),
            None => "I am a student.".to_string(),
        };
        format!(
            "{} My mastered subjects are {}. I have a {}% probability for the role of {}. \
             Provide a high-impact roadmap with 3 specific technical skills to learn and 3 project ideas.",
            who,
            self.subjects.join(", "),
            probability,
            role
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_embeds_session_and_role() {
        let ctx = RoadmapContext {
            branch: Some("CSE".to_string()),
            subjects: vec!["DSA".to_string(), "ML".to_string(), "Python".to_string()],
        };

        assert_eq!(
            ctx.prompt("Data Scientist", Probability(82.0)),
            "I am a CSE student. My mastered subjects are DSA, ML, Python. \
             I have a 82% probability for the role of Data Scientist. \
             Provide a high-impact roadmap with 3 specific technical skills to learn and 3 project ideas."
        );
    }

    #[test]
    fn test_prompt_without_branch() {
        let ctx = RoadmapContext {
            branch: None,
            subjects: vec!["HTML".to_string()],
        };
        let prompt = ctx.prompt("UI/UX Designer", Probability(45.5));
        assert!(prompt.starts_with("I am a student. My mastered subjects are HTML."));
        assert!(prompt.contains("45.5% probability for the role of UI/UX Designer"));
    }

    #[test]
    fn test_request_serialisation_variants() {
        let plain = RoadmapRequest {
            role: "ML Engineer".to_string(),
            probability: None,
            prompt: "p".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({ "role": "ML Engineer", "prompt": "p" })
        );

        let with_prob = RoadmapRequest {
            probability: Some(Probability(77.0)),
            ..plain
        };
        assert_eq!(
            serde_json::to_value(&with_prob).unwrap(),
            json!({ "role": "ML Engineer", "probability": 77, "prompt": "p" })
        );
    }
}
