//! Roadmap service
//!
//! Builds the prompt for a result card, calls `/chat` and writes the answer
//! back into that card only. Requests for different cards run concurrently.

use futures::future::join_all;
use tracing::{info, warn};

use crate::clients::RoadmapClient;
use crate::config::Config;
use crate::error::WizardError;
use crate::models::RoadmapRequest;
use crate::utils::logging::log_roadmaps_complete;
use crate::workflow::{ResultsBoard, RoadmapState, RoadmapTicket};

/// Roadmap service
#[derive(Debug, Clone)]
pub struct RoadmapService {
    client: RoadmapClient,
    include_probability: bool,
}

impl RoadmapService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: RoadmapClient::new(config),
            include_probability: config.include_probability,
        }
    }

    pub fn with_client(client: RoadmapClient, include_probability: bool) -> Self {
        Self {
            client,
            include_probability,
        }
    }

    /// Request body for one ticket
    pub fn build_request(&self, ticket: &RoadmapTicket) -> RoadmapRequest {
        RoadmapRequest {
            role: ticket.role.clone(),
            probability: self.include_probability.then_some(ticket.probability),
            prompt: ticket.context.prompt(&ticket.role, ticket.probability),
        }
    }

    /// Runs one ticket; `Err` carries the reason shown on the card
    pub async fn fetch(&self, ticket: &RoadmapTicket) -> Result<String, String> {
        let request = self.build_request(ticket);
        self.client.advise(&request).await.map_err(|e| {
            warn!("⚠️ Roadmap for card {} ({}) failed: {}", ticket.index, ticket.role, e);
            e.to_string()
        })
    }

    /// Generates roadmaps for several cards at once.
    ///
    /// Every card is marked loading before any request is sent, and every
    /// started card is settled (done or failed) before this returns. Cards
    /// that could not start are reported per index.
    pub async fn generate_roadmaps(
        &self,
        board: &mut ResultsBoard,
        indices: &[usize],
    ) -> Vec<(usize, Result<(), WizardError>)> {
        let mut report = Vec::with_capacity(indices.len());
        let mut tickets = Vec::new();

        for &index in indices {
            match board.begin_roadmap(index) {
                Ok(ticket) => {
                    tickets.push(ticket);
                    report.push((index, Ok(())));
                }
                Err(e) => report.push((index, Err(e))),
            }
        }

        info!("🗺️ Requesting {} roadmap(s)", tickets.len());
        let results = join_all(tickets.iter().map(|ticket| self.fetch(ticket))).await;

        for (ticket, result) in tickets.iter().zip(results) {
            board.finish_roadmap(ticket, result);
        }

        let (done, failed) = board.cards().iter().fold((0, 0), |(d, f), card| {
            let started = tickets.iter().any(|t| t.index == card.index);
            match &card.roadmap {
                RoadmapState::Done(_) if started => (d + 1, f),
                RoadmapState::Failed(_) if started => (d, f + 1),
                _ => (d, f),
            }
        });
        log_roadmaps_complete(done, failed);

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Probability, RoadmapContext};

    fn ticket() -> RoadmapTicket {
        RoadmapTicket {
            submission: 1,
            index: 0,
            role: "ML Engineer".to_string(),
            probability: Probability(77.0),
            context: RoadmapContext {
                branch: Some("CSE".to_string()),
                subjects: vec!["ML".to_string(), "DL".to_string()],
            },
        }
    }

    fn service(include_probability: bool) -> RoadmapService {
        RoadmapService::with_client(
            RoadmapClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9"),
            include_probability,
        )
    }

    #[test]
    fn test_build_request_without_probability() {
        let request = service(false).build_request(&ticket());
        assert_eq!(request.role, "ML Engineer");
        assert_eq!(request.probability, None);
        assert!(request.prompt.starts_with("I am a CSE student. My mastered subjects are ML, DL."));
        assert!(request.prompt.contains("77% probability for the role of ML Engineer"));
    }

    #[test]
    fn test_build_request_with_probability() {
        let request = service(true).build_request(&ticket());
        assert_eq!(request.probability, Some(Probability(77.0)));
    }
}
