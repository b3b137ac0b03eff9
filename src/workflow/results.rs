//! Results page state
//!
//! One [`ResultCard`] per prediction, each with its own roadmap state, so
//! roadmap requests for different cards never share anything but the
//! read-only [`RoadmapContext`].

use crate::error::WizardError;
use crate::models::{CareerPrediction, Probability, RoadmapContext};

/// Outcome of one prediction call
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// Ranked matches, in service order
    Matches(Vec<CareerPrediction>),
    /// Service answered with an empty list
    NoMatches,
    /// Transport or contract failure
    Failed(String),
}

/// Roadmap box state of one card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoadmapState {
    /// Never requested; box hidden
    #[default]
    Idle,
    /// Request in flight; trigger disabled
    Loading,
    /// Advice text as returned by the service
    Done(String),
    /// Failure reason
    Failed(String),
}

impl RoadmapState {
    pub fn trigger_enabled(&self) -> bool {
        !matches!(self, RoadmapState::Loading)
    }
}

/// One rendered prediction
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub index: usize,
    pub prediction: CareerPrediction,
    pub roadmap: RoadmapState,
}

impl ResultCard {
    /// Id of the card's roadmap box
    pub fn card_id(&self) -> String {
        format!("roadmap-{}", self.index)
    }
}

/// Everything needed to request one roadmap, detached from the board
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapTicket {
    pub submission: u64,
    pub index: usize,
    pub role: String,
    pub probability: Probability,
    pub context: RoadmapContext,
}

/// Result cards of one submission
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsBoard {
    submission: u64,
    context: RoadmapContext,
    cards: Vec<ResultCard>,
}

impl ResultsBoard {
    pub fn new(submission: u64, context: RoadmapContext, predictions: Vec<CareerPrediction>) -> Self {
        let cards = predictions
            .into_iter()
            .enumerate()
            .map(|(index, prediction)| ResultCard {
                index,
                prediction,
                roadmap: RoadmapState::Idle,
            })
            .collect();
        Self {
            submission,
            context,
            cards,
        }
    }

    pub fn submission(&self) -> u64 {
        self.submission
    }

    pub fn context(&self) -> &RoadmapContext {
        &self.context
    }

    pub fn cards(&self) -> &[ResultCard] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&ResultCard> {
        self.cards.get(index)
    }

    /// Marks a card as loading and hands out what the request needs.
    ///
    /// Rejected while the card's trigger is disabled.
    pub fn begin_roadmap(&mut self, index: usize) -> Result<RoadmapTicket, WizardError> {
        let total = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(WizardError::UnknownCard { index, total })?;

        if !card.roadmap.trigger_enabled() {
            return Err(WizardError::RoadmapInFlight(index));
        }
        card.roadmap = RoadmapState::Loading;

        Ok(RoadmapTicket {
            submission: self.submission,
            index,
            role: card.prediction.role.clone(),
            probability: card.prediction.prob,
            context: self.context.clone(),
        })
    }

    /// Stores a finished request; tickets from another submission are ignored.
    ///
    /// Returns whether the result landed on this board.
    pub fn finish_roadmap(&mut self, ticket: &RoadmapTicket, result: Result<String, String>) -> bool {
        if ticket.submission != self.submission {
            return false;
        }
        match self.cards.get_mut(ticket.index) {
            Some(card) => {
                card.roadmap = match result {
                    Ok(advice) => RoadmapState::Done(advice),
                    Err(reason) => RoadmapState::Failed(reason),
                };
                true
            }
            None => false,
        }
    }
}

/// What the results step shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Prediction request in flight
    Loading { branch: Option<String> },
    Board(ResultsBoard),
    NoMatches,
    Failed { reason: String },
}
