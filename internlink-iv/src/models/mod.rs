//! Request, response and event types for the interview API

pub mod scores;
pub mod turn;

pub use scores::{
    CompleteSessionRequest, CompleteSessionResponse, DomainFit, DomainScore, ScoreResult,
    ScoringBasis,
};
pub use turn::{TurnEvent, TurnProgress, TurnRequest, MAX_TURNS};
