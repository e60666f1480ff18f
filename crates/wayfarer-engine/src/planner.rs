//! Controller loop

use async_trait::async_trait;
use wayfarer_core::{PlanState, PlannerConfig, StageId, TripRequest};

use crate::error::EngineError;
use crate::report::render_report;
use crate::router::route;
use crate::stages::{self, ProviderSet};

/// Executes one stage against the state it exclusively owns for the call.
///
/// The controller loop is generic over this seam so tests can substitute
/// misbehaving executors and verify the iteration cap.
#[async_trait]
pub trait StageDispatch: Send + Sync {
    async fn execute(&self, stage: StageId, state: PlanState) -> PlanState;
}

/// Drive router and executors to the terminal stage.
///
/// Each iteration routes on the current state, executes the chosen stage,
/// and adopts the returned state. The loop halts after executing
/// `FormatFinalResponse` exactly once. Running past `max_stages` means a
/// stage broke the "write your field" contract; that is a fatal internal
/// error, never a silent hang.
pub async fn drive<D: StageDispatch + ?Sized>(
    dispatch: &D,
    mut state: PlanState,
    max_stages: usize,
) -> Result<PlanState, EngineError> {
    for iteration in 1..=max_stages {
        let next = route(&state);
        tracing::debug!(stage = %next, iteration, "routing");
        let terminal = next == StageId::FormatFinalResponse;
        state = dispatch.execute(next, state).await;
        if terminal {
            tracing::info!(iterations = iteration, "planning session finished");
            return Ok(state);
        }
    }
    Err(EngineError::StageLimitExceeded { limit: max_stages })
}

/// Result of one planning session.
#[derive(Debug)]
pub struct PlanOutcome {
    /// The rendered user-facing report.
    pub report: String,
    /// Final state, returned for inspection and testing.
    pub state: PlanState,
}

/// The session runner: owns the provider clients and configuration, and
/// dispatches every stage of the pipeline.
pub struct Planner {
    providers: ProviderSet,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(providers: ProviderSet) -> Self {
        Self {
            providers,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run one session from extracted requirements to the rendered report.
    pub async fn run(&self, request: TripRequest) -> Result<PlanOutcome, EngineError> {
        let state = PlanState::new(request);
        let state = drive(self, state, self.config.max_stage_executions).await?;

        let report = state
            .final_report
            .clone()
            .unwrap_or_else(|| render_report(&state));

        Ok(PlanOutcome { report, state })
    }
}

#[async_trait]
impl StageDispatch for Planner {
    async fn execute(&self, stage: StageId, mut state: PlanState) -> PlanState {
        tracing::info!(stage = %stage, "executing stage");
        state.current_stage = Some(stage);

        match stage {
            StageId::ExtractRequirements => stages::extract_requirements(&mut state),
            StageId::GetDestinationInfo => {
                stages::get_destination_info(
                    &mut state,
                    &self.providers,
                    self.config.search_timeout(),
                )
                .await
            }
            StageId::SearchFlights | StageId::SearchHotels | StageId::SearchActivities => {
                stages::collect_offers(&mut state, &self.providers, &self.config, stage).await
            }
            StageId::OptimizeBudget => stages::optimize_budget(&mut state, &self.config),
            StageId::GenerateItinerary => stages::generate_itinerary(&mut state),
            StageId::FormatFinalResponse => stages::format_final_response(&mut state),
        }

        state
    }
}
