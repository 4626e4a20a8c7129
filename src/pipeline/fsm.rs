use crate::{Error, Result};
use tracing::{debug, info, warn};

// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Fetching,
    Inferring,
    Rendering,
    Done,
    Error,
}

// Stage outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEvent {
    TileFetched,
    InferenceCompleted,
    RenderCompleted,
    Failed,
}

pub struct SegmentStateMachine {
    state: SegmentState,
}

impl SegmentStateMachine {
    pub fn new() -> Self {
        Self {
            state: SegmentState::Fetching,
        }
    }

    pub fn current_state(&self) -> SegmentState {
        self.state
    }

    pub fn transition(&mut self, event: SegmentEvent) -> Result<()> {
        let old_state = self.state;
        debug!("Pipeline processing event {:?} in state {:?}", event, old_state);

        let new_state = match (self.state, event) {
            (SegmentState::Fetching, SegmentEvent::TileFetched) => SegmentState::Inferring,
            (SegmentState::Inferring, SegmentEvent::InferenceCompleted) => SegmentState::Rendering,
            (SegmentState::Rendering, SegmentEvent::RenderCompleted) => SegmentState::Done,
            (
                SegmentState::Fetching | SegmentState::Inferring | SegmentState::Rendering,
                SegmentEvent::Failed,
            ) => SegmentState::Error,
            _ => {
                warn!(
                    "Invalid pipeline transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            "Pipeline state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SegmentState::Done | SegmentState::Error)
    }
}

impl Default for SegmentStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
