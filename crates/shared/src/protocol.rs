use serde::{Deserialize, Serialize};

use crate::{
    domain::{AlgorithmId, RunPhase},
    error::ControlRejection,
};

/// Notifications published by the animation controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RunEvent {
    Status {
        phase: RunPhase,
        text: String,
    },
    AlgorithmSelected {
        algorithm: AlgorithmId,
    },
    Regenerated {
        len: usize,
    },
    SpeedChanged {
        interval_ms: u64,
    },
    Completed {
        algorithm: AlgorithmId,
        steps: u64,
    },
    Cancelled {
        algorithm: AlgorithmId,
        steps: u64,
    },
    Failed {
        algorithm: AlgorithmId,
        message: String,
    },
    Rejected(ControlRejection),
}

impl RunEvent {
    pub fn status(phase: RunPhase) -> Self {
        RunEvent::Status {
            phase,
            text: phase.status_text().to_string(),
        }
    }

    /// The run task has finished one way or another.
    pub fn ends_run(&self) -> bool {
        matches!(
            self,
            RunEvent::Completed { .. } | RunEvent::Cancelled { .. } | RunEvent::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn events_use_tagged_snake_case_encoding() {
        let event = RunEvent::Completed {
            algorithm: AlgorithmId::Quick,
            steps: 12,
        };
        let json = serde_json::to_string(&event).expect("json");
        assert_eq!(
            json,
            r#"{"type":"completed","payload":{"algorithm":"quick","steps":12}}"#
        );
        assert!(event.ends_run());
    }

    #[test]
    fn status_event_carries_phase_text() {
        let event = RunEvent::status(RunPhase::Paused);
        assert_eq!(
            event,
            RunEvent::Status {
                phase: RunPhase::Paused,
                text: "Paused".to_string()
            }
        );
        assert!(!event.ends_run());
    }

    #[test]
    fn rejection_round_trips_through_json() {
        let event = RunEvent::Rejected(ControlRejection::new(ErrorCode::RunActive, "busy"));
        let json = serde_json::to_string(&event).expect("json");
        let decoded: RunEvent = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded, event);
    }
}
