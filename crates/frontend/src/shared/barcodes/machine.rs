//! Scan dialog state machine.
//!
//! ```text
//! Closed -> AwaitingScan -> Resolving -> Succeeded | Failed
//!              ^               |              |
//!              +-- no match ---+   scan again +--> Resolving
//! ```
//!
//! Every submitted code starts a new attempt; events of an older attempt are
//! ignored, so a response arriving after the dialog was closed or a newer code
//! was scanned changes nothing.

/// Result reported by a scan callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMessage {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Closed,
    AwaitingScan,
    /// Resolving the code, then running the callback
    Resolving { code: String },
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanDialogState {
    pub phase: ScanPhase,
    pub message: Option<ScanMessage>,
    pub attempt: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Open,
    Close,
    Submit(String),
    /// The code could not be resolved to the expected model
    ResolveFailed { attempt: u64, error: String },
    CallbackFinished { attempt: u64, outcome: ScanOutcome },
}

impl ScanDialogState {
    pub fn is_open(&self) -> bool {
        self.phase != ScanPhase::Closed
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, ScanPhase::Resolving { .. })
    }

    /// A new code may be submitted
    pub fn accepts_input(&self) -> bool {
        matches!(
            self.phase,
            ScanPhase::AwaitingScan | ScanPhase::Succeeded | ScanPhase::Failed
        )
    }
}

pub fn reduce(state: &ScanDialogState, event: ScanEvent) -> ScanDialogState {
    let mut next = state.clone();
    match event {
        ScanEvent::Open => {
            next.phase = ScanPhase::AwaitingScan;
            next.message = None;
            next.attempt += 1;
        }
        ScanEvent::Close => {
            next.phase = ScanPhase::Closed;
            next.message = None;
            next.attempt += 1;
        }
        ScanEvent::Submit(code) => {
            let code = code.trim().to_string();
            if !state.accepts_input() {
                return next;
            }
            if code.is_empty() {
                next.message = Some(ScanMessage::Error("Enter a barcode".to_string()));
                return next;
            }
            next.phase = ScanPhase::Resolving { code };
            next.message = None;
            next.attempt += 1;
        }
        ScanEvent::ResolveFailed { attempt, error } => {
            if attempt != state.attempt || !state.is_busy() {
                return next;
            }
            next.phase = ScanPhase::AwaitingScan;
            next.message = Some(ScanMessage::Error(error));
        }
        ScanEvent::CallbackFinished { attempt, outcome } => {
            if attempt != state.attempt || !state.is_busy() {
                return next;
            }
            match outcome {
                ScanOutcome::Success(message) => {
                    next.phase = ScanPhase::Succeeded;
                    next.message = Some(ScanMessage::Success(message));
                }
                ScanOutcome::Error(message) => {
                    next.phase = ScanPhase::Failed;
                    next.message = Some(ScanMessage::Error(message));
                }
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> ScanDialogState {
        reduce(&ScanDialogState::default(), ScanEvent::Open)
    }

    fn submitted(code: &str) -> ScanDialogState {
        reduce(&opened(), ScanEvent::Submit(code.to_string()))
    }

    #[test]
    fn test_open_awaits_scan() {
        let state = opened();
        assert_eq!(state.phase, ScanPhase::AwaitingScan);
        assert!(state.accepts_input());
    }

    #[test]
    fn test_submit_resolves_trimmed_code() {
        let state = submitted("  LOC-0007 ");
        assert_eq!(
            state.phase,
            ScanPhase::Resolving {
                code: "LOC-0007".into()
            }
        );
        assert!(!state.accepts_input());
    }

    #[test]
    fn test_empty_code_is_rejected() {
        let state = reduce(&opened(), ScanEvent::Submit("   ".into()));
        assert_eq!(state.phase, ScanPhase::AwaitingScan);
        assert!(matches!(state.message, Some(ScanMessage::Error(_))));
    }

    #[test]
    fn test_resolve_failure_returns_to_awaiting() {
        let state = submitted("X");
        let state = reduce(
            &state,
            ScanEvent::ResolveFailed {
                attempt: state.attempt,
                error: "No match found for barcode".into(),
            },
        );
        assert_eq!(state.phase, ScanPhase::AwaitingScan);
        assert_eq!(
            state.message,
            Some(ScanMessage::Error("No match found for barcode".into()))
        );
    }

    #[test]
    fn test_callback_success_shows_exactly_its_message() {
        let state = submitted("X");
        let state = reduce(
            &state,
            ScanEvent::CallbackFinished {
                attempt: state.attempt,
                outcome: ScanOutcome::Success("Scanned stock item into location".into()),
            },
        );
        assert_eq!(state.phase, ScanPhase::Succeeded);
        assert_eq!(
            state.message,
            Some(ScanMessage::Success("Scanned stock item into location".into()))
        );
        assert!(state.is_open());
    }

    #[test]
    fn test_callback_error_stays_open() {
        let state = submitted("X");
        let state = reduce(
            &state,
            ScanEvent::CallbackFinished {
                attempt: state.attempt,
                outcome: ScanOutcome::Error("Error scanning stock item".into()),
            },
        );
        assert_eq!(state.phase, ScanPhase::Failed);
        assert!(state.is_open());
        assert!(state.accepts_input());
    }

    #[test]
    fn test_late_result_after_close_is_ignored() {
        let resolving = submitted("X");
        let attempt = resolving.attempt;
        let closed = reduce(&resolving, ScanEvent::Close);
        let after = reduce(
            &closed,
            ScanEvent::CallbackFinished {
                attempt,
                outcome: ScanOutcome::Success("late".into()),
            },
        );
        assert_eq!(after.phase, ScanPhase::Closed);
        assert_eq!(after.message, None);
    }

    #[test]
    fn test_submit_while_resolving_is_ignored() {
        let resolving = submitted("X");
        let again = reduce(&resolving, ScanEvent::Submit("Y".into()));
        assert_eq!(again, resolving);
    }
}
