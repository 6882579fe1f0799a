use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanState::Idle => write!(f, "idle"),
            ScanState::Running => write!(f, "running"),
            ScanState::Paused => write!(f, "paused"),
            ScanState::Finished => write!(f, "finished"),
        }
    }
}

/// Externally observable progress of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStatus {
    pub state: ScanState,
    /// Number of the current (or last) session, starting at 1.
    pub session: u64,
    /// Index of the next candidate to process.
    pub cursor: usize,
    pub total: usize,
}

impl ScanStatus {
    pub fn is_active(&self) -> bool {
        matches!(self.state, ScanState::Running | ScanState::Paused)
    }

    /// Short line suitable for a host status label.
    pub fn describe(&self) -> String {
        match self.state {
            ScanState::Idle => "Ready.".to_string(),
            ScanState::Running => format!("Running scan... ({}/{})", self.cursor, self.total),
            ScanState::Paused => format!("Scan paused. ({}/{})", self.cursor, self.total),
            ScanState::Finished => "Scan finished.".to_string(),
        }
    }
}
