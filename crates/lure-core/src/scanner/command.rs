use crate::error::ScanError;
use tokio::sync::mpsc;

/// Control signals delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanCommand {
    /// Begin a session; ignored while one is active.
    Start,
    /// Discard any active session and begin a new one.
    Restart,
    /// Set or clear the pause flag.
    Pause(bool),
    /// Discard the active session without delivering a report.
    Cancel,
}

impl std::str::FromStr for ScanCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(ScanCommand::Start),
            "restart" => Ok(ScanCommand::Restart),
            "pause" => Ok(ScanCommand::Pause(true)),
            "resume" => Ok(ScanCommand::Pause(false)),
            "cancel" => Ok(ScanCommand::Cancel),
            other => Err(format!(
                "unknown command '{}' (expected start, restart, pause, resume, cancel)",
                other
            )),
        }
    }
}

/// Cloneable sender side of the controller's command channel.
#[derive(Debug, Clone)]
pub struct ScanHandle {
    tx: mpsc::UnboundedSender<ScanCommand>,
}

impl ScanHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ScanCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: ScanCommand) -> Result<(), ScanError> {
        self.tx
            .send(command)
            .map_err(|_| ScanError::ControllerClosed)
    }

    pub fn start(&self) -> Result<(), ScanError> {
        self.send(ScanCommand::Start)
    }

    pub fn restart(&self) -> Result<(), ScanError> {
        self.send(ScanCommand::Restart)
    }

    pub fn pause(&self) -> Result<(), ScanError> {
        self.set_paused(true)
    }

    pub fn resume(&self) -> Result<(), ScanError> {
        self.set_paused(false)
    }

    pub fn set_paused(&self, paused: bool) -> Result<(), ScanError> {
        self.send(ScanCommand::Pause(paused))
    }

    pub fn cancel(&self) -> Result<(), ScanError> {
        self.send(ScanCommand::Cancel)
    }
}
