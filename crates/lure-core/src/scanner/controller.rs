use crate::classifier::Classifier;
use crate::page::{capture_candidate, Marking, PageElement, PageSource};
use crate::report::{Report, ReportSink};
use crate::scanner::command::{ScanCommand, ScanHandle};
use crate::scanner::sleeper::{Sleeper, TokioSleeper};
use crate::scanner::state::{ScanState, ScanStatus};
use lure_config::Config;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// One in-flight scan pass over a captured snapshot.
struct Session {
    id: u64,
    snapshot: Vec<Arc<dyn PageElement>>,
    document_scheme: Option<String>,
    cursor: usize,
    report: Report,
    started: Instant,
}

#[derive(PartialEq)]
enum Flow {
    Continue,
    Cancel,
}

enum Wake {
    Command(Option<ScanCommand>),
    Poll,
}

/// Owns the single scan session and drives it from the command channel.
///
/// At most one session is active at a time: `Start` is ignored while a session
/// runs or is paused, `Restart` discards it and recaptures the snapshot, `Cancel`
/// discards it and returns to idle without a report.
pub struct ScanController {
    classifier: Classifier,
    source: Arc<dyn PageSource>,
    sink: Arc<dyn ReportSink>,
    sleeper: Arc<dyn Sleeper>,
    step_delay: Duration,
    pause_poll: Duration,
    commands: mpsc::UnboundedReceiver<ScanCommand>,
    commands_closed: bool,
    status: watch::Sender<ScanStatus>,
    paused: bool,
    sessions_started: u64,
}

impl ScanController {
    pub fn new(
        config: &Config,
        classifier: Classifier,
        source: Arc<dyn PageSource>,
        sink: Arc<dyn ReportSink>,
    ) -> (Self, ScanHandle, watch::Receiver<ScanStatus>) {
        let (tx, commands) = mpsc::unbounded_channel();
        let (status, status_rx) = watch::channel(ScanStatus::default());

        let controller = Self {
            classifier,
            source,
            sink,
            sleeper: Arc::new(TokioSleeper),
            step_delay: Duration::from_millis(config.scan.step_delay_ms),
            pause_poll: Duration::from_millis(config.scan.pause_poll_ms.max(1)),
            commands,
            commands_closed: false,
            status,
            paused: false,
            sessions_started: 0,
        };

        (controller, ScanHandle::new(tx), status_rx)
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Serves commands until every `ScanHandle` has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                ScanCommand::Start | ScanCommand::Restart => {
                    let session = self.begin_session();
                    self.drive(session).await;
                }
                ScanCommand::Pause(paused) => {
                    debug!(paused, "pause flag changed while idle");
                    self.paused = paused;
                }
                ScanCommand::Cancel => debug!("cancel ignored, no active session"),
            }
            if self.commands_closed {
                break;
            }
        }
        debug!("command channel closed, scan controller stopping");
    }

    fn begin_session(&mut self) -> Session {
        self.sessions_started += 1;
        self.paused = false;

        let snapshot = self.source.snapshot();
        let session = Session {
            id: self.sessions_started,
            document_scheme: self.source.document_scheme(),
            report: Report {
                session: self.sessions_started,
                total_candidates: snapshot.len(),
                ..Default::default()
            },
            snapshot,
            cursor: 0,
            started: Instant::now(),
        };

        info!(
            session = session.id,
            candidates = session.snapshot.len(),
            "scan session started"
        );
        self.publish(&session, ScanState::Running);
        session
    }

    async fn drive(&mut self, mut session: Session) {
        loop {
            while !self.commands_closed {
                match self.commands.try_recv() {
                    Ok(command) => {
                        if self.apply(command, &mut session) == Flow::Cancel {
                            return;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => self.commands_closed = true,
                }
            }

            // Pausing only holds back a candidate that is still waiting
            if session.cursor >= session.snapshot.len() {
                self.finish(session);
                return;
            }

            if self.paused {
                if self.commands_closed {
                    warn!(
                        session = session.id,
                        cursor = session.cursor,
                        "no handle left to resume the paused session, abandoning it"
                    );
                    self.publish(&session, ScanState::Idle);
                    return;
                }

                self.publish(&session, ScanState::Paused);
                let sleeper = Arc::clone(&self.sleeper);
                let wake = tokio::select! {
                    command = self.commands.recv() => Wake::Command(command),
                    _ = sleeper.sleep(self.pause_poll) => Wake::Poll,
                };
                match wake {
                    Wake::Command(Some(command)) => {
                        if self.apply(command, &mut session) == Flow::Cancel {
                            return;
                        }
                    }
                    Wake::Command(None) => self.commands_closed = true,
                    Wake::Poll => trace!(session = session.id, "still paused"),
                }
                continue;
            }

            self.publish(&session, ScanState::Running);
            self.step(&mut session);
            self.publish(&session, ScanState::Running);
            self.sleeper.sleep(self.step_delay).await;
        }
    }

    fn apply(&mut self, command: ScanCommand, session: &mut Session) -> Flow {
        match command {
            ScanCommand::Start => {
                debug!(session = session.id, "start ignored, a session is already active");
            }
            ScanCommand::Restart => {
                info!(
                    session = session.id,
                    cursor = session.cursor,
                    "restart requested, discarding active session"
                );
                *session = self.begin_session();
            }
            ScanCommand::Pause(paused) => {
                if paused != self.paused {
                    debug!(session = session.id, cursor = session.cursor, paused, "pause toggled");
                }
                self.paused = paused;
            }
            ScanCommand::Cancel => {
                info!(
                    session = session.id,
                    cursor = session.cursor,
                    "scan session cancelled"
                );
                self.paused = false;
                self.publish(session, ScanState::Idle);
                return Flow::Cancel;
            }
        }
        Flow::Continue
    }

    fn step(&self, session: &mut Session) {
        let element = Arc::clone(&session.snapshot[session.cursor]);

        match capture_candidate(element.as_ref()) {
            Some(candidate) => {
                let result = self
                    .classifier
                    .scan(&candidate, session.document_scheme.as_deref());
                element.mark(&Marking::for_findings(&result.findings));
                trace!(
                    session = session.id,
                    cursor = session.cursor,
                    url = %result.url,
                    findings = result.findings.len(),
                    "candidate classified"
                );
                session.report.results.push(result);
            }
            None => {
                trace!(session = session.id, cursor = session.cursor, "no URL, skipped");
                session.report.skipped += 1;
            }
        }

        session.cursor += 1;
    }

    fn finish(&self, session: Session) {
        self.publish(&session, ScanState::Finished);

        let mut report = session.report;
        report.duration_ms = session.started.elapsed().as_millis();
        info!(
            session = session.id,
            results = report.results.len(),
            suspicious = report.suspicious().count(),
            skipped = report.skipped,
            "scan session finished"
        );
        self.sink.deliver(report);

        self.status.send_replace(ScanStatus {
            state: ScanState::Idle,
            session: session.id,
            cursor: session.cursor,
            total: session.snapshot.len(),
        });
    }

    fn publish(&self, session: &Session, state: ScanState) {
        self.status.send_replace(ScanStatus {
            state,
            session: session.id,
            cursor: session.cursor,
            total: session.snapshot.len(),
        });
    }
}
