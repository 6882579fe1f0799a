#![allow(dead_code)]

use lure_config::Config;
use lure_core::{
    get_all_rules, ChannelSink, Classifier, ElementKind, Marking, PageElement, PageSource,
    RecordingSleeper, Report, ScanController, ScanHandle, ScanStatus,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

type Hook = Box<dyn Fn() + Send + Sync>;

pub struct FakeElement {
    kind: ElementKind,
    url: Option<String>,
    text: Option<String>,
    marks: Mutex<Vec<Marking>>,
    on_mark: Option<Hook>,
}

impl FakeElement {
    pub fn link(url: &str, text: &str) -> Self {
        Self {
            kind: ElementKind::Link,
            url: Some(url.to_string()),
            text: Some(text.to_string()),
            marks: Mutex::new(Vec::new()),
            on_mark: None,
        }
    }

    pub fn image(src: &str) -> Self {
        Self {
            kind: ElementKind::Image,
            url: Some(src.to_string()),
            text: None,
            marks: Mutex::new(Vec::new()),
            on_mark: None,
        }
    }

    pub fn image_without_src() -> Self {
        Self {
            kind: ElementKind::Image,
            url: None,
            text: None,
            marks: Mutex::new(Vec::new()),
            on_mark: None,
        }
    }

    /// Runs `hook` right after the element is marked.
    pub fn on_mark(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_mark = Some(Box::new(hook));
        self
    }

    pub fn marks(&self) -> Vec<Marking> {
        self.marks.lock().unwrap().clone()
    }
}

impl PageElement for FakeElement {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn attribute(&self, name: &str) -> Option<String> {
        if name == self.kind.url_attribute() {
            self.url.clone()
        } else {
            None
        }
    }

    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn mark(&self, marking: &Marking) {
        self.marks.lock().unwrap().push(marking.clone());
        if let Some(hook) = &self.on_mark {
            hook();
        }
    }
}

/// Hands out queued snapshots, one per captured session.
pub struct FakeSource {
    scheme: Option<String>,
    snapshots: Mutex<VecDeque<Vec<Arc<dyn PageElement>>>>,
    captures: AtomicUsize,
}

impl FakeSource {
    pub fn new(scheme: &str) -> Arc<Self> {
        Arc::new(Self {
            scheme: Some(scheme.to_string()),
            snapshots: Mutex::new(VecDeque::new()),
            captures: AtomicUsize::new(0),
        })
    }

    pub fn push(&self, elements: &[Arc<FakeElement>]) {
        let snapshot = elements
            .iter()
            .map(|e| Arc::clone(e) as Arc<dyn PageElement>)
            .collect();
        self.snapshots.lock().unwrap().push_back(snapshot);
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl PageSource for FakeSource {
    fn document_scheme(&self) -> Option<String> {
        self.scheme.clone()
    }

    fn snapshot(&self) -> Vec<Arc<dyn PageElement>> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        self.snapshots.lock().unwrap().pop_front().unwrap_or_default()
    }
}

pub struct Harness {
    pub controller: ScanController,
    pub handle: ScanHandle,
    pub status: watch::Receiver<ScanStatus>,
    pub reports: mpsc::UnboundedReceiver<Report>,
    pub sleeper: Arc<RecordingSleeper>,
}

pub fn harness(source: Arc<FakeSource>) -> Harness {
    let config = Config::default();
    let classifier = Classifier::from_config(&config, get_all_rules(&config).unwrap());
    let (sink, reports) = ChannelSink::new();
    let sleeper = Arc::new(RecordingSleeper::new());

    let (controller, handle, status) =
        ScanController::new(&config, classifier, source, Arc::new(sink));
    let controller = controller.with_sleeper(sleeper.clone());

    Harness {
        controller,
        handle,
        status,
        reports,
        sleeper,
    }
}

pub fn urls(report: &Report) -> Vec<&str> {
    report.results.iter().map(|r| r.url.as_str()).collect()
}

pub async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}
