use crate::cli::ScanArgs;
use crate::formatters::{Format, RenderOptions};
use crate::page::HtmlDocument;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use lure_core::{
    get_all_rules, ChannelSink, Classifier, Report, ScanCommand, ScanController, ScanHandle,
    ScanState, ScanStatus,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use url::Url;

pub fn scan(args: &ScanArgs, config_path: Option<&PathBuf>, quiet: bool) -> Result<bool> {
    let mut config = crate::config_loader::load_effective_config(config_path)?;
    if let Some(delay) = args.step_delay_ms {
        config.scan.step_delay_ms = delay;
    }
    if args.only_suspicious {
        config.output.only_suspicious = true;
    }
    lure_config::validate_config(&config)?;

    let reads_stdin = args.input.as_os_str() == "-";
    if reads_stdin && args.interactive {
        bail!("--interactive reads commands from STDIN and cannot be combined with input '-'");
    }

    let html = read_input(&args.input)?;
    let base_url = args
        .base_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("Invalid --base-url")?;
    let document = Arc::new(HtmlDocument::parse(&html, base_url.as_ref()));
    tracing::debug!(elements = document.elements().len(), "document parsed");

    let rules = get_all_rules(&config)?;
    let classifier = Classifier::from_config(&config, rules);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let report = runtime.block_on(run_session(
        &config,
        classifier,
        Arc::clone(&document),
        args.interactive,
        quiet,
    ));
    // The STDIN reader may still be parked on a blocking read.
    runtime.shutdown_background();
    let report = report?;

    let options = RenderOptions {
        only_suspicious: config.output.only_suspicious,
    };
    Format::from(args.format.as_str())
        .formatter()
        .print(&report, &options)?;

    if args.show_marks {
        print_marks(&document);
    }

    let failed = args
        .fail_score
        .map(|threshold| report.results.iter().any(|r| r.score >= threshold))
        .unwrap_or(false);
    Ok(failed)
}

async fn run_session(
    config: &lure_config::Config,
    classifier: Classifier,
    document: Arc<HtmlDocument>,
    interactive: bool,
    quiet: bool,
) -> Result<Report> {
    let (sink, mut reports) = ChannelSink::new();
    let (controller, handle, status) =
        ScanController::new(config, classifier, document, Arc::new(sink));
    let task = controller.spawn();

    if interactive {
        tokio::spawn(forward_stdin_commands(handle.clone()));
        if !quiet {
            tokio::spawn(report_status(status.clone()));
        }
    }

    handle.start()?;
    // Only the STDIN forwarder may keep the channel open; once it hits EOF a
    // paused session has no one left to resume it and is abandoned.
    drop(handle);

    // A finished session delivers its report before going idle, so an idle
    // status with nothing queued means the session was cancelled.
    let report = tokio::select! {
        biased;
        report = reports.recv() => report,
        _ = idle_after_session(status) => None,
    };
    task.abort();

    report.context("Scan was cancelled before producing a report")
}

async fn idle_after_session(mut status: watch::Receiver<ScanStatus>) {
    if status
        .wait_for(|s| s.state == ScanState::Idle && s.session > 0)
        .await
        .is_err()
    {
        std::future::pending::<()>().await;
    }
}

async fn forward_stdin_commands(handle: ScanHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ScanCommand>() {
            Ok(command) => {
                if handle.send(command).is_err() {
                    break;
                }
            }
            Err(e) => eprintln!("{} {}", "⚠️".yellow(), e),
        }
    }
}

async fn report_status(mut status: watch::Receiver<ScanStatus>) {
    let mut last_state = None;
    while status.changed().await.is_ok() {
        let current = *status.borrow_and_update();
        if last_state != Some(current.state) {
            eprintln!("{}", current.describe().dimmed());
            last_state = Some(current.state);
        }
    }
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from STDIN")?;
        return Ok(html);
    }

    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read HTML file {:?}", input))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn print_marks(document: &HtmlDocument) {
    println!();
    for element in document.elements() {
        let Some(marking) = element.marking() else {
            continue;
        };
        let url = element.url().unwrap_or_default();
        println!(
            "border: {:<15} {} | {}",
            marking.border_style(),
            url,
            marking.tooltip().replace('\n', " / ")
        );
    }
}
