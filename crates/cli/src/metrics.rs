// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin metrics HTTP endpoint (spec §9: "the metrics sink becomes an
//! external collaborator that adapts status events to counter
//! increments"). This is a minimal text exporter, not a Prometheus
//! client integration — the reference implementation's `prometheus_client`
//! dependency has no equivalent in this stack, so counters are rendered
//! by hand in the same exposition format.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use wf_core::StatusKind;

#[derive(Default)]
pub struct Metrics {
    steps_started: AtomicU64,
    steps_succeeded: AtomicU64,
    steps_failed: AtomicU64,
    notifications_sent: AtomicU64,
    running_steps: AtomicI64,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Feed one status event into the counters. Intended to be called
    /// from a [`wf_scheduler::StatusSink`] closure.
    pub fn record(&self, status: StatusKind) {
        match status {
            StatusKind::Queued => {}
            StatusKind::Running => {
                self.steps_started.fetch_add(1, Ordering::Relaxed);
                self.running_steps.fetch_add(1, Ordering::Relaxed);
            }
            StatusKind::Succeeded => {
                self.steps_succeeded.fetch_add(1, Ordering::Relaxed);
                self.running_steps.fetch_sub(1, Ordering::Relaxed);
            }
            StatusKind::Failed => {
                self.steps_failed.fetch_add(1, Ordering::Relaxed);
                self.running_steps.fetch_sub(1, Ordering::Relaxed);
            }
        }
    }

    /// Record that Notifier Dispatch fired for a handled failure.
    pub fn record_notification(&self) {
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);
    }

    fn render(&self) -> String {
        format!(
            "# TYPE wf_steps_started_total counter\n\
             wf_steps_started_total {}\n\
             # TYPE wf_steps_succeeded_total counter\n\
             wf_steps_succeeded_total {}\n\
             # TYPE wf_steps_failed_total counter\n\
             wf_steps_failed_total {}\n\
             # TYPE wf_notifications_sent_total counter\n\
             wf_notifications_sent_total {}\n\
             # TYPE wf_running_steps gauge\n\
             wf_running_steps {}\n",
            self.steps_started.load(Ordering::Relaxed),
            self.steps_succeeded.load(Ordering::Relaxed),
            self.steps_failed.load(Ordering::Relaxed),
            self.notifications_sent.load(Ordering::Relaxed),
            self.running_steps.load(Ordering::Relaxed),
        )
    }
}

/// Start a background thread serving `/metrics` in the Prometheus text
/// exposition format on `127.0.0.1:<port>`. Non-blocking: the caller
/// continues running the workflow in the same process.
pub fn start_metrics_server(metrics: Arc<Metrics>, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port))?;
    tracing::info!(port, "metrics server listening");

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let metrics = Arc::clone(&metrics);
                    std::thread::spawn(move || handle_connection(stream, &metrics));
                }
                Err(err) => tracing::debug!(%err, "metrics connection failed"),
            }
        }
    });

    Ok(())
}

fn handle_connection(mut stream: TcpStream, metrics: &Metrics) {
    let mut buf = [0u8; 1024];
    // We only need enough of the request to know a connection was made;
    // the body of a GET request is empty and this endpoint has one route.
    let _ = stream.read(&mut buf);

    let body = metrics.render();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain; version=0.0.4\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
