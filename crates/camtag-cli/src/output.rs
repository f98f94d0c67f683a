use std::io::{self, Write};

use camtag_core::FileReport;
use tracing::warn;

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub json: bool,
    pub no_color: bool,
    pub is_tty: bool,
}

/// Writes one line per file report to stdout as reports arrive.
pub struct ReportPrinter {
    style: Style,
    json: bool,
}

impl ReportPrinter {
    pub fn new(opts: OutputOptions) -> Self {
        Self {
            style: Style::new(opts.no_color, opts.is_tty),
            json: opts.json,
        }
    }

    pub fn render(&self, report: &FileReport) -> String {
        if self.json {
            return report.to_json().to_string();
        }
        format!("{} {}", report.prefix(), self.style.outcome(&report.outcome))
    }

    pub fn emit(&self, report: &FileReport) {
        let line = self.render(report);
        let mut stdout = io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
            warn!(%err, path = %report.path, "failed to write report");
        }
    }
}
