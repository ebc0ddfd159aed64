use std::{fmt, io};
use yansi::Paint;

const RULE: &str = "==========================================";

/// Classification of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    /// Quality signal. Never affects the exit code.
    Warn,
    /// Progress line. Not counted.
    Info,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Pass => "✓ PASS",
            Status::Fail => "✗ FAIL",
            Status::Warn => "⚠ WARN",
            Status::Info => "ℹ INFO",
        }
    }

    fn painted_label(self) -> String {
        match self {
            Status::Pass => self.label().green().to_string(),
            Status::Fail => self.label().red().to_string(),
            Status::Warn => self.label().yellow().bold().to_string(),
            Status::Info => self.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub status: Status,
    pub message: String,
}

impl Finding {
    /// The console line, colorized unless yansi has been disabled
    pub fn render(&self) -> String {
        format!("{}: {}", self.status.painted_label(), self.message)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status.label(), self.message)
    }
}

/// Counters for one run. Only ever incremented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

/// Accumulates findings for a run.
///
/// Each probe takes `&mut Report`; the runner owns the value and reads the
/// tally once at the end. With echo enabled every finding is printed to
/// stdout as it is recorded, so the transcript streams while checks run.
#[derive(Debug, Default)]
pub struct Report {
    findings: Vec<Finding>,
    tally: Tally,
    echo: bool,
}

impl Report {
    /// A report that prints each finding as it is recorded
    pub fn new() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// A report that only collects
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: Status, message: impl Into<String>) {
        match status {
            Status::Pass => self.tally.passed += 1,
            Status::Fail => self.tally.failed += 1,
            Status::Warn => self.tally.warnings += 1,
            Status::Info => {}
        }

        let finding = Finding {
            status,
            message: message.into(),
        };
        if self.echo {
            println!("{}", finding.render());
        }
        self.findings.push(finding);
    }

    pub fn pass(&mut self, message: impl Into<String>) {
        self.record(Status::Pass, message);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.record(Status::Fail, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(Status::Warn, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Status::Info, message);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Messages recorded with the given status, in order
    pub fn messages(&self, status: Status) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|finding| finding.status == status)
            .map(|finding| finding.message.as_str())
            .collect()
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Warnings do not count against success
    pub fn succeeded(&self) -> bool {
        self.tally.failed == 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.succeeded() { 0 } else { 1 }
    }

    pub fn write_summary(&self, out: &mut impl io::Write) -> io::Result<()> {
        let Tally {
            passed,
            failed,
            warnings,
        } = self.tally;

        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Summary")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Passed:   {}", passed.green())?;
        writeln!(out, "Failed:   {}", failed.red())?;
        writeln!(out, "Warnings: {}", warnings.yellow().bold())?;
        writeln!(out)?;

        if self.succeeded() {
            writeln!(out, "{}", "✓ All basic tests passed!".green())
        } else {
            writeln!(out, "{}", "✗ Some tests failed".red())
        }
    }
}

pub fn write_banner(out: &mut impl io::Write, endpoint: &str) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "MCP Server Basic Evaluation")?;
    writeln!(out, "Endpoint: {endpoint}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)
}
