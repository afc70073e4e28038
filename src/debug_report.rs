use markov_algo::{Diagnostics, Error, Halt, Rule, Run, Severity};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

bitflags::bitflags! {
    /// Parts of the report to print.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Sections: u8 {
        const DIAGNOSTICS = 1 << 0;
        const RULES       = 1 << 1;
        const TRACE       = 1 << 2;
        const TIMING      = 1 << 3;
        const RESULT      = 1 << 4;
    }
}

const NUMBER_WIDTH: usize = 5;
const PATTERN_WIDTH: usize = 18;
const ARROW_WIDTH: usize = 5;
const RULE_WIDTH: usize = 8;

pub struct Report {
    sections: Sections,
    palette: ansi::Palette,
}

impl Report {
    pub fn new(sections: Sections, color: bool) -> Self {
        Report { sections, palette: ansi::Palette::new(color) }
    }

    /// Diagnostics get their own section; without it only errors are shown,
    /// on stderr.
    pub fn print_diagnostics(&self, diagnostics: &Diagnostics) {
        if !self.sections.contains(Sections::DIAGNOSTICS) {
            for diagnostic in diagnostics.errors() {
                eprintln!("{diagnostic}");
            }
            return;
        }
        if diagnostics.is_empty() {
            return;
        }

        let palette = &self.palette;
        println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
        for diagnostic in diagnostics {
            let color = match diagnostic.severity {
                Severity::Warning => ansi::YELLOW,
                Severity::Error => ansi::RED,
            };
            let location = match diagnostic.column {
                Some(column) => format!("[{}; {}]", diagnostic.line, column),
                None => format!("[{}]", diagnostic.line),
            };
            println!(
                "  {} {} {}",
                palette.paint(location, ansi::GRAY),
                palette.paint(diagnostic.severity.to_string(), color),
                diagnostic.message
            );
        }
    }

    pub fn print_error(&self, err: &Error) {
        eprintln!("{} {err}", self.palette.bold(self.palette.paint("error:", ansi::RED)));
    }

    pub fn print_run(&self, run: &Run) {
        let palette = &self.palette;

        if self.sections.contains(Sections::RULES) {
            println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
            print_rules(run.rules.as_slice(), palette);
        }

        if self.sections.contains(Sections::TRACE) {
            println!("\n{}", palette.paint("━━━ Execution ━━━", ansi::GRAY));
            print_trace(run, palette);
        }

        if self.sections.contains(Sections::TIMING) {
            println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
            println!(
                "  Total: {}  │  Load: {}  │  Execute: {}",
                palette.paint(format!("{:?}", run.metrics.total), ansi::GREEN),
                palette.paint(format!("{:?}", run.metrics.load), ansi::CYAN),
                palette.dim(format!("{:?}", run.metrics.execute)),
            );
        }

        if self.sections == Sections::RESULT {
            println!("{}", run.execution.word);
        } else if self.sections.contains(Sections::RESULT) {
            let result = format!("⚙  Result: \"{}\"", run.execution.word);
            println!("\n{}", palette.bold(palette.paint(result, ansi::CYAN)));
            println!();
        }
    }
}

fn print_rules(rules: &[Rule], palette: &ansi::Palette) {
    println!(
        "  {}",
        palette.dim(format!(
            "{:<NUMBER_WIDTH$}{:<PATTERN_WIDTH$}{:<ARROW_WIDTH$}{}",
            "N", "Pattern", "Type", "Replacement"
        ))
    );
    for (index, rule) in rules.iter().enumerate() {
        let replacement = if rule.erases() { palette.dim("(erase)") } else { rule.replacement.clone() };
        let arrow = format!("{:<ARROW_WIDTH$}", rule.arrow());
        let arrow = if rule.terminal { palette.paint(arrow, ansi::YELLOW) } else { arrow };
        println!(
            "  {}{}{}{}",
            palette.paint(format!("{:<NUMBER_WIDTH$}", index + 1), ansi::GRAY),
            palette.paint(format!("{:<PATTERN_WIDTH$}", rule.pattern), ansi::BLUE),
            arrow,
            replacement
        );
    }
}

fn print_trace(run: &Run, palette: &ansi::Palette) {
    println!("  {}", palette.dim(format!("{:<NUMBER_WIDTH$}{:<RULE_WIDTH$}{}", "N", "Rule", "Word")));
    println!(
        "  {}{}{}",
        palette.dim(format!("{:<NUMBER_WIDTH$}", 0)),
        palette.dim(format!("{:<RULE_WIDTH$}", "-")),
        run.source_word
    );
    for step in &run.execution.trace {
        println!(
            "  {}{}{}",
            palette.paint(format!("{:<NUMBER_WIDTH$}", step.number), ansi::GRAY),
            palette.paint(format!("{:<RULE_WIDTH$}", step.rule + 1), ansi::BLUE),
            step.word
        );
    }

    let halt = match run.execution.halt {
        Halt::Terminal { rule } => palette.paint(format!("✓ terminal rule {} applied", rule + 1), ansi::GREEN),
        Halt::NoMatch => palette.paint("✓ no rule applies", ansi::GREEN),
        Halt::StepLimit { limit } => palette.paint(format!("✗ step limit {limit} reached"), ansi::RED),
    };
    println!("  {} {}", palette.dim(format!("{} steps │", run.execution.steps())), halt);
}
