use accounts_aggregator::{ProgressEvent, ProgressSink};
#[cfg(feature = "colored-output")]
use colored::*;

enum Color {
    Green,
    Yellow,
    Red,
    Cyan,
}

/// Prints run progress to the terminal.
///
/// Status lines go to stdout, the no-data notice and errors to stderr.
pub struct ConsoleProgress {
    colored: bool,
}

impl ConsoleProgress {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", self.colorize("Error:", &Color::Red, true), message);
    }

    fn render(&self, event: ProgressEvent<'_>) -> Option<String> {
        match event {
            ProgressEvent::SiteStarted { index, total, url } => Some(format!(
                "{} Retrieving users for site {}",
                self.colorize(&format!("[{}/{}]", index + 1, total), &Color::Cyan, false),
                url
            )),
            ProgressEvent::SiteCompleted { .. } => None,
            ProgressEvent::NoData => Some(self.colorize("No accounts found", &Color::Yellow, true)),
            ProgressEvent::Writing { destination } => {
                Some(format!("Generating output in file {destination}..."))
            }
            ProgressEvent::Finished => Some(self.colorize("Finished", &Color::Green, true)),
        }
    }

    fn colorize(&self, text: &str, color: &Color, bold: bool) -> String {
        #[cfg(feature = "colored-output")]
        {
            if self.colored {
                let colored_text = match color {
                    Color::Green => text.green(),
                    Color::Yellow => text.yellow(),
                    Color::Red => text.red(),
                    Color::Cyan => text.cyan(),
                };
                return if bold {
                    colored_text.bold().to_string()
                } else {
                    colored_text.to_string()
                };
            }
        }
        #[cfg(not(feature = "colored-output"))]
        let _ = (color, bold, self.colored);

        text.to_string()
    }
}

impl ProgressSink for ConsoleProgress {
    fn emit(&self, event: ProgressEvent<'_>) {
        let is_notice = matches!(event, ProgressEvent::NoData);
        if let Some(line) = self.render(event) {
            if is_notice {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
    }
}
