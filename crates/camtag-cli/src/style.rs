use std::env;

use camtag_core::{FileOutcome, TagChange, TagOp};
use color_eyre::owo_colors::OwoColorize;

pub struct Style {
    enabled: bool,
}

impl Style {
    pub fn new(force_no_color: bool, is_tty: bool) -> Self {
        let env_no_color = env::var_os("NO_COLOR").is_some();
        Self {
            enabled: !(force_no_color || env_no_color) && is_tty,
        }
    }

    /// Summary text of `outcome`, coloured by how it went.
    pub fn outcome(&self, outcome: &FileOutcome) -> String {
        match outcome {
            FileOutcome::Changed { changes, .. } => changes
                .iter()
                .map(|change| format!("{} ", self.change(change)))
                .collect(),
            FileOutcome::NothingToDo { .. } => self.paint(&outcome.summary(), Tone::Blue),
            FileOutcome::Error { .. } => self.paint(&outcome.summary(), Tone::Red),
            FileOutcome::NonExistent
            | FileOutcome::Directory
            | FileOutcome::Nodes(_)
            | FileOutcome::NoAttrs(_) => self.paint(&outcome.summary(), Tone::Yellow),
        }
    }

    fn change(&self, change: &TagChange) -> String {
        let tone = match change.op {
            TagOp::Added | TagOp::Removed => Tone::Green,
            TagOp::Failed => Tone::Red,
        };
        self.paint(&change.to_string(), tone)
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Green => text.green().to_string(),
            Tone::Yellow => text.yellow().to_string(),
            Tone::Red => text.red().bold().to_string(),
            Tone::Blue => text.cyan().to_string(),
        }
    }
}

enum Tone {
    Green,
    Yellow,
    Red,
    Blue,
}
