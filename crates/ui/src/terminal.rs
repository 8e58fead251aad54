use crate::render::position_cells;
use crate::surface::{ChatMessage, Page, PositionsView, Speaker, Surface};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const POSITION_HEADERS: [&str; 4] = ["股票代码", "股票名称", "持仓数量", "当前价格"];

/// Draws pages on stdout.
#[derive(Default)]
pub struct TerminalSurface {
    spinner: Option<ProgressBar>,
    redirected_to: Option<Page>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page the last handler sent the user to, if any.
    pub fn redirected_to(&self) -> Option<Page> {
        self.redirected_to
    }
}

impl Surface for TerminalSurface {
    fn alert(&mut self, message: &str) {
        self.clear_pending();
        println!("{}", message.bold());
    }

    fn show_validation_error(&mut self, message: &str) {
        println!("{}", message.red());
    }

    fn show_notice(&mut self, message: &str) {
        println!("{}", message.dimmed());
    }

    fn show_pending(&mut self, message: &str) {
        self.clear_pending();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn clear_pending(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn append_message(&mut self, message: ChatMessage) {
        println!("{}", format_chat_line(&message));
    }

    fn render_positions(&mut self, view: &PositionsView) {
        println!("{}", positions_table(view));
    }

    fn navigate(&mut self, page: Page) {
        self.redirected_to = Some(page);
        let hint = format!("→ stockpilot {}", page.command());
        println!("{}", hint.cyan());
    }
}

fn format_chat_line(message: &ChatMessage) -> String {
    let label = match message.speaker {
        Speaker::User => "你".blue().bold(),
        Speaker::Assistant => "助手".green().bold(),
    };
    // Continuation lines line up under the first line of text.
    let body = message.text.replace('\n', "\n      ");
    let body = if message.is_error {
        body.red().to_string()
    } else {
        body
    };
    format!("{} ▸ {}", label, body)
}

/// The positions table: one row per holding, or one notice row.
pub fn positions_table(view: &PositionsView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(POSITION_HEADERS);

    match view {
        PositionsView::Rows(positions) => {
            for position in positions {
                table.add_row(position_cells(position));
            }
        }
        PositionsView::Notice(notice) => {
            table.add_row(vec![notice.as_str()]);
        }
    }
    table
}
