// Console renderer for the monitoring view
use crate::application::render_sink::RenderSink;
use crate::application::view_state::ViewState;
use crate::domain::chart::display_value;
use crate::domain::status::StatusState;
use std::fmt::Write;

#[derive(Debug, Default)]
pub struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn render(&mut self, view: &ViewState) {
        println!("{}", format_view(view));
    }
}

pub fn format_view(view: &ViewState) -> String {
    let mut out = format!("[{}] {}", view.status, view.status_text);

    match view.status {
        StatusState::Loading => {}
        StatusState::Error => {
            if let Some(error) = &view.error {
                let _ = write!(out, "\n  Error: {}", error);
            }
        }
        StatusState::Ok => {
            let frame = &view.frame;
            let _ = write!(out, "\n  {}", frame.stats);
            let _ = write!(out, "\n  {:<16} {:>8} {:>8}", "time", "temp", "hum");
            for ((label, temp), hum) in frame
                .temp
                .labels
                .iter()
                .zip(&frame.temp.values)
                .zip(&frame.hum.values)
            {
                let _ = write!(
                    out,
                    "\n  {:<16} {:>8} {:>8}",
                    label,
                    display_value(*temp),
                    display_value(*hum)
                );
            }
        }
    }

    out
}
