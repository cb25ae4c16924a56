// Poller - Refresh cycle for the monitoring view
use crate::application::render_sink::RenderSink;
use crate::application::telemetry_source::TelemetrySource;
use crate::application::view_state::ViewState;
use crate::domain::range::RangeSpec;
use crate::domain::status::StatusState;
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;

pub struct Poller {
    source: Arc<dyn TelemetrySource>,
    sink: Box<dyn RenderSink>,
    timezone: Tz,
    view: ViewState,
}

impl Poller {
    pub fn new(source: Arc<dyn TelemetrySource>, sink: Box<dyn RenderSink>, timezone: Tz) -> Self {
        Self {
            source,
            sink,
            timezone,
            view: ViewState::default(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Run one fetch cycle. Failures end up in the view, never in the caller.
    pub async fn refresh(&mut self, range: RangeSpec) {
        self.view = self.view.begin_refresh();
        self.sink.render(&self.view);

        let outcome = self.source.fetch(range).await;
        self.view = self
            .view
            .complete(range, outcome, Utc::now(), &self.timezone);

        match self.view.status {
            StatusState::Ok => tracing::info!(
                %range,
                points = self.view.frame.stats.data_points,
                "Telemetry refreshed"
            ),
            _ => tracing::warn!(
                %range,
                error = self.view.error.as_deref().unwrap_or_default(),
                "Telemetry refresh failed"
            ),
        }

        self.sink.render(&self.view);
    }
}
