// Render sink seam - whatever draws the charts and status indicator
use crate::application::view_state::ViewState;

pub trait RenderSink: Send {
    /// Called after every state transition, in completion order.
    fn render(&mut self, view: &ViewState);
}
