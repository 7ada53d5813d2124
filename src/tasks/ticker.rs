//! Display tick task

use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::{
    state::{AppState, ClockStatus},
    ui::{render_lines, Render},
};

/// Redraw the session screen on every view change, and every `tick` while running
pub async fn display_tick_task<R: Render>(state: Arc<AppState>, tick: Duration, mut renderer: R) {
    info!("Starting display ticker every {:?}", tick);

    let mut view_rx = state.subscribe_view();
    let mut ticks = interval(tick);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let lines = {
            let view = view_rx.borrow_and_update();
            render_lines(&view, Instant::now())
        };
        if let Err(e) = renderer.draw(&lines) {
            error!("Failed to draw screen: {}", e);
            break;
        }

        // wait for something worth redrawing
        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    if view_rx.borrow().clock.status == ClockStatus::Running {
                        break;
                    }
                }
                changed = view_rx.changed() => {
                    if changed.is_err() {
                        info!("View channel closed, stopping display ticker");
                        return;
                    }
                    break;
                }
            }
        }
    }
}
