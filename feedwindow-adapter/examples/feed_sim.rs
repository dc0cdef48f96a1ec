// Example: a simulated feed screen driving the controller from scroll events.
use feedwindow::{PaginatorOptions, ViewabilityConfig};
use feedwindow_adapter::{FeedController, ItemExtent, ScrollMetrics};

const ROW: u32 = 400;
const VIEWPORT: u32 = 800;

fn main() {
    let posts: Vec<u64> = (1000..1047).collect();
    let mut c = FeedController::new(
        posts.len(),
        PaginatorOptions::new(15, 10),
        ViewabilityConfig::new(60, 250),
    );

    let mut now_ms = 0u64;
    let mut offset = 0u64;
    while offset < 47 * ROW as u64 {
        let range = c.state().buffered_range;
        let layout = c.items(&posts).iter().enumerate().map(|(i, &id)| {
            let index = range.start + i;
            ItemExtent::new(id, index, index as u64 * ROW as u64, ROW)
        });
        if let Some(change) = c.on_layout(layout, now_ms) {
            println!("{now_ms}ms layout: play={:?}", change.activated());
        }

        let content = c.state().visible_range.end as u64 * ROW as u64;
        let update = c.on_scroll(ScrollMetrics::new(offset, VIEWPORT, content), now_ms);
        if update.load_requested {
            println!("{now_ms}ms load more requested at offset={offset}");
        }
        if let Some(change) = update.activity {
            println!(
                "{now_ms}ms scroll: pause={:?} play={:?}",
                change.deactivated(),
                change.activated()
            );
        }

        now_ms += 50;
        let tick = c.tick(now_ms);
        if tick.window_changed {
            println!("{now_ms}ms window={:?}", c.state().visible_range);
        }
        if let Some(change) = tick.activity {
            println!("{now_ms}ms dwell: play={:?}", change.activated());
        }
        offset += 120;
    }
}
