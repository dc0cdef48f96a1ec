// Example: paging through an in-memory feed and tracking the active post.
use feedwindow::{ActivityTracker, Paginator, PaginatorOptions, ViewToken};

fn main() {
    let posts: Vec<String> = (0..47).map(|i| format!("post-{i}")).collect();
    let mut p = Paginator::new(posts.len(), PaginatorOptions::new(15, 10));
    println!(
        "visible={:?} mounted={}",
        p.visible_range(),
        p.items(&posts).len()
    );

    // The end-of-list trigger fires many times; only the first call is accepted.
    let mut now_ms = 0;
    while p.has_more() {
        let accepted = p.load_more(now_ms);
        let ignored = !p.load_more(now_ms + 10);
        now_ms += p.options().pacing_delay_ms;
        p.tick(now_ms);
        println!(
            "accepted={accepted} ignored_second={ignored} visible={:?} has_more={}",
            p.visible_range(),
            p.has_more()
        );
    }

    let mut t = ActivityTracker::new();
    for report in [
        vec![ViewToken::hidden(posts[0].clone(), Some(0))],
        vec![
            ViewToken::viewable(posts[0].clone(), 0),
            ViewToken::hidden(posts[1].clone(), Some(1)),
        ],
        vec![ViewToken::viewable(posts[1].clone(), 1)],
    ] {
        if let Some(change) = t.on_viewable_items_changed(&report) {
            println!(
                "pause={:?} play={:?}",
                change.deactivated(),
                change.activated()
            );
        }
    }
}
