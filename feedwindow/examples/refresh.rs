// Example: pull-to-refresh after the caller re-fetched its list.
use feedwindow::{Paginator, PaginatorOptions};

fn main() {
    let mut posts: Vec<u32> = (0..100).collect();
    let mut p = Paginator::new(
        posts.len(),
        PaginatorOptions::default().with_on_change(Some(|p: &Paginator, loading: bool| {
            println!("on_change: loading={loading} visible={:?}", p.visible_range());
        })),
    );

    for now_ms in [0u64, 1000, 2000] {
        p.load_more(now_ms);
        p.tick(now_ms + 200);
    }

    // The caller re-fetches first (the paginator never touches the data), then resets.
    posts.truncate(40);
    p.set_count(posts.len());
    let due = p.refresh(5000);
    println!("refreshing until {due}ms, loading={}", p.loading());
    p.tick(due);
    println!("state={:?}", p.state());
}
