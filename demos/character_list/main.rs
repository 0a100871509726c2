//! Character list demo: fetch the whole collection, then page through it
//!
//! ```text
//! cargo run --example character_list -- [config.yaml]
//! RUST_LOG=character_view=debug cargo run --example character_list
//! ```

use anyhow::Result;
use character_view::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_page(view: &ViewCoordinator<HttpPageSource>, title: &str) {
    let snapshot = view.snapshot();
    println!(
        "\n== {} (page {}/{}, {} matches, sort {})",
        title, snapshot.page_index, snapshot.total_pages, snapshot.total_matches, snapshot.sort
    );

    if let Some(error) = &snapshot.error {
        println!("   {}", error);
        return;
    }
    if snapshot.is_empty_result() {
        println!("   No results found matching your filters");
        return;
    }

    for record in &snapshot.current_page {
        let (episodes, more) = record.episode_preview(2);
        println!(
            "   {:>4}  {:<32} {:<8} {:<12} {:<16} {:<8} {} episode(s){}",
            record.id,
            record.name,
            record.status,
            record.species,
            record.type_label(),
            record.gender,
            episodes.len(),
            if more { " ..." } else { "" }
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ViewConfig::from_yaml_file(&path)?,
        None => ViewConfig::default(),
    };

    let source = Arc::new(HttpPageSource::new(config.source.base_url.clone()));
    let mut view = ViewCoordinator::from_config(source, &config)?;

    if view.load().await == ViewState::Failed {
        print_page(&view, "Characters");
        return Ok(());
    }
    print_page(&view, "Characters");

    view.set_filter(FilterPatch::field(FilterField::Status, "alive"));
    view.set_sort_str("name-desc")?;
    print_page(&view, "Alive, Z-A");

    view.set_page_size(20)?;
    view.set_page_index(2)?;
    print_page(&view, "Alive, Z-A, 20 per page");

    if let Some(first) = view.current_page().first().map(|r| r.id) {
        if let Some(selected) = view.toggle_selection(first) {
            println!(
                "\n== Selected: {} ({}, from {}, last seen at {})",
                selected.name,
                selected.species,
                selected.origin.name,
                selected.location.name
            );
        }
    }

    view.reset_filters();
    print_page(&view, "Filters reset");

    Ok(())
}
