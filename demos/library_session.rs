use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use serpsim::output::{self, OutputFormat};
use serpsim::results::{Category, Dataset};
use serpsim::session::Session;
use serpsim::tracking::MemoryTracker;

fn main() -> Result<(), Box<dyn Error>> {
    let dataset = Dataset::load(Path::new("./data/tanisha_jefferson.yml"))?;
    let tracker = MemoryTracker::new();
    let mut session = Session::new(Arc::new(dataset), 10, Box::new(tracker.clone()))?;

    session.start();
    session.go_to_page(2);
    session.select_category(Category::parse("LinkedIn"));
    session.open_result("li-tanisha-jefferson");

    let view = session.view();
    println!("Tab: {}", view.active_category);
    println!("Results: {} ({} pages)", view.total_results, view.total_pages);
    std::io::Write::write_all(&mut std::io::stdout(), &output::render(&view, OutputFormat::Text))?;

    for event in tracker.events() {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}
