use lexi::{PagePlan, PlanError};
use std::env;

fn usage(program: &str) {
    eprintln!("Shows how a document page would be navigated, without a browser.");
    eprintln!();
    eprintln!(
        "Usage: {} <path/to/page-config.json> <page-url> <toc-entries> [--server-rendered]",
        program
    );
    eprintln!();
    eprintln!("The config is the object the page injects as window.letlexiSectionNav.");
}

/// Prints the navigation plan of a page as JSON.
fn main() -> Result<(), PlanError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("lexi");
    let server_rendered = args.iter().any(|a| a == "--server-rendered");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    let [config_path, url, toc] = positional.as_slice() else {
        usage(program);
        std::process::exit(1);
    };
    let Ok(toc_entries) = toc.parse::<usize>() else {
        eprintln!("<toc-entries> must be a non-negative integer, got '{}'", toc);
        std::process::exit(1);
    };

    let plan = PagePlan::from_file(config_path, url, toc_entries, server_rendered)?;
    log::info!("{} sections, starting at {}", plan.total, plan.current);

    match serde_json::to_string_pretty(&plan.to_json()) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to format plan: {}", e),
    }
    Ok(())
}
