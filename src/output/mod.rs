pub mod report;

use colored::Colorize;
use itertools::Itertools;

use crate::paginator::PageLink;
use crate::session::{PageView, ProfileView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn render(view: &PageView, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => render_json(view),
        OutputFormat::Html => report::render_html(view),
    }
}

fn render_tabs(view: &PageView) -> String {
    view.tabs
        .iter()
        .map(|t| {
            if t.active {
                format!("[{}]", t.label).blue().bold().to_string()
            } else {
                t.label.dimmed().to_string()
            }
        })
        .join("  ")
}

fn render_page_bar(view: &PageView) -> String {
    let mut parts: Vec<String> = Vec::new();
    if view.has_previous {
        parts.push("‹ Previous".blue().to_string());
    }
    for link in view.page_links.iter() {
        let rendered = match link {
            PageLink::Number(n) if *n == view.current_page => format!("[{n}]").bold().to_string(),
            PageLink::Number(n) => n.to_string().blue().to_string(),
            PageLink::Ellipsis => "...".dimmed().to_string(),
        };
        parts.push(rendered);
    }
    if view.has_next {
        parts.push("Next ›".blue().to_string());
    }
    parts.join(" ")
}

fn render_profile(out: &mut String, profile: &ProfileView) {
    let r = &profile.result;
    out.push_str(&format!(
        "\n{}\n",
        format!("── {} profile ──", r.platform).bold()
    ));
    out.push_str(&format!("{}\n", r.display_name.bold()));
    out.push_str(&format!("{}\n", r.title));
    if let Some(location) = r.location.as_deref() {
        out.push_str(&format!("{}\n", location.dimmed()));
    }
    out.push_str(&format!("{}\n", r.url.green()));
    if !r.snippet.is_empty() {
        out.push_str(&format!("{}\n", r.snippet));
    }
    out.push_str(&format!(":: avatar : {}\n", profile.avatar_url));
    out.push_str(&format!(":: header : {}\n", profile.header_url));
}

pub fn render_text(view: &PageView) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Search:".bold(), view.query));
    out.push_str(&render_tabs(view));
    out.push_str("\n\n");

    if view.empty_dataset {
        out.push_str(&format!("{}\n", "No results found".bold()));
        out.push_str(&format!("{} results are not available.\n", view.query));
        return out.into_bytes();
    }

    out.push_str(&format!(
        "{}\n\n",
        format!("About {} results", view.total_results).dimmed()
    ));

    if view.results.is_empty() {
        out.push_str("No results found. Try adjusting your search or filters.\n");
    }

    if !view.featured_images.is_empty() {
        out.push_str(&format!("{}\n", "Images".bold()));
        for img in view.featured_images.iter() {
            out.push_str(&format!("  {} ({})\n", img.title, img.source.dimmed()));
        }
        out.push('\n');
    }

    for card in view.results.iter() {
        let r = &card.result;
        out.push_str(&format!(
            "{} {} {}\n",
            r.display_name.bold(),
            "·".dimmed(),
            r.platform.label().dimmed()
        ));
        out.push_str(&format!("{}\n", r.url.green()));
        out.push_str(&format!("{}\n", r.title.blue().underline()));
        if let Some(date) = r.date.as_deref() {
            out.push_str(&format!("{} - ", date.dimmed()));
        }
        if !r.snippet.is_empty() {
            out.push_str(&r.snippet);
        }
        out.push_str(&format!("\n{}\n\n", format!("id: {}", r.id).dimmed()));
    }

    if !view.page_links.is_empty() {
        out.push_str(&render_page_bar(view));
        out.push_str("\n\n");
    }

    if !view.related_searches.is_empty() {
        out.push_str(&format!("{}\n", "People also search for".bold()));
        for (i, q) in view.related_searches.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, q));
        }
    }

    if let Some(profile) = view.profile.as_ref() {
        render_profile(&mut out, profile);
    }

    out.into_bytes()
}

pub fn render_json(view: &PageView) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(view).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}
