use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::command::{self, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, OutputFormat};
use crate::paginator::DEFAULT_PAGE_SIZE;
use crate::results::{Category, Dataset};
use crate::session::Session;
use crate::tracking::{FanoutTracker, JsonlTracker, LogTracker, Tracker};

fn print_banner() {
    const BANNER: &str = r#"
   ________  _________  _____(_)___ ___
  / ___/ _ \/ ___/ __ \/ ___/ / __ `__ \
 (__  )  __/ /  / /_/ (__  ) / / / / / /
/____/\___/_/  / .___/____/_/_/ /_/ /_/
              /_/
       v0.1.0 - simulated search results page
    "#;
    let _ = write!(&mut rainbowcoat::stdout(), "{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    dataset_path: String,
    query: Option<String>,
    category: Category,
    page: usize,
    page_size: usize,
    output: Option<String>,
    output_format: OutputFormat,
    track_file: Option<String>,
    interactive: bool,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let dataset_path = args
        .dataset
        .or(cfg.dataset)
        .map(|p| config::expand_tilde_string(&p))
        .ok_or_else(|| "a dataset is required (--dataset or 'dataset' in config)".to_string())?;

    let query = args
        .query
        .or(cfg.query)
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    let category = Category::parse(args.tab.or(cfg.tab).as_deref().unwrap_or("All"));

    let page = args.page.or(cfg.page).unwrap_or(1);
    if page == 0 {
        return Err("invalid page, expected positive integer".to_string());
    }
    let page_size = args.page_size.or(cfg.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page-size, expected positive integer".to_string());
    }

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw).ok_or_else(|| {
            format!("invalid output format '{raw}', expected text, json or html")
        })?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    let track_file = args
        .track_file
        .or(cfg.track_file)
        .map(|p| config::expand_tilde_string(&p));
    let interactive = args.interactive || cfg.interactive.unwrap_or(false);
    if interactive && output.is_some() {
        return Err("output file cannot be combined with interactive mode".to_string());
    }

    Ok(RunConfig {
        dataset_path,
        query,
        category,
        page,
        page_size,
        output,
        output_format,
        track_file,
        interactive,
        no_color,
        verbose: args.verbose,
    })
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "serpsim=warn",
        1 => "serpsim=info",
        _ => "serpsim=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_tracker(track_file: Option<&str>) -> Result<Box<dyn Tracker>, String> {
    match track_file {
        Some(path) => {
            let jsonl = JsonlTracker::open(&PathBuf::from(path))?;
            Ok(Box::new(FanoutTracker::new(vec![
                Box::new(LogTracker),
                Box::new(jsonl),
            ])))
        }
        None => Ok(Box::new(LogTracker)),
    }
}

/// Puts a fresh session into the requested starting state. These are
/// applied as ordinary actions, so they are tracked like clicks.
fn prepare_session(session: &mut Session, run: &RunConfig) {
    session.start();
    if let Some(query) = run.query.as_deref() {
        if query != session.query() {
            session.search(query);
        }
    }
    if run.category != Category::All {
        session.select_category(run.category.clone());
    }
    if run.page > 1 {
        let landed = session.go_to_page(run.page);
        if landed != run.page {
            tracing::warn!(requested = run.page, landed, "requested page out of range");
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Flow {
    Render,
    Message(String),
    Quit,
}

fn apply_command(session: &mut Session, cmd: Command) -> Flow {
    match cmd {
        Command::Tab(category) => {
            session.select_category(category);
            Flow::Render
        }
        Command::Page(n) => {
            session.go_to_page(n);
            Flow::Render
        }
        Command::Next => {
            if session.next_page() {
                Flow::Render
            } else {
                Flow::Message("already on the last page".to_string())
            }
        }
        Command::Previous => {
            if session.previous_page() {
                Flow::Render
            } else {
                Flow::Message("already on the first page".to_string())
            }
        }
        Command::Open(id) => {
            // only cards on the rendered page are clickable
            let shown = session.view().results.iter().any(|c| c.result.id == id);
            if !shown {
                return Flow::Message(format!("no result with id '{id}' on this page"));
            }
            if session.open_result(&id) {
                Flow::Render
            } else {
                Flow::Message(format!("opened {id} (no profile view for this platform)"))
            }
        }
        Command::Close => {
            session.close_profile();
            Flow::Render
        }
        Command::Search(query) => {
            session.search(&query);
            Flow::Render
        }
        Command::Related(n) => {
            let shown = session.view().related_searches;
            match n.checked_sub(1).and_then(|i| shown.get(i)) {
                Some(query) => {
                    session.search(query);
                    Flow::Render
                }
                None => Flow::Message(format!("no related search #{n} on this page")),
            }
        }
        Command::Show => Flow::Render,
        Command::Help => Flow::Message(command::HELP.to_string()),
        Command::Quit => Flow::Quit,
    }
}

fn run_interactive(
    session: &mut Session,
    format: OutputFormat,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<(), String> {
    let write_err = |e: std::io::Error| format!("failed to write page: {e}");
    out.write_all(&output::render(&session.view(), format))
        .map_err(write_err)?;
    for line in input.lines() {
        let line = line.map_err(|e| format!("failed to read command: {e}"))?;
        let flow = match command::parse_command(&line) {
            Ok(cmd) => apply_command(session, cmd),
            Err(e) => Flow::Message(e),
        };
        match flow {
            Flow::Render => out
                .write_all(&output::render(&session.view(), format))
                .map_err(write_err)?,
            Flow::Message(msg) => writeln!(out, "{}", msg.yellow()).map_err(write_err)?,
            Flow::Quit => break,
        }
        out.flush().map_err(write_err)?;
    }
    Ok(())
}

fn run(run: RunConfig) -> Result<(), String> {
    init_tracing(run.verbose);
    if run.no_color || run.output.is_some() {
        colored::control::set_override(false);
    }

    let dataset = Dataset::load(&PathBuf::from(&run.dataset_path)).map_err(|e| e.to_string())?;
    let tracker = build_tracker(run.track_file.as_deref())?;
    let mut session =
        Session::new(Arc::new(dataset), run.page_size, tracker).map_err(|e| e.to_string())?;
    prepare_session(&mut session, &run);

    if run.interactive {
        print_banner();
        format_kv_line("Dataset", &run.dataset_path);
        format_kv_line("Results", &session.dataset().results.len().to_string());
        format_kv_line("Page size", &run.page_size.to_string());
        if let Some(track_file) = run.track_file.as_deref() {
            format_kv_line("Tracking", track_file);
        }
        println!();
        let stdin = std::io::stdin();
        return run_interactive(&mut session, run.output_format, stdin.lock(), std::io::stdout());
    }

    let rendered = output::render(&session.view(), run.output_format);
    match run.output.as_deref() {
        Some(path) => {
            std::fs::write(path, &rendered)
                .map_err(|e| format!("failed to write output file '{path}': {e}"))?;
            tracing::info!(path, "wrote page");
        }
        None => {
            std::io::stdout()
                .write_all(&rendered)
                .map_err(|e| format!("failed to write page: {e}"))?;
        }
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                let mut cmd = CliArgs::command();
                print!("{}", cmd.render_long_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));

    if args.init_config {
        let path = user_config_path
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine a config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!("config: {}", path.display());
        return Ok(());
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run_config = build_run_config(args, cfg)?;
    run(run_config)
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use crate::results::Platform;
    use crate::tracking::MemoryTracker;
    use clap::Parser;

    const DATASET: &str = r#"
scenario: demo
subject: Jane Roe
related_searches:
  Jane Roe: ["Jane Roe Atlanta", "Jane Roe LinkedIn"]
results:
  - { id: li-1, platform: LinkedIn, display_name: Jane Roe, title: "Jane Roe - Analyst", url: "https://linkedin.example/li-1" }
  - { id: fb-1, platform: Facebook, display_name: Jane Roe, title: "Jane Roe | Facebook", url: "https://facebook.example/fb-1" }
  - { id: web-1, platform: Web, display_name: Example, title: "Jane Roe bio", url: "https://web.example/1" }
"#;

    fn session(tracker: MemoryTracker) -> Session {
        let dataset = Dataset::from_yaml_str(DATASET).unwrap();
        Session::new(Arc::new(dataset), 2, Box::new(tracker)).unwrap()
    }

    #[test]
    fn cli_overrides_config() {
        let args = CliArgs::parse_from(["serpsim", "-d", "a.yml", "-t", "linkedin", "-s", "5"]);
        let cfg = ConfigFile {
            dataset: Some("b.yml".to_string()),
            tab: Some("Facebook".to_string()),
            page_size: Some(20),
            page: Some(3),
            ..ConfigFile::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.dataset_path, "a.yml");
        assert_eq!(run.category, Category::Platform(Platform::LinkedIn));
        assert_eq!(run.page_size, 5);
        assert_eq!(run.page, 3);
    }

    #[test]
    fn dataset_is_required() {
        let args = CliArgs::parse_from(["serpsim"]);
        assert!(build_run_config(args, ConfigFile::default()).is_err());
    }

    #[test]
    fn output_format_inferred_from_output_path() {
        let args = CliArgs::parse_from(["serpsim", "-d", "a.yml", "-o", "page.html"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, OutputFormat::Html);

        let args = CliArgs::parse_from(["serpsim", "-d", "a.yml", "-o", "page.html", "-F", "json"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, OutputFormat::Json);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let args = CliArgs::parse_from(["serpsim", "-d", "a.yml", "--page-size", "0"]);
        assert!(build_run_config(args, ConfigFile::default()).is_err());
    }

    #[test]
    fn related_command_searches_nth_entry() {
        let tracker = MemoryTracker::new();
        let mut s = session(tracker.clone());
        assert_eq!(apply_command(&mut s, Command::Related(2)), Flow::Render);
        assert_eq!(s.query(), "Jane Roe LinkedIn");
        assert!(matches!(
            apply_command(&mut s, Command::Related(9)),
            Flow::Message(_)
        ));
        assert_eq!(tracker.names(), vec!["search"]);
    }

    #[test]
    fn hidden_results_and_related_searches_are_not_clickable() {
        let tracker = MemoryTracker::new();
        let mut s = session(tracker.clone());
        apply_command(&mut s, Command::Tab(Category::Platform(Platform::LinkedIn)));

        assert!(matches!(
            apply_command(&mut s, Command::Related(1)),
            Flow::Message(_)
        ));
        assert_eq!(s.query(), "Jane Roe");
        assert!(matches!(
            apply_command(&mut s, Command::Open("fb-1".to_string())),
            Flow::Message(_)
        ));
        assert!(s.selected().is_none());
        assert_eq!(tracker.names(), vec!["tab_change"]);

        assert_eq!(
            apply_command(&mut s, Command::Open("li-1".to_string())),
            Flow::Render
        );
        assert_eq!(tracker.names(), vec!["tab_change", "result_click"]);
    }

    #[test]
    fn results_on_other_pages_are_not_clickable() {
        let tracker = MemoryTracker::new();
        let mut s = session(tracker.clone());
        assert!(matches!(
            apply_command(&mut s, Command::Open("web-1".to_string())),
            Flow::Message(_)
        ));
        assert!(tracker.names().is_empty());
    }

    #[test]
    fn next_on_last_page_reports_message() {
        let mut s = session(MemoryTracker::new());
        assert_eq!(apply_command(&mut s, Command::Next), Flow::Render);
        assert!(matches!(apply_command(&mut s, Command::Next), Flow::Message(_)));
    }

    #[test]
    fn interactive_loop_renders_until_quit() {
        colored::control::set_override(false);
        let tracker = MemoryTracker::new();
        let mut s = session(tracker.clone());
        let input = "tab facebook\nopen fb-1\nbogus\nquit\npage 2\n";
        let mut out: Vec<u8> = Vec::new();
        run_interactive(&mut s, OutputFormat::Text, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Facebook profile"));
        assert!(text.contains("unknown command 'bogus'"));
        assert_eq!(s.state().current_page, 1);
        assert_eq!(tracker.names(), vec!["tab_change", "result_click"]);
    }
}
