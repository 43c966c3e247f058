use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "serpsim",
    version,
    about = "simulated search results page for survey research",
    long_about = "serpsim renders a mock search-engine results page from a fixed dataset, with platform tabs, pagination, related searches and profile views. Interactions are recorded as tracking events.\n\nExamples:\n  serpsim -d ./data/tanisha_jefferson.yml\n  serpsim -d ./data/tanisha_jefferson.yml -t LinkedIn -p 2\n  serpsim -d ./data/tanisha_jefferson.yml -i --track-file ./events.jsonl\n  serpsim -d ./data/tanisha_jefferson.yml -o page.html\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'F',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html). Inferred from --output when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'd',
        long = "ds",
        visible_alias = "dataset",
        value_name = "FILE",
        help_heading = "Input",
        help = "Fixture dataset to render (YAML or JSON)."
    )]
    pub dataset: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.serpsim/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a default config file to the config path if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'q',
        long = "qr",
        visible_alias = "query",
        value_name = "TEXT",
        help_heading = "Page",
        help = "Search box text (defaults to the dataset subject)."
    )]
    pub query: Option<String>,

    #[arg(
        short = 't',
        long = "tb",
        visible_alias = "tab",
        value_name = "TAB",
        help_heading = "Page",
        help = "Active tab (All, LinkedIn, Facebook, Videos, Images, News, Shopping)."
    )]
    pub tab: Option<String>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Page",
        help = "Page number to show (1-based)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 's',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Page",
        help = "Results per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'i',
        long = "int",
        visible_alias = "interactive",
        help_heading = "Page",
        help = "Read navigation commands from stdin (type 'help' for the list)."
    )]
    pub interactive: bool,

    #[arg(
        short = 'T',
        long = "tf",
        visible_alias = "track-file",
        value_name = "FILE",
        help_heading = "Tracking",
        help = "Append tracking events to a JSON-lines file."
    )]
    pub track_file: Option<String>,
}
