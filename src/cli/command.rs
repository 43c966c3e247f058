use crate::results::Category;

/// One line typed in interactive mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tab(Category),
    Page(usize),
    Next,
    Previous,
    Open(String),
    Close,
    Search(String),
    Related(usize),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  tab <name>       switch tab (All, LinkedIn, Facebook, Videos, Images, News, Shopping)
  page <n>         jump to page n
  next | prev      move one page forward or back
  open <id>        click a result (LinkedIn/Facebook open a profile)
  close            close the open profile
  search <text>    replace the search box text
  related <n>      search the n-th related query
  show             re-render the page
  help             show this list
  quit             exit
";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let needs_arg = |what: &str| -> Result<(), String> {
        if rest.is_empty() {
            Err(format!("'{verb}' expects {what}"))
        } else {
            Ok(())
        }
    };
    let number = |what: &str| -> Result<usize, String> {
        needs_arg(what)?;
        rest.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("invalid {what} '{rest}'"))
    };

    match verb.to_lowercase().as_str() {
        "tab" | "t" => {
            needs_arg("a tab name")?;
            Ok(Command::Tab(Category::parse(rest)))
        }
        "page" | "p" => Ok(Command::Page(number("page number")?)),
        "next" | "n" => Ok(Command::Next),
        "prev" | "previous" => Ok(Command::Previous),
        "open" | "o" => {
            needs_arg("a result id")?;
            Ok(Command::Open(rest.to_string()))
        }
        "close" => Ok(Command::Close),
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "related" | "r" => Ok(Command::Related(number("related index")?)),
        "show" | "" => Ok(Command::Show),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}
