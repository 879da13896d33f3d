//! pysh - print Python source with syntax highlighting

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process;

use crossterm::tty::IsTty;
use log::{debug, info};

use pysh::config::Config;
use pysh::error::{Error, Result};
use pysh::render::{Renderer, TerminalBusy};
use pysh::syntax::{DocumentHighlighter, Highlighter, NoBusy, Palette, PYTHON_VERSION};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Options {
    scheme: Option<String>,
    line_numbers: bool,
    list_schemes: bool,
    states: bool,
    help: bool,
    version: bool,
    file: Option<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--version" | "-V" => options.version = true,
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--list-schemes" => options.list_schemes = true,
            "--states" => options.states = true,
            "--scheme" | "-s" => {
                let name = args
                    .next()
                    .ok_or_else(|| Error::Config(format!("{} needs a scheme name", arg)))?;
                options.scheme = Some(name);
            }
            "-" => options.file = None,
            other if other.starts_with('-') => {
                return Err(Error::Config(format!("unknown option: {}", other)));
            }
            _ => options.file = Some(arg),
        }
    }

    Ok(options)
}

fn run() -> Result<()> {
    let options = parse_args(env::args().skip(1))?;

    if options.help {
        print_usage();
        return Ok(());
    }
    if options.version {
        print_version();
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(scheme) = options.scheme.clone() {
        config.color_scheme = scheme;
    }
    if options.line_numbers {
        config.show_line_numbers = true;
    }

    if options.list_schemes {
        for name in config.scheme_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let palette = config.palette()?;
    info!("Using color scheme {}", palette.name());

    let source = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let stdout = io::stdout();
    let on_terminal = stdout.is_tty();
    let mut out = stdout.lock();
    highlight(&mut out, &source, &config, palette, options.states, on_terminal)
}

/// Highlight `source` and write it to `out`
///
/// The busy cursor is shown only for coloured output on a terminal.
fn highlight<W: Write>(
    out: &mut W,
    source: &str,
    config: &Config,
    palette: Palette,
    states: bool,
    on_terminal: bool,
) -> Result<()> {
    let lines: Vec<&str> = source.lines().collect();
    debug!("Read {} lines", lines.len());

    let mut document = DocumentHighlighter::new(Highlighter::new(palette));
    let results = if states || !on_terminal {
        document.rehighlight(&lines, &mut NoBusy)
    } else {
        document.rehighlight(&lines, &mut TerminalBusy::new(&mut *out))
    };

    let renderer = Renderer::from_config(config);
    if states {
        renderer.render_states(out, &lines, &results)
    } else {
        renderer.render(out, &lines, &results, document.highlighter().palette())
    }
}

fn print_usage() {
    println!("pysh {} - Python syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: pysh [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is omitted or -.");
    println!();
    println!("Options:");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!("  -s, --scheme NAME   Color scheme (IDLE, Pydev, Scintilla or a config scheme)");
    println!("  -n, --line-numbers  Prefix each line with its number");
    println!("      --list-schemes  List available color schemes");
    println!("      --states        Print each line's block state instead of colors");
    println!();
    println!("Configuration is read from ~/.pysh.toml; PYSH_COLOR_SCHEME overrides the scheme.");
    println!("Set RUST_LOG=debug for diagnostics.");
}

fn print_version() {
    println!("pysh {}", env!("CARGO_PKG_VERSION"));
    println!("Keyword and builtin tables from Python {}", PYTHON_VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["-s", "IDLE", "-n", "script.py"])).unwrap();
        assert_eq!(options.scheme.as_deref(), Some("IDLE"));
        assert!(options.line_numbers);
        assert_eq!(options.file.as_deref(), Some("script.py"));
    }

    #[test]
    fn test_parse_args_stdin() {
        let options = parse_args(args(&["--states", "-"])).unwrap();
        assert!(options.states);
        assert_eq!(options.file, None);
    }

    fn highlight_to_string(source: &str, states: bool, on_terminal: bool) -> String {
        let mut out = Vec::new();
        highlight(
            &mut out,
            source,
            &Config::default(),
            Palette::default(),
            states,
            on_terminal,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_states_output_is_plain() {
        let out = highlight_to_string("x = '''\ndoc\n'''\n", true, true);
        assert_eq!(out, "1 x = '''\n1 doc\n0 '''\n");
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_busy_cursor_only_on_terminal() {
        let piped = highlight_to_string("x = 1\n", false, false);
        assert!(!piped.contains("\x1b[?25l"));

        let terminal = highlight_to_string("x = 1\n", false, true);
        assert!(terminal.starts_with("\x1b[?25l\x1b[?25h"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(args(&["--scheme"])), Err(Error::Config(_))));
        assert!(matches!(parse_args(args(&["--bogus"])), Err(Error::Config(_))));
    }
}
