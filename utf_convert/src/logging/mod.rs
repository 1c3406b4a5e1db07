//! Logging to the terminal.
//!
//! Records from this binary and from `utf_flow` go to stderr so they never
//! mix with converted output on stdout.

use std::io;

use log::LevelFilter;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;

mod console_appender;

use console_appender::ConsoleAppender;

// stack buffer size used by the console appender.
// 1 KiB should be sufficient for most messages.
const WRITE_BUF_SIZE: usize = 0x400;

const PATTERN: &str = "[{d(%Y-%m-%d %H:%M:%S)(utc)} {h({l:<5})} {t}] {m}{n}";

/// Installs the logger.
///
/// `color` overrides the automatic detection of ANSI escape support.
/// `verbose` raises the maximum level by one step per count.
pub fn init(color: Option<bool>, verbose: u8) -> anyhow::Result<()> {
    let color = color.unwrap_or_else(|| supports_ansi_escapes(&io::stderr()));
    let config = build_config(level_filter(verbose), color)?;
    log4rs::init_config(config)?;
    Ok(())
}

fn build_config(level: LevelFilter, color: bool) -> anyhow::Result<Config> {
    let console = ConsoleAppender::new(Box::new(PatternEncoder::new(PATTERN)), color);
    let console = Appender::builder()
        .filter(Box::new(ThresholdFilter::new(level)))
        .build("console", Box::new(console));

    let config = Config::builder()
        .appender(console)
        .build(Root::builder().appender("console").build(level))?;
    Ok(config)
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Performs automatic detection of whether ANSI escape codes are supported.
fn supports_ansi_escapes<T: io::IsTerminal>(stream: &T) -> bool {
    use anstyle_query as a;

    let clicolor = a::clicolor();
    if a::no_color() {
        false
    } else if a::clicolor_force() {
        true
    } else if clicolor == Some(false) {
        false
    } else {
        stream.is_terminal() && (a::term_supports_color() || clicolor == Some(true) || a::is_ci())
    }
}
