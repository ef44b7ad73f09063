//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  echo \"sghl\" | switex                       auto-detect and convert
  echo \"sghl\" | switex -f en -t fa           explicit EN→FA
  switex -f ru -t en \"ghbdtn\"                inline text
  switex --clipboard                         convert the clipboard in place
  switex --daemon                            start the hotkey daemon
  switex --daemon --hotkey \"<ctrl>+<alt>+k\"  custom hotkey
  switex --list                              show supported pairs";

/// switex - convert text typed in the wrong keyboard layout
#[derive(Parser, Debug)]
#[command(name = "switex")]
#[command(version)]
#[command(about = "Convert text typed in the wrong keyboard layout")]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Text to convert (omit to read stdin)
    pub text: Option<String>,

    /// Layout the text was typed in (default: auto-detect)
    #[arg(short = 'f', long = "from", value_name = "LANG")]
    pub from: Option<String>,

    /// Layout the text should be in (default: auto-detect)
    #[arg(short = 't', long = "to", value_name = "LANG")]
    pub to: Option<String>,

    /// Convert the clipboard content and write the result back
    #[arg(short = 'c', long, conflicts_with_all = ["daemon", "text"])]
    pub clipboard: bool,

    /// Run the hotkey daemon
    #[arg(short = 'd', long, conflicts_with = "text")]
    pub daemon: bool,

    /// Daemon hotkey, e.g. "<ctrl>+<alt>+<space>"
    #[arg(long, value_name = "HOTKEY")]
    pub hotkey: Option<String>,

    /// List supported layout pairs and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Also append log lines to FILE
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Log debug details
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
