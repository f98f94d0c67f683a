use std::path::PathBuf;

use camtag_core::{Mode, TagSet};
use clap::{ArgAction, Parser};

pub const USAGE: &str = "camtag [OPTIONS] add|del tag,tag... -- file file...";

pub const CAMTAG_AFTER_HELP: &str = concat!(
    "Files are matched with permanodes by file name and size (exact match).\n\n",
    "Results format: path permanode tag tag...\n",
    "            or: path permanode STATUS\n",
    "            or: path STATUS\n\n",
    "A tag printed as !tag could not be changed; see the log on stderr.\n\n",
    "Environment:\n",
    "  CAMTAG_SERVER        Server base URL (default http://localhost:3179/)\n",
    "  CAMTAG_TIMEOUT_SECS  Per-request timeout; unset or 0 waits forever\n",
    "  CAMTAG_LOG           Log filter directives, overriding -v/--trace\n",
);

#[derive(Parser, Debug)]
#[command(
    name = "camtag",
    author,
    version,
    about = "Add or remove tags on the permanodes behind local files.",
    override_usage = USAGE,
    after_help = CAMTAG_AFTER_HELP
)]
#[allow(clippy::struct_excessive_bools)]
pub struct CamtagCli {
    #[arg(value_name = "add|del", help = "Whether to add or remove the tags (case-insensitive)")]
    pub mode: Mode,
    #[arg(
        value_name = "TAGS",
        allow_hyphen_values = true,
        help = "Comma-separated tags, e.g. vacation,2023"
    )]
    pub tags: TagSet,
    #[arg(
        value_name = "FILE",
        last = true,
        required = true,
        help = "Files to tag, given after a literal --"
    )]
    pub files: Vec<PathBuf>,
    #[arg(long, value_name = "URL", help = "Server base URL (overrides CAMTAG_SERVER)")]
    pub server: Option<String>,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v")]
    pub trace: bool,
    #[arg(long, help = "Emit one JSON object per file instead of plain lines")]
    pub json: bool,
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
    #[arg(long, help = "Resolve and reconcile, but do not send any mutation")]
    pub dry_run: bool,
}
