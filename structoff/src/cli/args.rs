//! CLI argument definitions

use crate::domain::DEFAULT_PLACEHOLDER;
use crate::fetcharg::FetchType;
use crate::layout::pahole::DEFAULT_TOOL;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "structoff",
    about = "Resolve a struct field chain into nested dereference offsets",
    after_help = "\
EXAMPLES:
    structoff --bin vmlinux --expr 'task_struct->mm->pgd'
    structoff --bin vmlinux --expr 'task_struct->mm' --base %di --type u64
    structoff --bin ./app --expr 'conn->peer->addr' --json"
)]
pub struct Args {
    /// Compiled binary carrying DWARF (or BTF) type information
    #[arg(long = "bin", value_name = "PATH")]
    pub binary: PathBuf,

    /// Field chain, e.g. `task_struct->mm->pgd`
    #[arg(long, value_name = "EXPR")]
    pub expr: String,

    /// Struct layout tool to query
    #[arg(long, value_name = "PATH", env = "STRUCTOFF_PAHOLE", default_value = DEFAULT_TOOL)]
    pub pahole: PathBuf,

    /// Placeholder for the base pointer in the expression (e.g. `%di`)
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    pub base: String,

    /// Append a fetch type to form a uprobe argument (u8..u64, s8..s64, c8..c256)
    #[arg(long = "type", value_name = "TYPE")]
    pub fetch_type: Option<FetchType>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Only print the expression
    #[arg(short, long)]
    pub quiet: bool,
}
