//! Merge command implementation.

use crate::cli::MergeArgs;
use crate::error::Result;
use crate::output::Formatter;
use lexqa_store::{merge_and_filter, save_questions};

/// Execute the merge command.
pub fn execute_merge(args: MergeArgs, formatter: &Formatter) -> Result<()> {
    println!("{}", run_merge(args, formatter)?);
    Ok(())
}

/// Merge, filter, save, and render the summary.
pub fn run_merge(args: MergeArgs, formatter: &Formatter) -> Result<String> {
    let result = merge_and_filter(&args.input_dir, &args.category)?;
    save_questions(&args.output, &result.questions)?;
    Ok(formatter.merge_summary(&result, &args.category, &args.output))
}
