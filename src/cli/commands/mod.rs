mod completions;

pub use completions::handle_completions_command;

use log::{debug, error};

use crate::cli::types::Cli;
use crate::document::MarkdownDocument;
use crate::iofile::TextIoFile;
use crate::toc::RenderOptions;
use crate::utils::error::BoxResult;

/// Insert or refresh the TOC in every file named on the command line.
/// Returns the number of files that failed.
pub fn handle_process_command(cli: &Cli) -> usize {
    let options = RenderOptions {
        numbered: cli.numbered,
        comment: cli.comment.clone(),
        alt_list_char: cli.alt_list_char,
        add_trailing_heading_chars: cli.add_trailing_heading_chars,
    };

    let mut failures = 0;
    for path in &cli.files {
        if let Err(err) = process_file(path, cli, &options) {
            error!("{}", err);
            failures += 1;
        }
    }
    failures
}

/// Read one file, build its TOC, then rewrite it. Output is opened only
/// after parsing succeeded, so a malformed file is left untouched.
fn process_file(path: &str, cli: &Cli, options: &RenderOptions) -> BoxResult<()> {
    let file = TextIoFile::new(path, cli.newline.map(Into::into));

    let mut reader = file.open_for_input()?;
    let mut document = MarkdownDocument::from_reader(&mut reader, file.printable_name())?;
    drop(reader);

    document.parse(&cli.heading_text, cli.heading_level, cli.skip_level)?;
    debug!("{}: parsed", file.printable_name());

    let mut sink = file.open_for_output()?;
    document.write(options, &mut sink)?;
    sink.flush()?;
    Ok(())
}
