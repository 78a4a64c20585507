// Module declarations
mod cli;
mod document;
mod iofile;
mod toc;
mod utils;

fn main() {
    std::process::exit(cli::run());
}
