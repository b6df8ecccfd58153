//! postplan-split - Write the invoice and order subsets of the day.

fn main() -> std::process::ExitCode {
    postplan::cmd::split_cmd::main()
}
