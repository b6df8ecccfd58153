//! postplan-compile - Compile the day's sheets into a posting plan.

fn main() -> std::process::ExitCode {
    postplan::cmd::compile_cmd::main()
}
