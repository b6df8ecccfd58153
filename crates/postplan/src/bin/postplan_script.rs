//! postplan-script - Replay the posting plan into a GUI scripting file.

fn main() -> std::process::ExitCode {
    postplan::cmd::script_cmd::main()
}
