use fleet_cli::run_cli;

/// Exit status used when a command is interrupted with Ctrl+C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // prompts block on stdin, so the interrupt has to end the process itself
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    });

    run_cli().await
}
