//! scores a simulated bus transit network from its simulation outputs.
//! a failed metric exits with status 1 before any score file is written.
use busnet_score::app::ScoreApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = ScoreApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("busnet-score failed: {e}");
        std::process::exit(e.exit_code());
    }
}
