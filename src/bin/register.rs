use clap::Parser;
use signup_counter::{
    HttpCounterClient, MessageArea, SubmissionHandler, SubmissionOptions, SubmitEvent, TextCell,
};
use std::{sync::Arc, time::Duration};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "register")]
#[command(about = "Submit a registration to a running signup counter")]
struct Args {
    /// Email address to register
    email: String,

    /// Base URL of the counter service
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Only confirm once the counter has acknowledged the registration
    #[arg(long)]
    no_optimistic: bool,

    /// How long the confirmation stays up, in milliseconds
    #[arg(long, default_value_t = 5000)]
    clear_after_ms: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Prints every message change, timestamped relative to start.
struct ConsoleMessage {
    started: tokio::time::Instant,
}

impl MessageArea for ConsoleMessage {
    fn set_text(&self, text: &str) {
        let elapsed = self.started.elapsed().as_millis();
        if text.is_empty() {
            println!("[{elapsed:>5} ms] (message cleared)");
        } else {
            println!("[{elapsed:>5} ms] {text}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    let options = SubmissionOptions {
        optimistic: !args.no_optimistic,
        clear_after: Duration::from_millis(args.clear_after_ms),
        ..SubmissionOptions::default()
    };
    let clear_after = options.clear_after;

    let handler = SubmissionHandler::with_options(
        HttpCounterClient::new(&args.server),
        Arc::new(TextCell::new(args.email)),
        Arc::new(ConsoleMessage {
            started: tokio::time::Instant::now(),
        }),
        options,
    );

    let submission = handler.handle_submit(&mut SubmitEvent::new());
    let outcome = submission.outcome().await;

    if outcome.is_ok() || handler.options().optimistic {
        // Let the confirmation run its course before exiting.
        tokio::time::sleep(clear_after + Duration::from_millis(50)).await;
    }

    match outcome {
        Ok(count) => {
            println!("registered, {count} so far");
            Ok(())
        }
        Err(err) => {
            eprintln!("registration was not counted: {err}");
            std::process::exit(1);
        }
    }
}
