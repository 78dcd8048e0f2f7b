use codebridge::bridge::{FormBridge, Operation, RenderSink};
use codebridge::config::RuntimeConfig;
use codebridge::error::BridgeError;

struct StdoutSink;

impl RenderSink for StdoutSink {
    fn render(&self, text: &str) {
        println!("{text}");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BridgeError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (op, method, text) = match args.as_slice() {
        [op, method, text] => match Operation::from_str(op) {
            Some(op) => (op, method.as_str(), text.as_str()),
            None => usage(),
        },
        _ => usage(),
    };

    let bridge = FormBridge::new(&RuntimeConfig::from_env())?;
    match op {
        Operation::Encode => bridge.submit_encode(text, method, &StdoutSink).await,
        Operation::Decode => bridge.submit_decode(text, method, &StdoutSink).await,
    }
    Ok(())
}

fn usage() -> ! {
    eprintln!("usage: codebridge <encode|decode> <type> <text>");
    std::process::exit(2);
}
