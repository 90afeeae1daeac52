use log::{info, warn};
use meridian_runner::{EngineHandle, Session, load_config, load_default_config};
use meridian_sequencer::{ChannelTransport, Contributor};
use tokio::io::{AsyncBufReadExt, BufReader};

fn print_help() {
    eprintln!(
        r#"Meridian Runner - single-symbol settlement engine over JSON lines

USAGE:
    meridian-runner [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

PROTOCOL:
    One JSON command per line on stdin, one response per line on stdout.
    Published fills are written to stdout as PUBLISH messages.

    {{"op":"submit","order":{{"type":"limit","side":"BID","quantity":"1","price":"10"}}}}
    {{"op":"submit","order":{{"type":"market","side":"ASK","quantity":"1"}}}}
    {{"op":"settle"}}
    {{"op":"cancel","id":"<order id>"}}
    {{"op":"spread"}} | {{"op":"best_bid"}} | {{"op":"best_ask"}} | {{"op":"depth"}}
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            load_config(&path)?
        }
        None => {
            info!("Using default configuration");
            load_default_config()?
        }
    };
    info!("Symbol: {}", config.symbol);
    info!("Publishing fills as {} on {}", config.publisher, config.topic);

    let (transport, mut published) = ChannelTransport::pair();
    let contributor = Contributor::new(transport, config.publisher.clone(), config.topic.clone());
    let mut session = Session::new(EngineHandle::new(config.build_engine()), contributor);

    let writer = tokio::spawn(async move {
        while let Some(message) = published.recv().await {
            match serde_json::to_string(&message) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!("Failed to encode published message: {}", e),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = session.handle_line(&line).await;
        println!("{}", response.to_line());
    }

    info!("Input closed, shutting down");
    drop(session);
    writer.await?;
    Ok(())
}
