use anyhow::{bail, Context};
use conclave::config::EngineConfig;
use conclave::logging;
use conclave::replay::{parse_script, Replayer};
use std::path::PathBuf;

const USAGE: &str = "usage: conclave [--config PATH] [--json] [--text INITIAL] SCRIPT.jsonl";

struct Args {
    config: Option<PathBuf>,
    json: bool,
    initial_text: String,
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    setup_panic_handler();

    let args = parse_args(std::env::args().skip(1).collect())?;
    let mut config = EngineConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if args.json {
        config.replay.json_output = true;
    }
    logging::init(&config.logging);

    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let entries = parse_script(&raw)?;
    log::info!("replaying {} steps from {}", entries.len(), args.script.display());

    let mut replayer = Replayer::new(&args.initial_text);
    for entry in &entries {
        replayer
            .step(&entry.step)
            .with_context(|| format!("step at line {} failed", entry.line))?;
    }

    let report = replayer.report();
    if config.replay.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> anyhow::Result<Args> {
    let mut config = None;
    let mut json = false;
    let mut initial_text = String::new();
    let mut script = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--json" => json = true,
            "--text" => {
                initial_text = iter.next().context("--text needs a value")?;
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown option {}\n{}", other, USAGE),
            other => {
                if script.is_some() {
                    bail!("only one script can be replayed\n{}", USAGE);
                }
                script = Some(PathBuf::from(other));
            }
        }
    }

    let script = script.context(USAGE)?;
    Ok(Args {
        config,
        json,
        initial_text,
        script,
    })
}

/// パニックハンドラの設定
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        eprintln!("PANIC at {}: {}", location, message);
        std::process::exit(1);
    }));
}
