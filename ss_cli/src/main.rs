//! Terminal console for running single-elimination brackets.
//!
//! The console loads a roster export, splits it into groups and lets the
//! operator record results, undo them and regenerate draws.

use anyhow::{Context, Result};
use pico_args::Arguments;
use sportstacker::SeedPolicy;
use ss_cli::{
    commands::{Command, parse_command},
    config::CliConfig,
    console::{COMMANDS_HELP, Console, reply_text},
    logging, roster,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Run tournament brackets from a roster export

USAGE:
  ss_cli [OPTIONS]

OPTIONS:
  --roster FILE         Roster JSON  [env: STACKER_ROSTER]
  --policy POLICY       Seeding policy: token or random  [env: STACKER_SEED_POLICY] [default: token]
  --token N             First reseed token  [env: STACKER_SEED_TOKEN] [default: 0]
  --group KEY           Group to open first  [env: STACKER_GROUP]

FLAGS:
  -h, --help            Print help information
";

struct Args {
    roster: Option<PathBuf>,
    policy: Option<SeedPolicy>,
    token: Option<u64>,
    group: Option<String>,
}

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        roster: pargs.opt_value_from_str("--roster")?,
        policy: pargs.opt_value_from_fn("--policy", str::parse::<SeedPolicy>)?,
        token: pargs.opt_value_from_str("--token")?,
        group: pargs.opt_value_from_str("--group")?,
    };

    // Load .env if present
    dotenvy::dotenv().ok();
    logging::init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_env(args.roster, args.policy, args.token, args.group)?;
    tracing::info!(
        roster = %config.roster_path.display(),
        policy = %config.engine.seed_policy,
        token = config.engine.initial_token,
        "Loading roster"
    );

    let players = roster::load_roster(&config.roster_path)?;
    let mut console = Console::new(&players, config.engine, config.group.as_deref())?;

    print!("{COMMANDS_HELP}");
    match reply_text(console.handle(Command::Show)) {
        Some(out) => println!("\n{out}"),
        None => return Ok(()),
    }

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read command")?;
        if read == 0 {
            break;
        }

        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match reply_text(console.handle(command)) {
            Some(out) => println!("{out}"),
            None => break,
        }
    }

    tracing::info!("Console closed");
    Ok(())
}
