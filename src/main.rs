//! seedfx command-line tools
//!
//! Native helpers for working on the browser game: inspect world seeds, dump
//! quest data, verify player assets, and serve the game directory locally.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::{Parser, Subcommand};

    use seedfx::assets::check_asset_dir;
    use seedfx::quests::story_quests;
    use seedfx::server::serve;
    use seedfx::{SeedMap, Settings};

    #[derive(Parser)]
    #[command(name = "seedfx", version, about = "World seed and asset tools")]
    struct Cli {
        /// Settings file (JSON)
        #[arg(long, global = true, default_value = "seedfx.json")]
        settings: PathBuf,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Print the seed for a coordinate pair
        Seed {
            /// Base seed, reduced modulo 2^32
            #[arg(allow_negative_numbers = true)]
            base: i64,
            #[arg(allow_negative_numbers = true)]
            x: i32,
            #[arg(default_value_t = 0, allow_negative_numbers = true)]
            y: i32,
        },
        /// List the main story quests
        Quests {
            /// Emit JSON instead of a summary
            #[arg(long)]
            json: bool,
        },
        /// Verify player sprites against the game config
        CheckAssets {
            #[arg(default_value = "config.json")]
            config: PathBuf,
            #[arg(default_value = "assets")]
            dir: PathBuf,
        },
        /// Serve the game directory over HTTP
        Serve {
            #[arg(long)]
            port: Option<u16>,
            #[arg(long)]
            root: Option<PathBuf>,
            /// Page served for `/`
            #[arg(long)]
            index: Option<String>,
        },
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let cli = Cli::parse();
        let settings = Settings::load_from(&cli.settings);

        match cli.command {
            Command::Seed { base, x, y } => {
                let mut seeds = SeedMap::new(base as u64);
                println!("{}", seeds.get_seed(x, y));
            }
            Command::Quests { json } => {
                let quests = story_quests();
                if json {
                    match serde_json::to_string_pretty(&quests) {
                        Ok(out) => println!("{out}"),
                        Err(e) => {
                            log::error!("Failed to encode quests: {e}");
                            return ExitCode::FAILURE;
                        }
                    }
                } else {
                    for quest in &quests {
                        println!("{:<10} {:>4} xp  {}", quest.id, quest.rewards.xp, quest.title);
                    }
                }
            }
            Command::CheckAssets { config, dir } => {
                match check_asset_dir(&config, &dir).and_then(|r| r.into_result()) {
                    Ok(report) => println!("{report}"),
                    Err(e) => {
                        log::error!("{e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            Command::Serve { port, root, index } => {
                let mut server = settings.server;
                if let Some(port) = port {
                    server.port = port;
                }
                if let Some(root) = root {
                    server.root = root;
                }
                if let Some(index) = index {
                    server.index = index;
                }
                if let Err(e) = serve(&server) {
                    log::error!("{e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point lives in the library (`web::start`)
}
