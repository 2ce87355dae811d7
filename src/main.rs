use anyhow::{Context, Result as AnyhowResult};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use spooled_fs::config::ConnectionConfig;
use spooled_fs::model::VirtualFileSystem;
use spooled_fs::services::export::{ExportOutcome, SaveLocationPicker};
use spooled_fs::services::remote::{NoSession, SessionSource, StaticSession};
use spooled_fs::services::tracing_setup;
use spooled_fs::{Locator, OpenOptions, SpooledFileIdentity, SplfFileSystem};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Inspect and export spooled file locators
#[derive(Parser, Debug)]
#[command(name = "splf")]
#[command(about = "Encode, decode and export spooledfile: locators", long_about = None)]
#[command(version)]
struct Args {
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the locator for a spooled file
    Encode {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        queue: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        job_name: String,
        #[arg(long)]
        job_user: String,
        #[arg(long)]
        job_number: String,
        #[arg(long)]
        number: String,
        /// Open without write permission
        #[arg(long)]
        readonly: bool,
        /// Object filter the file is opened from
        #[arg(long, value_name = "NAME")]
        filter: Option<String>,
    },

    /// Print the fields decoded from a locator
    Decode {
        #[arg(value_name = "LOCATOR")]
        locator: String,
    },

    /// Print the metadata the provider reports for a locator
    Stat {
        #[arg(value_name = "LOCATOR")]
        locator: String,
        /// Connection configuration (JSON)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Save a local copy of already downloaded content
    Export {
        #[arg(value_name = "LOCATOR")]
        locator: String,
        /// File holding the spooled file text
        #[arg(long, value_name = "PATH")]
        input: PathBuf,
        /// Where to save; defaults to the suggested name in the home directory
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Answers the save prompt without asking
struct FixedLocation(Option<PathBuf>);

#[async_trait]
impl SaveLocationPicker for FixedLocation {
    async fn pick_save_location(&self, suggested: &Path) -> Option<PathBuf> {
        Some(self.0.clone().unwrap_or_else(|| suggested.to_path_buf()))
    }
}

fn parse_locator(text: &str) -> AnyhowResult<Locator> {
    Locator::parse(text).with_context(|| format!("Invalid locator: {text}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> AnyhowResult<()> {
    let args = Args::parse();
    tracing_setup::init_global(args.log_level);

    match args.command {
        Command::Encode {
            owner,
            queue,
            name,
            job_name,
            job_user,
            job_number,
            number,
            readonly,
            filter,
        } => {
            let identity = SpooledFileIdentity {
                owner,
                queue,
                name,
                job_name,
                job_user,
                job_number,
                number,
            };
            let options = OpenOptions { readonly, filter };
            println!("{}", Locator::encode(&identity, Some(&options)));
        }

        Command::Decode { locator } => {
            let locator = parse_locator(&locator)?;
            let decoded = locator.decode_identity()?;
            let options = locator.decode_options();
            println!("path:     {}", locator.path());
            println!("name:     {}", decoded.name);
            println!("job:      {}", decoded.qualified_job_name);
            println!("number:   {}", decoded.number);
            println!("readonly: {}", options.readonly);
            if let Some(filter) = options.filter {
                println!("filter:   {filter}");
            }
        }

        Command::Stat { locator, config } => {
            let locator = parse_locator(&locator)?;
            let session: Arc<dyn SessionSource> = match config {
                Some(path) => {
                    let config = ConnectionConfig::load_from_file(&path).with_context(|| {
                        format!("Failed to load config from {}", path.display())
                    })?;
                    Arc::new(StaticSession::without_content(config))
                }
                None => Arc::new(NoSession),
            };
            let fs = SplfFileSystem::new(session, Arc::new(FixedLocation(None)));
            let stat = fs.stat(&locator)?;
            println!("type:     {:?}", stat.file_type);
            println!("size:     {}", stat.size);
            println!("readonly: {}", stat.is_readonly());
        }

        Command::Export {
            locator,
            input,
            output,
        } => {
            let locator = parse_locator(&locator)?;
            let content = tokio::fs::read(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let fs = SplfFileSystem::new(Arc::new(NoSession), Arc::new(FixedLocation(output)));
            match fs.export(&locator, &content).await? {
                ExportOutcome::Saved(path) => println!("{}", path.display()),
                ExportOutcome::Declined => anyhow::bail!("Export declined"),
                ExportOutcome::Failed { path, error } => {
                    anyhow::bail!("Failed to save {}: {error}", path.display())
                }
            }
        }
    }

    Ok(())
}
