//! NSL-KDD Loader - CLI Entry Point

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use nslkdd::constants::{self, APP_VERSION};
use nslkdd::{
    ensure_dataset_files, inspect, load_dataset, prepare, FetchOptions, LoadOptions, Loaded, Split,
};

/// Fetch and load the NSL-KDD intrusion dataset
#[derive(Parser, Debug)]
#[command(name = "nslkdd")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the train split without downloading and print a preview
    Selftest(DirArg),

    /// Download missing split files
    Download {
        #[command(flatten)]
        dir: DirArg,

        /// Replace files that already exist
        #[arg(long)]
        overwrite: bool,

        /// Mirror key
        #[arg(long)]
        mirror: Option<String>,

        /// Only log progress at debug level
        #[arg(short, long)]
        quiet: bool,
    },

    /// Load one or both splits and print their shapes
    Load {
        #[command(flatten)]
        dir: DirArg,

        /// train, test or both
        #[arg(long, default_value = "train")]
        split: String,

        #[arg(long)]
        no_download: bool,

        #[arg(long)]
        keep_difficulty: bool,

        /// Add the label_5class column
        #[arg(long)]
        map_5class: bool,

        /// Expand protocol_type / service / flag into indicator columns
        #[arg(long)]
        one_hot: bool,

        /// Rows to preview
        #[arg(long, default_value_t = 10)]
        head: usize,
    },

    /// Build feature matrices and encoded targets for both splits
    Prepare {
        #[command(flatten)]
        dir: DirArg,

        #[arg(long)]
        no_download: bool,
    },

    /// Report local file status as JSON
    Info(DirArg),
}

#[derive(Args, Debug)]
struct DirArg {
    /// Dataset directory (defaults to $NSL_KDD_DIR or ~/datasets/nsl-kdd)
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl DirArg {
    fn resolve(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::get_base_dir()))
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("nslkdd v{}", APP_VERSION);

    match cli.command.unwrap_or(Command::Selftest(DirArg { dir: None })) {
        Command::Selftest(dir) => {
            println!("{}", self_test(&dir.resolve()));
            Ok(())
        }
        Command::Download { dir, overwrite, mirror, quiet } => {
            let options = FetchOptions {
                overwrite,
                mirror: mirror.unwrap_or_else(constants::get_mirror),
                verbose: !quiet,
            };
            let (train, test) = ensure_dataset_files(dir.resolve(), &options)
                .context("downloading NSL-KDD")?;
            println!("Train: {}", train.display());
            println!("Test:  {}", test.display());
            Ok(())
        }
        Command::Load {
            dir,
            split,
            no_download,
            keep_difficulty,
            map_5class,
            one_hot,
            head,
        } => {
            let split: Split = split.parse()?;
            let options = LoadOptions {
                download_if_missing: !no_download,
                drop_difficulty: !keep_difficulty,
                map_to_5class: map_5class,
                one_hot,
            };
            let loaded = load_dataset(split, dir.resolve(), &options)
                .with_context(|| format!("loading {} split", split))?;

            match loaded {
                Loaded::Single(table) => {
                    println!("{} shape: {:?}", split, table.shape());
                    println!("{}", table.head(head));
                }
                Loaded::Pair(train, test) => {
                    println!("Train shape: {:?}", train.shape());
                    println!("Test shape: {:?}", test.shape());
                    println!("{}", train.head(head));
                }
            }
            Ok(())
        }
        Command::Prepare { dir, no_download } => {
            let options = LoadOptions {
                download_if_missing: !no_download,
                map_to_5class: true,
                one_hot: true,
                ..LoadOptions::default()
            };
            let (train, test) = load_dataset(Split::Both, dir.resolve(), &options)?.into_pair()?;
            println!("Train shape: {:?}", train.shape());
            println!("Test shape: {:?}", test.shape());

            let prepared = prepare(&train, &test).context("preparing training matrices")?;
            println!("X_train shape: {:?}", prepared.x_train.dim());
            println!("y_train shape: {}", prepared.y_train.len());
            println!("y_train one-hot shape: {:?}", prepared.y_train_one_hot.dim());
            println!("Classes: {}", prepared.encoder.classes().join(", "));
            Ok(())
        }
        Command::Info(dir) => {
            let info = inspect(dir.resolve())?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
    }
}

/// Diagnostic load: failures are reported in the output, never propagated
fn self_test(dir: &Path) -> String {
    let options = LoadOptions {
        download_if_missing: false,
        ..LoadOptions::default()
    };

    match load_dataset(Split::Train, dir, &options).and_then(Loaded::into_single) {
        Ok(train) => format!("{}\nTrain shape: {:?}", train.head(5), train.shape()),
        Err(e) => format!("Self-test failed: {}", e),
    }
}
