use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use photo_numbering_core::{
    app_paths, load_config, run_batch, undo_last, BatchOptions, BatchOutcome, NumberingOptions,
    SortKey, SortOptions, UndoOutcome,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "photo-numbering-cli")]
#[command(about = "写真ファイルを連番で一括リネームします")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rename(RenameArgs),
    Undo,
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
}

#[derive(Debug, Args)]
struct RenameArgs {
    #[arg(long)]
    dir: String,
    #[arg(long)]
    prefix: String,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long, default_value_t = false)]
    reverse: bool,
    #[arg(long, default_value_t = 1)]
    start: i64,
    #[arg(long, default_value_t = 3)]
    width: usize,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pad: bool,
    #[arg(long)]
    exts: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rename(args) => cmd_rename(args),
        Commands::Undo => cmd_undo(),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let config = load_config()?;
    let sort_key = SortKey::parse(args.sort.as_deref().unwrap_or(&config.sort_default));
    let extension_groups = args
        .exts
        .unwrap_or_else(|| config.extension_groups_default.clone());

    let options = BatchOptions {
        directory: PathBuf::from(args.dir),
        prefix: args.prefix,
        sort: SortOptions {
            key: sort_key,
            reverse: args.reverse,
        },
        numbering: NumberingOptions {
            start: args.start,
            width: args.width,
            zero_pad: args.pad,
        },
        extension_groups,
        log_dir: PathBuf::from(&config.log_dir),
    };

    let outcome = run_batch(&options)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Table => {
            print_outcome(&outcome);
        }
    }

    Ok(())
}

fn cmd_undo() -> Result<()> {
    let config = load_config()?;
    let outcome = undo_last(&PathBuf::from(&config.log_dir))?;
    print_undo_outcome(&outcome);
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("設定ファイル: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn print_outcome(outcome: &BatchOutcome) {
    for record in &outcome.records {
        println!("success: {} -> {}", record.original_name, record.new_name);
    }
    for failure in &outcome.failures {
        eprintln!(
            "失敗: {} -> {} ({})",
            failure.from_name, failure.to_name, failure.reason
        );
    }
    if let Some(path) = &outcome.journal_path {
        println!("リネームログを保存しました: {}", path.display());
    }

    println!(
        "\n集計: scanned={} matched={} renamed={} failed={}",
        outcome.stats.scanned_files,
        outcome.stats.matched_files,
        outcome.stats.renamed,
        outcome.stats.failed
    );
    println!("完了: {}件リネームしました", outcome.stats.renamed);
}

fn print_undo_outcome(outcome: &UndoOutcome) {
    for record in &outcome.restored {
        println!("success: {} -> {}", record.new_name, record.original_name);
    }
    for failure in &outcome.failures {
        eprintln!(
            "失敗: {} -> {} ({})",
            failure.from_name, failure.to_name, failure.reason
        );
    }
    println!("取り消し完了: {}件", outcome.restored.len());
}
