use super::print::{print_categories, print_config, print_messages, print_records};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use stockroom::api::StockApi;
use stockroom::commands::config::ConfigAction;
use stockroom::commands::{CmdMessage, CmdResult, MessageLevel, StockPaths};
use stockroom::config::StockConfig;
use stockroom::error::Result;
use stockroom::inventory::MergeDecision;
use stockroom::model::{RecordDraft, RecordPatch, SortKey};
use stockroom::store::fs::FileStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROJECT_DIR: &str = ".stockroom";

struct AppContext {
    api: StockApi<FileStore>,
    config: StockConfig,
    /// Messages from the load every session starts with.
    loaded: Vec<CmdMessage>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // config must work even when the data file is unreadable
    if let Some(Commands::Config { key, value }) = &cli.command {
        let paths = resolve_paths();
        let config = StockConfig::load(&paths.config_dir).unwrap_or_default();
        let api = StockApi::new(FileStore::new(config.data_file), paths);
        return handle_config(&api, key.clone(), value.clone());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&mut ctx),
        Some(Commands::Add {
            product,
            name,
            quantity,
            category,
            merge,
            no_merge,
        }) => {
            let draft = RecordDraft::new(product, name, category, quantity);
            let forced = if merge {
                Some(MergeDecision::Merge)
            } else if no_merge {
                Some(MergeDecision::Decline)
            } else {
                None
            };
            handle_add(&mut ctx, draft, forced)
        }
        Some(Commands::Update {
            selector,
            product,
            name,
            category,
            quantity,
        }) => {
            let patch = RecordPatch {
                product_number: product,
                name,
                category,
                quantity,
            };
            handle_update(&mut ctx, &selector, patch)
        }
        Some(Commands::Delete { selector, yes }) => handle_delete(&mut ctx, &selector, yes),
        Some(Commands::Sort { key }) => handle_sort(&mut ctx, key),
        Some(Commands::Search { keyword }) => handle_search(&mut ctx, &keyword),
        Some(Commands::Category { name }) => handle_category(&mut ctx, name),
        Some(Commands::Save) => handle_save(&mut ctx),
        Some(Commands::Load) => handle_load(&mut ctx),
        Some(Commands::Export { path }) => handle_export(&mut ctx, &path),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Config { .. }) => Ok(()),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "stockroom=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// `./.stockroom` when present, otherwise the per-user config directory.
fn resolve_paths() -> StockPaths {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = cwd.join(PROJECT_DIR);

    let config_dir = if project_dir.is_dir() {
        project_dir
    } else {
        ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or(project_dir)
    };
    StockPaths { config_dir }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let paths = resolve_paths();
    let config = StockConfig::load(&paths.config_dir).unwrap_or_default();
    let data_file = cli
        .data
        .clone()
        .unwrap_or_else(|| config.data_file.clone());
    debug!(data_file = %data_file.display(), config_dir = %paths.config_dir.display(), "starting session");

    let mut api = StockApi::new(FileStore::new(data_file), paths);
    let loaded = api.load()?.messages;

    Ok(AppContext {
        api,
        config,
        loaded,
    })
}

/// Saves when `result` changed the catalog.
fn persist(ctx: &mut AppContext, result: &CmdResult) -> Result<()> {
    if result.modified {
        ctx.api.save()?;
    }
    Ok(())
}

fn print_load_warnings(ctx: &AppContext) {
    let warnings: Vec<CmdMessage> = ctx
        .loaded
        .iter()
        .filter(|m| m.level == MessageLevel::Warning)
        .cloned()
        .collect();
    print_messages(&warnings);
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    print_load_warnings(ctx);
    let result = ctx.api.list()?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    draft: RecordDraft,
    forced: Option<MergeDecision>,
) -> Result<()> {
    // bad input fails before any prompt
    let quantity = draft.validate()?;

    let decision = match forced.or_else(|| ctx.config.merge_duplicates.decision()) {
        Some(decision) => decision,
        None => {
            let existing = ctx.api.find_by_name(&draft.name)?;
            match existing.affected_records.first() {
                Some(found) => {
                    let question = format!(
                        "'{}' already exists (Qty: {}). Add {} to it?",
                        found.record.name,
                        found.record.quantity,
                        quantity
                    );
                    if confirm(&question)? {
                        MergeDecision::Merge
                    } else {
                        MergeDecision::Decline
                    }
                }
                None => MergeDecision::Merge,
            }
        }
    };

    let result = ctx.api.add(&draft, decision)?;
    persist(ctx, &result)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, selector: &str, patch: RecordPatch) -> Result<()> {
    let result = ctx.api.update_selected(selector, &patch)?;
    persist(ctx, &result)?;
    print_records(&result.affected_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selector: &str, yes: bool) -> Result<()> {
    let position = ctx.api.selector(selector).resolve(ctx.api.records())?;
    let name = ctx.api.records()[position].name.clone();

    if !yes && !confirm(&format!("Delete '{}' from inventory?", name))? {
        print_messages(&[CmdMessage::info("Delete cancelled.")]);
        return Ok(());
    }

    let result = ctx.api.delete_selected(selector)?;
    persist(ctx, &result)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sort(ctx: &mut AppContext, key: SortKey) -> Result<()> {
    let result = ctx.api.sort_by(key)?;
    persist(ctx, &result)?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, keyword: &str) -> Result<()> {
    let result = ctx.api.filter_by_substring(keyword)?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_category(ctx: &mut AppContext, name: Option<String>) -> Result<()> {
    let result = match name {
        Some(name) => ctx.api.filter_by_category(&name)?,
        None => ctx.api.categories()?,
    };
    if result.categories.is_empty() {
        print_records(&result.listed_records);
    } else {
        print_categories(&result.categories);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_save(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_load(ctx: &mut AppContext) -> Result<()> {
    print_messages(&ctx.loaded);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let result = ctx.api.export_to(path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let count = ctx.api.records().len();
    if count > 0
        && !yes
        && !confirm(&format!("Remove all {} item(s) from inventory?", count))?
    {
        print_messages(&[CmdMessage::info("Clear cancelled.")]);
        return Ok(());
    }

    let result = ctx.api.clear_all()?;
    persist(ctx, &result)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    api: &StockApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let showing_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api.config(action)?;
    if showing_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Asks a yes/no question on stdout; anything but "y"/"yes" is a no, as is EOF.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
