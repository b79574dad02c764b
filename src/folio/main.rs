use clap::Parser;
use directories::ProjectDirs;
use folio::api::FolioApi;
use folio::commands::config::ConfigAction;
use folio::commands::layout::Viewport;
use folio::commands::CmdResult;
use folio::config::{FolioConfig, CONFIG_FILENAME};
use folio::error::Result;
use folio::store::fs::FileStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: FolioApi<FileStore>,
    json: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let result = match cli.command {
        Some(Commands::Years) => ctx.api.years()?,
        Some(Commands::Locations) => ctx.api.locations()?,
        Some(Commands::List { location }) => ctx.api.list(location.as_deref())?,
        Some(Commands::Search { terms, location }) => {
            ctx.api.search(location.as_deref(), &terms.join(" "))?
        }
        Some(Commands::Tags) => ctx.api.tags()?,
        Some(Commands::Layout {
            width,
            container,
            scroll_top,
            viewport_height,
            location,
            query,
        }) => {
            let viewport = Viewport {
                width,
                container_width: container,
                window: scroll_top.map(|top| (top, viewport_height)),
            };
            ctx.api.layout(viewport, location.as_deref(), &query)?
        }
        Some(Commands::View {
            id,
            steps,
            location,
            query,
        }) => ctx.api.view(&id, steps, location.as_deref(), &query)?,
        Some(Commands::Urls) => ctx.api.metadata_urls()?,
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value)?,
        None => ctx.api.list(None)?,
    };

    output(&ctx, &result)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let site = match &cli.site {
        Some(path) => path.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let user_dir =
        ProjectDirs::from("org", "folio", "folio").map(|dirs| dirs.config_dir().to_path_buf());
    let config_dir = resolve_config_dir(&site, user_dir);
    let config = FolioConfig::load(&config_dir)?;
    let store = FileStore::new(&site).with_measure_images(config.measure_images);

    Ok(AppContext {
        api: FolioApi::new(store, config, config_dir),
        json: cli.json,
    })
}

/// Site config first, then the user's config directory. A fresh config is
/// written next to the site.
fn resolve_config_dir(site: &Path, user_dir: Option<PathBuf>) -> PathBuf {
    if site.join(CONFIG_FILENAME).exists() {
        return site.to_path_buf();
    }
    match user_dir {
        Some(dir) if dir.join(CONFIG_FILENAME).exists() => dir,
        _ => site.to_path_buf(),
    }
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    ctx.api.config_action(action)
}

fn output(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    print::print_result(result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn site_config_wins_over_user_config() {
        let site = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        fs::write(site.path().join(CONFIG_FILENAME), "{}").unwrap();
        fs::write(user.path().join(CONFIG_FILENAME), "{}").unwrap();

        let dir = resolve_config_dir(site.path(), Some(user.path().to_path_buf()));
        assert_eq!(dir, site.path());
    }

    #[test]
    fn user_config_is_read_and_written_in_place() {
        let site = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        fs::write(user.path().join(CONFIG_FILENAME), r#"{"row_gap": 3}"#).unwrap();

        let dir = resolve_config_dir(site.path(), Some(user.path().to_path_buf()));
        assert_eq!(dir, user.path());

        let config = FolioConfig::load(&dir).unwrap();
        let mut api = FolioApi::new(FileStore::new(site.path()), config, dir);
        api.config_action(ConfigAction::Set("row_gap".into(), "12".into())).unwrap();

        assert!(!site.path().join(CONFIG_FILENAME).exists());
        let saved = FolioConfig::load(user.path()).unwrap();
        assert_eq!(saved.get("row_gap").as_deref(), Some("12"));
    }

    #[test]
    fn missing_configs_fall_back_to_the_site() {
        let site = tempfile::tempdir().unwrap();
        let dir = resolve_config_dir(site.path(), None);
        assert_eq!(dir, site.path());
    }
}
