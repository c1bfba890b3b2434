use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sblock_config::Config;
use sblock_engine::{
    ExtensionRegistry, Options, ParseOptions, RenderOptions, parse_document,
    parsing::snapshot, read_document, render_document, write_html,
};
use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process,
};
use xi_rope::Rope;

#[derive(Parser)]
#[command(
    name = "sblock",
    version,
    about = "Render Markdown with ::type ... ::end blocks"
)]
struct Cli {
    /// Log block open/close decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.config/sblock/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a document to HTML
    Render(RenderArgs),

    /// Print the parsed block tree
    Tree(TreeArgs),

    /// Write a config file holding the default settings
    InitConfig(InitConfigArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Markdown file to render (stdin when omitted)
    file: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct TreeArgs {
    /// Markdown file to inspect (stdin when omitted)
    file: Option<PathBuf>,
}

#[derive(clap::Args)]
struct InitConfigArgs {
    /// Replace an existing config file
    #[arg(long)]
    force: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
    }
    builder.init();
}

fn run(cli: Cli) -> Result<()> {
    let registry = ExtensionRegistry::with_defaults();

    match cli.command {
        Command::Render(args) => {
            let options = options_from_config(&load_config(cli.config.as_deref())?);
            let rope = read_input(args.file.as_deref())?;
            let html = render(&rope, &registry, &options)?;
            match args.output {
                Some(path) => {
                    write_html(&path, &html)
                        .with_context(|| format!("Failed to write '{}'", path.display()))?;
                    log::info!("Wrote {} bytes to {}", html.len(), path.display());
                }
                None => io::stdout().write_all(html.as_bytes())?,
            }
        }
        Command::Tree(args) => {
            let options = options_from_config(&load_config(cli.config.as_deref())?);
            let rope = read_input(args.file.as_deref())?;
            println!("{}", tree(&rope, &registry, &options)?);
        }
        Command::InitConfig(args) => {
            let path = init_config(cli.config.as_deref(), args.force)?;
            log::info!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

/// An explicit `--config` must exist; the default location is optional.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = Config::expand_path(path);
            match Config::load_from_path(&path)? {
                Some(config) => Ok(config),
                None => bail!("Config file '{}' not found", path.display()),
            }
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

/// Writes `Config::default()` to `--config` or the default location.
fn init_config(explicit: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = explicit.map_or_else(Config::config_path, Config::expand_path);
    if path.exists() && !force {
        bail!(
            "Config file '{}' already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default()
        .save_to_path(&path)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(path)
}

fn options_from_config(config: &Config) -> Options {
    Options {
        parse: ParseOptions {
            max_nesting_depth: config.parser.max_nesting_depth,
            max_input_bytes: config.parser.max_input_bytes,
        },
        render: RenderOptions {
            tables: config.markdown.tables,
            strikethrough: config.markdown.strikethrough,
            tasklists: config.markdown.tasklists,
            footnotes: config.markdown.footnotes,
            smart_punctuation: config.markdown.smart_punctuation,
        },
    }
}

fn read_input(file: Option<&Path>) -> Result<Rope> {
    match file {
        Some(path) => {
            read_document(path).with_context(|| format!("Failed to read '{}'", path.display()))
        }
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(Rope::from(content))
        }
    }
}

fn render(rope: &Rope, registry: &ExtensionRegistry, options: &Options) -> Result<String> {
    let doc = parse_document(rope, registry, &options.parse)?;
    Ok(render_document(rope, &doc, registry, &options.render)?)
}

fn tree(rope: &Rope, registry: &ExtensionRegistry, options: &Options) -> Result<String> {
    let doc = parse_document(rope, registry, &options.parse)?;
    Ok(snapshot::normalize(rope, &doc).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn cli_parses_render_arguments() {
        let cli = Cli::try_parse_from(["sblock", "render", "in.md", "-o", "out.html"]).unwrap();
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.file, Some(PathBuf::from("in.md")));
                assert_eq!(args.output, Some(PathBuf::from("out.html")));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn cli_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sblock", "tree", "--verbose", "--config", "c.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn default_config_maps_to_default_options() {
        assert_eq!(options_from_config(&Config::default()), Options::default());
    }

    #[test]
    fn config_values_reach_options() {
        let mut config = Config::default();
        config.parser.max_nesting_depth = 2;
        config.markdown.strikethrough = false;

        let options = options_from_config(&config);
        assert_eq!(options.parse.max_nesting_depth, 2);
        assert!(!options.render.strikethrough);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(Some(temp_dir.path().join("missing.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[parser]\nmax_nesting_depth = 1\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.parser.max_nesting_depth, 1);
    }

    #[test]
    fn cli_parses_init_config() {
        let cli = Cli::try_parse_from(["sblock", "init-config", "--force"]).unwrap();
        assert!(matches!(cli.command, Command::InitConfig(InitConfigArgs { force: true })));
    }

    #[test]
    fn init_config_writes_loadable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.toml");

        let written = init_config(Some(path.as_path()), false).unwrap();
        assert_eq!(written, path);
        assert_eq!(load_config(Some(path.as_path())).unwrap(), Config::default());
    }

    #[test]
    fn init_config_keeps_existing_file_unless_forced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[parser]\nmax_nesting_depth = 1\n").unwrap();

        let err = init_config(Some(path.as_path()), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(load_config(Some(path.as_path())).unwrap().parser.max_nesting_depth, 1);

        init_config(Some(path.as_path()), true).unwrap();
        assert_eq!(load_config(Some(path.as_path())).unwrap(), Config::default());
    }

    #[test]
    fn render_uses_options() {
        let rope = Rope::from("::a\n::b\n::end\n::end\n");
        let registry = ExtensionRegistry::with_defaults();
        let mut options = Options::default();
        assert!(render(&rope, &registry, &options).is_ok());

        options.parse.max_nesting_depth = 1;
        let err = render(&rope, &registry, &options).unwrap_err();
        assert!(err.to_string().contains("maximum nesting depth of 1"));
    }

    #[test]
    fn tree_prints_outline() {
        let rope = Rope::from("::info x=1\nHi\n::end\n");
        let out = tree(&rope, &ExtensionRegistry::with_defaults(), &Options::default()).unwrap();
        assert_eq!(out, "Block(info) 0..20 [x=\"1\"]\n  Markdown 11..14 \"Hi\\n\"");
    }

    #[test]
    fn read_input_reads_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        std::fs::write(&path, "text\n").unwrap();

        assert_eq!(String::from(read_input(Some(path.as_path())).unwrap()), "text\n");
        assert!(read_input(Some(temp_dir.path().join("nope.md").as_path())).is_err());
    }
}
