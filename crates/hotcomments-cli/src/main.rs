use clap::{value_parser, ArgAction, Parser, Subcommand};
use commands::crawl::CrawlArgs;
use hotcomments_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "hotcomments")]
#[command(about = "Collect a movie's hot short comments from Douban into JSON and CSV")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Also write logs to this file (rotated daily); without PATH, use the default log location
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl hot comments for one movie and save them
    #[command(long_about = "Fetch the movie's hot comment listing page by page, pausing between requests, then save every collected comment to movie_<id>_comments.json and movie_<id>_comments.csv.")]
    Crawl {
        /// Douban movie id, e.g. 1292052 from https://movie.douban.com/subject/1292052/
        movie_id: String,

        /// Number of pages to fetch (20 comments per page)
        #[arg(long, default_value_t = 19, value_parser = value_parser!(u32).range(1..))]
        pages: u32,

        /// Directory for the JSON and CSV files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Crawler config file (defaults to the platform config directory)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Inspect or create the crawler configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show {
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Write a config file with default values
    Init {
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

/// `--log-file` alone means the platform log file; `--log-file PATH` overrides it.
fn resolve_log_file(arg: Option<Option<PathBuf>>, paths: impl FnOnce() -> PathManager) -> Option<PathBuf> {
    arg.map(|path| path.unwrap_or_else(|| paths().log_file()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = resolve_log_file(cli.log_file, PathManager::default);
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Crawl { movie_id, pages, output_dir, config } => {
            let args = CrawlArgs { movie_id, pages, output_dir, config };
            commands::crawl::run_crawl(args, &output).await
        }
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show { config } => commands::config::run_show(config, &output),
            ConfigCommands::Init { config, force } => commands::config::run_init(config, force, &output),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::try_parse_from(["hotcomments", "crawl", "34780991"]).unwrap();
        match cli.command {
            Commands::Crawl { movie_id, pages, output_dir, config } => {
                assert_eq!(movie_id, "34780991");
                assert_eq!(pages, 19);
                assert_eq!(output_dir, PathBuf::from("."));
                assert!(config.is_none());
            }
            _ => panic!("expected crawl command"),
        }
    }

    #[test]
    fn test_log_file_flag() {
        let paths = || PathManager::from_base(PathBuf::from("/tmp/hc"));

        let cli = Cli::try_parse_from(["hotcomments", "crawl", "1"]).unwrap();
        assert_eq!(resolve_log_file(cli.log_file, paths), None);

        let cli = Cli::try_parse_from(["hotcomments", "crawl", "1", "--log-file"]).unwrap();
        assert_eq!(
            resolve_log_file(cli.log_file, paths),
            Some(PathBuf::from("/tmp/hc/logs/hotcomments.log"))
        );

        let cli = Cli::try_parse_from(["hotcomments", "crawl", "1", "--log-file", "crawl.log"]).unwrap();
        assert_eq!(resolve_log_file(cli.log_file, paths), Some(PathBuf::from("crawl.log")));
    }

    #[test]
    fn test_zero_pages_rejected() {
        assert!(Cli::try_parse_from(["hotcomments", "crawl", "1", "--pages", "0"]).is_err());
    }
}
