use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "spotcheck")]
#[command(about = "Check git repositories for uncommitted or unpushed changes")]
#[command(long_about = "\
Scans target directories for git repositories and reports which ones have \
uncommitted working-tree changes or commits not pushed to any remote.

A target ending in '/...' is scanned recursively up to --depth levels; a plain \
target is checked on its own. With no targets, the current directory and its \
immediate subdirectories are scanned.

Examples:
  spotcheck
  spotcheck -t ~/config -t ~/Developer/...")]
pub struct CliArgs {
    /// Target directory to scan; repeatable (overrides config)
    #[arg(short, long = "target")]
    pub targets: Vec<String>,

    /// Maximum directory depth below a recursive target (overrides config)
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let args = CliArgs::parse_from(&["spotcheck"]);
        assert!(args.targets.is_empty());
        assert_eq!(args.depth, None);
        assert_eq!(args.config, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_cli_parse_multiple_targets() {
        let args = CliArgs::parse_from(&["spotcheck", "-t", "~/config", "-t", "~/Developer/..."]);
        assert_eq!(
            args.targets,
            vec!["~/config".to_string(), "~/Developer/...".to_string()]
        );
    }

    #[test]
    fn test_cli_parse_depth_and_config() {
        let args = CliArgs::parse_from(&[
            "spotcheck",
            "--target",
            "/repos",
            "--depth",
            "3",
            "--config",
            "/custom/spotcheck.toml",
        ]);
        assert_eq!(args.targets, vec!["/repos".to_string()]);
        assert_eq!(args.depth, Some(3));
        assert_eq!(args.config, Some(PathBuf::from("/custom/spotcheck.toml")));
    }

    #[test]
    fn test_cli_parse_no_color() {
        let args = CliArgs::parse_from(&["spotcheck", "--no-color"]);
        assert!(args.no_color);
    }
}
