//! Command-line arguments
//!
//! Flags override the matching `[publish]` values from the config file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::domain::VersionIncrement;
use crate::publish::PublishRequest;
use crate::store::SearchMode;

#[derive(Debug, Parser)]
#[command(
    name = "git-bump",
    version,
    about = "Bump project versions from commit hints, then commit, tag and push"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Determine the increment from commits since the last tag and publish it
    Increment(PublishArgs),

    /// Publish an explicit increment (e.g. minor, prerelease-patch)
    IncrementBy {
        increment: VersionIncrement,

        #[command(flatten)]
        publish: PublishArgs,
    },

    /// Print the increment the next publish would use, without changing anything
    Determine(RepoArgs),
}

/// Where the repository and its version files are
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    #[arg(short = 'g', long, help = "Directory containing the .git folder")]
    pub git_directory: PathBuf,

    #[arg(short, long, help = "Branch to version and push")]
    pub branch: String,

    #[arg(short, long, help = "Git remote to push to [default: origin]")]
    pub remote: Option<String>,

    #[arg(short, long, help = "Directory holding the version files [default: git directory]")]
    pub target_directory: Option<PathBuf>,

    #[arg(long, value_enum, help = "How to search the target directory [default: recursive]")]
    pub search: Option<SearchMode>,
}

#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[arg(short = 'e', long, help = "Author email of the version commit")]
    pub author_email: String,

    #[arg(long, help = "Text placed before the version in the tag name")]
    pub tag_prefix: Option<String>,

    #[arg(long, help = "Text placed after the version in the tag name")]
    pub tag_suffix: Option<String>,
}

impl RepoArgs {
    /// Build a request without an author email, for read-only commands
    pub fn to_request(&self, config: &Config) -> PublishRequest {
        PublishRequest {
            git_directory: self.git_directory.clone(),
            remote_target: self
                .remote
                .clone()
                .unwrap_or_else(|| config.publish.remote.clone()),
            branch_name: self.branch.clone(),
            target_directory: self.target_directory.clone(),
            search_mode: self.search.unwrap_or(config.publish.search),
            commit_author_email: String::new(),
            tag_prefix: config.publish.tag_prefix.clone(),
            tag_suffix: config.publish.tag_suffix.clone(),
        }
    }
}

impl PublishArgs {
    pub fn to_request(&self, config: &Config) -> PublishRequest {
        let mut request = self.repo.to_request(config);
        request.commit_author_email = self.author_email.clone();
        if let Some(prefix) = &self.tag_prefix {
            request.tag_prefix = prefix.clone();
        }
        if let Some(suffix) = &self.tag_suffix {
            request.tag_suffix = suffix.clone();
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_increment_command() {
        let cli = Cli::try_parse_from([
            "git-bump",
            "increment",
            "-g",
            "/repo",
            "-b",
            "main",
            "-e",
            "ci@example.com",
        ])
        .unwrap();

        let Command::Increment(args) = cli.command else {
            panic!("expected increment command");
        };
        let request = args.to_request(&Config::default());
        assert_eq!(request.git_directory, PathBuf::from("/repo"));
        assert_eq!(request.remote_target, "origin");
        assert_eq!(request.target_directory, None);
        assert_eq!(request.search_mode, SearchMode::Recursive);
        assert_eq!(request.commit_author_email, "ci@example.com");
        assert!(request.tag_prefix.is_empty());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "git-bump",
            "increment-by",
            "beta-minor",
            "-g",
            "/repo",
            "-b",
            "release",
            "-e",
            "ci@example.com",
            "--remote",
            "upstream",
            "--search",
            "top-level",
            "--tag-prefix",
            "v",
        ])
        .unwrap();

        let mut config = Config::default();
        config.publish.tag_prefix = "release-".to_string();
        config.publish.tag_suffix = "-final".to_string();

        let Command::IncrementBy { increment, publish } = cli.command else {
            panic!("expected increment-by command");
        };
        assert_eq!(increment, VersionIncrement::PrereleaseMinor);

        let request = publish.to_request(&config);
        assert_eq!(request.remote_target, "upstream");
        assert_eq!(request.search_mode, SearchMode::TopLevel);
        assert_eq!(request.tag_prefix, "v");
        assert_eq!(request.tag_suffix, "-final");
    }

    #[test]
    fn test_publish_requires_author_email() {
        let result = Cli::try_parse_from(["git-bump", "increment", "-g", "/repo", "-b", "main"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_determine_needs_no_email() {
        let cli =
            Cli::try_parse_from(["git-bump", "determine", "-g", "/repo", "-b", "main"]).unwrap();
        assert!(matches!(cli.command, Command::Determine(_)));
    }

    #[test]
    fn test_invalid_increment_rejected() {
        let result = Cli::try_parse_from([
            "git-bump",
            "increment-by",
            "huge",
            "-g",
            "/repo",
            "-b",
            "main",
            "-e",
            "ci@example.com",
        ]);
        assert!(result.is_err());
    }
}
