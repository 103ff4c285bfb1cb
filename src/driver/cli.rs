//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;
use std::path::PathBuf;

/// スクリーンショットを撮影日時付きでGoogle Photosにアップロードする CLI
#[derive(Parser, Debug, Clone)]
#[command(name = "photosync")]
#[command(
    about = "Upload screenshots to Google Photos with their capture time restored",
    long_about = None
)]
pub struct Args {
    /// PNG files or directories to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Config file path
    #[arg(short, long, default_value = "~/.config/photosync/config.json")]
    pub config: String,

    /// Dry run mode - list files and detected capture times without uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Upload files unchanged instead of embedding the capture time
    #[arg(long)]
    pub no_fix_timestamps: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["photosync", "shots/"]);
        assert_eq!(args.paths, vec![PathBuf::from("shots/")]);
        assert_eq!(args.config, "~/.config/photosync/config.json");
        assert!(!args.dry_run);
        assert!(!args.no_fix_timestamps);
        assert!(!args.quiet);
    }

    #[test]
    fn test_args_requires_paths() {
        assert!(Args::try_parse_from(["photosync"]).is_err());
    }

    #[test]
    fn test_args_multiple_paths_keep_order() {
        let args = Args::parse_from(["photosync", "b.png", "a.png", "dir"]);
        assert_eq!(
            args.paths,
            vec![
                PathBuf::from("b.png"),
                PathBuf::from("a.png"),
                PathBuf::from("dir")
            ]
        );
    }

    #[test]
    fn test_args_custom_config() {
        let args = Args::parse_from(["photosync", "-c", "/custom/config.json", "a.png"]);
        assert_eq!(args.config, "/custom/config.json");
    }

    #[test]
    fn test_args_combined() {
        let args = Args::parse_from([
            "photosync",
            "--dry-run",
            "--no-fix-timestamps",
            "-q",
            "a.png",
        ]);
        assert!(args.dry_run);
        assert!(args.no_fix_timestamps);
        assert!(args.quiet);
    }
}
