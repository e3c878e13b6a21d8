// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and the delete, copy and list subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sweeper")]
#[command(about = "Bulk delete and copy of objects addressed as provider://path")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete every object under a reference
    Delete {
        #[arg(help = "Objects to delete, as provider://path")]
        reference: String,

        #[arg(
            short,
            long,
            help = "Number of objects to delete in parallel (0 for all at once)"
        )]
        parallel: Option<usize>,
    },

    /// Copy every object under a reference to another reference
    Copy {
        #[arg(help = "Source, as provider://path")]
        source: String,

        #[arg(help = "Destination, as provider://path")]
        destination: String,

        #[arg(
            short,
            long,
            help = "Number of objects to copy in parallel (0 for all at once)"
        )]
        parallel: Option<usize>,
    },

    /// List the objects under a reference
    List {
        #[arg(help = "Objects to list, as provider://path")]
        reference: String,

        #[arg(long, help = "Print the listing as a JSON array")]
        json: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delete() {
        let args = Args::try_parse_from(["sweeper", "delete", "s3://bucket/prefix", "-p", "8"])
            .unwrap();

        match args.command {
            Commands::Delete {
                reference,
                parallel,
            } => {
                assert_eq!(reference, "s3://bucket/prefix");
                assert_eq!(parallel, Some(8));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_copy_with_globals() {
        let args = Args::try_parse_from([
            "sweeper",
            "copy",
            "file:///tmp/in",
            "gcs://bucket/out",
            "--verbose",
            "--config",
            "custom.yaml",
        ])
        .unwrap();

        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("custom.yaml")));
        match args.command {
            Commands::Copy {
                source,
                destination,
                parallel,
            } => {
                assert_eq!(source, "file:///tmp/in");
                assert_eq!(destination, "gcs://bucket/out");
                assert_eq!(parallel, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_json() {
        let args = Args::try_parse_from(["sweeper", "list", "abs://container", "--json"]).unwrap();
        assert!(matches!(args.command, Commands::List { json: true, .. }));
    }

    #[test]
    fn test_missing_reference_is_rejected() {
        assert!(Args::try_parse_from(["sweeper", "delete"]).is_err());
    }
}
