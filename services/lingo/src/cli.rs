use clap::Parser;
use std::path::PathBuf;

/// Suggests what to study next and which words to learn alongside a given one.
///
/// Without arguments both inputs are asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "lingo", version, about)]
pub struct Cli {
    /// Summary of what you studied today; skips the first prompt.
    #[arg(long)]
    pub notes: Option<String>,

    /// Word to find related vocabulary for; skips the second prompt.
    #[arg(long)]
    pub word: Option<String>,

    /// Load environment variables from this file instead of `.env`.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
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
    fn test_no_arguments_means_interactive() {
        let cli = Cli::try_parse_from(["lingo"]).unwrap();
        assert!(cli.notes.is_none());
        assert!(cli.word.is_none());
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_inputs_from_flags() {
        let cli = Cli::try_parse_from([
            "lingo",
            "--notes",
            "Learned past tense conjugation",
            "--word",
            "run",
            "--env-file",
            "study.env",
        ])
        .unwrap();
        assert_eq!(cli.notes.as_deref(), Some("Learned past tense conjugation"));
        assert_eq!(cli.word.as_deref(), Some("run"));
        assert_eq!(cli.env_file, Some(PathBuf::from("study.env")));
    }
}
