use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gpacalc",
    version,
    about = "Semester and cumulative GPA calculator"
)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Semester GPA from REG:GAINED subject pairs.
    Sgpa(SgpaArgs),
    /// Cumulative GPA across semesters.
    Cgpa(CgpaArgs),
    /// Interactive calculator reading commands from stdin.
    Shell(ShellArgs),
    /// Write a default gpacalc.toml to the current directory.
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SgpaArgs {
    /// Subject as REG:GAINED, e.g. 4:8. Repeat per subject.
    #[arg(long = "subject", short = 's', value_name = "REG:GAINED")]
    pub subjects: Vec<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CgpaArgs {
    /// Semester as comma-separated REG:GAINED pairs, e.g. "4:8,3:9". Repeat per semester.
    #[arg(
        long = "semester",
        short = 'S',
        value_name = "PAIRS",
        conflicts_with = "file"
    )]
    pub semesters: Vec<String>,
    /// TOML or JSON transcript file.
    #[arg(long, short)]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ShellArgs {
    #[arg(long, value_enum, default_value_t = Calculator::Semester)]
    pub calculator: Calculator,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Calculator {
    Semester,
    Cumulative,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_subjects() {
        let cli = Cli::parse_from(["gpacalc", "sgpa", "-s", "4:8", "--subject", "3:9", "--json"]);
        let Commands::Sgpa(args) = cli.command else {
            panic!("expected sgpa");
        };
        assert_eq!(args.subjects, vec!["4:8", "3:9"]);
        assert!(args.output.json);
    }

    #[test]
    fn semesters_conflict_with_file() {
        let parsed = Cli::try_parse_from(["gpacalc", "cgpa", "-S", "4:8", "--file", "t.toml"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn shell_defaults_to_semester_calculator() {
        let cli = Cli::parse_from(["gpacalc", "shell", "-v"]);
        assert!(cli.verbose);
        let Commands::Shell(args) = cli.command else {
            panic!("expected shell");
        };
        assert_eq!(args.calculator, Calculator::Semester);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
