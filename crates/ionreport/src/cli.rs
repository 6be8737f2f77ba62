//! Clap derive structures for the `ionreport` CLI.

use std::path::PathBuf;

use clap::Parser;

/// ionreport -- list ION interface management policies as CSV
#[derive(Debug, Parser)]
#[command(
    name = "ionreport",
    version,
    about = "Write a CSV listing of every ION and its interface management policies",
    long_about = "Write a CSV listing of every ION and its interface management policies.\n\n\
        Authenticates with --token, then --authtokenfile, then the X_AUTH_TOKEN and\n\
        AUTH_TOKEN environment variables, and finally an interactive login.\n\n\
        By default the report is written to 'element-policy-mapping.csv'."
)]
pub struct Cli {
    /// Auth token to use for controller authentication
    #[arg(long, short = 't', value_name = "\"MYTOKEN\"")]
    pub token: Option<String>,

    /// File containing the auth token
    #[arg(long = "authtokenfile", short = 'f', value_name = "\"MYTOKENFILE.TXT\"")]
    pub token_file: Option<PathBuf>,

    /// CSV file to write (default: element-policy-mapping.csv)
    #[arg(long = "csvfile", short = 'c', value_name = "CSVFILE")]
    pub csv_file: Option<PathBuf>,

    /// Controller API URL (overrides config)
    #[arg(long, env = "IONREPORT_CONTROLLER", value_name = "URL")]
    pub controller: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Abort if any element's extensions cannot be fetched
    #[arg(long)]
    pub strict: bool,

    /// Give up interactive login after this many failed attempts
    #[arg(long, value_name = "N")]
    pub max_login_attempts: Option<u32>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_match_long_flags() {
        let cli = Cli::try_parse_from([
            "ionreport", "-t", "abc", "-f", "token.txt", "-c", "out.csv",
        ])
        .unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(cli.token_file.unwrap(), PathBuf::from("token.txt"));
        assert_eq!(cli.csv_file.unwrap(), PathBuf::from("out.csv"));
    }

    #[test]
    fn long_flags() {
        let cli = Cli::try_parse_from([
            "ionreport",
            "--token",
            "abc",
            "--authtokenfile",
            "t.txt",
            "--csvfile",
            "x.csv",
            "--strict",
            "-vv",
        ])
        .unwrap();
        assert!(cli.strict);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.token_file.unwrap(), PathBuf::from("t.txt"));
    }
}
