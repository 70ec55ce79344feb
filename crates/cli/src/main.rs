use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use triage_core::{
    config::{resolve_data_dir, severity_table_from_path},
    snapshot::read_snapshot,
    CoreConfig, CredentialStore, Credentials,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Triage booking administration CLI")]
struct Cli {
    /// Directory holding patients.csv and patient_queue.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// YAML file of `disease: rank` pairs replacing the built-in severity table
    #[arg(long, global = true)]
    severity_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List diseases and their severity ranks
    Diseases,
    /// Register patient credentials
    Register {
        username: String,
        password: String,
        /// Date of birth (DD/MM/YYYY)
        date_of_birth: String,
    },
    /// Check patient credentials
    Verify {
        username: String,
        password: String,
        /// Date of birth (DD/MM/YYYY)
        date_of_birth: String,
    },
    /// Print the last saved queue snapshot
    Snapshot {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'triage --help' for commands");
        return Ok(ExitCode::SUCCESS);
    };

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let table = severity_table_from_path(cli.severity_file.as_deref())?;
    let cfg = CoreConfig::new(data_dir, table)?;

    let mut stdout = std::io::stdout().lock();
    if run(&cfg, command, &mut stdout)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Runs one command. Returns `false` when the command completed but its answer is "no".
fn run(
    cfg: &CoreConfig,
    command: Commands,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Commands::Diseases => {
            for (disease, rank) in cfg.severity_table().entries() {
                writeln!(out, "{rank}\t{disease}")?;
            }
        }
        Commands::Register {
            username,
            password,
            date_of_birth,
        } => {
            let credentials = Credentials::new(username, password, date_of_birth)?;
            CredentialStore::from_config(cfg).register(&credentials)?;
            writeln!(out, "Registered {}", credentials.username)?;
        }
        Commands::Verify {
            username,
            password,
            date_of_birth,
        } => {
            let credentials = Credentials::new(username, password, date_of_birth)?;
            let matched = CredentialStore::from_config(cfg).verify(&credentials)?;
            if matched {
                writeln!(out, "Credentials match")?;
            } else {
                writeln!(out, "Invalid username or password.")?;
            }
            return Ok(matched);
        }
        Commands::Snapshot { json } => {
            let records = read_snapshot(&cfg.snapshot_path())?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            } else if records.is_empty() {
                writeln!(out, "No appointments booked.")?;
            } else {
                for record in &records {
                    writeln!(out, "{record}")?;
                }
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use triage_core::SeverityTable;

    fn config(temp: &TempDir) -> CoreConfig {
        CoreConfig::new(temp.path().to_path_buf(), SeverityTable::default()).unwrap()
    }

    fn run_to_string(cfg: &CoreConfig, args: &[&str]) -> (bool, String) {
        let cli = Cli::try_parse_from(std::iter::once("triage").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let ok = run(cfg, cli.command.unwrap(), &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_diseases_lists_most_severe_first() {
        let temp = TempDir::new().unwrap();
        let (ok, out) = run_to_string(&config(&temp), &["diseases"]);
        assert!(ok);
        assert_eq!(out.lines().count(), 10);
        assert_eq!(out.lines().next(), Some("8\tconcussion"));
    }

    #[test]
    fn test_register_then_verify() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp);
        let (ok, _) = run_to_string(&cfg, &["register", "alice", "pw", "01/02/1990"]);
        assert!(ok);

        let (ok, out) = run_to_string(&cfg, &["verify", "alice", "pw", "01/02/1990"]);
        assert!(ok);
        assert_eq!(out, "Credentials match\n");

        let (ok, _) = run_to_string(&cfg, &["verify", "alice", "nope", "01/02/1990"]);
        assert!(!ok);
    }

    #[test]
    fn test_snapshot_output() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp);

        let (_, out) = run_to_string(&cfg, &["snapshot"]);
        assert_eq!(out, "No appointments booked.\n");

        fs::write(cfg.snapshot_path(), "2,Sam,bleeding,10\n1,Alex,headache,5\n").unwrap();
        let (_, out) = run_to_string(&cfg, &["snapshot"]);
        assert_eq!(
            out.lines().next(),
            Some("Appointment Number: 2, Name: Sam, Disease: bleeding, Time to reach: 10")
        );

        let (_, out) = run_to_string(&cfg, &["snapshot", "--json"]);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["name"], "Alex");
    }

    #[test]
    fn test_global_flags_parse() {
        let cli = Cli::try_parse_from([
            "triage",
            "diseases",
            "--data-dir",
            "/tmp/triage",
            "--severity-file",
            "sev.yaml",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/triage")));
        assert_eq!(cli.severity_file, Some(PathBuf::from("sev.yaml")));
    }
}
