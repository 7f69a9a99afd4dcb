//! The `quizadmin init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizadmin.toml").exists() {
        println!("quizadmin.toml already exists, skipping.");
    } else {
        std::fs::write("quizadmin.toml", SAMPLE_CONFIG)?;
        println!("Created quizadmin.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizadmin.toml to choose where data is stored");
    println!("  2. Run: quizadmin register --email you@example.com --password abcd1234 \\");
    println!("          --first-name Your --last-name Name");
    println!("  3. Run: quizadmin quiz-create --user 0 --name \"My first quiz\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizadmin configuration

# Where users and quizzes are stored between runs.
# ${VAR} references are expanded; QUIZADMIN_DATA_FILE overrides this value.
data_file = "./quizadmin-data.json"

# Pretty-print JSON output (pass --compact to override per run).
pretty = true

# Log filter used when RUST_LOG is not set. Logs go to stderr.
log_filter = "quizadmin=warn"
"#;
