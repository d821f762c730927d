//! synthgen CLI - Generate Monaco synthetic-monitor projects from CSV
//!
//! # Commands
//!
//! ```bash
//! synthgen generate                         # vars/monitors.csv -> projects/synthetic-monitor/
//! synthgen generate -i checks.csv -o out    # custom input and output
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! synthgen parse checks.csv                 # Dump parsed rows as JSON
//! synthgen preview checks.csv --id mon-1    # Print the files of one row
//! ```
//!
//! Settings can also come from `SYNTHGEN_INPUT`, `SYNTHGEN_OUTPUT_DIR`,
//! `SYNTHGEN_API` and `SYNTHGEN_DELIMITER`, including through a `.env` file.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use synthgen::config::parse_delimiter;
use synthgen::logs::log_error;
use synthgen::{
    generate, read_table, render_row, GenerationReport, GeneratorConfig, LogFormat, MonitorRow,
    LOGGER,
};

#[derive(Parser)]
#[command(name = "synthgen")]
#[command(about = "Generate Monaco synthetic-monitor projects from a CSV file", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one monitor directory per CSV row
    Generate {
        /// Input CSV file (default: vars/monitors.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Base output directory (default: projects/synthetic-monitor)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// CSV delimiter (default: ',')
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Monaco API written to project.yaml (default: synthetic-monitor)
        #[arg(long)]
        api: Option<String>,
    },

    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file (default: vars/monitors.csv)
        input: Option<PathBuf>,

        /// CSV delimiter (default: ',')
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the monitor.json and project.yaml of one row without writing
    Preview {
        /// Input CSV file (default: vars/monitors.csv)
        input: Option<PathBuf>,

        /// monitor_id of the row to render (default: first valid row)
        #[arg(long)]
        id: Option<String>,

        /// CSV delimiter (default: ',')
        #[arg(short, long)]
        delimiter: Option<String>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOGGER.set_format(cli.log_format);

    let result = match cli.command {
        Commands::Generate {
            input,
            output_dir,
            delimiter,
            api,
        } => cmd_generate(input, output_dir, delimiter.as_deref(), api),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(input, delimiter.as_deref(), output.as_deref()),

        Commands::Preview {
            input,
            id,
            delimiter,
        } => cmd_preview(input, id.as_deref(), delimiter.as_deref()),
    };

    if let Err(e) = result {
        if LOGGER.format() == LogFormat::Json {
            log_error(e.to_string());
        }
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Environment-based config with CLI overrides applied.
fn load_config(
    input: Option<PathBuf>,
    delimiter: Option<&str>,
) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let mut config = GeneratorConfig::from_env()?;
    if let Some(input) = input {
        config.input_path = input;
    }
    if let Some(d) = delimiter {
        config.delimiter = parse_delimiter(d)?;
    }
    Ok(config)
}

fn cmd_generate(
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    delimiter: Option<&str>,
    api: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(input, delimiter)?;
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(api) = api {
        config.api_category = api;
    }

    let report = generate(&config)?;
    print_summary(&report, &config);
    Ok(())
}

fn print_summary(report: &GenerationReport, config: &GeneratorConfig) {
    let base = config.output_dir.display();

    if report.is_empty() {
        println!("No monitor configurations were generated. Check CSV content and format.");
        return;
    }

    println!(
        "\nSuccessfully generated Monaco configurations for {} monitor(s).",
        report.generated.len()
    );
    if !report.skipped.is_empty() || !report.warnings.is_empty() || !report.duplicates.is_empty() {
        println!("{}", report.summary());
    }
    println!("Generated project directories:");
    for monitor in &report.generated {
        println!("  - {}", monitor.dir.display());
    }

    println!("\nNext steps:");
    println!("1. Review the generated files in the '{}' directory.", base);
    println!(
        "2. Ensure your 'manifest.yaml' points to the '{}' directory as a project path, or lists each sub-directory.",
        base
    );
    println!("   Example for 'manifest.yaml' (if pointing to base directory):");
    println!("     projects:");
    println!("       - name: synthetic-monitors # Can be any name");
    println!("         path: {}", base);
    println!("3. Run 'monaco deploy manifest.yaml --environment <your_env_name>'");
}

fn cmd_parse(
    input: Option<PathBuf>,
    delimiter: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(input, delimiter)?;
    eprintln!("📄 Parsing CSV: {}", config.input_path.display());

    let table = read_table(&config.input_path, config.delimiter)?;
    eprintln!("   Encoding: {}", table.encoding);
    eprintln!("   Columns: {}", table.headers.join(", "));
    eprintln!("✅ Parsed {} records", table.records.len());

    let json = serde_json::to_string_pretty(&table.records)?;
    match output {
        Some(p) => {
            fs::write(p, &json)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn cmd_preview(
    input: Option<PathBuf>,
    id: Option<&str>,
    delimiter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(input, delimiter)?;
    let table = read_table(&config.input_path, config.delimiter)?;

    let row = table
        .records
        .iter()
        .filter_map(|record| MonitorRow::from_record(record).ok())
        .find(|row| id.map_or(true, |id| row.id == id))
        .ok_or_else(|| match id {
            Some(id) => format!("No row with monitor_id '{}'", id),
            None => "No row with a monitor_id".to_string(),
        })?;

    for warning in &row.warnings {
        eprintln!("⚠️  {}", warning);
    }

    let (monitor_json, project_yaml) = render_row(&row, &config)?;
    println!("# {}/{}", row.id, config.monitor_file_name);
    println!("{}", monitor_json);
    println!("\n# {}/{}", row.id, config.project_file_name);
    print!("{}", project_yaml);

    Ok(())
}
