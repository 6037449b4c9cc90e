// amtest CLI - headless penetrometer report generation
// Pipeline: workbook in, PDF report out, storage fallback chain at the end.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use amtest_cli::exit_codes::{EXIT_PERMISSION_DENIED, EXIT_SUCCESS};
use amtest_cli::pipeline::{self, GenerateRequest, Inspection};
use amtest_cli::settings::Settings;
use amtest_cli::CliError;
use amtest_report::StorageLocation;

#[derive(Parser)]
#[command(name = "amtest")]
#[command(about = "Generate penetrometer test reports from field worksheets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PDF report from a field worksheet
    #[command(after_help = "\
Examples:
  amtest generate survey.xlsx --allow-shared
  amtest generate survey.xlsx --out-dir ~/reports --name site42.pdf
  amtest generate survey.xlsx --html report.html --json")]
    Generate {
        /// Workbook file (xlsx, xls, xlsb, ods)
        input: PathBuf,

        /// Template schema TOML (defaults to the built-in template v1)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Shared output directory (defaults to the platform documents folder)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Report file name (defaults to test_report_<timestamp>.pdf)
        #[arg(long)]
        name: Option<String>,

        /// Consent to write user-visible shared storage
        #[arg(long)]
        allow_shared: bool,

        /// Also write the HTML rendition of the report here
        #[arg(long)]
        html: Option<PathBuf>,

        /// Print the persisted artifact as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract and show worksheet data without generating a report
    #[command(after_help = "\
Examples:
  amtest inspect survey.xlsx
  amtest inspect survey.xlsx --json")]
    Inspect {
        /// Workbook file
        input: PathBuf,

        /// Template schema TOML
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Full extraction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a styled HTML preview of the selected worksheet
    #[command(after_help = "\
Examples:
  amtest preview survey.xlsx -o preview.html")]
    Preview {
        /// Workbook file
        input: PathBuf,

        /// Template schema TOML
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Export the extracted point series as CSV
    #[command(after_help = "\
Examples:
  amtest points survey.xlsx
  amtest points survey.xlsx --transformed -o chart_data.csv")]
    Points {
        /// Workbook file
        input: PathBuf,

        /// Template schema TOML
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Export chart coordinates instead of raw readings
        #[arg(long)]
        transformed: bool,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show or validate a template schema
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Print the built-in template v1 schema as TOML
    Show,
    /// Validate a schema file
    Validate {
        /// Path to the schema TOML
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

fn run(cli: Cli) -> Result<u8, CliError> {
    let settings = Settings::load();
    match cli.command {
        Commands::Generate { input, schema, out_dir, name, allow_shared, html, json } => {
            cmd_generate(&settings, input, schema, out_dir, name, allow_shared, html, json)
        }
        Commands::Inspect { input, schema, json } => cmd_inspect(&settings, input, schema, json),
        Commands::Preview { input, schema, output } => cmd_preview(&settings, input, schema, output),
        Commands::Points { input, schema, transformed, output } => {
            cmd_points(&settings, input, schema, transformed, output)
        }
        Commands::Schema { command } => cmd_schema(command),
    }
}

fn schema_for(settings: &Settings, flag: Option<PathBuf>) -> Result<amtest_io::TemplateSchema, CliError> {
    let path = flag.or_else(|| settings.schema_path.clone());
    pipeline::load_schema(path.as_deref())
}

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    settings: &Settings,
    input: PathBuf,
    schema: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    name: Option<String>,
    allow_shared: bool,
    html: Option<PathBuf>,
    json: bool,
) -> Result<u8, CliError> {
    let request = GenerateRequest {
        input,
        schema: schema_for(settings, schema)?,
        chart: settings.chart,
        file_name: name,
        html_out: html,
    };
    let shared_dir = out_dir.or_else(|| settings.output_dir.clone());
    let allow = allow_shared || settings.allow_shared_storage;

    let outcome = pipeline::generate(&request, shared_dir.as_deref(), allow)?;

    if json {
        let payload = serde_json::json!({
            "path": outcome.artifact.path,
            "location": outcome.artifact.location,
            "status": outcome.artifact.status,
            "points": outcome.point_count,
            "html": outcome.html_path,
        });
        println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
    } else {
        println!("{}", outcome.artifact.status);
        println!("{}", outcome.artifact.path.display());
        if let Some(html_path) = &outcome.html_path {
            println!("HTML rendition: {}", html_path.display());
        }
    }

    Ok(match outcome.artifact.location {
        StorageLocation::TempCache => EXIT_PERMISSION_DENIED,
        StorageLocation::SharedStore | StorageLocation::PrivateStore => EXIT_SUCCESS,
    })
}

fn cmd_inspect(
    settings: &Settings,
    input: PathBuf,
    schema: Option<PathBuf>,
    json: bool,
) -> Result<u8, CliError> {
    let schema = schema_for(settings, schema)?;
    let inspection = pipeline::inspect(&input, &schema)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&inspection)
                .map_err(|e| CliError::other(e.to_string()))?
        );
        return Ok(EXIT_SUCCESS);
    }

    let meta = &inspection.meta;
    println!("Sheet:      {}", inspection.sheet_name);
    println!("Title:      {}", meta.title);
    println!("Client:     {}", meta.client);
    println!("Site:       {}", meta.site);
    println!("Job number: {}", meta.job_number);
    println!("Test date:  {}", meta.test_date);
    println!("Technician: {}", meta.technician);
    println!(
        "Cone:       {} ({})",
        if meta.cone_condition.checked { "checked" } else { "not checked" },
        meta.cone_condition.status
    );
    println!("Readings:   {}", inspection.raw_points.len());
    Ok(EXIT_SUCCESS)
}

fn cmd_preview(
    settings: &Settings,
    input: PathBuf,
    schema: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<u8, CliError> {
    let schema = schema_for(settings, schema)?;
    let html = pipeline::preview(&input, &schema)?;
    write_output(output.as_deref(), html.as_bytes())?;
    Ok(EXIT_SUCCESS)
}

fn cmd_points(
    settings: &Settings,
    input: PathBuf,
    schema: Option<PathBuf>,
    transformed: bool,
    output: Option<PathBuf>,
) -> Result<u8, CliError> {
    let schema = schema_for(settings, schema)?;
    let inspection = pipeline::inspect(&input, &schema)?;

    let mut buf = Vec::new();
    write_points_csv(&mut buf, &inspection, transformed)?;
    write_output(output.as_deref(), &buf)?;
    Ok(EXIT_SUCCESS)
}

fn cmd_schema(command: SchemaCommands) -> Result<u8, CliError> {
    match command {
        SchemaCommands::Show => {
            print!("{}", amtest_io::TemplateSchema::default().to_toml());
            Ok(EXIT_SUCCESS)
        }
        SchemaCommands::Validate { path } => {
            let schema = pipeline::load_schema(Some(&path))?;
            println!("schema OK (version {})", schema.version);
            Ok(EXIT_SUCCESS)
        }
    }
}

fn write_points_csv<W: Write>(
    writer: W,
    inspection: &Inspection,
    transformed: bool,
) -> Result<(), CliError> {
    let csv_err = |e: csv::Error| CliError::other(format!("CSV write failed: {e}"));
    let mut wtr = csv::Writer::from_writer(writer);
    if transformed {
        wtr.write_record(["cumulative_blows", "depth_offset_mm"]).map_err(csv_err)?;
        for p in &inspection.transformed {
            wtr.write_record([p.x.to_string(), p.y.to_string()]).map_err(csv_err)?;
        }
    } else {
        wtr.write_record(["blows", "depth_mm"]).map_err(csv_err)?;
        for p in &inspection.raw_points {
            wtr.write_record([p.blows.to_string(), p.depth_mm.to_string()]).map_err(csv_err)?;
        }
    }
    wtr.flush().map_err(|e| CliError::other(format!("CSV flush failed: {e}")))
}

fn write_output(path: Option<&std::path::Path>, bytes: &[u8]) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .map_err(|e| CliError::other(format!("cannot write {}: {e}", path.display()))),
        None => std::io::stdout()
            .write_all(bytes)
            .map_err(|e| CliError::other(format!("cannot write to stdout: {e}"))),
    }
}
