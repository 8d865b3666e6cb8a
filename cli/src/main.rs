//! docpolish CLI - document analysis and restyling tool

mod improve;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use docpolish::{
    parse_file, Classifier, Docpolish, DocumentCodec, EditorRole, ImproveOutcome, Position,
    RecordKind, Report, Reporter, StyleRules,
};

use crate::improve::{ChatCompletionsImprover, DEFAULT_API_URL, DEFAULT_MODEL};

#[derive(Parser)]
#[command(name = "docpolish")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Analyze and restyle documents with consistent academic formatting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a document and report the changes
    Format {
        /// Input document (.docx or JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file, format chosen by extension (defaults to <FILE>.formatted.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Style rule table (JSON)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Improve the text with the chat-completions service before styling
        #[arg(long)]
        improve: bool,

        /// Editor role for text improvement
        #[arg(long, value_enum, default_value = "professional")]
        role: RoleArg,

        /// Write the issue and change reports as JSON
        #[arg(long, value_name = "FILE")]
        report_json: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Report formatting issues without changing the document
    Analyze {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Style rule table (JSON)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Format many documents in parallel
    Batch {
        /// Input documents
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Style rule table (JSON)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the default style rule table
    Rules,

    /// Show version information
    Version,
}

#[derive(Args)]
struct ServiceArgs {
    /// API key for the text-improvement service
    #[arg(long, env = "DOCPOLISH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for text improvement
    #[arg(long, env = "DOCPOLISH_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Chat-completions endpoint
    #[arg(long, env = "DOCPOLISH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum RoleArg {
    /// General professional editing
    Professional,
    /// Formal academic register
    Academic,
    /// Business register
    Business,
    /// Shorter wording
    Concise,
}

impl From<RoleArg> for EditorRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Professional => EditorRole::Professional,
            RoleArg::Academic => EditorRole::Academic,
            RoleArg::Business => EditorRole::Business,
            RoleArg::Concise => EditorRole::Concise,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Format {
            input,
            output,
            rules,
            improve,
            role,
            report_json,
            compact,
            service,
        }) => cmd_format(
            &input,
            output.as_deref(),
            rules.as_deref(),
            improve.then_some(&service),
            role,
            report_json.as_deref(),
            compact,
        ),
        Some(Commands::Analyze { input, rules, json }) => {
            cmd_analyze(&input, rules.as_deref(), json)
        }
        Some(Commands::Batch {
            inputs,
            output,
            rules,
        }) => cmd_batch(&inputs, &output, rules.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Rules) => cmd_rules(),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docpolish <COMMAND> <FILE>".yellow());
            println!("       docpolish --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_rules(path: Option<&Path>) -> Result<StyleRules, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(StyleRules::from_json(&fs::read_to_string(path)?)?),
        None => Ok(StyleRules::default()),
    }
}

fn default_output(input: &Path, codec: &dyn DocumentCodec) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}.formatted.{}", stem, codec.extension()))
}

fn print_report(title: &str, report: &Report) {
    println!("{}", title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (category, records) in report.by_category() {
        for record in records {
            match record.kind {
                RecordKind::Summary => println!("{}: {}", category.label().bold(), record.message),
                RecordKind::Issue => println!("  {} {}", "•".yellow(), record.message),
                RecordKind::Notice => println!("{}", record.message.green()),
            }
        }
    }
    println!();
}

fn cmd_format(
    input: &Path,
    output: Option<&Path>,
    rules: Option<&Path>,
    service: Option<&ServiceArgs>,
    role: RoleArg,
    report_json: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut polish = Docpolish::new()
        .with_rules(load_rules(rules)?)
        .with_role(role.into());
    if compact {
        polish = polish.compact();
    }
    if let Some(service) = service {
        let api_key = service
            .api_key
            .clone()
            .ok_or("--improve needs an API key (set DOCPOLISH_API_KEY)")?;
        polish = polish.with_improver(ChatCompletionsImprover::new(
            &service.api_url,
            api_key,
            &service.model,
        )?);
    }

    let result = polish.process_file(input)?;

    match &result.result.improvement {
        Some(ImproveOutcome::Applied { paragraphs_out, .. }) => println!(
            "{} {} paragraphs",
            "Improved text:".green(),
            paragraphs_out
        ),
        Some(ImproveOutcome::Failed(e)) => {
            println!("{} {}", "Text improvement skipped:".yellow(), e)
        }
        Some(ImproveOutcome::Skipped) | None => {}
    }

    print_report("Issues Found", result.issues());
    print_report("Changes Applied", result.changes());

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, result.codec()));
    result.write_to(&output)?;
    println!("{} {}", "Saved to".green(), output.display());

    if let Some(path) = report_json {
        let json = serde_json::json!({
            "issues": result.issues(),
            "changes": result.changes(),
        });
        fs::write(path, serde_json::to_string_pretty(&json)?)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_analyze(
    input: &Path,
    rules: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;
    let report = Reporter::new(load_rules(rules)?).analyze(&doc);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report("Issues Found", &report);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    rules: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = load_rules(rules)?;
    rules.validate()?;
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let failed = AtomicUsize::new(0);
    inputs.par_iter().for_each(|input| {
        let name = input.file_name().unwrap_or_default();
        let target = output_dir.join(name);
        let outcome = Docpolish::new()
            .with_rules(rules.clone())
            .process_file(input)
            .and_then(|result| result.write_to(&target));

        if let Err(e) = outcome {
            failed.fetch_add(1, Ordering::Relaxed);
            pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
        }
        pb.set_message(name.to_string_lossy().into_owned());
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    let failed = failed.into_inner();
    println!(
        "\n{} {} formatted, {} failed",
        "Done!".green().bold(),
        inputs.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(format!("{} document(s) could not be formatted", failed).into());
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    println!("{}: {}", "Paragraphs".bold(), doc.paragraph_count());
    println!("{}: {}", "Tables".bold(), doc.table_count());
    println!("{}: {}", "Sections".bold(), doc.sections.len());
    println!("{}: {}", "Named styles".bold(), doc.styles.len());
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    let classifier = Classifier::default();
    let mut roles: BTreeMap<String, usize> = BTreeMap::new();
    for (index, paragraph) in doc.paragraphs().enumerate() {
        if paragraph.is_empty() {
            continue;
        }
        let role = classifier.classify(
            &paragraph.plain_text(),
            paragraph.style_name(),
            Position::Paragraph(index),
        );
        *roles.entry(role.to_string()).or_default() += 1;
    }

    println!();
    println!("{}", "Paragraph Roles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (role, count) in &roles {
        println!("{}: {}", role.bold(), count);
    }

    Ok(())
}

fn cmd_rules() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", StyleRules::default().to_json()?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docpolish".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document analysis and restyling tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docpolish".dimmed());
    println!("License: MIT");
}
