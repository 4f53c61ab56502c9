//! Favorite-color filter CLI
//!
//! Offline tools for checking filter decisions against a saved model.

mod report;

use clap::{Parser, Subcommand};

use fc_core::PageContext;

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(about = "Favorite-color filter inspection tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each circle's resolved color and visibility
    Inspect {
        /// Saved model JSON (the text of the page's TheModel element)
        #[arg(short, long)]
        model: String,

        /// Allowed color ids, comma separated (default: all)
        #[arg(short, long)]
        allow: Option<String>,

        /// Page context: favorites, circle-list or map
        #[arg(short, long, default_value = "favorites")]
        context: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the color catalog
    Colors,

    /// Show the direct icon links for a circle id
    Links {
        /// Saved model JSON
        #[arg(short, long)]
        model: String,

        /// Circle id, as found in the row's id attribute
        #[arg(short, long)]
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            model,
            allow,
            context,
            json,
        } => cmd_inspect(&model, allow.as_deref(), &context, json),
        Commands::Colors => cmd_colors(),
        Commands::Links { model, id } => cmd_links(&model, &id),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_inspect(path: &str, allow: Option<&str>, context: &str, json: bool) -> Result<(), String> {
    let context = PageContext::from_name(context)
        .ok_or_else(|| format!("Unknown page context '{}'", context))?;
    let model = report::load_model(path)?;
    let state = report::parse_allow(allow)?;
    let report = report::inspect(&model, context, &state);

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to encode report: {}", e))?;
        println!("{text}");
        return Ok(());
    }

    println!("Context:  {}", report.context);
    println!("Allowed:  {}", report.allowed.join(","));
    println!();
    println!("{:>5}  {:>8}  {:<14} {}", "index", "id", "color", "visible");
    for circle in &report.circles {
        let color = match (&circle.color, circle.color_name) {
            (Some(id), Some(name)) => format!("{id} {name}"),
            (Some(id), None) => id.clone(),
            (None, _) => "-".to_string(),
        };
        println!(
            "{:>5}  {:>8}  {:<14} {}",
            circle.index,
            circle.id.as_deref().unwrap_or("-"),
            color,
            if circle.visible { "yes" } else { "no" },
        );
    }
    println!();
    println!("{}", report.summary.label_text());
    Ok(())
}

fn cmd_colors() -> Result<(), String> {
    for line in report::catalog_lines() {
        println!("{line}");
    }
    Ok(())
}

fn cmd_links(path: &str, id: &str) -> Result<(), String> {
    let model = report::load_model(path)?;
    let targets = report::links(&model, id);
    if targets.is_empty() {
        return Err(format!("No links for circle '{}'", id));
    }
    for target in targets {
        println!("{:<24} {}", target.icon_class, target.url);
    }
    Ok(())
}
