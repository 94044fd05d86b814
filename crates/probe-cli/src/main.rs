use clap::Parser;
use colored::Colorize;

use probe_core::{ModelReport, ProbeOutcome};
use probe_llm::OllamaClient;
use probe_suite::{CapabilityProber, ResultAggregator};
use probe_tools::builtin_registry;

const DEFAULT_MODELS: &[&str] = &[
    "mistral:7b",
    "phi4-mini:3.8b-fp16",
    "llama3.2:latest",
    "qwen3:14b",
    "qwen3:8b",
];

#[derive(Parser)]
#[command(name = "ollama-probe")]
#[command(about = "Capability probes for an Ollama-compatible chat endpoint")]
#[command(version)]
struct Cli {
    /// Base URL of the Ollama server
    #[arg(long, default_value = "http://localhost:11434")]
    url: String,

    /// Probe a single model instead of the default list
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!("{}", "Ollama model capability probe".bold());
    println!("Server: {}", cli.url);

    let models: Vec<String> = match &cli.model {
        Some(model) => vec![model.clone()],
        None => DEFAULT_MODELS.iter().map(|model| model.to_string()).collect(),
    };
    println!("Probing {} model(s): {}", models.len(), models.join(", "));

    let registry = builtin_registry()?;
    let client = OllamaClient::new(&cli.url);

    let mut aggregator = ResultAggregator::new();
    for model in &models {
        let prober = CapabilityProber::new(&client, &registry, model);
        let report = prober.run_all().await;
        print_model_report(&report);
        aggregator.push(report);
    }

    print_summary(&aggregator);

    // Probe failures are reported above, never through the exit code.
    Ok(())
}

fn status(outcome: &ProbeOutcome) -> colored::ColoredString {
    if outcome.passed {
        "PASS".green()
    } else {
        "FAIL".red()
    }
}

fn print_model_report(report: &ModelReport) {
    println!("\n{}", format!("Results for {}", report.model).bold());
    println!("- Basic connection: {}", status(&report.basic));
    println!("- Tool calls:       {}", status(&report.tools));
    println!("- Schema output:    {}", status(&report.schema));
    println!("- Combined:         {}", status(&report.combined));
}

fn print_summary(aggregator: &ResultAggregator) {
    println!("\n{}", "=== SUMMARY ===".bold());
    println!("{:<20} | Basic | Tools | Schema | Combined", "Model");
    println!("{}-|-------|-------|--------|---------", "-".repeat(20));
    for report in aggregator.reports() {
        println!(
            "{:<20} | {}  | {}  | {}   | {}",
            report.model,
            status(&report.basic),
            status(&report.tools),
            status(&report.schema),
            status(&report.combined),
        );
    }
    println!(
        "\n{}/{} model(s) passed every probe",
        aggregator.fully_passing(),
        aggregator.len()
    );

    for report in aggregator.reports() {
        let errors = report.errors();
        if !errors.is_empty() {
            println!("\n{}", format!("Errors for {}:", report.model).red());
            for error in &errors {
                println!(" - {error}");
            }
        }
    }
}
