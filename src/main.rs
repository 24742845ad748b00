//! Finance Platform CLI
//!
//! Serves the projection API or runs a single projection from a JSON file

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use finance_platform::{
    analyze_financial_health, api, project_cash_flow, project_income, CashFlowAssumptions,
    FinancialHealthReport, IncomeAssumptions, ScenarioRunner,
};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use warp::Filter;

#[derive(Parser)]
#[command(name = "finance_platform", version, about = "Multi-year financial projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the projection API over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(long, env = "PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Project the income statement from income assumptions
    Income(RunArgs),
    /// Project cash flows from cash flow assumptions
    CashFlow(RunArgs),
    /// Analyse financial health from cash flow assumptions
    Health(RunArgs),
    /// Run a revenue growth sensitivity over cash flow assumptions
    Sweep {
        #[arg(long)]
        input: PathBuf,

        /// Comma separated growth rates, e.g. 0,0.05,0.1
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        growth_rates: Vec<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// JSON file with the assumptions
    #[arg(long)]
    input: PathBuf,

    /// Also write the per-year rows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => serve(SocketAddr::new(host, port)).await,
        Command::Income(args) => run_income(&args),
        Command::CashFlow(args) => run_cash_flow(&args),
        Command::Health(args) => run_health(&args),
        Command::Sweep { input, growth_rates, json } => run_sweep(&input, &growth_rates, json),
    }
}

async fn serve(addr: SocketAddr) -> Result<()> {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let api = api::routes().with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid assumptions in {}", path.display()))
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("\nFull results written to: {}", path.display());
    Ok(())
}

fn run_income(args: &RunArgs) -> Result<()> {
    let assumptions: IncomeAssumptions = read_json(&args.input)?;
    let projection = project_income(&assumptions)?;

    println!("Income Projection ({} years):", projection.projections.len());
    println!("{:>4} {:>14} {:>14} {:>14} {:>12} {:>14} {:>12} {:>14} {:>8}",
        "Year", "Revenue", "COGS", "GrossProfit", "Opex", "EBIT", "Tax", "NetIncome", "Margin");
    println!("{}", "-".repeat(116));
    for row in &projection.projections {
        println!("{:>4} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>14.2} {:>12.2} {:>14.2} {:>8.4}",
            row.year,
            row.revenue,
            row.cogs,
            row.gross_profit,
            row.operating_expenses,
            row.ebit,
            row.tax,
            row.net_income,
            row.net_margin,
        );
    }
    println!("\n{}", projection.summary);

    if let Some(path) = &args.csv {
        write_csv(path, &projection.projections)?;
    }
    Ok(())
}

fn run_cash_flow(args: &RunArgs) -> Result<()> {
    let assumptions: CashFlowAssumptions = read_json(&args.input)?;
    let projection = project_cash_flow(&assumptions)?;

    println!("Cash Flow Projection ({} years):", projection.years.len());
    println!("{:>4} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Year", "BeginCash", "Operations", "Investing", "Financing", "EndCash", "FCF");
    println!("{}", "-".repeat(94));
    for row in &projection.years {
        println!("{:>4} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            row.year,
            row.beginning_cash,
            row.cash_from_operations,
            row.cash_from_investing,
            row.cash_from_financing,
            row.ending_cash,
            row.free_cash_flow,
        );
    }
    if projection.has_cash_shortfall() {
        warn!("Cash balance goes negative during the projection");
    }
    println!("\n{}", projection.summary);

    if let Some(path) = &args.csv {
        write_csv(path, &projection.years)?;
    }
    Ok(())
}

fn ratio_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "n/a".to_string())
}

fn print_health(report: &FinancialHealthReport) {
    println!("{:>4} {:>14} {:>14} {:>14} {:>14} {:>8} {:>8} {:>8} {:>8}",
        "Year", "Revenue", "NetIncome", "FCF", "OCF", "EBIT%", "Net%", "FCF/Rev", "OCF/NI");
    println!("{}", "-".repeat(100));
    for row in &report.indicators {
        println!("{:>4} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>8} {:>8} {:>8} {:>8}",
            row.year,
            row.revenue,
            row.net_income,
            row.free_cash_flow,
            row.operating_cash_flow,
            ratio_cell(row.ebit_margin),
            ratio_cell(row.net_margin),
            ratio_cell(row.fcf_to_revenue),
            ratio_cell(row.ocf_to_net_income),
        );
    }

    println!("\n{}", report.summary);
    println!("\nRecommendations:");
    for rec in &report.recommendations {
        println!("  - {}", rec);
    }
}

fn run_health(args: &RunArgs) -> Result<()> {
    let assumptions: CashFlowAssumptions = read_json(&args.input)?;
    let report = analyze_financial_health(&assumptions)?;

    println!("Financial Health ({} years, risk: {}):", report.indicators.len(), report.risk_level);
    print_health(&report);

    if let Some(path) = &args.csv {
        write_csv(path, &report.indicators)?;
    }
    Ok(())
}

fn run_sweep(input: &Path, growth_rates: &[f64], json: bool) -> Result<()> {
    let assumptions: CashFlowAssumptions = read_json(input)?;
    let runner = ScenarioRunner::new(assumptions);
    let outcomes = runner.growth_sensitivity(growth_rates);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    println!("Growth Sensitivity ({} scenarios):", outcomes.len());
    println!("{:>10} {:>8} {:>12} {:>12}", "Growth", "Risk", "AvgNet%", "AvgFCF%");
    println!("{}", "-".repeat(45));
    for outcome in &outcomes {
        match (outcome.risk_level, outcome.average_net_margin, outcome.average_fcf_to_revenue) {
            (Some(risk), Some(net), Some(fcf)) => println!("{:>10.4} {:>8} {:>12.2} {:>12.2}",
                outcome.parameter_value,
                risk.as_str(),
                net * 100.0,
                fcf * 100.0,
            ),
            _ => println!("{:>10.4} {}",
                outcome.parameter_value,
                outcome.error.as_deref().unwrap_or("no result"),
            ),
        }
    }
    Ok(())
}
