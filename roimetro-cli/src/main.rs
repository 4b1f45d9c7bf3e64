use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use roimetro_form::{Field, FormOperation, FormRequest, FormSession, FormSnapshot, FormState};
use roimetro_metrics::format::{format_brl, format_multiple};
use roimetro_metrics::inputs::CampaignInputs;
use roimetro_metrics::interpret::{interpretation_lines, verdict, CampaignVerdict};
use roimetro_metrics::metrics::{derive_metrics, DerivedMetrics};
use roimetro_metrics::scenario::{load_scenarios_file, ScenarioRecord};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CalcJson {
    generated_at: String,
    inputs: CampaignInputs,
    metrics: DerivedMetrics,
    verdict: String,
    interpretation: Vec<String>,
}

#[derive(Serialize)]
struct DigestJson {
    generated_at: String,
    load_ms: u128,
    compute_ms: u128,
    campaigns: Vec<CampaignJson>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct CampaignJson {
    campaign: String,
    roas_mode: bool,
    total_revenue: f64,
    gross_profit: f64,
    roi: f64,
    cpa: f64,
    roas: f64,
    verdict: String,
}

#[derive(Serialize)]
struct SummaryJson {
    campaigns_evaluated: usize,
    campaigns_shown: usize,
    campaigns_profitable: usize,
    total_ad_spend: f64,
    total_revenue: f64,
    total_gross_profit: f64,
    blended_roas: f64,
}

// ---------------------------------------------------------------------------
// Batch digest
// ---------------------------------------------------------------------------

struct Evaluated {
    record: ScenarioRecord,
    metrics: DerivedMetrics,
}

fn evaluate_all(records: &[ScenarioRecord]) -> Vec<Evaluated> {
    records
        .iter()
        .map(|r| Evaluated {
            record: r.clone(),
            metrics: derive_metrics(&r.to_inputs()),
        })
        .collect()
}

/// Sort campaigns by gross profit in descending order.
///
/// NaN profits are pushed to the end of the list so they never appear
/// as top campaigns.
fn rank(mut rows: Vec<Evaluated>) -> Vec<Evaluated> {
    rows.sort_by(|a, b| {
        let pa = a.metrics.gross_profit;
        let pb = b.metrics.gross_profit;
        match (pa.is_nan(), pb.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal),
        }
    });
    rows
}

fn summarize(all: &[Evaluated], shown: usize) -> SummaryJson {
    let total_ad_spend: f64 = all
        .iter()
        .map(|e| e.record.ad_spend.unwrap_or(0.0))
        .sum();
    let total_revenue: f64 = all.iter().map(|e| e.metrics.total_revenue).sum();
    let total_gross_profit: f64 = all.iter().map(|e| e.metrics.gross_profit).sum();
    let total_spend: f64 = all.iter().map(|e| e.record.to_inputs().total_spend()).sum();
    let campaigns_profitable = all
        .iter()
        .filter(|e| e.metrics.gross_profit > 0.0)
        .count();

    SummaryJson {
        campaigns_evaluated: all.len(),
        campaigns_shown: shown,
        campaigns_profitable,
        total_ad_spend,
        total_revenue,
        total_gross_profit,
        blended_roas: if total_spend > 0.0 {
            total_revenue / total_spend
        } else {
            0.0
        },
    }
}

fn build_digest_json(
    top: &[Evaluated],
    summary: SummaryJson,
    load_ms: u128,
    compute_ms: u128,
) -> DigestJson {
    DigestJson {
        generated_at: Utc::now().to_rfc3339(),
        load_ms,
        compute_ms,
        campaigns: top
            .iter()
            .map(|e| CampaignJson {
                campaign: e.record.campaign.clone(),
                roas_mode: e.record.roas_mode,
                total_revenue: e.metrics.total_revenue,
                gross_profit: e.metrics.gross_profit,
                roi: e.metrics.roi,
                cpa: e.metrics.cpa,
                roas: e.metrics.roas,
                verdict: verdict(&e.metrics).to_string(),
            })
            .collect(),
        summary,
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_digest_header() {
    let bar = "\u{2550}".repeat(60);
    println!();
    println!("  \u{2554}{}\u{2557}", bar);
    println!("  \u{2551}{:^60}\u{2551}", "ROIMETRO \u{2014} Campaign Performance Digest");
    println!("  \u{255a}{}\u{255d}", bar);
    println!();
}

fn print_digest(top: &[Evaluated], summary: &SummaryJson, load_ms: u128, compute_ms: u128) {
    print_digest_header();

    println!(
        "  {} campaigns evaluated  \u{00b7}  {} profitable  \u{00b7}  {} total revenue",
        summary.campaigns_evaluated,
        summary.campaigns_profitable,
        format_brl(summary.total_revenue),
    );
    println!(
        "  Top {} shown  \u{00b7}  {} total gross profit  \u{00b7}  blended ROAS {}",
        summary.campaigns_shown,
        format_brl(summary.total_gross_profit),
        format_multiple(summary.blended_roas),
    );
    println!();

    if top.is_empty() {
        println!("  No campaigns to show.");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, e) in top.iter().enumerate() {
            let v = verdict(&e.metrics);
            // Flag the campaigns that are losing money.
            let marker = if v == CampaignVerdict::Losing { "!!" } else { "  " };
            println!(
                "  {} {}. {:18} {:>14}  ROI {:>7}  {}",
                marker,
                i + 1,
                e.record.campaign,
                format_brl(e.metrics.gross_profit),
                format_multiple(e.metrics.roi),
                v,
            );
            let mode_note = if e.record.roas_mode {
                format!("ROAS {}", format_multiple(e.metrics.roas))
            } else {
                "plain mode".into()
            };
            println!(
                "       revenue {}  \u{00b7}  CPA {}  \u{00b7}  {}",
                format_brl(e.metrics.total_revenue),
                format_brl(e.metrics.cpa),
                mode_note,
            );
            println!();
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Metrics computed in {}ms \u{00b7} Total {}ms",
        load_ms,
        compute_ms,
        load_ms + compute_ms
    );
    println!();
}

fn print_panel(snapshot: &FormSnapshot) {
    println!();
    println!("{}", snapshot.to_panel());
    println!();
    println!("Verdict: {}", verdict(&snapshot.metrics));
    println!();
    println!("Interpretation:");
    for line in interpretation_lines(&snapshot.inputs, &snapshot.metrics) {
        println!("  {}", line);
    }
    println!();
}

// ---------------------------------------------------------------------------
// One-shot mode
// ---------------------------------------------------------------------------

struct OneShotArgs {
    spend: Option<f64>,
    price: Option<f64>,
    sales: Option<u64>,
    cogs: Option<f64>,
    roas_mode: bool,
}

fn run_one_shot(flags: OneShotArgs, json_output: bool) {
    let mut ops: Vec<FormOperation> = Vec::new();
    if let Some(amount) = flags.spend {
        ops.push(FormOperation::SetAdSpend { amount });
    }
    if let Some(amount) = flags.price {
        ops.push(FormOperation::SetProductPrice { amount });
    }
    if let Some(count) = flags.sales {
        ops.push(FormOperation::SetSalesCount { count });
    }
    if let Some(amount) = flags.cogs {
        ops.push(FormOperation::SetUnitCogs { amount });
    }
    if flags.roas_mode {
        ops.push(FormOperation::SetRoasMode { enabled: true });
    }

    let mut state = FormState::new();
    for op in &ops {
        if let Err(e) = state.apply(op) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    let snapshot = state.snapshot();
    if json_output {
        let payload = CalcJson {
            generated_at: Utc::now().to_rfc3339(),
            verdict: verdict(&snapshot.metrics).to_string(),
            interpretation: interpretation_lines(&snapshot.inputs, &snapshot.metrics),
            inputs: snapshot.inputs,
            metrics: snapshot.metrics,
        };
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_panel(&snapshot);
    }
}

// ---------------------------------------------------------------------------
// Batch mode
// ---------------------------------------------------------------------------

fn run_batch(csv_path: &str, top_k: usize, json_output: bool) {
    let load_start = Instant::now();
    let records = match load_scenarios_file(csv_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();
    log::info!("loaded {} scenarios from {}", records.len(), csv_path);

    let compute_start = Instant::now();
    let ranked = rank(evaluate_all(&records));
    let compute_ms = compute_start.elapsed().as_millis();

    let shown = top_k.min(ranked.len());
    let summary = summarize(&ranked, shown);
    let top = &ranked[..shown];

    if json_output {
        let digest = build_digest_json(top, summary, load_ms, compute_ms);
        match serde_json::to_string_pretty(&digest) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing digest: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_digest(top, &summary, load_ms, compute_ms);
    }
}

// ---------------------------------------------------------------------------
// Interactive mode
// ---------------------------------------------------------------------------

enum Command {
    Apply(FormOperation),
    Json,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();

    let amount_arg = |name: &str| -> Result<f64, String> {
        rest.first()
            .ok_or_else(|| format!("'{}' needs an amount", name))?
            .parse::<f64>()
            .map_err(|_| format!("'{}' needs a number, got '{}'", name, rest[0]))
    };

    match head {
        "spend" => Ok(Command::Apply(FormOperation::SetAdSpend {
            amount: amount_arg("spend")?,
        })),
        "price" => Ok(Command::Apply(FormOperation::SetProductPrice {
            amount: amount_arg("price")?,
        })),
        "sales" => {
            let count = rest
                .first()
                .ok_or_else(|| "'sales' needs a count".to_string())?
                .parse::<u64>()
                .map_err(|_| format!("'sales' needs a whole number, got '{}'", rest[0]))?;
            Ok(Command::Apply(FormOperation::SetSalesCount { count }))
        }
        "cogs" => Ok(Command::Apply(FormOperation::SetUnitCogs {
            amount: amount_arg("cogs")?,
        })),
        "roas" => match rest.first() {
            Some(&"on") => Ok(Command::Apply(FormOperation::SetRoasMode { enabled: true })),
            Some(&"off") => Ok(Command::Apply(FormOperation::SetRoasMode { enabled: false })),
            _ => Err("usage: roas on|off".into()),
        },
        "clear" => {
            let field = match rest.first() {
                Some(&"spend") => Field::AdSpend,
                Some(&"price") => Field::ProductPrice,
                Some(&"sales") => Field::SalesCount,
                Some(&"cogs") => Field::UnitCogs,
                _ => return Err("usage: clear spend|price|sales|cogs".into()),
            };
            Ok(Command::Apply(FormOperation::ClearField { field }))
        }
        "reset" => Ok(Command::Apply(FormOperation::Reset)),
        "show" => Ok(Command::Apply(FormOperation::Snapshot)),
        "json" => Ok(Command::Json),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

fn print_interactive_help() {
    println!("Commands:");
    println!("  spend <amount>      set total ad spend");
    println!("  price <amount>      set product price");
    println!("  sales <count>       set number of sales");
    println!("  cogs <amount>       set per-unit cost of goods");
    println!("  roas on|off         switch the profit formula");
    println!("  clear <field>       clear spend|price|sales|cogs");
    println!("  reset               clear everything");
    println!("  show                re-print the panel");
    println!("  json                print the snapshot as JSON");
    println!("  quit                leave");
}

fn run_interactive() {
    let mut session = FormSession::new();
    let mut edit_seq = 0u64;

    println!("ROIMETRO interactive calculator. Type 'help' for commands.");
    print_panel(&session.snapshot());

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => print_interactive_help(),
            Ok(Command::Json) => {
                match serde_json::to_string_pretty(&session.snapshot()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error serializing snapshot: {}", e),
                }
            }
            Ok(Command::Apply(op)) => {
                edit_seq += 1;
                log::debug!("{}", op.describe());
                let request = FormRequest {
                    operation: op,
                    request_id: format!("edit-{:03}", edit_seq),
                };
                match session.execute(request) {
                    Ok(response) => print_panel(&response.snapshot),
                    Err(e) => eprintln!("Rejected: {}", e),
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    let applied = session
        .edit_log
        .iter()
        .filter(|e| e.success && !e.was_read_only)
        .count();
    println!("{} edits applied across {} requests. Tchau!", applied, session.edit_log.len());
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: roimetro --spend N --price N --sales N [--cogs N] [--roas] [--json]");
    eprintln!("       roimetro --scenarios <campaigns.csv> [--top N] [--json]");
    eprintln!("       roimetro --interactive");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --spend        Total ad spend");
    eprintln!("  --price        Product price");
    eprintln!("  --sales        Number of sales closed");
    eprintln!("  --cogs         Cost of goods per unit (CMV)");
    eprintln!("  --roas         Subtract COGS from profit and report ROAS");
    eprintln!("  --scenarios    Evaluate a CSV of campaign scenarios");
    eprintln!("  --top          Number of campaigns in the digest (default: 5)");
    eprintln!("  --interactive  Edit the form from stdin, recomputing on each change");
    eprintln!("  --json         Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  roimetro --spend 500 --price 2000 --sales 3");
    eprintln!("  roimetro --spend 500 --price 2000 --sales 3 --cogs 100 --roas --json");
    eprintln!("  roimetro --scenarios fixtures/sample_campaigns.csv --top 3");
    process::exit(1);
}

fn parse_f64_flag(args: &[String], i: usize, name: &str) -> f64 {
    if i + 1 >= args.len() {
        eprintln!("Error: {} requires a number", name);
        process::exit(1);
    }
    args[i + 1].parse().unwrap_or_else(|_| {
        eprintln!("Error: {} requires a number, got '{}'", name, args[i + 1]);
        process::exit(1);
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let mut flags = OneShotArgs {
        spend: None,
        price: None,
        sales: None,
        cogs: None,
        roas_mode: false,
    };
    let mut scenarios_path: Option<String> = None;
    let mut interactive = false;
    let mut top_k: usize = 5;
    let mut json_output = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--spend" => {
                flags.spend = Some(parse_f64_flag(&args, i, "--spend"));
                i += 2;
            }
            "--price" => {
                flags.price = Some(parse_f64_flag(&args, i, "--price"));
                i += 2;
            }
            "--sales" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --sales requires a count");
                    process::exit(1);
                }
                flags.sales = Some(args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --sales requires a whole number, got '{}'", args[i + 1]);
                    process::exit(1);
                }));
                i += 2;
            }
            "--cogs" => {
                flags.cogs = Some(parse_f64_flag(&args, i, "--cogs"));
                i += 2;
            }
            "--roas" => {
                flags.roas_mode = true;
                i += 1;
            }
            "--scenarios" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --scenarios requires a CSV path");
                    process::exit(1);
                }
                scenarios_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--top" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
                top_k = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --top requires a positive integer");
                    process::exit(1);
                });
                i += 2;
            }
            "--interactive" => {
                interactive = true;
                i += 1;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    if interactive {
        run_interactive();
    } else if let Some(path) = scenarios_path {
        run_batch(&path, top_k, json_output);
    } else if flags.spend.is_some()
        || flags.price.is_some()
        || flags.sales.is_some()
        || flags.cogs.is_some()
    {
        run_one_shot(flags, json_output);
    } else {
        usage();
    }
}
