use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use avl_dealer::{AvlTree, Dealership, DealershipConfig, Direction, ModelRef};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "avl-dealer", about = "Dealership records indexed by parent-linked AVL trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a dealership command script.
    Run {
        /// Script file, one command per line (`add`, `remove`, `sell`,
        /// `complain`, `best`, `worst`).
        script: PathBuf,
        /// Score added per sale.
        #[arg(long, default_value_t = 10)]
        sale_points: i64,
        /// Complaint penalty numerator (penalty = base / months).
        #[arg(long, default_value_t = 100)]
        complaint_base: i64,
    },
    /// Build an integer tree and show its extremes via bounded traversal.
    Demo {
        /// Number of elements.
        #[arg(long, default_value_t = 1000)]
        size: u32,
        /// Elements to take from each end.
        #[arg(long, default_value_t = 5)]
        k: usize,
    },
}

/// One parsed script line
#[derive(Debug, PartialEq, Eq)]
enum Op {
    Add { type_id: u32, models: u32 },
    Remove { type_id: u32 },
    Sell { type_id: u32, model_id: u32 },
    Complain { type_id: u32, model_id: u32, months: u32 },
    Best { type_id: u32 },
    Worst { k: usize },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            sale_points,
            complaint_base,
        } => run_script(script, DealershipConfig::new(sale_points, complaint_base))?,
        Commands::Demo { size, k } => run_demo(size, k)?,
    }

    Ok(())
}

fn run_script(script_path: PathBuf, config: DealershipConfig) -> Result<()> {
    let reader = BufReader::new(File::open(&script_path).with_context(|| {
        format!("failed to open script {}", script_path.display())
    })?);
    let mut dealership = Dealership::with_config(config);

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let op = match parse_line(&line) {
            Ok(Some(op)) => op,
            Ok(None) => continue,
            Err(err) => {
                println!("line {}\terror: {:#}", idx + 1, err);
                continue;
            }
        };

        if let Err(err) = execute(&mut dealership, &op) {
            println!("line {}\terror: {}", idx + 1, err);
        }
    }

    Ok(())
}

fn execute(dealership: &mut Dealership, op: &Op) -> Result<()> {
    match *op {
        Op::Add { type_id, models } => dealership.add_car_type(type_id, models)?,
        Op::Remove { type_id } => dealership.remove_car_type(type_id)?,
        Op::Sell { type_id, model_id } => dealership.sell_car(type_id, model_id)?,
        Op::Complain {
            type_id,
            model_id,
            months,
        } => dealership.make_complaint(type_id, model_id, months)?,
        Op::Best { type_id } => {
            let best = dealership.best_seller(type_id)?;
            println!("best\t{}", format_ref(&best));
        }
        Op::Worst { k } => {
            let worst = dealership.worst_models(k)?;
            for (rank, model) in worst.iter().enumerate() {
                let score = dealership.model(model.type_id, model.model_id)?.score;
                println!("worst {}\t{}\tscore={}", rank + 1, format_ref(model), score);
            }
            if worst.len() < k {
                println!("worst\tonly {} of {} requested models exist", worst.len(), k);
            }
        }
    }
    Ok(())
}

fn parse_line(line: &str) -> Result<Option<Op>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let command = fields.next().unwrap_or_default();
    let args: Vec<&str> = fields.collect();
    let arg = |i: usize, name: &str| -> Result<u32> {
        let raw = args
            .get(i)
            .ok_or_else(|| anyhow::anyhow!("missing {} for '{}'", name, command))?;
        raw.parse()
            .with_context(|| format!("invalid {} '{}'", name, raw))
    };

    let expected = match command {
        "add" | "sell" => 2,
        "complain" => 3,
        "remove" | "best" | "worst" => 1,
        other => bail!("unknown command '{}'", other),
    };
    if args.len() != expected {
        bail!("'{}' takes {} arguments, got {}", command, expected, args.len());
    }

    let op = match command {
        "add" => Op::Add {
            type_id: arg(0, "type id")?,
            models: arg(1, "model count")?,
        },
        "remove" => Op::Remove {
            type_id: arg(0, "type id")?,
        },
        "sell" => Op::Sell {
            type_id: arg(0, "type id")?,
            model_id: arg(1, "model id")?,
        },
        "complain" => Op::Complain {
            type_id: arg(0, "type id")?,
            model_id: arg(1, "model id")?,
            months: arg(2, "months")?,
        },
        "best" => Op::Best {
            type_id: arg(0, "type id")?,
        },
        _ => Op::Worst {
            k: arg(0, "count")? as usize,
        },
    };
    Ok(Some(op))
}

fn run_demo(size: u32, k: usize) -> Result<()> {
    let tree: AvlTree<u32> = AvlTree::from_sorted_default((0..size).collect())
        .context("failed to build demo tree")?;
    tree.validate().context("demo tree failed validation")?;

    println!("size={}\theight={}", tree.len(), tree.height());
    print_values("smallest", &tree.bounded_traversal(Direction::Ascending, k));
    print_values("largest", &tree.bounded_traversal(Direction::Descending, k));
    Ok(())
}

fn print_values(label: &str, values: &[&u32]) {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    println!("{}\t[{}]", label, rendered.join(", "));
}

fn format_ref(model: &ModelRef) -> String {
    format!("type={}\tmodel={}", model.type_id, model.model_id)
}
