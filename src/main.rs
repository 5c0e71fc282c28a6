use clap::Parser;
use cut_planner::plan::{CutPlan, PieceRequest, compute_cut_plan};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "cut_planner",
    about = "Guillotine cut planner for a single sheet of panel material"
)]
struct Cli {
    /// Sheet dimensions (WxH, e.g. 275x185)
    #[arg(long, default_value = "275x185")]
    sheet: String,

    /// Pieces as WxH:qty or WxH:qty:label (e.g. 80x50:2 60x60:3:Shelf)
    #[arg(long = "pieces", num_args = 1..)]
    pieces: Vec<String>,

    /// Print the full plan as JSON
    #[arg(long)]
    json: bool,

    /// Log every packing attempt to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    }
    let width = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let height = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    Ok((width, height))
}

fn parse_piece(s: &str) -> Result<PieceRequest, String> {
    let mut parts = s.splitn(3, ':');
    let dims = parts.next().unwrap_or_default();
    let qty = parts
        .next()
        .ok_or_else(|| format!("invalid piece '{}', expected WxH:qty[:label]", s))?;
    let (width, height) = parse_dimensions(dims)?;
    let quantity = qty
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    let label = parts.next().map(str::to_string);
    Ok(PieceRequest {
        width,
        height,
        quantity,
        label,
    })
}

fn print_plan(plan: &CutPlan) {
    let label_of = |piece_id: usize| {
        plan.pieces
            .iter()
            .find(|s| s.piece_id == piece_id)
            .map(|s| s.label.clone())
            .unwrap_or_default()
    };

    println!("Sheet {}:", plan.sheet);
    for p in &plan.placed {
        let rot = if p.rotated { " [rotated]" } else { "" };
        println!(
            "  {} #{} {} @ ({}, {}){}",
            label_of(p.piece_id),
            p.index + 1,
            p.rect,
            p.x,
            p.y,
            rot
        );
    }

    if !plan.overflow.is_empty() {
        println!();
        println!("Did not fit:");
        for o in &plan.overflow {
            println!("  {} #{} {}", label_of(o.piece_id), o.index + 1, o.rect);
        }
    }

    println!();
    println!("Cuts:");
    for c in &plan.cut_lines {
        let axis = if c.is_horizontal() { "H" } else { "V" };
        println!("  {} ({}, {}) -> ({}, {})", axis, c.x1, c.y1, c.x2, c.y2);
    }

    let m = &plan.metrics;
    println!();
    println!(
        "Summary: {}/{} pieces placed, {:.1}% used, {:.1}% waste{}",
        m.placed_count,
        m.total_pieces,
        m.utilization_percent,
        m.waste_percent,
        if m.fits { "" } else { " (some pieces did not fit)" },
    );
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let (sheet_width, sheet_height) = parse_dimensions(&cli.sheet).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let requests: Vec<PieceRequest> = cli
        .pieces
        .iter()
        .map(|p| parse_piece(p))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let plan = compute_cut_plan(&requests, sheet_width, sheet_height).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_plan(&plan);
    }
}
