use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::PathBuf;

/// A CLI tool to generate messy workflow documents for exercising flowmend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to write the generated workflows into
    #[arg(short, long, default_value = "workflows")]
    output: PathBuf,

    /// Number of workflow files to generate
    #[arg(short, long, default_value_t = 20)]
    count: usize,

    /// The minimum number of nodes per workflow
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// The maximum number of nodes per workflow
    #[arg(long, default_value_t = 12)]
    max: usize,
}

const CATEGORIES: [&str; 3] = ["marketing", "devops", "sales"];
const TRIGGER_TYPES: [&str; 3] = [
    "n8n-nodes-base.webhook",
    "n8n-nodes-base.scheduleTrigger",
    "n8n-nodes-base.manualTrigger",
];
const ACTION_TYPES: [&str; 5] = [
    "n8n-nodes-base.httpRequest",
    "n8n-nodes-base.set",
    "n8n-nodes-base.if",
    "n8n-nodes-base.code",
    "n8n-nodes-base.slack",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating {} workflow(s) with {} to {} nodes each...",
        cli.count, cli.min, cli.max
    );

    for i in 0..cli.count {
        let category = CATEGORIES[i % CATEGORIES.len()];
        let dir = cli.output.join(category);
        fs::create_dir_all(&dir)?;

        let node_count = rng.random_range(cli.min..=cli.max);
        let workflow = generate_workflow(&mut rng, i, node_count);
        let path = dir.join(format!("workflow_{:04}.json", i));
        fs::write(&path, serde_json::to_string_pretty(&workflow)?)?;
    }

    println!(
        "Successfully generated {} workflow(s) in '{}'",
        cli.count,
        cli.output.display()
    );
    Ok(())
}

/// Builds one workflow whose nodes all sit on top of each other and whose connections
/// mix every quirk the repair pass handles.
fn generate_workflow(rng: &mut ThreadRng, seq: usize, node_count: usize) -> Value {
    let nodes: Vec<Value> = (0..node_count)
        .map(|n| {
            let node_type = if n == 0 {
                *TRIGGER_TYPES.choose(rng).unwrap_or(&TRIGGER_TYPES[0])
            } else {
                *ACTION_TYPES.choose(rng).unwrap_or(&ACTION_TYPES[0])
            };
            json!({
                "parameters": {},
                "id": format!("{}-{}", seq, n),
                "name": format!("Step {}", n),
                "type": node_type,
                "typeVersion": 1,
                "position": [250, 300]
            })
        })
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for n in 1..node_count {
        children[rng.random_range(0..n)].push(n);
    }

    let mut connections = Map::new();
    for (parent, targets) in children.iter().enumerate() {
        let port = match targets.as_slice() {
            [] => continue,
            [only] => {
                let target = endpoint(rng, seq, *only);
                port_value(rng, target)
            }
            many => {
                let wires: Vec<Value> = many
                    .iter()
                    .map(|&n| json!({ "node": endpoint(rng, seq, n), "type": "main", "index": 0 }))
                    .collect();
                json!([wires])
            }
        };
        connections.insert(endpoint(rng, seq, parent), json!({ "main": port }));
    }
    if node_count > 1 && rng.random_bool(0.3) {
        connections.insert(
            format!("{}-ghost", seq),
            json!({ "main": [[{"node": "Step 0", "type": "main", "index": 0}]] }),
        );
    }

    json!({
        "name": format!("Generated workflow {}", seq),
        "nodes": nodes,
        "connections": connections,
        "active": false,
        "settings": {}
    })
}

/// References a node by id or by name at random.
fn endpoint(rng: &mut ThreadRng, seq: usize, n: usize) -> String {
    if rng.random_bool(0.5) {
        format!("{}-{}", seq, n)
    } else {
        format!("Step {}", n)
    }
}

/// Wraps a single wire in one of the accepted raw shapes, sometimes duplicated or dangling.
fn port_value(rng: &mut ThreadRng, target: String) -> Value {
    let wire = json!({ "node": target, "type": "main", "index": 0 });
    match rng.random_range(0..5) {
        0 => wire,
        1 => json!([wire]),
        2 => json!([[wire.clone(), wire]]),
        3 => json!([[wire, {"node": "missing-node", "type": "main", "index": 0}]]),
        _ => json!([[wire]]),
    }
}
