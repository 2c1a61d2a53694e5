use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use proctable::app::App;
use proctable::config::{self, load_config, load_config_from_path};
use proctable::event::{Event, EventHandler};
use proctable::format::{format_bytes, format_percent};
use proctable::model::store::SnapshotStore;
use proctable::model::table::{CellValue, Column};
use proctable::model::users::{SystemUsers, UserCache};
use proctable::system::sampler::{ProcSampler, TickCapacity};
use proctable::ui;
use serde_json::json;

#[derive(Parser)]
#[command(
    name = "proctable",
    about = "TUI process monitor with a live process table and CPU graph"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Theme: dark, light
    #[arg(long)]
    theme: Option<String>,

    /// Sample twice, print the table to stdout, and exit (no TUI).
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once: emit JSON instead of a text table.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write JSON tracing spans to this file (requires the
    /// `perf-tracing` feature).
    #[arg(long)]
    trace_output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    #[cfg(feature = "perf-tracing")]
    if let Some(path) = &cli.trace_output {
        proctable::perf::init_tracing_json(path)?;
    }
    #[cfg(not(feature = "perf-tracing"))]
    if cli.trace_output.is_some() {
        return Err(color_eyre::eyre::eyre!(
            "--trace-output requires the `perf-tracing` feature; build with `--features perf-tracing`"
        ));
    }

    let config = load_config_for_cli(&cli);

    if cli.once {
        return run_once(&config, cli.json);
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms.max(50));
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Tick => app.refresh_data(),
                Event::Resize => {}
            }
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }

    config
}

/// Headless mode: two refreshes one interval apart so CPU deltas are
/// real, then one pass over the table contract.
fn run_once(config: &config::Config, as_json: bool) -> Result<()> {
    let users = UserCache::new(Box::new(SystemUsers::new()));
    let mut store = SnapshotStore::new(
        users,
        TickCapacity::detect(),
        config.general.clamp_aggregate,
    );
    let mut sampler = ProcSampler::new();

    store.refresh(&mut sampler)?;
    std::thread::sleep(Duration::from_millis(config.general.refresh_rate_ms.max(50)));
    store.refresh(&mut sampler)?;

    if as_json {
        print_json(&store)?;
    } else {
        print_text(&store);
    }
    Ok(())
}

fn print_json(store: &SnapshotStore) -> Result<()> {
    let rows: Vec<serde_json::Value> = (0..store.row_count())
        .map(|row| {
            let mut object = serde_json::Map::new();
            for (index, column) in Column::ALL.iter().enumerate() {
                if let Ok(value) = store.cell(row, index) {
                    object.insert(column.key().to_string(), cell_json(value));
                }
            }
            serde_json::Value::Object(object)
        })
        .collect();

    let doc = json!({
        "aggregate_cpu": store.aggregate_cpu(),
        "processes": rows,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn cell_json(value: CellValue) -> serde_json::Value {
    match value {
        CellValue::Icon(bucket) => json!(bucket.label()),
        CellValue::Text(text) => json!(text),
        CellValue::Number(n) => json!(n),
        CellValue::Signed(n) => json!(n),
        CellValue::Bytes(bytes) => json!(bytes),
        CellValue::Percent(pct) => json!(pct),
    }
}

fn print_text(store: &SnapshotStore) {
    let widths: Vec<usize> = Column::ALL
        .iter()
        .map(|column| column.meta().width as usize)
        .collect();

    let header: Vec<String> = Column::ALL
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{:<width$}", column.meta().name))
        .collect();
    println!("{}", header.join(" "));

    for row in 0..store.row_count() {
        let mut cells = Vec::with_capacity(store.column_count());
        for (index, &width) in widths.iter().enumerate() {
            let text = match store.cell(row, index) {
                Ok(value) => cell_text(value),
                Err(_) => "-".to_string(),
            };
            cells.push(format!("{text:<width$}"));
        }
        println!("{}", cells.join(" "));
    }
    println!("aggregate CPU: {}%", format_percent(store.aggregate_cpu()));
}

fn cell_text(value: CellValue) -> String {
    match value {
        CellValue::Icon(bucket) => bucket.label().to_string(),
        CellValue::Text(text) => text,
        CellValue::Number(n) => n.to_string(),
        CellValue::Signed(n) => n.to_string(),
        CellValue::Bytes(bytes) => format_bytes(bytes),
        CellValue::Percent(pct) => format_percent(pct),
    }
}
