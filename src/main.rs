mod app;
mod card;
mod catalog;
mod config;
mod dom;
mod format;
mod grid;
mod modal;
mod page;
mod theme;
mod ui;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use catalog::{Catalog, GenreMap, Item};
use config::AppConfig;
use grid::{filter_by_genre, ALL_GENRES};

#[derive(Parser, Debug)]
#[command(name = "podshelf")]
#[command(version = "0.1.0")]
#[command(about = "A terminal catalog browser for podcasts and genres")]
struct Args {
    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Initial genre filter: "all" or a genre id
    #[arg(short, long)]
    genre: Option<String>,

    /// Print the podcast cards instead of starting the browser
    #[arg(short, long)]
    list: bool,

    /// With --list, print the filtered podcasts as JSON
    #[arg(long, requires = "list")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    let data_path = args.data.clone().or_else(|| config.data_path.clone());
    let catalog = load_catalog(data_path).await?;

    let genre = args
        .genre
        .clone()
        .or_else(|| config.default_genre.clone())
        .unwrap_or_else(|| ALL_GENRES.to_string());

    if args.list {
        return print_list(&catalog, &genre, args.json);
    }

    run_tui(App::new(catalog, &config, &genre)).await
}

async fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(&path)
            .await
            .with_context(|| format!("Could not load catalog from {}", path.display())),
        None => Catalog::builtin().context("Bundled catalog is invalid"),
    }
}

/// Print the filtered podcast cards, one block per card
fn print_list(catalog: &Catalog, genre: &str, json: bool) -> Result<()> {
    let podcasts = filter_by_genre(&catalog.podcasts, genre);

    if json {
        println!("{}", serde_json::to_string_pretty(&podcasts)?);
        return Ok(());
    }

    let genre_map = GenreMap::from_genres(&catalog.genres);
    let mut page = page::Page::new();
    let items: Vec<Item<'_>> = podcasts.into_iter().map(Item::Podcast).collect();
    page.grid.render_items(&items, &genre_map, Utc::now());

    let cards = page.grid.cards();
    if cards.is_empty() {
        println!("{}", page.grid.container().text_content());
        return Ok(());
    }

    for card in cards {
        let line = |class: &str| card.find_by_class(class).map(|e| e.text_content());
        let title = card.find_by_tag("h3").map(|e| e.text_content()).unwrap_or_default();
        let tags: Vec<String> = card.find_all_by_class("tag").iter().map(|t| t.text_content()).collect();

        println!("{}", title);
        if let Some(meta) = line("meta") {
            println!("  {}", meta);
        }
        if !tags.is_empty() {
            println!("  {}", tags.join(", "));
        }
        if let Some(updated) = line("updated") {
            println!("  {}", updated);
        }
    }
    Ok(())
}

async fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.is_idle() => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => app.handle_key(key),
                },
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        app.tick();
    }
}
