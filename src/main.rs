use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mtg_deck_analyzer::analysis::{analyze_board, DeckStatistics, ManaCurve};
use mtg_deck_analyzer::card::{mana_value, Color};
use mtg_deck_analyzer::config::{EngineConfig, HandConfig};
use mtg_deck_analyzer::deck::{BoardView, Deck};
use mtg_deck_analyzer::rng::GameRng;
use mtg_deck_analyzer::simulation::{simulate_opening_hands_with, HandSimulator, PoolCard};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mtg-deck-analyzer")]
#[command(about = "Deck statistics and sample hands for MTG deck snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine settings file (JSON)
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print deck statistics
    Stats {
        /// Deck snapshot file (JSON)
        #[arg(short, long, default_value = "deck.json")]
        deck: String,

        /// Board segment to analyze
        #[arg(short, long, value_enum, default_value_t = ViewArg::Main)]
        board: ViewArg,

        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Draw a sample hand, optionally taking mulligans
    Hand {
        /// Deck snapshot file (JSON)
        #[arg(short, long, default_value = "deck.json")]
        deck: String,

        /// Seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of mulligans to take before keeping
        #[arg(short, long, default_value = "0")]
        mulligans: u32,

        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Estimate opening hand land odds
    Odds {
        /// Deck snapshot file (JSON)
        #[arg(short, long, default_value = "deck.json")]
        deck: String,

        /// Number of hands to simulate
        #[arg(short, long, default_value = "10000")]
        num_hands: usize,

        /// Seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Main,
    Sideboard,
    Maybeboard,
    All,
}

impl From<ViewArg> for BoardView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Main => BoardView::Main,
            ViewArg::Sideboard => BoardView::Sideboard,
            ViewArg::Maybeboard => BoardView::Maybeboard,
            ViewArg::All => BoardView::All,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ Failed to load config '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Stats { deck, board, json } => {
            let deck_data = load_deck(&deck);
            print_stats(&deck, &analyze_board(&deck_data, board.into()), json);
        }
        Commands::Hand {
            deck,
            seed,
            mulligans,
            json,
        } => {
            let deck_data = load_deck(&deck);
            sample_hand(&deck_data, &config.hand, seed, mulligans, json);
        }
        Commands::Odds {
            deck,
            num_hands,
            seed,
            json,
        } => {
            let deck_data = load_deck(&deck);
            opening_odds(&deck, &deck_data, &config.hand, num_hands, seed, json);
        }
    }
}

fn load_deck(path: &str) -> Deck {
    match Deck::from_file(path) {
        Ok(deck) => {
            eprintln!("✓ Loaded {} ({} mainboard cards)", path, deck.len());
            deck
        }
        Err(e) => {
            eprintln!("✗ Failed to load deck '{}': {}", path, e);
            std::process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("✗ Failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }
}

fn bar(count: u32, total: u32) -> String {
    if total == 0 {
        return String::new();
    }
    let pct = count as f64 / total as f64 * 100.0;
    "█".repeat((pct / 2.0) as usize)
}

fn print_stats(deck_file: &str, stats: &DeckStatistics, json: bool) {
    if json {
        print_json(stats);
        return;
    }

    println!("\n=== Deck Statistics ===\n");
    println!("Deck: {} ({:?} view)", deck_file, stats.view);
    println!("Total cards: {}", stats.total_cards);
    if !stats.commanders.is_empty() {
        println!("Commander: {}", stats.commanders.join(", "));
    }
    println!(
        "Lands: {} ({:.1}%)",
        stats.land_count,
        stats.land_ratio * 100.0
    );
    println!(
        "Average / median spell mana value: {:.2} / {:.1}",
        stats.average_spell_cmc, stats.median_spell_cmc
    );
    println!("Multicolor spells: {:.1}%", stats.multicolor_ratio * 100.0);
    println!("Card advantage cards: {}", stats.card_advantage);

    println!("\nMana curve:");
    for (i, count) in stats.mana_curve.bins.iter().enumerate() {
        println!(
            "  {:>3}: {:3} {}",
            ManaCurve::label(i),
            count,
            bar(*count, stats.mana_curve.total())
        );
    }

    println!("\nTypes:");
    for (category, count) in &stats.type_distribution {
        println!("  {:14} {:3}", category.to_string(), count);
    }

    println!("\nColor identity (spells):");
    for (bucket, count) in &stats.spell_color_distribution {
        println!("  {:14} {:3}", bucket.to_string(), count);
    }

    println!("\nRarity:");
    for (rarity, count) in &stats.rarity_distribution {
        println!("  {:14} {:3}", format!("{:?}", rarity), count);
    }

    println!("\n{:8} {:>8} {:>8}", "Color", "Sources", "Pips");
    println!("{:-<26}", "");
    for color in Color::ALL {
        println!(
            "{:8} {:>8} {:>8}",
            color.to_char(),
            stats.mana_sources.color(color),
            stats.mana_symbols.color(color)
        );
    }
    println!(
        "{:8} {:>8} {:>8}",
        "C", stats.mana_sources.colorless, stats.mana_symbols.colorless
    );
    println!("{:8} {:>8} {:>8}", "Any", stats.mana_sources.any_color, "-");
    println!("{:8} {:>8} {:>8}", "Phyrexian", "-", stats.mana_symbols.phyrexian);
    println!("{:8} {:>8} {:>8}", "Generic", "-", stats.mana_symbols.generic);
}

/// Pick cards to bottom: spare lands when the hand is land-heavy, otherwise
/// the most expensive spells
fn choose_bottom(hand: &[PoolCard<'_>], count: usize) -> Vec<usize> {
    use mtg_deck_analyzer::card::{primary_type, TypeCategory};

    let is_land = |c: &PoolCard<'_>| primary_type(c.card) == TypeCategory::Land;
    let lands = hand.iter().filter(|c| is_land(*c)).count();

    let mut order: Vec<usize> = (0..hand.len()).collect();
    order.sort_by(|&a, &b| {
        let key = |i: usize| {
            let card = &hand[i];
            let land_first = if lands >= 3 { is_land(card) } else { !is_land(card) };
            (land_first, mana_value(card.card))
        };
        let (la, va) = key(a);
        let (lb, vb) = key(b);
        lb.cmp(&la).then(vb.total_cmp(&va))
    });
    order.truncate(count);
    order
}

fn sample_hand(deck: &Deck, config: &HandConfig, seed: Option<u64>, mulligans: u32, json: bool) {
    let rng = GameRng::new(seed);
    let used_seed = rng.seed();
    let mut sim = HandSimulator::with_rng(deck, *config, rng);

    if let Err(e) = sim.draw_opening() {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
    for _ in 0..mulligans {
        if let Err(e) = sim.mulligan() {
            eprintln!("! {}", e);
            break;
        }
    }

    let taken = sim.mulligan_count();
    if !json {
        println!("\n=== Sample Hand (seed: {}) ===\n", used_seed);
        println!("Mulligans: {}", taken);
        println!("Drawn ({} cards):", sim.hand().len());
        for card in sim.hand() {
            println!("  - {}", card.name());
        }
    }

    if taken > 0 {
        let picks = choose_bottom(sim.hand(), taken as usize);
        if !json {
            println!("Bottom:");
            for &i in &picks {
                println!("  - {}", sim.hand()[i].name());
            }
        }
        for i in picks {
            if let Err(e) = sim.toggle_bottom(i) {
                eprintln!("! {}", e);
            }
        }
        if let Err(e) = sim.confirm_bottom() {
            eprintln!("! {}", e);
        }
    }

    let state = sim.state();
    if json {
        print_json(&state);
        return;
    }

    println!("\nKept ({} cards):", state.cards.len());
    for card in &state.cards {
        println!("  - {}", card.name());
    }
    println!("\nNext draws:");
    for card in &state.next_draws {
        println!("  - {}", card.name());
    }
}

fn opening_odds(
    deck_file: &str,
    deck: &Deck,
    config: &HandConfig,
    num_hands: usize,
    seed: Option<u64>,
    json: bool,
) {
    let progress = ProgressBar::new(num_hands as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} hands ({eta})") {
        progress.set_style(style);
    }
    if json {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let start = std::time::Instant::now();
    let odds = simulate_opening_hands_with(deck, config, num_hands, seed, || progress.inc(1));
    progress.finish_and_clear();
    let elapsed = start.elapsed();

    if json {
        print_json(&odds);
        return;
    }

    println!("\n=== Opening Hand Odds ===\n");
    println!("Deck: {} ({} cards)", deck_file, deck.len());
    println!("Hands: {} of {} cards", odds.num_hands, odds.hand_size);
    println!("Seed: {}", odds.seed);
    println!();

    println!("Lands in opening hand:");
    for (lands, count) in odds.land_distribution.iter().enumerate() {
        let pct = if num_hands == 0 {
            0.0
        } else {
            *count as f64 / num_hands as f64 * 100.0
        };
        let bar = "█".repeat((pct / 2.0) as usize);
        println!("  {:2} lands: {:5.1}% {} ({})", lands, pct, bar, count);
    }

    println!();
    println!("Average lands: {:.2}", odds.average_lands);
    println!("Keepable (2-5 lands): {:.1}%", odds.keepable_rate * 100.0);
    println!(
        "\nCompleted in {:.2?} ({:.0} hands/sec)",
        elapsed,
        num_hands as f64 / elapsed.as_secs_f64()
    );
}
