//! # Command Line Interface
//!
//! CLI for browsing products and running the pull-rate insights.

use crate::comparison::{CompareSection, ComparisonTable};
use crate::{init_engine, InsightsConfig, InsightsEngine};
use anyhow::Result;
use clap::{Parser, Subcommand};
use odds_registry::{OddsBreakdown, RarityTier};
use serde::Serialize;
use std::path::PathBuf;

/// Odds CLI for exploring card product pull rates
#[derive(Parser)]
#[command(name = "odds-cli")]
#[command(about = "Explore trading card pull rates across box configurations")]
pub struct Cli {
    /// Directory holding products.csv, odds.csv and checklist.csv
    #[arg(short, long, env = "ODDS_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Optional insights configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sports
    Sports,
    /// List years for a sport, newest first
    Years { sport: String },
    /// List products for a sport and year
    Products { sport: String, year: String },
    /// List box configs with odds for a product
    Configs { product: String },
    /// Show odds of a product/config
    Odds { product: String, config: String },
    /// Compare odds across box configs
    Compare {
        product: String,
        #[arg(long, value_enum, default_value = "base")]
        section: CompareSection,
    },
    /// Show the rarity ladder of base parallels
    Ladder { product: String, config: String },
    /// Expected hits per box
    Calculator { product: String, config: String },
    /// Sleeper hit, chase cards, best values and tier breakdown
    Insights { product: String, config: String },
    /// Find the config with the best odds for a card or parallel
    BestValue { product: String, name: String },
}

/// CLI handler
pub struct CliHandler {
    engine: InsightsEngine,
    json: bool,
}

impl CliHandler {
    /// Create new CLI handler
    pub async fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => InsightsConfig::load_from_file(path)?,
            None => InsightsConfig::default(),
        };
        let engine = init_engine(&cli.data_dir, config).await?;
        Ok(Self { engine, json: cli.json })
    }

    /// Handle CLI commands
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        let registry = self.engine.registry();

        match command {
            Commands::Sports => self.print_list(&registry.sports_available())?,
            Commands::Years { sport } => self.print_list(&registry.years_for_sport(&sport))?,
            Commands::Products { sport, year } => {
                let products = registry.products_for(&sport, &year);
                if self.json {
                    return print_json(&products);
                }
                for p in &products {
                    println!("{:24} {} ({})", p.product_id, p.name, p.brand);
                }
            }
            Commands::Configs { product } => {
                self.print_list(&registry.configs_available(&product))?
            }
            Commands::Odds { product, config } => {
                let odds = registry.odds_for(&product, &config);
                if self.json {
                    return print_json(&odds);
                }
                print_breakdown(&odds);
            }
            Commands::Compare { product, section } => {
                let table = self.engine.compare_configs(&product, section);
                if self.json {
                    return print_json(&table);
                }
                print_comparison(&table);
            }
            Commands::Ladder { product, config } => {
                let ladder = self.engine.rarity_ladder(&product, &config);
                if self.json {
                    return print_json(&ladder);
                }
                for rung in &ladder {
                    println!(
                        "{} {:24} {:>10} {:>8} r={:.1}",
                        rung.tier.emoji(),
                        rung.name,
                        rung.odds,
                        rung.tier.label(),
                        rung.radius
                    );
                }
            }
            Commands::Calculator { product, config } => {
                let Some(calc) = self.engine.calculator(&product, &config) else {
                    println!("No data available");
                    return Ok(());
                };
                if self.json {
                    return print_json(&calc);
                }
                println!(
                    "🧮 {} ({} packs x {} cards = {} cards)",
                    calc.spec.name, calc.spec.packs, calc.spec.cards_per_pack, calc.total_cards
                );
                println!("{}", "=".repeat(50));
                for hit in &calc.hits {
                    println!("{:24} {:>10} {:>8}", hit.name, hit.odds, hit.display);
                }
            }
            Commands::Insights { product, config } => {
                let report = self.engine.insights_report(&product, &config);
                if self.json {
                    return print_json(&report);
                }
                if let Some(sleeper) = &report.sleeper {
                    println!("💎 Sleeper hit: {} ({}) - {}", sleeper.card, sleeper.odds, sleeper.reason);
                }
                println!("\n🎯 Chase Cards");
                if report.chase_cards.is_empty() {
                    println!("No chase cards (1:200+) in this config");
                }
                for card in &report.chase_cards {
                    println!("  {:24} {:8} {:>10}", card.name, card.category.as_str(), card.odds);
                }
                println!("\n💰 Best Value Config");
                for value in &report.best_values {
                    println!("  {:24} {:8} {:>10}", value.name, value.config, value.display);
                }
                println!("\n📊 Rarity Breakdown");
                for tier in RarityTier::ALL {
                    println!(
                        "  {} {:9} {:>3}  ({})",
                        tier.emoji(),
                        tier.label(),
                        report.tiers.get(tier).len(),
                        tier.range_label()
                    );
                }
            }
            Commands::BestValue { product, name } => {
                match self.engine.find_best_value_config(&product, &name) {
                    Some(best) if self.json => return print_json(&best),
                    Some(best) => println!("{}: {} ({})", best.name, best.config, best.display),
                    None => println!("No odds found for '{name}'"),
                }
            }
        }
        Ok(())
    }

    fn print_list(&self, items: &[String]) -> Result<()> {
        if self.json {
            return print_json(&items);
        }
        if items.is_empty() {
            println!("No data found");
        }
        for item in items {
            println!("{item}");
        }
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_breakdown(odds: &OddsBreakdown) {
    if let Some(parallels) = &odds.base_parallels {
        println!("Base Parallels");
        for p in parallels {
            println!(
                "  {:24} {:>10} {}",
                p.name,
                p.odds.as_deref().unwrap_or("—"),
                p.numbered.as_deref().unwrap_or("")
            );
        }
    }
    if let Some(inserts) = &odds.inserts {
        println!("Inserts");
        for i in inserts {
            println!("  {:24} {:>10} {:?}", i.name, i.odds.as_deref().unwrap_or("—"), i.kind);
        }
    }
    if let Some(autos) = &odds.autographs {
        println!("Autographs");
        for a in autos {
            println!("  {:24} {:>10}", a.name, a.odds.as_deref().unwrap_or("—"));
        }
    }
}

fn print_comparison(table: &ComparisonTable) {
    if table.is_empty() {
        println!("No data available");
        return;
    }
    print!("{:24}", "Name");
    for config in &table.configs {
        print!(" {:>10}", config);
    }
    println!();
    println!("{}", "=".repeat(24 + 11 * table.configs.len()));

    for row in &table.rows {
        let name = if row.is_ssp { format!("{} [SSP]", row.name) } else { row.name.clone() };
        print!("{:24}", name);
        for cell in &row.cells {
            let odds = cell.odds.as_deref().unwrap_or("—");
            let mark = if cell.is_best { "✓" } else { " " };
            print!(" {:>9}{}", odds, mark);
        }
        println!();
    }
    println!("\n✓ = Best odds for this card");
}
