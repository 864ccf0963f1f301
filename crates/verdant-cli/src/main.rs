#![warn(clippy::all)]
#![forbid(unsafe_code)]

//! Verdant CLI
//!
//! Runs the federated search operations against a seeded in-memory
//! directory. Useful for demos and for exercising the startup validation
//! path outside of tests; production deployments wire real entity stores
//! into the same registry.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use verdant_backend::MemoryBackend;
use verdant_cache::MemoryCache;
use verdant_core::GeoFilter;
use verdant_registry::{EntityRegistry, RegistryEntry};
use verdant_search::{SearchQuery, SearchService, SearchTuning};

/// Verdant federated search demo
#[derive(Parser, Debug)]
#[command(name = "verdant")]
#[command(about = "Search a seeded plant-based place directory", long_about = None)]
struct Args {
    /// Tuning configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search every entity type, or a single one with --resource
    Search {
        /// Query text
        query: String,

        /// Restrict to one resource type (singular or plural, any case)
        #[arg(long)]
        resource: Option<String>,

        /// Latitude for geo-proximity search
        #[arg(long)]
        latitude: Option<f64>,

        /// Longitude for geo-proximity search
        #[arg(long)]
        longitude: Option<f64>,

        /// Radius in meters (defaults to 5000 when coordinates are given)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Autocomplete display names for a query prefix
    Suggest {
        /// Query text
        query: String,
    },
    /// Top-rated items across featured entity types (cached)
    Popular,
    /// Item counts per entity type (cached)
    Aggregations,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let tuning = match &args.config {
        Some(path) => load_tuning(path)?,
        None => SearchTuning::default(),
    };

    let registry = Arc::new(seed_registry().context("entity registry validation failed")?);
    tracing::info!(entities = registry.len(), "directory seeded");

    let cache = Arc::new(MemoryCache::with_policy(tuning.cache));
    let service = SearchService::new(registry, cache).with_tuning(tuning);

    match args.command {
        Command::Search {
            query,
            resource,
            latitude,
            longitude,
            radius,
        } => {
            let geo = GeoFilter::from_parts(latitude, longitude, radius)?;
            let mut search = SearchQuery::new(query);
            if let Some(geo) = geo {
                search = search.with_geo(geo);
            }
            match resource {
                Some(resource) => {
                    print_json(&service.by_resource_type(&resource, &search).await?)?;
                }
                None => print_json(&service.unified(&search).await)?,
            }
        }
        Command::Suggest { query } => print_json(&service.suggestions(&query).await)?,
        Command::Popular => print_json(&service.popular().await?)?,
        Command::Aggregations => print_json(&service.aggregations().await?)?,
    }

    Ok(())
}

fn load_tuning(path: &Path) -> Result<SearchTuning> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing tuning config {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build the demo directory: five entity types over in-memory backends.
fn seed_registry() -> verdant_core::Result<EntityRegistry> {
    let restaurants = MemoryBackend::with_records(vec![
        json!({"name": "Green Garden", "cuisine": "ethiopian", "rating": 4.7,
               "latitude": 52.3702, "longitude": 4.8952}),
        json!({"name": "Seitan Worship", "cuisine": "bbq", "rating": 4.9,
               "latitude": 52.3721, "longitude": 4.8934}),
        json!({"name": "Luna Deli", "cuisine": "deli", "rating": 4.1,
               "latitude": 52.3581, "longitude": 4.9136}),
    ]);
    let businesses = MemoryBackend::with_records(vec![
        json!({"name": "Kind Soap Co", "category": "cosmetics", "rating": 4.4,
               "latitude": 52.3639, "longitude": 4.8917}),
        json!({"name": "Rooted Threads", "category": "clothing", "rating": 4.6,
               "latitude": 52.3668, "longitude": 4.9033}),
    ]);
    let doctors = MemoryBackend::with_records(vec![
        json!({"name": "Dr. Imani Sprout", "specialty": "nutrition", "rating": 4.8,
               "latitude": 52.3755, "longitude": 4.8858}),
        json!({"name": "Dr. Theo Greenfield", "specialty": "general practice", "rating": 4.3,
               "latitude": 52.3524, "longitude": 4.8891}),
    ]);
    let markets = MemoryBackend::with_records(vec![
        json!({"name": "Noordermarkt Organic Fair", "schedule": "saturdays", "rating": 4.5,
               "latitude": 52.3795, "longitude": 4.8866}),
        json!({"name": "South Side Green Market", "schedule": "wednesdays", "rating": 4.2,
               "latitude": 52.3485, "longitude": 4.8932}),
    ]);
    let sanctuaries = MemoryBackend::with_records(vec![
        json!({"name": "Hope Hooves Sanctuary", "species": "farm animals", "rating": 4.9,
               "latitude": 52.4214, "longitude": 4.8311}),
        json!({"name": "Featherhaven", "species": "birds", "rating": 4.6,
               "latitude": 52.2933, "longitude": 4.9572}),
    ]);

    EntityRegistry::new(vec![
        RegistryEntry::new("restaurant", "restaurants", Arc::new(restaurants))
            .with_search_fields(&["name", "cuisine"])
            .with_name_fields(&["name"])
            .featured(true),
        RegistryEntry::new("business", "businesses", Arc::new(businesses))
            .with_search_fields(&["name", "category"])
            .with_name_fields(&["name"])
            .featured(true),
        RegistryEntry::new("doctor", "doctors", Arc::new(doctors))
            .with_search_fields(&["name", "specialty"])
            .with_name_fields(&["name"]),
        RegistryEntry::new("market", "markets", Arc::new(markets))
            .with_search_fields(&["name", "schedule"])
            .with_name_fields(&["name"])
            .featured(true),
        RegistryEntry::new("sanctuary", "sanctuaries", Arc::new(sanctuaries))
            .with_search_fields(&["name", "species"])
            .with_name_fields(&["name"]),
    ])
}
