//! Song catalog command line.
//!
//! - `songdata fetch`: download the dataset and summarize the catalog
//! - `songdata download PATH`: save the dataset for offline use
//! - `songdata song HASH [--file PATH]`: print one song's difficulty reports

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use songdata_core::{Catalog, IndexedSeq, KeyedMap, SongView};
use songdata_source::{SourceConfig, download_to_file, fetch_catalog, load_catalog_file, shared};
use tracing::info;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "songdata")]
#[command(about = "Query the rhythm-game song catalog")]
struct Args {
	/// Provider configuration file (TOML)
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Dataset URL, overriding the configuration
	#[arg(long, value_name = "URL", global = true)]
	url: Option<String>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Download the dataset and summarize the catalog
	Fetch,
	/// Save the dataset to a file
	Download {
		#[arg(value_name = "PATH")]
		path: PathBuf,
	},
	/// Print one song's difficulties, flat and by characteristic
	Song {
		#[arg(value_name = "HASH")]
		hash: String,

		/// Read the dataset from a file instead of the network
		#[arg(short, long, value_name = "PATH")]
		file: Option<PathBuf>,
	},
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let config = load_config(args.config.as_deref(), args.url)?;
	info!(url = %config.url, rating = ?config.rating, "songdata.config");

	match args.command {
		Command::Fetch => {
			let started = Instant::now();
			let catalog = fetch_catalog(&config).await.context("fetching catalog")?;
			print_summary(&catalog);
			info!(elapsed_ms = started.elapsed().as_millis() as u64, "songdata.fetch.done");
		}
		Command::Download { path } => {
			let bytes = download_to_file(&config, &path)
				.await
				.with_context(|| format!("downloading to {}", path.display()))?;
			println!("wrote {bytes} bytes to {}", path.display());
		}
		Command::Song { hash, file } => match file {
			Some(path) => {
				let catalog = load_catalog_file(&path, &config)
					.await
					.with_context(|| format!("loading {}", path.display()))?;
				print_song(&catalog, &hash)?;
			}
			None => {
				let catalog = shared::retrieve(&config).await.context("fetching catalog")?;
				print_song(catalog, &hash)?;
			}
		},
	}

	Ok(())
}

fn load_config(path: Option<&Path>, url: Option<String>) -> Result<SourceConfig> {
	let config = match path {
		Some(path) => SourceConfig::load(path).with_context(|| format!("reading {}", path.display()))?,
		None => SourceConfig::default(),
	};
	let mut config = config.with_env()?;
	if let Some(url) = url {
		config.url = url;
	}
	Ok(config)
}

fn print_summary(catalog: &Catalog) {
	let songs = catalog.songs();
	let difficulties: usize = songs.entries().map(|(_, song)| song.difficulties().len()).sum();
	println!("{} songs, {difficulties} difficulties", songs.len());
	println!("rating model: {}", catalog.rating_model().name());
}

fn print_song(catalog: &Catalog, hash: &str) -> Result<()> {
	let song = catalog
		.resolve_song(hash)
		.with_context(|| format!("no song with hash {hash}"))?;

	print_header(song);

	println!();
	println!("difficulties:");
	for diff in song.difficulties().iter() {
		println!(
			"  {:<10} {:<12} {:>5.2}*  {:>5} notes  njs {:>4.1}{}",
			diff.characteristic().as_str(),
			diff.label().as_str(),
			diff.stars(),
			diff.notes(),
			diff.njs(),
			if diff.ranked() { "  ranked" } else { "" }
		);
	}

	println!();
	println!("by characteristic:");
	for (characteristic, labels) in song.characteristics().entries() {
		println!("  {characteristic}:");
		for (label, diff) in labels.entries() {
			let pp = diff.pp().map(|pp| format!("  {pp:.1}pp")).unwrap_or_default();
			println!("    {label:<12} {:>5.2}*{pp}", diff.stars());
			for req in diff.requirements().iter() {
				println!("      requires {req}");
			}
		}
	}
	Ok(())
}

fn print_header(song: SongView<'_>) {
	let title = match (song.name(), song.author()) {
		(Some(name), Some(author)) => format!("{author} - {name}"),
		(Some(name), None) => name.to_string(),
		_ => song.key().to_string(),
	};
	println!("{title}");
	println!("  hash      {}", song.hash());
	println!("  key       {}", song.key());
	if let Some(mapper) = song.mapper() {
		println!("  mapper    {mapper}");
	}
	println!("  bpm       {:.1}", song.bpm());
	println!("  votes     +{} / -{}", song.upvotes(), song.downvotes());
	if let Some(uploaded) = song.uploaded() {
		println!("  uploaded  {}", uploaded.text());
	}
	println!("  rating    {:.3}", song.rating());
	println!("  schema    v{}", song.generation().as_u8());
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("songdata=debug,songdata_source=debug,songdata_core=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
