//! artscan - interactive card art fetcher.
//!
//! Reads Scryfall-syntax queries from stdin (one per line, empty line to
//! finish) and downloads art for each. A `*` anywhere in a query forces the
//! Scryfall art-crop fetch even when the gallery has images.

use std::io::{self, BufRead, Write};

use autoproxy::{Autoproxy, QueryOptions};
use clap::Parser;

/// Fetch MTG card art from MTGPICS with Scryfall/DeepAI fallback
#[derive(Parser, Debug)]
#[command(name = "artscan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory downloaded art is written to
    #[arg(short, long, default_value = "art")]
    out_dir: String,

    /// Skip the MTGPICS gallery flow
    #[arg(long, default_value_t = false)]
    skip_gallery: bool,

    /// Never fall back to the Scryfall art crop
    #[arg(long, default_value_t = false)]
    skip_scryfall: bool,

    /// Upscale fallback art through DeepAI
    #[arg(long, default_value_t = false)]
    upscale: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let sdk = Autoproxy::builder().out_dir(&args.out_dir).build();

    for raw_query in read_stdin("> ") {
        // An asterisk in the query forces the Scryfall image path
        let force_metadata = raw_query.contains('*');
        let query = raw_query.replace('*', "");

        let options = QueryOptions {
            skip_gallery: args.skip_gallery,
            skip_metadata_fallback: args.skip_scryfall,
            upscale: args.upscale,
            force_metadata,
        };

        match sdk.process_query(&query, &options) {
            Ok(written) => log::info!("{}: {} image(s) written", query, written),
            Err(e) => log::error!("{}: {}", query, e),
        }
    }
}

/// Read queries from stdin until an empty line (or EOF).
fn read_stdin(prompt: &str) -> Vec<String> {
    let stdin = io::stdin();
    let mut queries = Vec::new();

    loop {
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    break;
                }
                queries.push(line.to_string());
            }
            Err(_) => break,
        }
    }

    queries
}
