use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::{ProgressLog, ProgressLogger};
use log::info;
use mem_dbg::{MemSize, SizeFlags};
use succinct_trie::prelude::*;
use succinct_trie::utils::read_words;

#[derive(Parser, Debug)]
#[command(about = "Builds a frozen trie from a list of words", long_about = None)]
struct Args {
    /// A file with one word per line. Blank lines are skipped.
    words: PathBuf,

    /// The basename of the trie: the map is written to `basename.trie`.
    basename: PathBuf,

    /// The number of bits covered by a coarse block of the rank directories.
    #[clap(long, default_value_t = L1)]
    l1: usize,

    /// The number of bits covered by a fine block of the rank directories.
    #[clap(long, default_value_t = L2)]
    l2: usize,
}

pub fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let params = RankDirectoryParams::new(args.l1, args.l2)?;
    let file = File::open(&args.words).with_context(|| format!("Could not open {}", args.words.display()))?;

    let mut builder = TrieBuilder::new();
    let mut pl = ProgressLogger::default();
    pl.item_name("word");
    pl.start("Inserting words...");
    for word in read_words(BufReader::new(file)) {
        builder.insert(&word?);
        pl.update();
    }
    pl.done();

    info!(
        "Inserted {} distinct words in {} nodes",
        builder.word_count(),
        builder.node_count()
    );

    let map = builder.freeze_map(params)?;
    let mut path = args.basename.clone();
    path.set_extension("trie");
    map.store(&path)?;

    info!(
        "Stored {} ({} bytes serialized, {} bytes in memory)",
        path.display(),
        map.to_bytes().len(),
        map.mem_size(SizeFlags::default())
    );

    Ok(())
}
