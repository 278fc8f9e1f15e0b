use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use succinct_trie::prelude::*;

#[derive(Parser, Debug)]
#[command(about = "Queries a frozen trie built by triebuild", long_about = None)]
struct Args {
    /// The basename of the trie, without the `.trie` extension.
    basename: PathBuf,

    /// The coarse block width the trie was built with.
    #[clap(long, default_value_t = L1)]
    l1: usize,

    /// The fine block width the trie was built with.
    #[clap(long, default_value_t = L2)]
    l2: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the id of each word, or `-` if the word is missing.
    Lookup { words: Vec<String> },

    /// Prints the words starting with a prefix.
    Suggest {
        prefix: String,

        /// The maximum number of words to print.
        #[clap(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Prints the word with each id.
    Reverse { ids: Vec<DenseId> },
}

pub fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let mut path = args.basename.clone();
    path.set_extension("trie");
    let map = FrozenTrieMap::load(&path, RankDirectoryParams::new(args.l1, args.l2)?)?;

    match args.command {
        Command::Lookup { words } => {
            for word in words {
                match map.lookup_id(&word) {
                    Some(id) => println!("{}\t{}", word, id),
                    None => println!("{}\t-", word),
                }
            }
        }
        Command::Suggest { prefix, limit } => {
            println!("{}", map.trie().suggest(&prefix, limit).join("\n"));
        }
        Command::Reverse { ids } => {
            let words = ids
                .iter()
                .map(|id| map.reverse_lookup(*id))
                .collect::<Result<Vec<_>>>()?;
            println!("{}", words.iter().join("\n"));
        }
    }

    Ok(())
}
