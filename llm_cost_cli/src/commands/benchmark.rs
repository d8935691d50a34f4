//! `benchmark`: measure encoder throughput over a text corpus, so a
//! user can sanity-check that `pipe` mode will keep up with their
//! expected line rate before wiring it into a hot path.

use std::time::Instant;

use llm_cost_core::bpe::EncodeArena;

use crate::cli::BenchmarkArgs;
use crate::cli_error::CliError;

pub fn run(args: &BenchmarkArgs) -> Result<(), CliError> {
    let vocab_name = args.vocab.into();
    let vocab = super::load_vocab(&args.vocab_file, vocab_name)?;
    let corpus = std::fs::read_to_string(&args.corpus_file).map_err(|source| CliError::Io {
        path: args.corpus_file.clone(),
        source,
    })?;

    let mut arena = EncodeArena::new();
    let start = Instant::now();
    let mut total_tokens: u64 = 0;
    for line in corpus.lines() {
        let tokens = super::encode_tokens(line, vocab_name, &vocab, &mut arena)?;
        total_tokens += tokens.len() as u64;
    }
    let elapsed = start.elapsed();

    let bytes_per_sec = corpus.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    let tokens_per_sec = total_tokens as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!(
        "encoded {} bytes, {} tokens in {:.3}s ({:.0} bytes/s, {:.0} tokens/s)",
        corpus.len(),
        total_tokens,
        elapsed.as_secs_f64(),
        bytes_per_sec,
        tokens_per_sec
    );

    Ok(())
}
