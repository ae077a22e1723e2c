// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::path::Path;

use arbor::query::TUPLE_LEVEL;
use arbor::{
    Analyzer, AnalyzerConfig, Error, LiteralAnalyzer, MemoryIndex, NodePath, NodeRange,
    NodeScope, Occur, Query, Result, Searcher, Term, TreeDocument, UriAnalyzer,
};

mod cli;
use cli::display;
use cli::{Cli, Commands, Mode, Scope};

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(level_filter(verbose))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Search {
            corpus,
            terms,
            mode,
            field,
            lower,
            upper,
            level,
            scope,
            limit,
            config,
            segment_size,
            json,
        } => {
            let options = SearchOptions {
                terms,
                mode,
                field,
                lower,
                upper,
                level,
                scope,
                limit,
                segment_size,
                json,
            };
            load_config(config.as_deref()).and_then(|config| run_search(&corpus, &options, config))
        }
        Commands::Analyze {
            text,
            uri,
            normalisation,
            config,
        } => load_config(config.as_deref()).map(|mut config| {
            if let Some(mode) = normalisation {
                config.uri_normalisation = mode;
            }
            run_analyze(&text, uri, config)
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

struct SearchOptions {
    terms: Vec<String>,
    mode: Mode,
    field: String,
    lower: Option<NodePath>,
    upper: Option<NodePath>,
    level: Option<usize>,
    scope: Scope,
    limit: usize,
    segment_size: Option<usize>,
    json: bool,
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::from_path(path),
        None => Ok(AnalyzerConfig::default()),
    }
}

/// Query terms go through the same literal analysis as indexed text, so
/// `given-name` searches for `given` followed by `name`.
fn build_query(options: &SearchOptions, config: &AnalyzerConfig) -> Result<Query> {
    let analyzer = LiteralAnalyzer::new(config.clone());
    let terms: Vec<Term> = options
        .terms
        .iter()
        .flat_map(|t| analyzer.analyze(t))
        .map(|token| Term::new(options.field.as_str(), token.text))
        .collect();
    if terms.is_empty() {
        return Err(Error::invalid_arg(
            "terms",
            "every term was removed by analysis (stop words or length limits)",
        ));
    }

    let scope = match options.scope {
        Scope::Exact => NodeScope::Exact,
        Scope::Tuple => NodeScope::Ancestor { depth: TUPLE_LEVEL },
    };
    let clauses = |occur: Occur| -> Vec<(Occur, Query)> {
        terms.iter().map(|t| (occur, Query::Term(t.clone()))).collect()
    };

    let query = match options.mode {
        Mode::Term => match terms.as_slice() {
            [term] => Query::Term(term.clone()),
            _ => {
                return Err(Error::invalid_arg(
                    "terms",
                    format!("--mode term takes exactly one term, got {}", terms.len()),
                ))
            }
        },
        Mode::Phrase => Query::Phrase(terms.clone()),
        Mode::And => Query::Boolean {
            clauses: clauses(Occur::Must),
            scope,
        },
        Mode::Or => Query::Boolean {
            clauses: clauses(Occur::Should),
            scope,
        },
    };

    if options.lower.is_none() && options.upper.is_none() && options.level.is_none() {
        return Ok(query);
    }
    let range = NodeRange::new(
        options.lower.clone().unwrap_or_default(),
        options.upper.clone().unwrap_or_default(),
        options.level,
    )?;
    Ok(Query::constrained(query, range))
}

fn run_search(corpus: &Path, options: &SearchOptions, config: AnalyzerConfig) -> Result<()> {
    let json = fs::read_to_string(corpus)?;
    let docs: Vec<TreeDocument> = serde_json::from_str(&json)?;
    let query = build_query(options, &config)?;

    let chunk = options.segment_size.unwrap_or(docs.len()).max(1);
    let segments: Vec<MemoryIndex> = docs
        .chunks(chunk)
        .map(|segment| MemoryIndex::from_documents(segment, config.clone()))
        .collect();
    let searcher = Searcher::new(segments);
    let hits = searcher.search(&query, options.limit)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    let range = match &query {
        Query::Constrained { range, .. } => Some(range),
        _ => None,
    };
    display::print_search_header(&options.terms.join(" "), range, searcher.num_docs());
    display::print_hits(&hits, options.limit);
    Ok(())
}

fn run_analyze(text: &str, uri: bool, config: AnalyzerConfig) {
    let tokens = if uri {
        UriAnalyzer::new(config).analyze(text)
    } else {
        LiteralAnalyzer::new(config).analyze(text)
    };
    display::print_tokens(&tokens);
}
