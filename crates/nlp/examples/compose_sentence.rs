//! Compose sentence vectors from parse trees.
//!
//! Run with: RUST_LOG=debug cargo run -p compositional-nlp --example compose_sentence
//!
//! Shows:
//! - bracketed vs flat input
//! - ignore labels dropping determiners and punctuation
//! - the right-to-left projection fold triggered by an adjective
//! - comparing premise and hypothesis vectors

use compositional_core::cosine_similarity;
use compositional_nlp::{Composition, EngineConfig, Lexicon, ParseTree};
use tracing_subscriber::EnvFilter;

fn toy_lexicon() -> Lexicon {
    // Dimension 0: "animate", 1: "moving", 2: "colourful"
    Lexicon::from_pairs(
        3,
        [
            ("cat", vec![0.9, 0.4, 0.1]),
            ("dog", vec![0.95, 0.6, 0.1]),
            ("ball", vec![0.05, 0.7, 0.6]),
            ("red", vec![0.1, 0.2, 0.95]),
            ("sits", vec![0.6, 0.1, 0.2]),
            ("runs", vec![0.7, 0.95, 0.2]),
            ("flies", vec![0.3, 0.9, 0.3]),
            ("mat", vec![0.05, 0.05, 0.4]),
            ("on", vec![0.3, 0.3, 0.3]),
        ],
    )
    .expect("toy vectors are 3-dimensional")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Parse-Tree Composition ===\n");
    let lexicon = toy_lexicon();

    // -------------------------------------------------------------------------
    // 1. Bracketed input
    // -------------------------------------------------------------------------
    println!("1. Bracketed input");
    println!("------------------\n");

    let sentence = "(S (NP (DT the) (NN cat)) (VP (VBZ sits) (PP (IN on) (NP (DT the) (NN mat)))) (. .))";
    let mut tree = ParseTree::new(sentence, &lexicon).expect("well-formed tree");
    println!("  binarized: {}", tree);
    tree.evaluate().expect("dimensions agree");
    println!("  evaluated: {}", tree);
    println!("  root:      {:?}\n", tree.root_vector());

    // -------------------------------------------------------------------------
    // 2. Flat input and fold direction
    // -------------------------------------------------------------------------
    println!("2. Flat input");
    println!("-------------\n");

    for tags in [["jj", "nn", "vbz"], ["nn", "nn", "vbz"]] {
        let mut tree = ParseTree::from_tokens("red ball flies", &lexicon, " ", Some(&tags[..]))
            .expect("one tag per token");
        tree.evaluate().expect("dimensions agree");
        println!("  tags {:?} → {:?}", tags, tree.root_vector());
    }
    println!();

    // -------------------------------------------------------------------------
    // 3. Premise vs hypothesis
    // -------------------------------------------------------------------------
    println!("3. Premise vs hypothesis");
    println!("------------------------\n");

    let config = EngineConfig::default().with_default_op(Composition::Sum);
    let pairs = [
        ("(S (NP (DT the) (NN dog)) (VP (VBZ runs)))", "(S (NP (DT a) (NN cat)) (VP (VBZ runs)))"),
        ("(S (NP (DT the) (NN dog)) (VP (VBZ runs)))", "(S (NP (DT a) (NN ball)) (VP (VBZ flies)))"),
    ];
    for (premise, hypothesis) in pairs {
        let mut p = ParseTree::new(premise, &lexicon)
            .expect("well-formed premise")
            .with_config(config.clone());
        let mut h = ParseTree::new(hypothesis, &lexicon)
            .expect("well-formed hypothesis")
            .with_config(config.clone());
        p.evaluate().expect("dimensions agree");
        h.evaluate().expect("dimensions agree");

        if let (Some(pv), Some(hv)) = (p.root_vector(), h.root_vector()) {
            println!("  {}\n  {}\n  cosine = {:.4}\n", premise, hypothesis, cosine_similarity(pv, hv));
        }
    }
}
