use std::{
    fmt::Display,
    fs,
    hash::Hash,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{ensure, Context};
use clap::{Parser, ValueEnum};
use lr1_table::{grammar::samples, Automaton, Grammar, GrammarBuilder, ParsingTable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Rules
    Rules,
    /// Epsilon-productive flags and FIRST sets
    First,
    /// Symbols, rules and FIRST sets with their ids
    Debug,
    /// Canonical LR(1) states
    States,
    /// LR(1) parsing table
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Plain,
    Latex,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Sample {
    Parentheses,
    Arithmetic,
}

/// Builds canonical LR(1) tables for a context-free grammar.
///
/// Grammar text is one production group per line (`E -> E + T | T`); it is
/// read from GRAMMAR or stdin.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Grammar file
    grammar: Option<PathBuf>,
    /// Use a built-in grammar instead of reading one
    #[arg(short, long, value_enum, conflicts_with = "grammar")]
    sample: Option<Sample>,
    /// What to print, in order
    #[arg(short, long, value_enum, default_values_t = [Output::Table])]
    output: Vec<Output>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,
}

/// The debug listing exists only as plain text.
fn check_outputs(args: &Args) -> anyhow::Result<()> {
    ensure!(
        args.format == OutputFormat::Plain || !args.output.contains(&Output::Debug),
        "debug output is only available as plain text"
    );
    Ok(())
}

fn render<S: Serialize>(
    format: OutputFormat,
    t: &S,
    plain: String,
    latex: String,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Plain => plain,
        OutputFormat::Latex => latex,
        OutputFormat::Json => serde_json::to_string(t)?,
    })
}

fn emit<T>(g: GrammarBuilder<T>, args: &Args) -> anyhow::Result<()>
where
    T: Clone + Eq + Ord + Hash + Display + Serialize,
{
    let g: Grammar<T> = g.build().context("invalid grammar")?;

    let automaton: Option<Automaton> = args
        .output
        .iter()
        .any(|o| matches!(o, Output::States | Output::Table))
        .then(|| Automaton::build(&g))
        .transpose()
        .context("grammar is not LR(1)")?;

    for output in &args.output {
        let text = match (output, &automaton) {
            (Output::Rules, _) => {
                let t = g.to_rule_output_vec();
                render(args.format, &t, t.to_plaintext(), t.to_latex())?
            }
            (Output::First, _) => {
                let t = g.to_non_terminal_output_vec();
                render(args.format, &t, t.to_plaintext(), t.to_latex())?
            }
            (Output::Debug, _) => g.to_plaintext(),
            (Output::States, Some(automaton)) => {
                let t = automaton.to_state_output_vec(&g);
                render(args.format, &t, t.to_plaintext(), t.to_latex())?
            }
            (Output::Table, Some(automaton)) => {
                let t = ParsingTable::new(&g, automaton);
                render(args.format, &t, t.to_plaintext(), t.to_latex())?
            }
            (Output::States | Output::Table, None) => {
                unreachable!("automaton is built whenever states or a table are requested")
            }
        };
        println!("{}", text);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    check_outputs(&args)?;

    match args.sample {
        Some(Sample::Parentheses) => emit(samples::balanced_parentheses(), &args),
        Some(Sample::Arithmetic) => emit(samples::arithmetic(), &args),
        None => {
            let input = match &args.grammar {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut input = String::new();
                    io::stdin()
                        .read_to_string(&mut input)
                        .context("failed to read stdin")?;
                    input
                }
            };
            let g = GrammarBuilder::parse(&input).context("invalid grammar")?;
            emit(g, &args)
        }
    }
}
