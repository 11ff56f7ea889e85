use std::path::PathBuf;

use argh::FromArgs;
use recipebook::console::EditorSource;
use recipebook::{LoadOutcome, RecipeStore, Session, logger};

#[derive(FromArgs)]
/// Interactive recipe book manager.
struct Options {
    /// recipe file to load and save (defaults to recipes.json)
    #[argh(option, short = 'f', default = "String::from(\"recipes.json\")")]
    file: String,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let options: Options = argh::from_env();
    logger::init(options.verbose);

    println!("Welcome to Recipe Book Manager!");
    println!("{}", "=".repeat(50));

    let (book, outcome) = RecipeStore::load(PathBuf::from(&options.file));
    match outcome {
        LoadOutcome::Loaded(count) => println!("✓ Loaded {count} recipes from file."),
        LoadOutcome::Fresh => println!("Starting with a new recipe book!"),
        LoadOutcome::Recovered(_) => println!("Could not load recipes. Starting fresh."),
    }

    let mut input = EditorSource::new()?;
    let mut session = Session::new(book);
    session.run(&mut input, &mut std::io::stdout())?;

    println!("\nThanks for using Recipe Book Manager!");
    println!("Goodbye!");
    Ok(())
}
