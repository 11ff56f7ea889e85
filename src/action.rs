use std::io::Write;

use anyhow::Result;
use tracing::{debug, error};

use crate::console::LineSource;
use crate::query;
use crate::recipe::{DEFAULT_SERVINGS, Recipe};
use crate::store::RecipeStore;

/// Width of the rule used by every screen banner.
const RULE_WIDTH: usize = 50;

/// Whether the session loop should keep going after an action.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One numbered entry of the interactive menu.
///
/// Actions prompt through the [`LineSource`], print through `out`, and
/// mutate the book they are handed. A `None` from the source mid-action
/// cancels that action; it never tears the session down.
pub trait MenuAction {
    /// Label shown next to the action's number in the menu.
    fn label(&self) -> &'static str;

    /// Run the action to completion.
    fn run(
        &self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        book: &mut RecipeStore,
    ) -> Result<Flow>;
}

/// The six actions of the standard menu, in display order.
pub fn default_actions() -> Vec<Box<dyn MenuAction>> {
    vec![
        Box::new(AddRecipe),
        Box::new(ListRecipes),
        Box::new(ViewRecipe),
        Box::new(SearchRecipes),
        Box::new(RandomRecipe),
        Box::new(SaveAndExit),
    ]
}

pub(crate) fn rule(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub(crate) fn banner(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "{title}")?;
    rule(out)
}

/// Render one recipe in full.
fn render_recipe(out: &mut dyn Write, name: &str, recipe: &Recipe) -> std::io::Result<()> {
    banner(out, &format!("RECIPE: {name}"))?;
    writeln!(out, "Servings: {}", recipe.servings)?;
    writeln!(out, "\nIngredients:")?;
    for line in &recipe.ingredients {
        writeln!(out, "  - {line}")?;
    }
    writeln!(out, "\nInstructions:")?;
    for (step, line) in recipe.instructions.iter().enumerate() {
        writeln!(out, "  {}. {line}", step + 1)?;
    }
    rule(out)
}

/// Offer the numbered `names` for viewing; Enter backs out.
fn offer_pick<S: AsRef<str>>(
    input: &mut dyn LineSource,
    out: &mut dyn Write,
    book: &RecipeStore,
    names: &[S],
) -> Result<()> {
    let Some(raw) = input.read_line("Enter number to view (or press Enter to go back): ")? else {
        return Ok(());
    };
    match query::resolve_index(names, &raw) {
        Ok(Some(name)) => render_recipe(out, name, book.get(name)?)?,
        Ok(None) => {}
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(())
}

/// Menu action 1: prompt for a full recipe and upsert it.
pub struct AddRecipe;

impl MenuAction for AddRecipe {
    fn label(&self) -> &'static str {
        "Add a new recipe"
    }

    fn run(
        &self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        book: &mut RecipeStore,
    ) -> Result<Flow> {
        banner(out, "ADD NEW RECIPE")?;

        let Some(name) = input.read_line("\nEnter recipe name: ")? else {
            writeln!(out, "Cancelled.")?;
            return Ok(Flow::Continue);
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            writeln!(out, "Recipe name can't be empty!")?;
            return Ok(Flow::Continue);
        }

        // An existing name is only replaced after an explicit "yes".
        if book.contains(&name) {
            let prompt = format!("'{name}' already exists. Replace it? (yes/no): ");
            let Some(answer) = input.read_line(&prompt)? else {
                writeln!(out, "Cancelled.")?;
                return Ok(Flow::Continue);
            };
            if !answer.trim().eq_ignore_ascii_case("yes") {
                writeln!(out, "Cancelled.")?;
                return Ok(Flow::Continue);
            }
        }

        let Some(servings) = input.read_line("Number of servings: ")? else {
            writeln!(out, "Cancelled.")?;
            return Ok(Flow::Continue);
        };
        let servings = match servings.trim() {
            "" => DEFAULT_SERVINGS.to_string(),
            other => other.to_string(),
        };

        writeln!(out, "\nEnter ingredients (type 'done' when finished)")?;
        writeln!(out, "Format: 2 cups flour  OR  1 tsp salt")?;
        let mut ingredients = Vec::new();
        loop {
            let Some(line) = input.read_line("Ingredient: ")? else {
                writeln!(out, "Cancelled.")?;
                return Ok(Flow::Continue);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("done") {
                break;
            }
            if !line.is_empty() {
                ingredients.push(line.to_string());
            }
        }

        writeln!(out, "\nEnter instructions (type 'done' when finished)")?;
        let mut instructions: Vec<String> = Vec::new();
        loop {
            let prompt = format!("Step {}: ", instructions.len() + 1);
            let Some(line) = input.read_line(&prompt)? else {
                writeln!(out, "Cancelled.")?;
                return Ok(Flow::Continue);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("done") {
                break;
            }
            if !line.is_empty() {
                instructions.push(line.to_string());
            }
        }

        book.upsert(&name, Recipe::new(servings, ingredients, instructions))?;
        debug!("upserted recipe '{name}'");
        writeln!(out, "\n✓ Recipe '{name}' added successfully!")?;
        Ok(Flow::Continue)
    }
}

/// Menu action 2: numbered, sorted listing with an optional pick.
pub struct ListRecipes;

impl MenuAction for ListRecipes {
    fn label(&self) -> &'static str {
        "List all recipes"
    }

    fn run(
        &self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        book: &mut RecipeStore,
    ) -> Result<Flow> {
        if book.is_empty() {
            writeln!(out, "\nYour recipe book is empty!")?;
            writeln!(out, "Try adding a recipe first.")?;
            return Ok(Flow::Continue);
        }

        banner(out, "YOUR RECIPES")?;
        let names = query::list_names(book);
        for (i, name) in names.iter().enumerate() {
            writeln!(out, "{}. {name}", i + 1)?;
        }
        writeln!(out)?;
        offer_pick(input, out, book, &names)?;
        Ok(Flow::Continue)
    }
}

/// Menu action 3: view one recipe by its exact name.
pub struct ViewRecipe;

impl MenuAction for ViewRecipe {
    fn label(&self) -> &'static str {
        "View a recipe"
    }

    fn run(
        &self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        book: &mut RecipeStore,
    ) -> Result<Flow> {
        let Some(name) = input.read_line("\nEnter recipe name: ")? else {
            return Ok(Flow::Continue);
        };
        // Matched exactly as typed: names are case-sensitive.
        match book.get(&name) {
            Ok(recipe) => render_recipe(out, &name, recipe)?,
            Err(err) => writeln!(out, "\n{err}")?,
        }
        Ok(Flow::Continue)
    }
}

/// Menu action 4: substring search by name or by ingredient.
pub struct SearchRecipes;

impl MenuAction for SearchRecipes {
    fn label(&self) -> &'static str {
        "Search for recipes"
    }

    fn run(
        &self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        book: &mut RecipeStore,
    ) -> Result<Flow> {
        if book.is_empty() {
            writeln!(out, "\nYour recipe book is empty!")?;
            return Ok(Flow::Continue);
        }

        banner(out, "SEARCH RECIPES")?;

        let Some(kind) = input.read_line("\nSearch by (n)ame or (i)ngredient? ")? else {
            return Ok(Flow::Continue);
        };
        let kind = kind.trim().to_lowercase();
        if kind != "n" && kind != "i" {
            writeln!(out, "Invalid choice! Use 'n' or 'i'")?;
            return Ok(Flow::Continue);
        }

        let Some(term) = input.read_line("Enter search term: ")? else {
            return Ok(Flow::Continue);
        };
        let results = if kind == "n" {
            query::search_by_name(book, &term)
        } else {
            query::search_by_ingredient(book, &term)
        };
        let results = match results {
            Ok(results) => results,
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        if results.is_empty() {
            writeln!(out, "\nNo recipes found with '{}'", term.trim().to_lowercase())?;
            return Ok(Flow::Continue);
        }

        writeln!(out, "\nFound {} recipe(s):", results.len())?;
        for (i, name) in results.iter().enumerate() {
            writeln!(out, "{}. {name}", i + 1)?;
        }
        writeln!(out)?;
        offer_pick(input, out, book, &results)?;
        Ok(Flow::Continue)
    }
}

/// Menu action 5: show a uniformly random recipe.
pub struct RandomRecipe;

impl MenuAction for RandomRecipe {
    fn label(&self) -> &'static str {
        "Get a random recipe"
    }

    fn run(
        &self,
        _input: &mut dyn LineSource,
        out: &mut dyn Write,
        book: &mut RecipeStore,
    ) -> Result<Flow> {
        if book.is_empty() {
            writeln!(out, "\nYour recipe book is empty!")?;
            return Ok(Flow::Continue);
        }

        let name = query::random_recipe(book)?;
        writeln!(out, "\nRandom Recipe!")?;
        render_recipe(out, name, book.get(name)?)?;
        Ok(Flow::Continue)
    }
}

/// Menu action 6: persist the book and leave the loop.
///
/// A failed save keeps the session alive: the in-memory book is still
/// good, and exiting would be the one way to actually lose it.
pub struct SaveAndExit;

impl MenuAction for SaveAndExit {
    fn label(&self) -> &'static str {
        "Save and exit"
    }

    fn run(
        &self,
        _input: &mut dyn LineSource,
        out: &mut dyn Write,
        book: &mut RecipeStore,
    ) -> Result<Flow> {
        match book.save() {
            Ok(()) => {
                writeln!(out, "\n✓ All recipes saved!")?;
                Ok(Flow::Exit)
            }
            Err(err) => {
                error!("{err}");
                writeln!(out, "\n⚠ {err}")?;
                writeln!(out, "Your recipes are still in memory; fix the problem and try again.")?;
                Ok(Flow::Continue)
            }
        }
    }
}
