//! Read-only operations over a [`RecipeStore`].
//!
//! Everything here is a linear scan or an index lookup; nothing mutates
//! the book. Note the deliberate ordering asymmetry: [`list_names`] sorts,
//! the search functions return store iteration order as-is.

use rand::seq::SliceRandom;

use crate::error::{RecipeError, Result};
use crate::store::RecipeStore;

/// All recipe names, sorted lexicographically ascending.
///
/// This is the order the numbered picklist is built in, so the same index
/// always lands on the same recipe for a given book.
pub fn list_names(book: &RecipeStore) -> Vec<String> {
    let mut names: Vec<String> = book.iter().map(|(name, _)| name.to_string()).collect();
    names.sort();
    names
}

/// Resolve a 1-based picklist answer against `names`.
///
/// Blank input means the user declined to pick: `Ok(None)`, not an error.
/// Anything else that is not an integer in `[1, names.len()]` is an
/// `InvalidSelection`.
pub fn resolve_index<'a, S: AsRef<str>>(names: &'a [S], raw: &str) -> Result<Option<&'a str>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let index: usize = raw.parse().map_err(|_| RecipeError::InvalidSelection)?;
    if index < 1 || index > names.len() {
        return Err(RecipeError::InvalidSelection);
    }
    Ok(Some(names[index - 1].as_ref()))
}

/// Case-insensitive substring search over recipe names.
pub fn search_by_name<'a>(book: &'a RecipeStore, term: &str) -> Result<Vec<&'a str>> {
    let needle = normalized_term(term)?;
    Ok(book
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&needle))
        .map(|(name, _)| name)
        .collect())
}

/// Case-insensitive substring search over ingredient lines.
///
/// A recipe is reported once no matter how many of its ingredients match;
/// the first hit stops the scan of that recipe.
pub fn search_by_ingredient<'a>(book: &'a RecipeStore, term: &str) -> Result<Vec<&'a str>> {
    let needle = normalized_term(term)?;
    Ok(book
        .iter()
        .filter(|(_, recipe)| {
            recipe
                .ingredients
                .iter()
                .any(|line| line.to_lowercase().contains(&needle))
        })
        .map(|(name, _)| name)
        .collect())
}

/// One name chosen uniformly from the whole book.
///
/// No seeding contract: two runs may (and usually will) differ.
pub fn random_recipe(book: &RecipeStore) -> Result<&str> {
    let names: Vec<&str> = book.iter().map(|(name, _)| name).collect();
    names
        .choose(&mut rand::thread_rng())
        .copied()
        .ok_or(RecipeError::EmptyStore)
}

fn normalized_term(term: &str) -> Result<String> {
    let term = term.trim();
    if term.is_empty() {
        return Err(RecipeError::InvalidInput(
            "search term can't be empty".into(),
        ));
    }
    Ok(term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;

    fn sample_book() -> RecipeStore {
        let mut book = RecipeStore::new("unused.json");
        book.upsert(
            "Pasta",
            Recipe::new(
                "2",
                vec!["1 cup flour".into(), "2 eggs".into()],
                vec!["Mix".into(), "Boil".into()],
            ),
        )
        .unwrap();
        book.upsert(
            "Omelette",
            Recipe::new(
                "1",
                vec!["3 eggs".into(), "butter".into()],
                vec!["Beat".into(), "Fry".into()],
            ),
        )
        .unwrap();
        book.upsert(
            "Bread",
            Recipe::new(
                "8",
                vec!["flour".into(), "water".into(), "yeast".into()],
                vec!["Knead".into(), "Bake".into()],
            ),
        )
        .unwrap();
        book
    }

    #[test]
    fn test_list_names_is_sorted() {
        let book = sample_book();
        assert_eq!(list_names(&book), vec!["Bread", "Omelette", "Pasta"]);
    }

    #[test]
    fn test_resolve_index_maps_whole_range() {
        let names = ["Bread", "Omelette", "Pasta"];
        assert_eq!(resolve_index(&names, "1").unwrap(), Some("Bread"));
        assert_eq!(resolve_index(&names, "3").unwrap(), Some("Pasta"));
    }

    #[test]
    fn test_resolve_index_blank_is_no_selection() {
        let names = ["Bread"];
        assert_eq!(resolve_index(&names, "").unwrap(), None);
        assert_eq!(resolve_index(&names, "   ").unwrap(), None);
    }

    #[test]
    fn test_resolve_index_rejects_out_of_range() {
        let names = ["Bread", "Omelette"];
        assert!(matches!(
            resolve_index(&names, "0"),
            Err(RecipeError::InvalidSelection)
        ));
        assert!(matches!(
            resolve_index(&names, "3"),
            Err(RecipeError::InvalidSelection)
        ));
    }

    #[test]
    fn test_resolve_index_rejects_non_integers() {
        let names = ["Bread"];
        for raw in ["abc", "1.5", "-1", "one"] {
            assert!(matches!(
                resolve_index(&names, raw),
                Err(RecipeError::InvalidSelection)
            ));
        }
    }

    #[test]
    fn test_search_by_name_is_case_insensitive() {
        let book = sample_book();
        assert_eq!(search_by_name(&book, "pAsTa").unwrap(), vec!["Pasta"]);

        // Iteration order is unspecified, so compare sorted.
        let mut hits = search_by_name(&book, "e").unwrap();
        hits.sort();
        assert_eq!(hits, vec!["Bread", "Omelette"]);
    }

    #[test]
    fn test_search_by_name_without_match_is_empty() {
        let book = sample_book();
        assert!(search_by_name(&book, "zzz").unwrap().is_empty());
    }

    #[test]
    fn test_search_rejects_blank_term() {
        let book = sample_book();
        assert!(matches!(
            search_by_name(&book, "   "),
            Err(RecipeError::InvalidInput(_))
        ));
        assert!(matches!(
            search_by_ingredient(&book, ""),
            Err(RecipeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_search_by_ingredient_scans_all_lines() {
        let book = sample_book();
        let mut hits = search_by_ingredient(&book, "EGG").unwrap();
        hits.sort();
        assert_eq!(hits, vec!["Omelette", "Pasta"]);
    }

    #[test]
    fn test_search_by_ingredient_reports_each_recipe_once() {
        let mut book = sample_book();
        book.upsert(
            "Custard",
            Recipe::new(
                "4",
                vec!["4 egg yolks".into(), "2 egg whites".into(), "milk".into()],
                vec!["Whisk".into()],
            ),
        )
        .unwrap();

        let hits = search_by_ingredient(&book, "egg").unwrap();
        let custard_hits = hits.iter().filter(|&name| *name == "Custard").count();
        assert_eq!(custard_hits, 1);
    }

    #[test]
    fn test_random_recipe_stays_in_the_book() {
        let book = sample_book();
        for _ in 0..20 {
            let name = random_recipe(&book).unwrap();
            assert!(book.contains(name));
        }
    }

    #[test]
    fn test_random_recipe_on_empty_book() {
        let book = RecipeStore::new("unused.json");
        assert!(matches!(
            random_recipe(&book),
            Err(RecipeError::EmptyStore)
        ));
    }

    #[test]
    fn test_single_recipe_scenario() {
        let mut book = RecipeStore::new("unused.json");
        let pasta = Recipe::new(
            "2",
            vec!["1 cup flour".into(), "2 eggs".into()],
            vec!["Mix".into(), "Boil".into()],
        );
        book.upsert("Pasta", pasta.clone()).unwrap();

        assert_eq!(list_names(&book), vec!["Pasta"]);
        assert_eq!(search_by_ingredient(&book, "egg").unwrap(), vec!["Pasta"]);
        assert!(search_by_name(&book, "zzz").unwrap().is_empty());
        assert_eq!(book.get("Pasta").unwrap(), &pasta);
        assert!(matches!(
            book.get("Soup"),
            Err(RecipeError::NotFound(_))
        ));
    }
}
