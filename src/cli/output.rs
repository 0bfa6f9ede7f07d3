// File: src/cli/output.rs
use crate::model::{MealDetails, Rankable, SimilarRecipe, User};
use crate::store::{self, FilterOptions};

/// Rank `items` against the pantry and print one line per recipe.
pub fn print_ranked<R: Rankable + Clone>(
    items: &[R],
    search: &str,
    pantry: &[String],
    limit: Option<usize>,
) {
    let ranked = store::filter_and_rank(
        items,
        FilterOptions {
            search_term: search,
            pantry,
        },
    );
    if ranked.is_empty() {
        println!("No recipes found.");
        return;
    }
    for recipe in ranked.iter().take(limit.unwrap_or(usize::MAX)) {
        if pantry.is_empty() {
            println!("{:>8}  {}", recipe.id(), recipe.title());
        } else {
            let summary = store::match_summary(recipe, pantry);
            println!(
                "{:>8}  {}  ({}/{} ingredients, {}%)",
                recipe.id(),
                recipe.title(),
                summary.matched,
                summary.total,
                summary.percentage
            );
        }
    }
}

pub fn print_details(meal: &MealDetails, pantry: &[String]) {
    println!("{} [{}]", meal.name, meal.id);
    println!("{} / {}", meal.category, meal.area);
    if !meal.tags.is_empty() {
        println!("Tags: {}", meal.tags.join(", "));
    }
    println!();
    println!("Ingredients:");
    for ing in &meal.ingredients {
        let mark = if store::ingredient_matches(&ing.name, pantry) {
            "*"
        } else {
            " "
        };
        println!(" {} {} {}", mark, ing.measure, ing.name);
    }
    println!();
    for (i, step) in meal.steps().iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    if let Some(url) = &meal.youtube_url {
        println!();
        println!("Video: {}", url);
    }
}

pub fn print_similar(items: &[SimilarRecipe]) {
    if items.is_empty() {
        println!("No similar recipes.");
    }
    for r in items {
        println!(
            "{:>8}  {} ({} min, serves {})",
            r.id, r.title, r.ready_in_minutes, r.servings
        );
    }
}

pub fn print_user(user: Option<&User>) {
    match user {
        Some(u) if u.name.is_empty() => println!("Signed in as {} ({})", u.email, u.uid),
        Some(u) => println!("Signed in as {} <{}> ({})", u.name, u.email, u.uid),
        None => println!("Not signed in."),
    }
}
