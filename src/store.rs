use crate::model::Rankable;
use std::cmp::Ordering;

pub struct FilterOptions<'a> {
    pub search_term: &'a str,
    pub pantry: &'a [String],
}

/// How well a single recipe is covered by the pantry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub matched: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Case-insensitive containment in either direction against any pantry entry.
/// Blank ingredients and blank pantry entries never match.
pub fn ingredient_matches(ingredient: &str, pantry: &[String]) -> bool {
    let ing = ingredient.trim().to_lowercase();
    if ing.is_empty() {
        return false;
    }
    pantry.iter().any(|entry| {
        let p = entry.trim().to_lowercase();
        !p.is_empty() && (ing.contains(&p) || p.contains(&ing))
    })
}

fn lower_pantry(pantry: &[String]) -> Vec<String> {
    pantry
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

// Same rule as `ingredient_matches`, against a pantry already lowercased.
fn matches_lowered(ingredient: &str, pantry: &[String]) -> bool {
    let ing = ingredient.trim().to_lowercase();
    !ing.is_empty() && pantry.iter().any(|p| ing.contains(p) || p.contains(&ing))
}

pub fn match_count<R: Rankable + ?Sized>(recipe: &R, pantry: &[String]) -> usize {
    let lowered = lower_pantry(pantry);
    recipe
        .ingredient_names()
        .into_iter()
        .filter(|ing| matches_lowered(ing, &lowered))
        .count()
}

pub fn match_summary<R: Rankable + ?Sized>(recipe: &R, pantry: &[String]) -> MatchSummary {
    let total = recipe
        .ingredient_names()
        .into_iter()
        .filter(|i| !i.trim().is_empty())
        .count();
    let matched = match_count(recipe, pantry);
    let percentage = if total > 0 {
        (matched * 100 / total) as u32
    } else {
        0
    };
    MatchSummary {
        matched,
        total,
        percentage,
    }
}

/// Title or any ingredient contains the query, ignoring case. Blank queries match everything.
pub fn matches_query<R: Rankable + ?Sized>(recipe: &R, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    recipe.title().to_lowercase().contains(&q)
        || recipe
            .ingredient_names()
            .into_iter()
            .any(|i| i.to_lowercase().contains(&q))
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Query filter first, then (only with a non-empty pantry) a stable sort by
/// descending match count with ties broken by title.
pub fn filter_and_rank<R: Rankable + Clone>(recipes: &[R], options: FilterOptions) -> Vec<R> {
    let filtered: Vec<&R> = recipes
        .iter()
        .filter(|r| matches_query(*r, options.search_term))
        .collect();

    let lowered = lower_pantry(options.pantry);
    if lowered.is_empty() {
        return filtered.into_iter().cloned().collect();
    }

    let mut scored: Vec<(usize, &R)> = filtered
        .into_iter()
        .map(|r| {
            let count = r
                .ingredient_names()
                .into_iter()
                .filter(|ing| matches_lowered(ing, &lowered))
                .count();
            (count, r)
        })
        .collect();

    scored.sort_by(|(ca, a), (cb, b)| {
        cb.cmp(ca)
            .then_with(|| compare_titles(a.title(), b.title()))
    });

    scored.into_iter().map(|(_, r)| r.clone()).collect()
}
