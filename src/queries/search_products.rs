use crate::error::Result;
use crate::models::product::Product;
use mediator::{Request, RequestHandler};
use crate::services::product_store::{lock_store, SharedProductStore};

/// Products whose name matches `name_pattern` and whose price is strictly
/// below `price_below`.
#[derive(Debug, Clone)]
pub struct SearchProductsRequest {
    pub name_pattern: String,
    pub price_below: f64,
}

impl Request<Result<Vec<Product>>> for SearchProductsRequest {}

pub struct SearchProductsRequestHandler(pub SharedProductStore);
impl RequestHandler<SearchProductsRequest, Result<Vec<Product>>> for SearchProductsRequestHandler {
    fn handle(&mut self, req: SearchProductsRequest) -> Result<Vec<Product>> {
        let pattern = NamePattern::new(&req.name_pattern);
        let products = lock_store(&self.0)?
            .find_where(&|p: &Product| pattern.matches(&p.name) && p.price < req.price_below)?;

        log::debug!(
            "Search for '{}' below {} matched {} products",
            req.name_pattern,
            req.price_below,
            products.len()
        );
        Ok(products)
    }
}

/// Case-insensitive name pattern. `%` matches any run of characters and `_`
/// exactly one, as in SQL `LIKE`. Without wildcards the pattern matches
/// anywhere in the name.
#[derive(Debug, Clone)]
pub struct NamePattern {
    chars: Vec<char>,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Self {
        let lowered = pattern.to_lowercase();
        let has_wildcards = lowered.contains(|c: char| c == '%' || c == '_');

        let chars = if has_wildcards {
            lowered.chars().collect()
        } else {
            std::iter::once('%')
                .chain(lowered.chars())
                .chain(std::iter::once('%'))
                .collect()
        };

        NamePattern { chars }
    }

    pub fn matches(&self, name: &str) -> bool {
        let text: Vec<char> = name.to_lowercase().chars().collect();
        let pattern = &self.chars;

        let (mut p, mut t) = (0, 0);
        // Position of the last `%` seen and the text index it is resumed from.
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
                p += 1;
                t += 1;
            } else if p < pattern.len() && pattern[p] == '%' {
                backtrack = Some((p, t));
                p += 1;
            } else if let Some((star, resume)) = backtrack {
                p = star + 1;
                t = resume + 1;
                backtrack = Some((star, resume + 1));
            } else {
                return false;
            }
        }

        pattern[p..].iter().all(|&c| c == '%')
    }
}
