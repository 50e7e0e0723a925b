//! Plain-text rendering of view models.

use std::fmt;

use super::viewmodel::{BodyView, CardView, FormView, PageView, PaginationView, ViewModel};
use crate::domain::{LowStockReport, Product, SearchResults, StockLevel};

const RULE: &str = "------------------------------------------------------------";

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "Loading products..."),
            Self::Page(page) => fmt::Display::fmt(page, f),
        }
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{}  ({})", self.header.title, self.header.summary)?;
        if let Some(error) = &self.error_banner {
            writeln!(f, "[!] {error}  (type `dismiss` to hide)")?;
        }

        let filters = &self.filters;
        write!(
            f,
            "Filters: search={:?} min={} max={} in-stock={} sort={}",
            filters.search,
            dash_if_empty(&filters.min_price),
            dash_if_empty(&filters.max_price),
            if filters.in_stock { "on" } else { "off" },
            filters.sort_label,
        )?;
        if filters.show_clear {
            write!(f, "  [clear]")?;
        }
        writeln!(f)?;

        if self.refreshing {
            writeln!(f, "Searching...")?;
        }

        match &self.body {
            BodyView::Grid { cards, pagination } => {
                for card in cards {
                    fmt::Display::fmt(card, f)?;
                }
                if let Some(pagination) = pagination {
                    fmt::Display::fmt(pagination, f)?;
                }
            }
            BodyView::Empty(empty) => {
                writeln!(f, "{}", empty.message)?;
                writeln!(f, "{}", empty.hint)?;
                if empty.offer_create {
                    writeln!(f, "Type `new` to add your first product.")?;
                }
            }
        }

        if let Some(form) = &self.form {
            fmt::Display::fmt(form, f)?;
        }
        Ok(())
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "#{:<5} {:<30} {:>10}  {} {}",
            self.id,
            self.name,
            self.price,
            stock_marker(self.stock_level),
            self.stock_text
        )?;
        if !self.description.is_empty() {
            writeln!(f, "       {}", self.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for PaginationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;
        write!(f, "{}", if self.previous_enabled { "< prev" } else { "  ----" })?;
        for page in &self.pages {
            if page.current {
                write!(f, " [{}]", page.number)?;
            } else {
                write!(f, " {}", page.number)?;
            }
        }
        writeln!(f, " {}", if self.next_enabled { "next >" } else { "----" })
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for (field, value) in &self.fields {
            writeln!(f, "  {field:<12} {value}")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "  ! {error}")?;
        }
        if self.busy {
            writeln!(f, "  Saving...")
        } else {
            writeln!(f, "  (`set <field> <value>`, `submit`, `cancel`)")
        }
    }
}

/// Full detail of one product.
#[derive(Debug)]
pub struct ProductDetail<'a>(pub &'a Product);

impl fmt::Display for ProductDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let product = self.0;
        writeln!(f, "#{} {}", product.id, product.name)?;
        writeln!(f, "  price:       ${}", product.price)?;
        writeln!(f, "  stock:       {}", product.stock)?;
        writeln!(f, "  description: {}", product.description)?;
        writeln!(f, "  created:     {}", product.created_at.to_rfc3339())?;
        writeln!(f, "  updated:     {}", product.updated_at.to_rfc3339())
    }
}

/// Results of a quick search.
#[derive(Debug)]
pub struct SearchResultsView<'a>(pub &'a SearchResults);

impl fmt::Display for SearchResultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let results = self.0;
        writeln!(f, "{} match(es) for {:?}", results.count, results.query)?;
        for product in &results.products {
            fmt::Display::fmt(&CardView::from(product), f)?;
        }
        Ok(())
    }
}

/// Low-stock report.
#[derive(Debug)]
pub struct LowStockView<'a>(pub &'a LowStockReport);

impl fmt::Display for LowStockView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(
            f,
            "{} product(s) at or below {} in stock",
            report.count, report.threshold
        )?;
        for product in &report.products {
            fmt::Display::fmt(&CardView::from(product), f)?;
        }
        Ok(())
    }
}

const fn stock_marker(level: StockLevel) -> &'static str {
    match level {
        StockLevel::InStock => "+",
        StockLevel::Low => "~",
        StockLevel::OutOfStock => "x",
    }
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
