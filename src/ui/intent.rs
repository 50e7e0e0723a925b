//! User intents parsed from command lines.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::form::{FormError, FormField};
use crate::domain::{ProductId, SortBy};

/// Command reference printed by `help`.
pub const HELP: &str = "\
Filters:    search <text> | min <price|-> | max <price|-> | in-stock on|off
            sort price_asc|price_desc|name|newest|default | clear
Pages:      page <n> | next | prev | refresh
Products:   new | edit <id> | delete <id> | show <id>
Form:       set name|price|description|stock <value> | submit | cancel
Lookups:    find <text> | low-stock [threshold]
Other:      dismiss | help | quit";

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Set (or clear, with `None`) the search text.
    Search(Option<String>),
    /// Set or clear the lower price bound.
    MinPrice(Option<Decimal>),
    /// Set or clear the upper price bound.
    MaxPrice(Option<Decimal>),
    /// Toggle the in-stock-only filter.
    InStock(bool),
    /// Set or clear the sort order.
    Sort(Option<SortBy>),
    /// Reset every filter.
    ClearFilters,
    /// Jump to a page.
    Page(u64),
    /// Next page.
    NextPage,
    /// Previous page.
    PreviousPage,
    /// Re-fetch the current page.
    Refresh,
    /// Open the form for a new product.
    New,
    /// Open the form pre-filled with a product from the current page.
    Edit(ProductId),
    /// Change a form field.
    Set(FormField, String),
    /// Submit the open form.
    Submit,
    /// Close the form without saving.
    Cancel,
    /// Delete a product.
    Delete(ProductId),
    /// Hide the error banner.
    DismissError,
    /// Show a single product by id.
    Show(ProductId),
    /// Quick text search outside the paginated listing.
    Find(String),
    /// Low-stock report.
    LowStock(Option<u32>),
    /// Print the command reference.
    Help,
    /// Leave the session.
    Quit,
}

/// Why a command line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    /// First word is not a known command.
    #[error("unknown command {0:?}; type `help` for the list")]
    UnknownCommand(String),
    /// Command needs an argument that was not given.
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    /// Argument could not be parsed.
    #[error("invalid argument for `{command}`: {value:?}")]
    InvalidArgument {
        /// Command being parsed.
        command: &'static str,
        /// Offending argument.
        value: String,
    },
    /// `set` named an unknown form field.
    #[error(transparent)]
    Form(#[from] FormError),
}

impl FromStr for Intent {
    type Err = IntentError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, rest)| (command, rest.trim()));

        match command {
            "search" => Ok(Self::Search(optional_text(rest))),
            "min" => optional_price("min", rest).map(Self::MinPrice),
            "max" => optional_price("max", rest).map(Self::MaxPrice),
            "in-stock" => match rest {
                "on" | "yes" | "true" => Ok(Self::InStock(true)),
                "off" | "no" | "false" => Ok(Self::InStock(false)),
                "" => Err(IntentError::MissingArgument("in-stock")),
                other => Err(invalid("in-stock", other)),
            },
            "sort" => match rest {
                "" => Err(IntentError::MissingArgument("sort")),
                "default" | "-" => Ok(Self::Sort(None)),
                key => key
                    .parse()
                    .map(|key| Self::Sort(Some(key)))
                    .map_err(|_| invalid("sort", key)),
            },
            "clear" => Ok(Self::ClearFilters),
            "page" => number("page", rest).map(Self::Page),
            "next" => Ok(Self::NextPage),
            "prev" | "previous" => Ok(Self::PreviousPage),
            "refresh" => Ok(Self::Refresh),
            "new" => Ok(Self::New),
            "edit" => product_id("edit", rest).map(Self::Edit),
            "delete" => product_id("delete", rest).map(Self::Delete),
            "show" => product_id("show", rest).map(Self::Show),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, value)| (field, value.trim()));
                if field.is_empty() {
                    return Err(IntentError::MissingArgument("set"));
                }
                Ok(Self::Set(field.parse()?, value.to_string()))
            }
            "submit" | "save" => Ok(Self::Submit),
            "cancel" => Ok(Self::Cancel),
            "dismiss" => Ok(Self::DismissError),
            "find" => optional_text(rest)
                .map(Self::Find)
                .ok_or(IntentError::MissingArgument("find")),
            "low-stock" => {
                if rest.is_empty() {
                    Ok(Self::LowStock(None))
                } else {
                    rest.parse()
                        .map(|threshold| Self::LowStock(Some(threshold)))
                        .map_err(|_| invalid("low-stock", rest))
                }
            }
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(IntentError::UnknownCommand(other.to_string())),
        }
    }
}

fn invalid(command: &'static str, value: &str) -> IntentError {
    IntentError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

fn optional_text(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

fn optional_price(command: &'static str, rest: &str) -> Result<Option<Decimal>, IntentError> {
    match rest {
        "" | "-" => Ok(None),
        value => {
            let price = Decimal::from_str(value).map_err(|_| invalid(command, value))?;
            if price < Decimal::ZERO {
                return Err(invalid(command, value));
            }
            Ok(Some(price))
        }
    }
}

fn number(command: &'static str, rest: &str) -> Result<u64, IntentError> {
    if rest.is_empty() {
        return Err(IntentError::MissingArgument(command));
    }
    rest.parse().map_err(|_| invalid(command, rest))
}

fn product_id(command: &'static str, rest: &str) -> Result<ProductId, IntentError> {
    number(command, rest).map(ProductId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Intent, IntentError> {
        line.parse()
    }

    #[test]
    fn filter_commands() {
        assert_eq!(parse("search red chair"), Ok(Intent::Search(Some("red chair".to_string()))));
        assert_eq!(parse("search"), Ok(Intent::Search(None)));
        assert_eq!(parse("min 10.5"), Ok(Intent::MinPrice(Some(Decimal::new(105, 1)))));
        assert_eq!(parse("max -"), Ok(Intent::MaxPrice(None)));
        assert_eq!(parse("in-stock on"), Ok(Intent::InStock(true)));
        assert_eq!(parse("sort newest"), Ok(Intent::Sort(Some(SortBy::Newest))));
        assert_eq!(parse("sort default"), Ok(Intent::Sort(None)));
        assert_eq!(parse("  clear  "), Ok(Intent::ClearFilters));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(parse("min -5"), Err(IntentError::InvalidArgument { .. })));
        assert!(matches!(parse("sort cheapest"), Err(IntentError::InvalidArgument { .. })));
        assert_eq!(parse("page"), Err(IntentError::MissingArgument("page")));
        assert!(matches!(parse("edit x"), Err(IntentError::InvalidArgument { .. })));
        assert!(matches!(parse("set colour red"), Err(IntentError::Form(_))));
        assert!(matches!(parse("frobnicate"), Err(IntentError::UnknownCommand(_))));
    }

    #[test]
    fn product_and_form_commands() {
        assert_eq!(parse("edit 12"), Ok(Intent::Edit(ProductId::new(12))));
        assert_eq!(parse("delete 3"), Ok(Intent::Delete(ProductId::new(3))));
        assert_eq!(
            parse("set description  A  very nice lamp"),
            Ok(Intent::Set(FormField::Description, "A  very nice lamp".to_string()))
        );
        assert_eq!(parse("set name"), Ok(Intent::Set(FormField::Name, String::new())));
        assert_eq!(parse("low-stock 5"), Ok(Intent::LowStock(Some(5))));
        assert_eq!(parse("low-stock"), Ok(Intent::LowStock(None)));
        assert_eq!(parse("find lamp"), Ok(Intent::Find("lamp".to_string())));
        assert_eq!(parse("q"), Ok(Intent::Quit));
    }
}
