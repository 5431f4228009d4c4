//! Receipt
//!
//! Turns a winning cover into a customer-facing option and renders option
//! lists as a table.

use std::{collections::BTreeMap, io};

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, OrderLine},
    deals::{DealCatalog, Strategy},
    prices::times,
    solvers::Cover,
};

/// Label of a cover that uses no promotional deal.
pub const DEFAULT_LABEL: &str = "All à la carte";

/// Errors that can occur when building or rendering options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    /// A cover referenced a deal the catalog does not hold.
    #[error("Missing deal {0}")]
    MissingDeal(usize),

    /// A deal referenced a line the cart does not hold.
    #[error("Missing order line {0}")]
    MissingLine(usize),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One way to pay for the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleOption<'a> {
    /// Summary of the deals used
    pub label: String,

    /// Amount paid
    pub total: Money<'a, Currency>,

    /// What to order, in order
    pub steps: Vec<String>,

    /// Items received that were not in the cart
    pub extras: Option<String>,

    /// Whether the option adds items beyond the cart
    pub is_upgrade: bool,

    /// Whether the same buy-A-get-B-free pairing is used more than once, so the
    /// order has to be split across transactions
    pub needs_split: bool,
}

impl BundleOption<'_> {
    /// Key used to drop repeated options.
    fn dedup_key(&self) -> (i64, &str) {
        (self.total.to_minor_units(), self.label.as_str())
    }
}

/// Summarize a cover.
///
/// Single-item purchases are merged per line and listed after the
/// promotional steps. Repeated deal labels are counted.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the cover references a deal or line that does
/// not exist.
pub fn summarize_cover<'a>(
    cover: &Cover,
    catalog: &DealCatalog<'a>,
    cart: &Cart<'a>,
) -> Result<BundleOption<'a>, ReceiptError> {
    let mut singles: BTreeMap<usize, u32> = BTreeMap::new();
    let mut labels: Vec<(&str, u32)> = Vec::new();
    let mut pairings: FxHashMap<(usize, usize), u32> = FxHashMap::default();
    let mut steps = Vec::new();
    let mut extras = Vec::new();
    let mut has_upgrade = false;
    let mut total = 0_i64;

    for &idx in cover.deals() {
        let deal = catalog.get(idx).ok_or(ReceiptError::MissingDeal(idx))?;

        total += deal.cost.to_minor_units();

        if let Strategy::Single { line } = deal.strategy {
            *singles.entry(line).or_default() += 1;
            continue;
        }

        if let Strategy::BuyAGetBFree { a, b } = deal.strategy {
            *pairings.entry((a, b)).or_default() += 1;
        }

        match labels.iter_mut().find(|(label, _)| *label == deal.label) {
            Some((_, count)) => *count += 1,
            None => labels.push((deal.label.as_str(), 1)),
        }

        steps.extend(deal.steps.iter().cloned());
        extras.extend(deal.extras.iter().cloned());
        has_upgrade |= deal.is_upgrade;
    }

    for (line, count) in singles {
        let item = cart.get(line).ok_or(ReceiptError::MissingLine(line))?;

        steps.push(single_step(item, count));
    }

    let label = if labels.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        labels
            .iter()
            .map(|(label, count)| match count {
                1 => (*label).to_string(),
                n => format!("{label} ×{n}"),
            })
            .collect::<Vec<_>>()
            .join(" + ")
    };

    let extras = (!extras.is_empty()).then(|| extras.join(", "));

    Ok(BundleOption {
        label,
        total: Money::from_minor(total, cart.currency()),
        steps,
        is_upgrade: has_upgrade && extras.is_some(),
        extras,
        needs_split: pairings.values().any(|count| *count > 1),
    })
}

/// Step text for `count` units of a line bought on their own.
pub(crate) fn single_step(line: &OrderLine<'_>, count: u32) -> String {
    format!("{} ×{count} — {}", line.name(), times(line.price(), count))
}

/// Whether a cover buys anything through a promotional deal.
pub fn uses_promotion(cover: &Cover, catalog: &DealCatalog<'_>) -> bool {
    cover
        .deals()
        .iter()
        .filter_map(|idx| catalog.get(*idx))
        .any(|deal| !deal.strategy.is_single())
}

/// Drop every option whose label and total repeat an earlier option.
pub fn dedup(options: &mut Vec<BundleOption<'_>>) {
    let mut seen: FxHashSet<(i64, String)> = FxHashSet::default();

    options.retain(|option| {
        let (total, label) = option.dedup_key();
        seen.insert((total, label.to_string()))
    });
}

/// Render options as a table.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the table cannot be written.
pub fn write_options(
    mut out: impl io::Write,
    options: &[BundleOption<'_>],
    baseline: Money<'_, Currency>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Option", "Total", "Steps", "Extras", "Notes"]);

    for (idx, option) in options.iter().enumerate() {
        let mut notes = Vec::new();

        if option.is_upgrade {
            notes.push("upgrade");
        }

        if option.needs_split {
            notes.push("split order");
        }

        builder.push_record([
            (idx + 1).to_string(),
            option.label.clone(),
            option.total.to_string(),
            option.steps.join("\n"),
            option.extras.clone().unwrap_or_default(),
            notes.join(", "),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..3), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;
    writeln!(out, "À la carte: {baseline}").map_err(|_err| ReceiptError::IO)?;

    Ok(())
}
