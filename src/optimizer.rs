//! Optimizer
//!
//! The entry point: a pure function of the cart and the three catalogs.
//! Deals are generated, the cheapest exact cover is searched for, and the
//! winning cover is reported alongside bounded upgrade offers.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError, OrderLine},
    catalog::{Coupon, MenuCatalog, Promotion, catalog_prices},
    config::OptimizerConfig,
    deals::{DealCatalog, DealContext},
    prices::{PriceError, ensure_currency},
    receipt::{self, BundleOption, ReceiptError},
    solvers::{BranchAndBoundSolver, Solver, SolverError},
    upgrades,
};

/// Errors that can occur while optimizing a cart.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// A catalog price is in a different currency from the cart.
    #[error("catalog price in {actual}, but cart is in {expected}")]
    CurrencyMismatch {
        /// Cart currency
        expected: &'static str,

        /// Catalog price currency
        actual: &'static str,
    },

    /// Wrapped cart construction error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Wrapped price calculation error.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Wrapped solver error.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Wrapped receipt error.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Outcome of optimizing one cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization<'a> {
    /// Options worth showing: the best exact cover when it uses a deal,
    /// followed by bounded upgrades
    pub options: Vec<BundleOption<'a>>,

    /// Every line at its unit price
    pub baseline: Money<'a, Currency>,

    /// Price of the cheapest exact cover
    pub best: Money<'a, Currency>,

    /// Search nodes visited
    pub nodes: u64,

    /// Whether the search budget ran out
    pub exhausted: bool,
}

/// Finds the cheapest way to pay for carts against fixed catalogs.
#[derive(Debug, Clone)]
pub struct Optimizer<'c, 'a> {
    menu: &'c MenuCatalog<'a>,
    promotions: &'c [Promotion<'a>],
    coupons: &'c [Coupon<'a>],
    config: OptimizerConfig,
}

impl<'c, 'a> Optimizer<'c, 'a> {
    /// Create an optimizer with the default configuration.
    pub fn new(
        menu: &'c MenuCatalog<'a>,
        promotions: &'c [Promotion<'a>],
        coupons: &'c [Coupon<'a>],
    ) -> Self {
        Self {
            menu,
            promotions,
            coupons,
            config: OptimizerConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimize a cart.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::CurrencyMismatch`] if any catalog price is not
    /// in the cart's currency, or a wrapped error if the search or result
    /// assembly fails.
    #[tracing::instrument(skip_all, fields(lines = cart.len()))]
    pub fn optimize(&self, cart: &Cart<'a>) -> Result<Optimization<'a>, OptimizeError> {
        self.ensure_currency(cart.currency())?;

        let ctx = DealContext {
            cart,
            menu: self.menu,
            promotions: self.promotions,
            coupons: self.coupons,
        };

        let catalog = DealCatalog::build(&ctx);
        let solver = BranchAndBoundSolver::new(self.config.budget());
        let result = solver.solve(&catalog, &cart.quantities())?;

        let mut options = Vec::new();

        let chosen = result
            .covers
            .iter()
            .find(|cover| receipt::uses_promotion(cover, &catalog));

        if let Some(cover) = chosen {
            options.push(receipt::summarize_cover(cover, &catalog, cart)?);
        }

        for candidate in upgrades::suggest(&ctx, &self.config) {
            if candidate.within_bounds(result.cost_minor, &self.config)? {
                options.push(candidate.option);
            }
        }

        receipt::dedup(&mut options);

        debug!(
            deals = catalog.len(),
            options = options.len(),
            best = result.cost_minor,
            "optimized cart"
        );

        Ok(Optimization {
            options,
            baseline: cart.subtotal(),
            best: Money::from_minor(result.cost_minor, cart.currency()),
            nodes: result.nodes,
            exhausted: result.exhausted,
        })
    }

    /// Build a cart in `currency` from `lines` and optimize it.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::Cart`] if the lines do not form a valid cart,
    /// otherwise as [`Optimizer::optimize`].
    pub fn optimize_lines(
        &self,
        lines: impl Into<Vec<OrderLine<'a>>>,
        currency: &'static Currency,
    ) -> Result<Optimization<'a>, OptimizeError> {
        let cart = Cart::with_lines(lines, currency)?;

        self.optimize(&cart)
    }

    fn ensure_currency(&self, currency: &'static Currency) -> Result<(), OptimizeError> {
        for price in catalog_prices(self.menu, self.promotions, self.coupons) {
            ensure_currency(price, currency).map_err(|err| match err {
                MoneyError::CurrencyMismatch { expected, actual } => {
                    OptimizeError::CurrencyMismatch { expected, actual }
                }
                other => OptimizeError::Money(other),
            })?;
        }

        Ok(())
    }
}
