//! Mealdeal prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, OrderLine},
    catalog::{
        BundleCoupon, BundleSlot, BuyAGetBFreePromotion, ComboTier, Coupon, GroupItem,
        MenuCatalog, MenuCategory, MenuItem, PickOnePromotion, Promotion, TierSlot, TierSlotKind,
        TwoForOneCoupon,
    },
    config::{ConfigError, OptimizerConfig},
    deals::{Deal, DealCatalog, DealContext, DealFamily, Strategy},
    fixtures::{Fixture, FixtureError},
    optimizer::{Optimization, OptimizeError, Optimizer},
    receipt::{BundleOption, ReceiptError},
    solvers::{
        BranchAndBoundSolver, Cover, NoopObserver, SearchBudget, SearchObserver, Solver,
        SolverError, SolverResult,
    },
    upgrades::UpgradeCandidate,
};
