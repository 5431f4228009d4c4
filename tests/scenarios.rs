//! Integration tests for the shipped scenario carts

use rusty_money::{Money, iso::TWD};
use testresult::TestResult;

use mealdeal::{config::OptimizerConfig, fixtures::Fixture};

fn twd(major: i64) -> Money<'static, rusty_money::iso::Currency> {
    Money::from_major(major, TWD)
}

#[test]
fn combo_meal_is_bought_as_a_combo() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let optimization = fixture.optimizer().optimize(fixture.cart("combo_meal")?)?;

    assert_eq!(optimization.baseline, twd(155));
    assert_eq!(optimization.best, twd(109));
    assert!(!optimization.exhausted);
    assert_eq!(optimization.options.len(), 1);

    let option = optimization.options.first().ok_or("missing option")?;

    assert_eq!(option.label, "漢堡 A combo");
    assert_eq!(option.total, twd(109));
    assert!(!option.is_upgrade);
    assert!(option.extras.is_none());
    assert!(!option.needs_split);

    Ok(())
}

#[test]
fn nugget_pair_uses_two_for_one_coupon() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let optimization = fixture
        .optimizer()
        .optimize(fixture.cart("nuggets_pair")?)?;

    assert_eq!(optimization.baseline, twd(138));
    assert_eq!(optimization.best, twd(89));

    let option = optimization.options.first().ok_or("missing option")?;

    assert_eq!(option.label, "麥克雞塊買一送一 (A03)");
    assert_eq!(option.total, twd(89));
    assert_eq!(option.steps.len(), 1);

    Ok(())
}

#[test]
fn small_colas_have_nothing_better() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let optimization = fixture.optimizer().optimize(fixture.cart("small_colas")?)?;

    assert!(optimization.options.is_empty());
    assert_eq!(optimization.baseline, twd(50));
    assert_eq!(optimization.best, twd(50));

    Ok(())
}

#[test]
fn lone_burger_is_offered_the_combo_as_an_upgrade() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let optimization = fixture
        .optimizer()
        .optimize(fixture.cart("burger_alone")?)?;

    assert_eq!(optimization.best, twd(75));
    assert_eq!(optimization.options.len(), 1);

    let option = optimization.options.first().ok_or("missing option")?;

    assert_eq!(option.label, "漢堡 A combo");
    assert_eq!(option.total, twd(109));
    assert!(option.is_upgrade);
    assert_eq!(option.extras.as_deref(), Some("中薯, 38元飲品"));

    Ok(())
}

#[test]
fn single_nugget_box_is_offered_a_second_unit() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let optimization = fixture
        .optimizer()
        .optimize(fixture.cart("nuggets_single")?)?;

    assert_eq!(optimization.best, twd(69));

    let option = optimization.options.first().ok_or("missing option")?;

    assert_eq!(option.label, "麥克雞塊買一送一 (A03)");
    assert_eq!(option.total, twd(89));
    assert!(option.is_upgrade);
    assert_eq!(option.extras.as_deref(), Some("麥克雞塊(6塊) ×1"));

    Ok(())
}

#[test]
fn zero_threshold_suppresses_upgrades() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let config = OptimizerConfig::from_yaml_str("upgrade_floor: 0\nupgrade_ratio: 0%\n")?;
    let optimizer = fixture.optimizer().with_config(config);

    for cart in ["burger_alone", "nuggets_single"] {
        let optimization = optimizer.optimize(fixture.cart(cart)?)?;

        assert!(optimization.options.is_empty(), "{cart} kept an upgrade");
    }

    Ok(())
}

#[test]
fn optimizing_twice_gives_the_same_answer() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let optimizer = fixture.optimizer();

    for named in fixture.carts() {
        let first = optimizer.optimize(&named.cart)?;
        let second = optimizer.optimize(&named.cart)?;

        assert_eq!(first, second, "{} changed between runs", named.name);
    }

    Ok(())
}
