use chrono::NaiveDate;
use fair_share::allocation::{split, BandedStrategy, FlatCurveStrategy};
use fair_share::ledger::{sum_by_month, Cost, Earning};
use fair_share::{ContributionStrategy, Couple, Month, Person, Reconciler};
use proptest::prelude::*;

fn earnings() -> impl Strategy<Value = f64> {
    0.0f64..=50_000.0
}

fn sensitivity() -> impl Strategy<Value = f64> {
    0.1f64..=5.0
}

fn shared_cost(date: NaiveDate, amount: f64, payer: &str) -> Cost {
    Cost {
        date,
        amount,
        currency: "EUR".into(),
        payer: payer.into(),
        description: "shared".into(),
    }
}

proptest! {
    #[test]
    fn equal_earnings_split_evenly(amount in earnings(), s in sensitivity()) {
        prop_assert_eq!(split(amount, amount, s).unwrap(), (50.0, 50.0));
    }

    #[test]
    fn swapping_earners_complements_split(
        low in 1.0f64..=20_000.0,
        extra in 0.0f64..=30_000.0,
        s in sensitivity(),
    ) {
        let high = low + extra;
        let (a, _) = split(high, low, s).unwrap();
        let (b_swapped, _) = split(low, high, s).unwrap();
        prop_assert!((a - (100.0 - b_swapped)).abs() < 1e-9);
    }

    #[test]
    fn percentages_sum_to_hundred(a in earnings(), b in earnings(), s in sensitivity()) {
        let (pa, pb) = split(a, b, s).unwrap();
        prop_assert!((pa + pb - 100.0).abs() <= 0.01);
        prop_assert!((0.0..=100.0).contains(&pa));
    }

    #[test]
    fn higher_ratio_raises_higher_share(
        low in 100.0f64..=5_000.0,
        ratio in 1.01f64..=50.0,
        bump in 0.05f64..=5.0,
        s in sensitivity(),
    ) {
        let (smaller, _) = split(low * ratio, low, s).unwrap();
        let (larger, _) = split(low * (ratio + bump), low, s).unwrap();
        prop_assert!(larger > smaller);
        prop_assert!(larger < 100.0);
    }

    #[test]
    fn band_contributions_sum_to_total(
        a in earnings(),
        b in earnings(),
        total in 0.0f64..=20_000.0,
    ) {
        let result = BandedStrategy::default().calculate(a, b, total).unwrap();
        let sum = result.person1_contribution + result.person2_contribution;
        prop_assert!((sum - total).abs() <= 0.01);
    }

    #[test]
    fn first_fixed_band_splits_half(a in earnings(), b in earnings(), total in 0.0f64..=300.0) {
        let result = BandedStrategy::default().calculate(a, b, total).unwrap();
        prop_assert_eq!(result.person1_contribution, total * 0.5);
        prop_assert_eq!(result.person2_contribution, total * 0.5);
    }

    #[test]
    fn cumulative_credit_is_running_sum(
        months in prop::collection::vec(
            (earnings(), earnings(), 0.0f64..=3_000.0, 0.0f64..=3_000.0),
            1..=18,
        ),
        use_bands in any::<bool>(),
    ) {
        let mut anna = Person::new("anna");
        let mut luca = Person::new("luca");
        for (index, (e1, e2, c1, c2)) in months.iter().enumerate() {
            let year = 2022 + (index / 12) as i32;
            let month = (index % 12) as u32 + 1;
            let date = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
            anna.earnings.push(Earning { date, amount: *e1 });
            luca.earnings.push(Earning { date, amount: *e2 });
            anna.costs.push(shared_cost(date, *c1, "anna"));
            luca.costs.push(shared_cost(date, *c2, "luca"));
        }
        let mut couple = Couple::try_from_persons(vec![anna, luca]).unwrap();

        let strategy: Box<dyn ContributionStrategy> = if use_bands {
            Box::new(BandedStrategy::default())
        } else {
            Box::new(FlatCurveStrategy::default())
        };
        let reconciler = Reconciler::new(strategy);
        let report = reconciler.reconcile(&mut couple).unwrap();
        prop_assert_eq!(report.len(), months.len());

        let mut running = 0.0;
        for (month, metrics) in &report {
            running += sum_by_month(&couple.person1.costs, *month) - metrics.person1_due;
            prop_assert!((metrics.person1_credit - running).abs() < 1e-6);
            prop_assert!((metrics.person1_credit + metrics.person2_credit).abs() <= 0.01);
            prop_assert_eq!(couple.person1.monthly_credit()[month], metrics.person1_credit);
        }
        prop_assert!((couple.person1.cumulative_credit() - running).abs() < 1e-6);

        let again = reconciler.reconcile(&mut couple).unwrap();
        prop_assert_eq!(again, report);
    }
}

#[test]
fn higher_earner_underpaying_goes_into_debt() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let mut anna = Person::new("anna");
    let mut luca = Person::new("luca");
    anna.earnings.push(Earning { date, amount: 5000.0 });
    luca.earnings.push(Earning { date, amount: 1000.0 });
    luca.costs.push(Cost {
        date,
        amount: 1000.0,
        currency: "EUR".into(),
        payer: "luca".into(),
        description: "rent".into(),
    });
    let mut couple = Couple::try_from_persons(vec![anna, luca]).unwrap();

    let reconciler = Reconciler::new(Box::new(FlatCurveStrategy::new(1.15).unwrap()));
    let report = reconciler.reconcile(&mut couple).unwrap();
    let may = report[&Month::new(2024, 5).unwrap()];

    assert!(may.person1_percentage > 50.0);
    assert!(may.person1_credit < 0.0);
    assert!((may.person2_credit + may.person1_credit).abs() < 1e-9);
}
