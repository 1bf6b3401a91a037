use mortgage_core::amortization::{analyze_mortgage, generate_schedule, monthly_payment};
use mortgage_core::{LoanTerms, MortgageError, MortgageInput, MortgageReport, PaymentSource};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOL: Decimal = dec!(0.000001);

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

fn sample_terms() -> Vec<LoanTerms> {
    vec![
        LoanTerms::with_computed_payment(dec!(200_000), dec!(5), 12).unwrap(),
        LoanTerms::with_computed_payment(dec!(350_000), dec!(3.89), 360).unwrap(),
        LoanTerms::with_computed_payment(dec!(75_000), dec!(0), 60).unwrap(),
        LoanTerms::with_supplied_payment(dec!(180_000), dec!(4.25), 24, dec!(975.40)).unwrap(),
        LoanTerms::with_supplied_payment(dec!(10_000), dec!(7), 36, dec!(5_000)).unwrap(),
        LoanTerms::with_supplied_payment(dec!(10_000), dec!(18), 12, dec!(50)).unwrap(),
    ]
}

// ===========================================================================
// Schedule shape
// ===========================================================================

#[test]
fn test_schedule_length_matches_fixed_period() {
    for terms in sample_terms() {
        let schedule = generate_schedule(&terms).unwrap();
        assert_eq!(schedule.len(), terms.fixed_months() as usize);
    }
}

#[test]
fn test_months_are_one_based_and_sequential() {
    for terms in sample_terms() {
        let schedule = generate_schedule(&terms).unwrap();
        for (i, entry) in schedule.entries().iter().enumerate() {
            assert_eq!(entry.month, i as u32 + 1);
        }
    }
}

#[test]
fn test_balance_never_negative() {
    for terms in sample_terms() {
        let schedule = generate_schedule(&terms).unwrap();
        assert!(
            schedule.entries().iter().all(|e| e.balance >= Decimal::ZERO),
            "negative balance for {terms:?}"
        );
    }
}

// ===========================================================================
// Aggregates
// ===========================================================================

#[test]
fn test_totals_are_consistent() {
    for terms in sample_terms() {
        let schedule = generate_schedule(&terms).unwrap();
        let summed: Decimal = schedule
            .entries()
            .iter()
            .map(|e| e.interest + e.principal)
            .sum();

        assert_close(summed, schedule.total_paid(), TOL, "sum of payments");
        assert_eq!(
            schedule.total_paid(),
            schedule.total_interest() + schedule.total_principal()
        );
    }
}

#[test]
fn test_summary_matches_schedule() {
    let terms = LoanTerms::with_computed_payment(dec!(250_000), dec!(4.5), 24).unwrap();
    let report = MortgageReport::from_terms(terms).unwrap();
    let schedule = &report.schedule;

    assert_eq!(report.summary.total_interest, schedule.total_interest());
    assert_eq!(report.summary.total_principal, schedule.total_principal());
    assert_eq!(report.summary.total_paid, schedule.total_paid());
    assert_eq!(
        report.summary.remaining_balance,
        schedule.entries().last().unwrap().balance
    );
}

#[test]
fn test_principal_conserved_when_balance_remains() {
    // Repaid principal plus what is still owed equals what was borrowed.
    let terms = LoanTerms::with_supplied_payment(dec!(200_000), dec!(5), 12, dec!(1_169.18))
        .unwrap();
    let schedule = generate_schedule(&terms).unwrap();
    assert_close(
        schedule.total_principal() + schedule.remaining_balance(),
        dec!(200_000),
        TOL,
        "principal conservation",
    );
}

// ===========================================================================
// Zero rate
// ===========================================================================

#[test]
fn test_zero_rate_equal_principal_no_interest() {
    let terms = LoanTerms::with_computed_payment(dec!(200_000), dec!(0), 12).unwrap();
    let expected = dec!(200_000) / dec!(12);
    let schedule = generate_schedule(&terms).unwrap();

    for entry in schedule.entries() {
        assert_eq!(entry.interest, Decimal::ZERO);
        assert_close(entry.principal, expected, TOL, "zero-rate principal");
    }
    assert_close(schedule.remaining_balance(), Decimal::ZERO, TOL, "zero-rate payoff");
}

// ===========================================================================
// Payment and period
// ===========================================================================

#[test]
fn test_computed_payment_amortizes_over_its_own_term() {
    let terms = LoanTerms::with_computed_payment(dec!(200_000), dec!(5), 12).unwrap();
    assert_eq!(terms.payment_source(), PaymentSource::Computed);
    assert_close(terms.monthly_payment(), dec!(17121.49), dec!(0.01), "12m payment");

    let schedule = generate_schedule(&terms).unwrap();
    assert_close(schedule.remaining_balance(), Decimal::ZERO, dec!(0.01), "end balance");
}

#[test]
fn test_short_fixed_period_leaves_balance() {
    // 25-year payment, 12-month fixed tranche.
    let payment = monthly_payment(dec!(200_000), dec!(5), 300).unwrap();
    let terms =
        LoanTerms::with_supplied_payment(dec!(200_000), dec!(5), 12, payment).unwrap();
    let schedule = generate_schedule(&terms).unwrap();
    let remaining = schedule.remaining_balance();

    assert!(remaining > Decimal::ZERO);
    assert!(remaining < dec!(200_000));
    assert_close(remaining, dec!(195_876.19), dec!(0.01), "balance after one year");
}

#[test]
fn test_overpayment_clamps_final_principal() {
    let terms =
        LoanTerms::with_supplied_payment(dec!(10_000), dec!(7), 36, dec!(5_000)).unwrap();
    let schedule = generate_schedule(&terms).unwrap();
    let paid_off = schedule.paid_off_month().unwrap();
    let entries = schedule.entries();

    assert_eq!(paid_off, 3);
    let before = entries[paid_off as usize - 2].balance;
    let last = &entries[paid_off as usize - 1];
    assert_close(last.principal, before, TOL, "clamped final principal");
    assert!(entries[paid_off as usize..]
        .iter()
        .all(|e| e.balance.is_zero() && e.principal.is_zero()));
}

#[test]
fn test_identical_terms_give_identical_schedules() {
    for terms in sample_terms() {
        assert_eq!(
            generate_schedule(&terms).unwrap(),
            generate_schedule(&terms.clone()).unwrap()
        );
    }
}

// ===========================================================================
// Arithmetic limits
// ===========================================================================

fn assert_out_of_range(result: Result<impl std::fmt::Debug, MortgageError>, case: &str) {
    match result {
        Err(MortgageError::FinancialImpossibility(_)) => {}
        other => panic!("{case}: expected FinancialImpossibility, got {other:?}"),
    }
}

#[test]
fn test_runaway_balance_is_an_error_not_a_panic() {
    // 1,000,000% with a payment of 1 multiplies the balance ~834x a month.
    let terms =
        LoanTerms::with_supplied_payment(dec!(100_000), dec!(1_000_000), 24, dec!(1)).unwrap();
    assert_out_of_range(generate_schedule(&terms), "schedule");
    assert_out_of_range(MortgageReport::from_terms(terms), "report");
}

#[test]
fn test_long_underpayment_at_high_rate_is_an_error() {
    let terms = LoanTerms::with_supplied_payment(dec!(250_000), dec!(120), 1200, dec!(100)).unwrap();
    assert_out_of_range(generate_schedule(&terms), "1200-month underpayment");
}

#[test]
fn test_principal_near_max_is_an_error() {
    // 1200% is exactly 1 per month, so the payment is MAX * 4096 / 4095.
    assert_out_of_range(
        LoanTerms::with_computed_payment(Decimal::MAX, dec!(1200), 12),
        "computed payment",
    );

    // Payment equal to the interest keeps the balance flat at 4e28, but two
    // months of interest already exceed Decimal::MAX.
    let half_max = dec!(40_000_000_000_000_000_000_000_000_000);
    let terms = LoanTerms::with_supplied_payment(half_max, dec!(1200), 3, half_max).unwrap();
    assert_out_of_range(generate_schedule(&terms), "running totals");
}

#[test]
fn test_max_principal_repaid_at_once() {
    let terms =
        LoanTerms::with_supplied_payment(Decimal::MAX, Decimal::ZERO, 3, Decimal::MAX).unwrap();
    let schedule = generate_schedule(&terms).unwrap();
    assert_eq!(schedule.paid_off_month(), Some(1));
    assert_eq!(schedule.total_principal(), Decimal::MAX);
}

#[test]
fn test_extreme_rate_through_analyze() {
    let input = input(dec!(1_000_000), dec!(10_000_000), 600, Some(dec!(10)));
    assert_out_of_range(analyze_mortgage(&input), "analyze");
}

#[test]
fn test_large_but_representable_terms_still_work() {
    let terms =
        LoanTerms::with_computed_payment(dec!(1_000_000_000_000), dec!(12), 360).unwrap();
    let schedule = generate_schedule(&terms).unwrap();
    assert_eq!(schedule.len(), 360);
    assert_close(schedule.remaining_balance(), Decimal::ZERO, dec!(0.01), "payoff");
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_invalid_terms_name_the_field() {
    let cases: Vec<(MortgageInput, &str)> = vec![
        (input(dec!(0), dec!(5), 12, None), "principal"),
        (input(dec!(-1), dec!(5), 12, None), "principal"),
        (input(dec!(1000), dec!(-0.5), 12, None), "rate"),
        (input(dec!(1000), dec!(5), 0, None), "months"),
        (input(dec!(1000), dec!(5), -3, None), "months"),
        (input(dec!(1000), dec!(5), 1201, None), "months"),
        (input(dec!(1000), dec!(5), 12, Some(dec!(-10))), "monthly"),
    ];

    for (bad, expected_field) in cases {
        match analyze_mortgage(&bad) {
            Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected InvalidInput({expected_field}), got {other:?}"),
        }
    }
}

#[test]
fn test_input_roundtrips_from_json() {
    let json = r#"{"principal":"200000","annual_rate_pct":"5.0","fixed_months":24}"#;
    let parsed: MortgageInput = serde_json::from_str(json).unwrap();
    assert!(parsed.monthly_payment.is_none());

    let out = analyze_mortgage(&parsed).unwrap();
    assert_eq!(out.result.schedule.len(), 24);
    assert_eq!(out.result.terms.payment_source(), PaymentSource::Computed);
}

fn input(
    principal: Decimal,
    rate: Decimal,
    months: i64,
    monthly_payment: Option<Decimal>,
) -> MortgageInput {
    MortgageInput {
        principal,
        annual_rate_pct: rate,
        fixed_months: months,
        monthly_payment,
    }
}
