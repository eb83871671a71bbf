use rstest::rstest;
use seed_digits::{GenerationTrace, SolverError, UtilsError, evaluate_evaluable, solve};

fn assert_evaluates_to(expr: &seed_digits::Node, target: u64) {
    let value = evaluate_evaluable(&expr.evaluable());
    assert!(value.is_ok(), "{} did not evaluate: {:?}", expr, value.err());
    if let Ok(value) = value {
        assert_eq!(value.round(), target as f64, "{} = {}", expr, value);
    }
}

#[rstest]
#[case(3, 4)]
#[case(4, 4)]
#[case(9, 4)]
fn test_2016_with_fewest_digits(#[case] seed: u8, #[case] digits: usize) {
    let result = solve(2016, seed, digits, None);
    assert!(matches!(result, Ok(Some(_))), "seed {}: {:?}", seed, result);
    if let Ok(Some(expr)) = result {
        assert_eq!(expr.digit_occurrences(), digits);
        let seed_char = char::from(b'0' + seed);
        assert_eq!(expr.display().matches(seed_char).count(), digits);
        assert_evaluates_to(&expr, 2016);
    }
}

#[rstest]
#[case(1, 24)]
#[case(2, 48)]
#[case(5, 7)]
#[case(6, 3)]
#[case(7, 49)]
#[case(8, 17)]
fn test_results_round_trip(#[case] seed: u8, #[case] target: u64) {
    let result = solve(target, seed, 4, None);
    assert!(matches!(result, Ok(Some(_))), "{} with seed {}", target, seed);
    if let Ok(Some(expr)) = result {
        assert!(expr.digit_occurrences() <= 4);
        assert_evaluates_to(&expr, target);
    }
}

#[test]
fn test_scenarios() {
    let display = |target, seed| {
        solve(target, seed, 4, None)
            .ok()
            .flatten()
            .map(|expr| expr.display())
    };
    assert_eq!(display(5, 5), Some("5".to_string()));
    assert_eq!(display(2, 1), Some("1 + 1".to_string()));
    assert_eq!(display(9, 3), Some("3 * 3".to_string()));
    assert_eq!(display(120, 5), Some("5!".to_string()));
}

#[test]
fn test_trace_callback() {
    let mut sizes = Vec::new();
    let mut record = |trace: &GenerationTrace| sizes.push((trace.generation, trace.size));
    let result = solve(999_999_937, 1, 3, Some(&mut record));
    assert!(matches!(result, Ok(None)));
    assert_eq!(sizes.len(), 3);
    assert_eq!(
        sizes.iter().map(|(generation, _)| *generation).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(sizes.iter().all(|(_, size)| *size > 0));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    assert_eq!(
        solve(10, 0, 3, None).err(),
        Some(SolverError::UtilsError(UtilsError::InvalidSeed(0)))
    );
    assert_eq!(
        solve(0, 3, 3, None).err(),
        Some(SolverError::UtilsError(UtilsError::NonPositiveTarget))
    );
    assert_eq!(
        solve(10, 3, 0, None).err(),
        Some(SolverError::UtilsError(UtilsError::ZeroDepth))
    );
}
