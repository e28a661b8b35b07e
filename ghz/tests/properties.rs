use ghz::{DialectVersion, GhzError, generate, score};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn lines_with_prefix(text: &str, prefix: &str) -> Vec<String> {
    text.lines()
        .filter(|l| l.starts_with(prefix))
        .map(str::to_string)
        .collect()
}

#[test]
fn gate_counts_without_measurement() {
    for version in DialectVersion::supported() {
        for n in 1..=8 {
            let text = generate(n, version, false).unwrap();
            let text = text.as_str();
            assert_eq!(lines_with_prefix(text, "h ").len(), 1, "n={n} v={version}");
            assert_eq!(lines_with_prefix(text, "cx ").len(), n - 1, "n={n} v={version}");
            assert!(lines_with_prefix(text, "measure").is_empty(), "n={n} v={version}");
        }
    }
}

#[test]
fn entangling_chain_links_neighbours() {
    let text = generate(5, 3, false).unwrap();
    let chain = lines_with_prefix(text.as_str(), "cx ");
    for (i, line) in chain.iter().enumerate() {
        assert_eq!(line, &format!("cx q[{}],q[{}];", i, i + 1));
    }
}

#[test]
fn one_measurement_per_qubit() {
    for version in DialectVersion::supported() {
        for n in 1..=8 {
            let text = generate(n, version, true).unwrap();
            let measures = lines_with_prefix(text.as_str(), "measure");
            assert_eq!(measures.len(), n);
            for (i, line) in measures.iter().enumerate() {
                assert_eq!(line, &format!("measure q[{i}] -> c[{i}];"));
            }
        }
    }
}

#[test]
fn sections_keep_fixed_order() {
    let text = generate(3, 2, true).unwrap();
    let text = text.as_str();
    let header = text.find("creg c[3];").unwrap();
    let hadamard = text.find("h q[0];").unwrap();
    let last_cx = text.rfind("cx ").unwrap();
    let first_measure = text.find("measure").unwrap();
    assert!(header < hadamard && hadamard < last_cx && last_cx < first_measure);
}

#[test]
fn generation_is_deterministic() {
    for version in [2, 3] {
        for measure in [false, true] {
            assert_eq!(
                generate(6, version, measure).unwrap(),
                generate(6, version, measure).unwrap()
            );
        }
    }
}

#[test]
fn unsupported_versions_fail_with_configuration_error() {
    for version in [0, 1, 4, 42] {
        let err = generate(3, version, false).unwrap_err();
        assert!(matches!(err, GhzError::Configuration(_)), "v={version}");
        assert!(err.to_string().contains(&version.to_string()));
    }
}

#[test]
fn ideal_distribution_has_zero_distance() {
    for n in 1..=6 {
        let observed = vec![("0".repeat(n), 0.5), ("1".repeat(n), 0.5)];
        assert_eq!(score(n, &observed).unwrap().distance, 0.0);
    }
}

#[test]
fn disjoint_support_has_unit_distance() {
    for state in ["01", "10"] {
        let report = score(2, &vec![(state, 1.0)]).unwrap();
        assert!(approx_eq(report.distance, 1.0, 1e-12), "{state}: {}", report.distance);
    }
    let report = score(4, &vec![("0110", 1.0)]).unwrap();
    assert!(approx_eq(report.distance, 1.0, 1e-12));
}

#[test]
fn distance_grows_while_drifting_away_from_ideal() {
    let mut previous = -1.0;
    for step in 0..=20 {
        let t = f64::from(step) / 20.0;
        let observed = vec![
            ("000", (1.0 - t) / 2.0),
            ("010", t),
            ("111", (1.0 - t) / 2.0),
        ];
        let distance = score(3, &observed).unwrap().distance;
        assert!(distance >= previous, "t={t}: {distance} < {previous}");
        assert!((0.0..=1.0 + 1e-12).contains(&distance));
        previous = distance;
    }
}

#[test]
fn uniform_two_qubit_scenario() {
    let observed = vec![("00", 0.25), ("01", 0.25), ("10", 0.25), ("11", 0.25)];
    let report = score(2, &observed).unwrap();
    assert!(approx_eq(report.distance, 0.5412, 1e-4), "HD was {}", report.distance);
}

#[test]
fn bit_list_keys_score_like_strings() {
    let as_lists: Vec<(Vec<u8>, f64)> = vec![(vec![0, 0, 0], 0.4), (vec![1, 0, 1], 0.2), (vec![1, 1, 1], 0.4)];
    let as_strings = vec![("000", 0.4), ("101", 0.2), ("111", 0.4)];
    assert_eq!(
        score(3, &as_lists).unwrap().distance,
        score(3, &as_strings).unwrap().distance
    );
}

#[test]
fn scoring_is_repeatable() {
    let observed = vec![("00", 0.45), ("01", 0.05), ("11", 0.5)];
    let first = score(2, &observed).unwrap();
    let second = score(2, &observed).unwrap();
    assert_eq!(first, second);
}
