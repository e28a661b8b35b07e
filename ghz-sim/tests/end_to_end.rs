use ghz::{
    CircuitGenerator, DialectVersion, DistributionScorer, GhzApplication, QasmGhzCircuit,
    QubitCount, StageData,
};
use ghz_sim::{Backend, Circuit, StatevectorBackend, run_qasm_probabilities, run_qasm_sample};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn generated_circuits_execute_to_ideal_ghz() {
    for dialect in [DialectVersion::V2, DialectVersion::V3] {
        for measure in [false, true] {
            for n in 1..=6 {
                let size = QubitCount::new(n).unwrap();
                let text = CircuitGenerator::new(dialect, measure).generate(size).unwrap();
                let observed = run_qasm_probabilities(text.as_str()).unwrap();
                let report = DistributionScorer::new(size).score(&observed).unwrap();
                assert!(
                    approx_eq(report.distance, 0.0, 1e-7),
                    "{dialect} measure={measure} n={n}: HD {}",
                    report.distance
                );
            }
        }
    }
}

#[test]
fn parsed_circuit_matches_generator_structure() {
    let size = QubitCount::new(4).unwrap();
    let text = CircuitGenerator::new(DialectVersion::V3, true).generate(size).unwrap();
    let circuit = Circuit::from_qasm(text.as_str()).unwrap();

    assert_eq!(circuit.num_qubits, 4);
    assert_eq!(circuit.num_clbits, 4);
    assert_eq!(circuit.gates.len(), 4);
    assert_eq!(circuit.measurements, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
}

#[test]
fn sampled_ghz_scores_close_to_zero() {
    let text = ghz::generate(3, 2, true).unwrap();
    let observed = run_qasm_sample(text.as_str(), 4000, Some(11)).unwrap();
    let report = ghz::score(3, &observed).unwrap();
    // Only 000 and 111 can appear; a loose bound keeps this stable.
    assert_eq!(report.probabilities.len(), 2);
    assert!(report.distance < 0.05, "HD was {}", report.distance);
}

#[test]
fn stages_close_the_loop() {
    let app = GhzApplication::new(QubitCount::new(5).unwrap());
    let circuit_stage = QasmGhzCircuit::new(DialectVersion::V3, true);

    let StageData::Circuit(text) = circuit_stage.preprocess(app.preprocess()).unwrap() else {
        panic!("expected circuit text");
    };
    let circuit = Circuit::from_qasm(text.as_str()).unwrap();
    let observed = StatevectorBackend::new().probabilities(&circuit).unwrap();

    let upward = circuit_stage.postprocess(StageData::Distribution(observed)).unwrap();
    let report = app.postprocess(upward).unwrap();
    assert!(approx_eq(report.distance, 0.0, 1e-7));

    let metrics = report.metrics(ghz::Metrics::new());
    assert_eq!(metrics["probabilities"].as_array().map(Vec::len), Some(2));
}
