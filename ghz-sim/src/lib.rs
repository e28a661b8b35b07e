pub mod api;
pub mod circuit;
pub mod facade;
pub mod parser;
pub mod state;
pub mod statevector_backend;

// Re-export key components for easier access from the binary or other libraries.
pub use api::{Backend, SimError};
pub use circuit::Circuit;
pub use facade::{run_qasm_probabilities, run_qasm_sample};
pub use parser::{Gate, parse_qasm};
pub use state::StateVector;
pub use statevector_backend::StatevectorBackend;
