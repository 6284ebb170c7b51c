//! Basic usage example for grader-core
//!
//! Run with: cargo run --example basic_usage

use grader_core::{ExamCalculator, ExamProgram};
use serde_json::json;

fn main() {
    println!("=== Grader Core Basic Usage Example ===\n");

    let calculator = ExamCalculator::default();
    println!("Program: {}", calculator.program().id);
    for (path, weight) in calculator.program().weight_table() {
        println!("   {:<18} {:.2}", path, weight);
    }

    let record = json!({
        "Name": "Anna",
        "AP1": 90,
        "AP2": {
            "planning": {"main": 80, "extra": 70},
            "development": {"main": 85},
            "economy": {"main": 95, "extra": 95}
        },
        "PW": {"project": 90, "presentation": 90}
    });

    match calculator.calculate_record(&record) {
        Ok(outcome) => {
            let rendered = serde_json::to_string_pretty(&outcome).unwrap_or_default();
            println!("\nOutcome:\n{}", rendered);
        }
        Err(e) => println!("Invalid record: {}", e),
    }

    // Earlier program variant with ML1/ML2 scores
    if let Ok(program) = ExamProgram::builtin("ml") {
        if let Ok(calculator) = ExamCalculator::new(program) {
            let record = json!({"AP1": 80, "ml": {"ML1": 95, "ML2": 90}});
            let outcome = calculator.calculate_record(&record);
            if let Ok(outcome) = outcome {
                println!("\nML variant overall: {:?}", outcome.overall.points.map(|p| p.value()));
            }
        }
    }
}
