use changelog_validator::parser::classify_line;
use changelog_validator::{format_diagnostic, validate_str, EngineOptions};

fn main() {
    println!("=== Changelog Line Classifier Demo ===");

    let test_lines = [
        "1:",
        "  - task: http://tracker/123",
        "  - task: not-a-link",
        "  - prerelease: 8",
        "    arch: stm32, avr",
        "    feature: |",
        "      adds X",
        "      ",
        "    date: 01.02.24",
        "    base: ",
        "",
        "   arch: avr",
    ];

    for line in test_lines {
        println!("\nInput: '{}'", line);
        println!("Classified: {:?}", classify_line(line));
    }

    println!("\n=== Validation ===");
    let document = "1:\n  - release: 7\n    protocol: 3\n    date: 01.02.24\n";
    match validate_str(document, EngineOptions::default()) {
        Ok(summary) => println!("Parsed successfully! {:?}", summary),
        Err(diagnostic) => println!("{}", format_diagnostic("demo", &diagnostic)),
    }
}
