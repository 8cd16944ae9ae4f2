use std::fs;

use lumen::run_program;
use walkdir::WalkDir;

#[test]
fn demo_scripts_produce_their_expected_values() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "mml"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let expected = expected_value(&source).unwrap_or_else(|| {
                           panic!("{path:?} has no '(* expect: ... *)' header line")
                       });

        count += 1;
        match run_program(&source) {
            Ok(rendered) => {
                assert_eq!(rendered, expected, "Demo {path:?} produced the wrong value")
            },
            Err(e) => panic!("Demo {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

/// Extracts the expected rendering from a demo's first line, which must
/// be a comment of the form `(* expect: VALUE *)`.
fn expected_value(source: &str) -> Option<String> {
    let first = source.lines().next()?;
    let inner = first.trim().strip_prefix("(*")?.strip_suffix("*)")?;
    Some(inner.trim().strip_prefix("expect:")?.trim().to_string())
}
