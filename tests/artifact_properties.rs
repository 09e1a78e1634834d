// tests/artifact_properties.rs

use std::path::PathBuf;

use proptest::prelude::*;
use server_devtools::artifacts::find_test_binary;
use server_devtools_test_utils::builders::{build_finished_line, BuildEventLine};

const LIB: &str = "recipe_calculator_lib";

/// One generated build event line plus the path it would resolve to, if any.
#[derive(Debug, Clone)]
enum Line {
    /// Test build of the library.
    LibTest(String),
    /// Non-test build of the library.
    LibArtifact(String),
    /// Test build of an unrelated crate.
    OtherTest(String),
    /// Human-readable progress line mentioning the library.
    Progress,
    Finished,
}

impl Line {
    fn render(&self) -> String {
        match self {
            Line::LibTest(p) => BuildEventLine::artifact(LIB).test(true).file(p).build(),
            Line::LibArtifact(p) => BuildEventLine::artifact(LIB).file(p).build(),
            Line::OtherTest(p) => BuildEventLine::artifact("serde").test(true).file(p).build(),
            Line::Progress => format!("   Compiling {LIB} v0.1.0 (/src)"),
            Line::Finished => build_finished_line(),
        }
    }
}

fn line_strategy() -> impl Strategy<Value = Line> {
    let path = "/t/[a-z]{1,8}";
    prop_oneof![
        path.prop_map(Line::LibTest),
        path.prop_map(Line::LibArtifact),
        path.prop_map(Line::OtherTest),
        Just(Line::Progress),
        Just(Line::Finished),
    ]
}

proptest! {
    #[test]
    fn resolves_first_library_test_event_in_stream_order(
        stream in proptest::collection::vec(line_strategy(), 0..20)
    ) {
        let rendered: Vec<String> = stream.iter().map(Line::render).collect();

        let expected = stream.iter().find_map(|line| match line {
            Line::LibTest(p) => Some(PathBuf::from(p)),
            _ => None,
        });

        prop_assert_eq!(find_test_binary(&rendered, LIB), expected);
    }

    #[test]
    fn streams_without_library_test_events_resolve_to_nothing(
        stream in proptest::collection::vec(line_strategy(), 0..20)
    ) {
        let rendered: Vec<String> = stream
            .iter()
            .filter(|line| !matches!(line, Line::LibTest(_)))
            .map(Line::render)
            .collect();

        prop_assert_eq!(find_test_binary(&rendered, LIB), None);
    }
}
