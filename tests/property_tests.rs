//! Property-based tests for hiplog using proptest

use hiplog::core::colorize::{AnsiColorizer, NoColor};
use hiplog::core::{strip_ansi, visible_width, PrettyPrinter, Stringify, StringifyOptions};
use hiplog::core::{ValueFormatter, CIRCULAR_MARKER, INLINE_WIDTH_LIMIT};
use hiplog::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn severity() -> impl Strategy<Value = Severity> {
    (0usize..8).prop_map(|rank| Severity::ALL[rank])
}

fn capture(level: &str, colors: bool) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder()
        .sink(sink.clone())
        .colors(colors)
        .level(level)
        .build();
    (logger, sink)
}

/// Arbitrary acyclic values up to a small depth
fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ']{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z_]{1,6}", inner), 0..4).prop_map(|fields| {
                let object = Object::new();
                for (key, value) in fields {
                    object.insert(key, value);
                }
                Value::Object(object)
            }),
        ]
    })
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Default level names resolve to their own rank
    #[test]
    fn test_severity_name_resolves_to_rank(level in severity()) {
        let logger = Logger::new();
        prop_assert_eq!(logger.rank_of(level.to_str()), Some(level.rank()));
    }

    /// Test that rank order matches severity order
    #[test]
    fn test_severity_ordering(a in severity(), b in severity()) {
        prop_assert_eq!(a <= b, a.rank() <= b.rank());
    }

    /// Labels are always five columns wide
    #[test]
    fn test_label_width(level in severity()) {
        prop_assert_eq!(level.label().chars().count(), 5);
    }
}

// ============================================================================
// Threshold Tests
// ============================================================================

proptest! {
    /// A call is written iff its rank is at or below the threshold rank
    #[test]
    fn test_threshold_monotonicity(threshold in severity(), call in severity()) {
        let (logger, sink) = capture(threshold.to_str(), false);
        logger.emit(call.rank(), &["m".into()]).unwrap();
        prop_assert_eq!(!sink.is_empty(), call.rank() <= threshold.rank());
    }

    /// Unknown threshold names silence every level
    #[test]
    fn test_unknown_threshold_silences(name in "[A-Z]{1,10}", call in severity()) {
        let (logger, sink) = capture(&name, false);
        prop_assert!(logger.emit(call.rank(), &["m".into()]).is_ok());
        prop_assert!(sink.is_empty());
    }
}

// ============================================================================
// Alignment Tests
// ============================================================================

proptest! {
    /// Every continuation line is indented by the visible header width
    #[test]
    fn test_alignment(
        level in severity(),
        lines in prop::collection::vec("[a-z ]{0,20}", 2..6),
        colors in any::<bool>(),
    ) {
        let (logger, sink) = capture("debug", colors);
        let body = lines.join("\n");
        logger.emit(level.rank(), &[body.into()]).unwrap();

        let plain = strip_ansi(&sink.contents()).into_owned();
        let header = format!("{} • ", level.label());
        let width = header.chars().count();

        let rendered: Vec<&str> = plain.split('\n').collect();
        // trailing newline leaves one empty element
        prop_assert_eq!(rendered.len(), lines.len() + 1);
        prop_assert_eq!(rendered[0], format!("{}{}", header, lines[0]));
        for (line, expected) in rendered[1..lines.len()].iter().zip(&lines[1..]) {
            prop_assert_eq!(*line, format!("{}{}", " ".repeat(width), expected));
        }
    }

    /// Colors never change the visible text
    #[test]
    fn test_colors_are_invisible(level in severity(), text in "[a-z]{1,20}") {
        let (colored, colored_sink) = capture("debug", true);
        let (plain, plain_sink) = capture("debug", false);
        colored.emit(level.rank(), &[text.clone().into(), 7.into()]).unwrap();
        plain.emit(level.rank(), &[text.into(), 7.into()]).unwrap();
        prop_assert_eq!(strip_ansi(&colored_sink.contents()).into_owned(), plain_sink.contents());
    }
}

// ============================================================================
// Value Formatting Tests
// ============================================================================

proptest! {
    /// Strings pass through untouched
    #[test]
    fn test_strings_unchanged(text in ".*") {
        let out = ValueFormatter::new().format(&text.clone().into(), &AnsiColorizer::new()).unwrap();
        prop_assert_eq!(out, text);
    }

    /// Short structures are inline, long ones are blocks surrounded by newlines
    #[test]
    fn test_inline_or_block(value in value()) {
        prop_assume!(value.as_str().is_none());
        let printed = PrettyPrinter::new()
            .stringify(&value, &StringifyOptions { indent: 2 })
            .unwrap();
        let out = ValueFormatter::new().format(&value, &NoColor).unwrap();

        if visible_width(&printed) < INLINE_WIDTH_LIMIT {
            prop_assert!(!out.contains('\n'));
        } else {
            prop_assert!(out.starts_with('\n'));
            prop_assert!(out.ends_with('\n'));
        }
    }

    /// Self references always terminate with the marker
    #[test]
    fn test_self_reference(fields in prop::collection::vec(("[a-z]{1,6}", any::<i64>()), 0..5)) {
        let object = Object::new();
        for (key, number) in fields {
            object.insert(key, number);
        }
        object.insert("inner", &object);

        let out = ValueFormatter::new().format(&object.into(), &NoColor).unwrap();
        prop_assert!(out.contains(CIRCULAR_MARKER));
    }

    /// No stack line keeps the frame indentation
    #[test]
    fn test_error_frames_flush(
        message in "[a-zA-Z ]{1,30}",
        frames in prop::collection::vec("app::[a-z]{1,8} \\(src/[a-z]{1,8}\\.rs:[1-9]:[1-9]\\)", 0..6),
    ) {
        let error = ErrorValue::with_frames("Error", message.clone(), &frames);
        let out = ValueFormatter::new().format(&error.into(), &NoColor).unwrap();

        prop_assert!(out.starts_with(message.as_str()));
        prop_assert!(out.ends_with('\n'));
        for line in out.lines().skip(1) {
            prop_assert!(!line.starts_with(' '));
        }
        prop_assert_eq!(out.matches("at app::").count(), frames.len());
    }

    /// Arbitrary values never make the logger fail
    #[test]
    fn test_emit_never_fails(parts in prop::collection::vec(value(), 0..5), level in severity()) {
        let (logger, sink) = capture("debug", true);
        prop_assert!(logger.emit(level.rank(), &parts).is_ok());
        prop_assert!(sink.contents().ends_with('\n'));
    }
}
