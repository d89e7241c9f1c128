//! Property-based tests for output rendering using proptest.

use proptest::prelude::*;
use serde_json::{json, Value};
use subcmd_render::{display_width, min_width, Output, Theme, KEY_WIDTH};

proptest! {
    /// Padding never shortens and always reaches the requested width.
    #[test]
    fn min_width_reaches_width(s in "[a-zA-Z0-9 _.-]{0,40}", width in 0usize..60) {
        let padded = min_width(&s, width);
        prop_assert!(padded.starts_with(&s));
        prop_assert_eq!(display_width(&padded), display_width(&s).max(width));
    }

    /// An array of n non-empty strings renders as exactly n lines.
    #[test]
    fn array_renders_one_line_per_item(items in prop::collection::vec("[a-z]{1,12}", 0..20)) {
        let value = Value::from(items.clone());
        let out = Output::plain().render(&value);
        let lines: Vec<&str> = out.lines().collect();
        prop_assert_eq!(lines, items.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Styling only adds escapes; the visible text is unchanged.
    #[test]
    fn styling_preserves_visible_text(key in "[a-z_]{1,20}", value in "[a-zA-Z0-9 ]{0,20}") {
        let mut map = serde_json::Map::new();
        map.insert(key.clone(), json!(value.clone()));
        let data = Value::Object(map);
        let plain = Output::new(Theme::default(), false).render(&data);
        let styled = Output::new(Theme::default(), true).render(&data);
        prop_assert_eq!(console::strip_ansi_codes(&styled).to_string(), plain.clone());
        prop_assert_eq!(plain, format!("{:<width$}{}\n", key, value, width = KEY_WIDTH));
    }
}
