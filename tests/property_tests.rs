//! Property-based tests for scroll and typing invariants.
//!
//! Tests validate:
//! 1. Store progress values stay in [0, 1] for any input
//! 2. Typing progress is monotone in section progress and bounded
//! 3. Reveal length is a monotone, bounded prefix of the text
//! 4. Flattening keeps every character and one newline per line break

use proptest::prelude::*;
use scrollsync::highlight::{flatten, plain_text, HighlightedLine, HighlightedToken};
use scrollsync::scroll::{typing_progress, ScrollState, ScrollStore};
use scrollsync::typing::{render, visible_len};

// ===== Property 1: Clamping =====

proptest! {
    #[test]
    fn set_progress_always_clamps(p in -10.0f64..10.0) {
        let store = ScrollStore::new();
        store.set_progress(p);
        store.set_global_progress(p);
        let state = store.snapshot();
        prop_assert!((0.0..=1.0).contains(&state.progress));
        prop_assert!((0.0..=1.0).contains(&state.global_progress));
        if (0.0..=1.0).contains(&p) {
            prop_assert_eq!(state.progress, p);
        }
    }

    #[test]
    fn update_from_scroll_clamps(p in -10.0f64..10.0, g in -10.0f64..10.0) {
        let store = ScrollStore::new();
        store.update_from_scroll(None, p, g, None);
        let state = store.snapshot();
        prop_assert!((0.0..=1.0).contains(&state.progress));
        prop_assert!((0.0..=1.0).contains(&state.global_progress));
    }
}

// ===== Property 2: Typing progress =====

proptest! {
    #[test]
    fn typing_progress_is_bounded_and_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let at = |progress| typing_progress(&ScrollState { progress, ..ScrollState::default() });
        prop_assert!((0.0..=1.0).contains(&at(lo)));
        prop_assert!(at(lo) <= at(hi));
    }

    #[test]
    fn reduced_motion_types_everything(p in 0.0f64..=1.0) {
        let state = ScrollState { progress: p, reduced_motion: true, ..ScrollState::default() };
        prop_assert_eq!(typing_progress(&state), 1.0);
    }
}

// ===== Property 3: Reveal length =====

proptest! {
    #[test]
    fn reveal_is_a_bounded_prefix(text in "\\PC{0,64}", p in -10.0f64..10.0) {
        let total = text.chars().count();
        let frame = render(&text, p, true);
        let shown = frame.visible().chars().count();

        prop_assert!(text.starts_with(frame.visible()));
        prop_assert_eq!(shown, visible_len(total, p));
        prop_assert!(shown <= total);
        if p >= 1.0 {
            prop_assert_eq!(shown, total);
            prop_assert!(frame.cursor().is_none());
        }
        if p <= 0.0 {
            prop_assert_eq!(shown, 0);
        }
    }

    #[test]
    fn reveal_grows_with_progress(total in 0usize..500, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(visible_len(total, lo) <= visible_len(total, hi));
    }
}

// ===== Property 4: Flattening =====

fn lines_strategy() -> impl Strategy<Value = Vec<HighlightedLine>> {
    prop::collection::vec(
        prop::collection::vec("[^\n]{0,8}", 0..4).prop_map(|parts| {
            HighlightedLine::from_tokens(
                parts
                    .into_iter()
                    .map(|content| HighlightedToken {
                        content,
                        color: "#ff79c6".to_string(),
                        font_style: None,
                    })
                    .collect(),
            )
        }),
        0..6,
    )
}

proptest! {
    #[test]
    fn flatten_preserves_text(lines in lines_strategy()) {
        let chars = flatten(&lines);
        let expected = lines
            .iter()
            .map(|l| l.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(plain_text(&chars), expected);
        prop_assert_eq!(
            chars.iter().filter(|c| c.is_newline()).count(),
            lines.len().saturating_sub(1)
        );
    }
}
