//! The sanitize chain: raw generated text -> display-safe markup.
//!
//! An ORDERED, non-commutative list of pure `&str -> String` transforms.
//! Later steps assume earlier steps' normalized form (e.g. heading spacing
//! assumes jammed markers were already split), so the order is a correctness
//! property, not a style choice. Each transform is named and independently
//! unit-testable; `sanitize` composes them.
//!
//! Two stages:
//! - the cleanup chain repairs raw process output (control codes, jammed or
//!   degenerate heading markers, stray edges)
//! - the display chain re-expands the cleaned text into renderable markup
//!   (blank lines before headings, line breaks before list items, bold tags)
//!
//! The chain never fails: empty input degrades to empty output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::SanitizedInsight;

/// One named step of the chain.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Cleanup stage, in application order.
pub const CLEANUP_CHAIN: [Transform; 4] = [
    Transform {
        name: "strip_control_sequences",
        apply: strip_control_sequences,
    },
    Transform {
        name: "split_jammed_headings",
        apply: split_jammed_headings,
    },
    Transform {
        name: "drop_lone_markers",
        apply: drop_lone_markers,
    },
    Transform {
        name: "trim_edges",
        apply: trim_edges,
    },
];

/// Display re-expansion stage, in application order.
pub const DISPLAY_CHAIN: [Transform; 5] = [
    Transform {
        name: "blank_line_before_headings",
        apply: blank_line_before_headings,
    },
    Transform {
        name: "break_before_list_items",
        apply: break_before_list_items,
    },
    Transform {
        name: "space_after_ordinal_period",
        apply: space_after_ordinal_period,
    },
    Transform {
        name: "collapse_blank_runs",
        apply: collapse_blank_runs,
    },
    Transform {
        name: "bold_to_html",
        apply: bold_to_html,
    },
];

/// Apply a chain of transforms in order.
pub fn apply_chain(input: &str, chain: &[Transform]) -> String {
    let mut text = input.to_string();
    for step in chain {
        text = (step.apply)(&text);
    }
    text
}

/// Run the full chain: cleanup, then display re-expansion.
pub fn sanitize(raw: &str) -> SanitizedInsight {
    let cleaned = apply_chain(raw, &CLEANUP_CHAIN);
    let text = apply_chain(&cleaned, &DISPLAY_CHAIN);
    SanitizedInsight { text }
}

// ---- cleanup steps ----

static ANSI: Lazy<Regex> = Lazy::new(|| {
    // ESC followed by a single final byte, or a CSI sequence
    // (parameters, intermediates, final byte). Covers cursor/color codes
    // that terminal-oriented models leak into their output.
    Regex::new(r"\x1b(?:[@-Z\x5c-\x5f]|\[[0-?]*[ -/]*[@-~])").unwrap()
});

fn strip_control_sequences(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

static JAMMED_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(#{1,3})([A-Za-z])").unwrap());

fn split_jammed_headings(s: &str) -> String {
    JAMMED_HEADING.replace_all(s, "$1 $2").into_owned()
}

static LONE_MARKER: Lazy<Regex> = Lazy::new(|| {
    // A single `#` followed by whitespace or end of text, where the marker is
    // not part of a longer run. The marker and its trailing whitespace go;
    // legitimate `##`/`###` headings are left alone.
    Regex::new(r"(^|[^#])#(\s|$)").unwrap()
});

fn drop_lone_markers(s: &str) -> String {
    LONE_MARKER.replace_all(s, "$1").into_owned()
}

fn trim_edges(s: &str) -> String {
    s.trim().to_string()
}

// ---- display steps ----

static HEADING_MID_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^\n#])(#{2,3} )").unwrap());
static HEADING_AFTER_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+(#{2,3} )").unwrap());
static HEADING_AT_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{2,3} ").unwrap());

fn blank_line_before_headings(s: &str) -> String {
    let s = HEADING_MID_LINE.replace_all(s, "$1\n\n$2");
    let s = HEADING_AFTER_NEWLINE.replace_all(&s, "\n\n$1");
    if HEADING_AT_START.is_match(&s) {
        format!("\n\n{s}")
    } else {
        s.into_owned()
    }
}

static LIST_MID_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^\n])(- )").unwrap());

fn break_before_list_items(s: &str) -> String {
    let s = LIST_MID_LINE.replace_all(s, "$1\n$2");
    if s.starts_with("- ") {
        format!("\n{s}")
    } else {
        s.into_owned()
    }
}

static ORDINAL_PERIOD: Lazy<Regex> = Lazy::new(|| {
    // Digit, period, then something that is neither whitespace (already
    // spaced) nor a digit (a decimal like 3.14 must survive).
    Regex::new(r"(\d)\.([^\s\d])").unwrap()
});

fn space_after_ordinal_period(s: &str) -> String {
    ORDINAL_PERIOD.replace_all(s, "$1. $2").into_owned()
}

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_runs(s: &str) -> String {
    BLANK_RUNS.replace_all(s, "\n\n").into_owned()
}

static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

fn bold_to_html(s: &str) -> String {
    BOLD_SPAN.replace_all(s, "<b>$1</b>").into_owned()
}
