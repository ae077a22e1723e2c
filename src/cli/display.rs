// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the arbor CLI.
//!
//! Colors follow the terminal theme: `ARBOR_THEME` ("dark" / "light") wins,
//! then the `COLORFGBG` background hint, then dark. `NO_COLOR` and non-TTY
//! stdout turn colors off entirely so the output pipes cleanly.

use std::sync::OnceLock;

use arbor::{Hit, NodeRange, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("ARBOR_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", where backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

/// OneDark / One Light pairs.
#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
    Cyan,
    Magenta,
    Gray,
}

impl Color {
    fn code(self) -> String {
        let (dark, light) = match self {
            Color::Green => ((152, 195, 121), (80, 161, 79)),
            Color::Yellow => ((229, 192, 123), (193, 132, 1)),
            Color::Blue => ((97, 175, 239), (64, 120, 242)),
            Color::Cyan => ((86, 182, 194), (1, 132, 188)),
            Color::Magenta => ((198, 120, 221), (166, 38, 164)),
            Color::Gray => ((92, 99, 112), (160, 161, 167)),
        };
        match theme() {
            Theme::Dark => rgb(dark),
            Theme::Light => rgb(light),
        }
    }
}

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply a theme color with optional modifiers, or nothing off a TTY.
pub fn themed(color: Color, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color.code(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ignoring ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(pad))
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_search_header(query: &str, range: Option<&NodeRange>, num_docs: u32) {
    let mut line = format!(
        "{} {}",
        themed(Color::Cyan, &[BOLD], "query"),
        themed(Color::Yellow, &[], query)
    );
    if let Some(range) = range {
        line.push_str(&format!("  {} {}", themed(Color::Gray, &[], "within"), range));
    }
    line.push_str(&format!("  {}", themed(Color::Gray, &[DIM], &format!("({} docs)", num_docs))));
    println!("{}", line);
}

pub fn print_hits(hits: &[Hit], limit: usize) {
    if hits.is_empty() {
        println!("{}", themed(Color::Gray, &[], "no matches"));
        return;
    }

    for (rank, hit) in hits.iter().enumerate() {
        let nodes: Vec<String> = hit.nodes.iter().map(|n| n.to_string()).collect();
        println!(
            "{} {} {} {}",
            pad_right(&themed(Color::Gray, &[DIM], &format!("{:>3}.", rank + 1)), 5),
            pad_right(&themed(Color::Blue, &[BOLD], &format!("doc {}", hit.doc)), 10),
            pad_right(&themed(Color::Green, &[], &format!("{:.4}", hit.score)), 9),
            themed(Color::Magenta, &[], &nodes.join(" "))
        );
    }

    if hits.len() == limit {
        println!(
            "{}",
            themed(Color::Gray, &[DIM], &format!("(limited to {}, raise --limit for more)", limit))
        );
    }
}

pub fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!(
            "{} {} {}",
            pad_right(&themed(Color::Gray, &[DIM], &token.position.to_string()), 4),
            pad_right(&themed(Color::Cyan, &[], token.token_type.as_str()), 8),
            themed(Color::Yellow, &[BOLD], &token.text)
        );
    }
}
