use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use crate::utils::floor_char_boundary;

/// Prepended when the reply carries no LaTeX command at all.
pub const FALLBACK_MARKER: &str = "% fallback_no_latex_detected";

/// Bytes inspected before a fraction match to detect an enclosing `\frac{`.
const FRACTION_LOOKBACK: usize = 8;

lazy_static! {
    static ref SQRT_GROUP: Regex = Regex::new(r"√\s*\(([^()]+)\)").expect("valid regex");
    static ref SQRT_TOKEN: Regex = Regex::new(r"√\s*([A-Za-z0-9]+)").expect("valid regex");
    static ref SIMPLE_FRACTION: Regex =
        Regex::new(r"\b([A-Za-z0-9]{1,5})\s*/\s*([A-Za-z0-9]{1,5})\b").expect("valid regex");
    static ref BARE_EQUATION: Regex =
        Regex::new(r"^[^$]*[A-Za-z0-9]\s*=\s*[^$]+$").expect("valid regex");
    // assignments only count at the start of a line, optionally inside `$$`
    static ref X_VALUE: Regex =
        Regex::new(r"(?im)^\s*(?:\$\$)?\s*x\s*(?:&=|=)\s*([-+0-9/]+)").expect("valid regex");
    static ref Y_VALUE: Regex =
        Regex::new(r"(?im)^\s*(?:\$\$)?\s*y\s*(?:&=|=)\s*([-+0-9/]+)").expect("valid regex");
    static ref CONCLUSION: Regex = Regex::new(r"(?i)\\textbf\{Kết luận\.").expect("valid regex");
    static ref LATEX_COMMAND: Regex =
        Regex::new(r"\\(begin|frac|sqrt|dfrac|Delta|textbf|\[)").expect("valid regex");
}

/// Normalise a model reply into Vietnamese academic LaTeX. Never fails and
/// never returns an empty string. Running it on its own output is a no-op.
pub fn post_process_latex(raw: &str) -> String {
    let stripped = raw.replace('\r', "");
    let text = stripped.trim();
    if text.is_empty() {
        return FALLBACK_MARKER.to_string();
    }

    let text = rewrite_roots(text);
    let text = rewrite_fractions(&text);
    let text = group_equation_runs(&text);
    let text = wrap_single_equations(&text);
    let text = collapse_empty_displays(&text);
    let text = append_conclusion(text);
    let text = mark_fallback(text);

    debug!("LaTeX post-process: {} → {} bytes", raw.len(), text.len());
    text.trim().to_string()
}

fn rewrite_roots(text: &str) -> String {
    let text = SQRT_GROUP.replace_all(text, r"\sqrt{${1}}");
    SQRT_TOKEN.replace_all(&text, r"\sqrt{${1}}").into_owned()
}

fn rewrite_fractions(text: &str) -> String {
    SIMPLE_FRACTION
        .replace_all(text, |caps: &Captures| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let window = &text[floor_char_boundary(text, start.saturating_sub(FRACTION_LOOKBACK))..start];
            if window.ends_with(r"\frac{") || window.ends_with(r"\dfrac{") {
                caps[0].to_string()
            } else {
                format!(r"\dfrac{{{}}}{{{}}}", &caps[1], &caps[2])
            }
        })
        .into_owned()
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinePosition {
    /// Opens or closes an environment or display block.
    Structural,
    InsideBlock,
    Outside,
}

/// Tracks `\begin{..}`/`\end{..}` and `\[`/`\]` nesting line by line.
#[derive(Debug, Default)]
struct BlockTracker {
    depth: usize,
}

impl BlockTracker {
    fn classify(&mut self, line: &str) -> LinePosition {
        let opens = line.matches(r"\begin{").count() + line.matches(r"\[").count();
        let closes = line.matches(r"\end{").count() + line.matches(r"\]").count();
        if opens + closes > 0 {
            self.depth = (self.depth + opens).saturating_sub(closes);
            LinePosition::Structural
        } else if self.depth > 0 {
            LinePosition::InsideBlock
        } else {
            LinePosition::Outside
        }
    }
}

fn is_groupable_equation(line: &str) -> bool {
    line.contains('=')
        && !line.contains("&=")
        && !line.contains('$')
        && !CONCLUSION.is_match(line)
}

fn flush_run(run: &mut Vec<&str>, out: &mut Vec<String>) {
    if run.len() >= 2 {
        out.push(r"\[".to_string());
        out.push(r"\begin{aligned}".to_string());
        let last = run.len() - 1;
        for (i, line) in run.iter().enumerate() {
            let row_end = if i < last { r" \\" } else { "" };
            match line.split_once('=') {
                Some((lhs, rhs)) => out.push(format!("{} &= {}{}", lhs.trim(), rhs.trim(), row_end)),
                None => out.push(format!("{line}{row_end}")),
            }
        }
        out.push(r"\end{aligned}".to_string());
        out.push(r"\]".to_string());
    } else {
        out.extend(run.iter().map(|line| line.to_string()));
    }
    run.clear();
}

/// Consecutive equation lines (two or more) become one `aligned` display.
fn group_equation_runs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut tracker = BlockTracker::default();

    for line in text.split('\n').map(str::trim) {
        if line.is_empty() {
            flush_run(&mut run, &mut out);
            out.push(String::new());
            continue;
        }

        let position = tracker.classify(line);
        if position == LinePosition::Outside && is_groupable_equation(line) {
            run.push(line);
        } else {
            flush_run(&mut run, &mut out);
            out.push(line.to_string());
        }
    }
    flush_run(&mut run, &mut out);

    out.join("\n")
}

fn wrap_single_equations(text: &str) -> String {
    let mut tracker = BlockTracker::default();
    text.split('\n')
        .map(|line| {
            let outside = tracker.classify(line) == LinePosition::Outside;
            if outside && BARE_EQUATION.is_match(line) && !CONCLUSION.is_match(line) {
                format!("$${}$$", line.trim())
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pairs `$$` delimiters in order and collapses each pair that encloses only
/// spaces or tabs to a single `$$`. Adjacent non-empty displays are kept.
fn collapse_empty_displays(text: &str) -> String {
    let mut parts = text.split("$$");
    let mut out = parts.next().unwrap_or_default().to_string();
    while let Some(inner) = parts.next() {
        match parts.next() {
            Some(after) if inner.chars().all(|c| c == ' ' || c == '\t') => {
                out.push_str("$$");
                out.push_str(after);
            }
            Some(after) => {
                out.push_str("$$");
                out.push_str(inner);
                out.push_str("$$");
                out.push_str(after);
            }
            None => {
                out.push_str("$$");
                out.push_str(inner);
            }
        }
    }
    out
}

fn last_value(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text).last().map(|c| c[1].to_string())
}

fn append_conclusion(mut text: String) -> String {
    if CONCLUSION.is_match(&text) {
        return text;
    }

    let x = last_value(&X_VALUE, &text);
    let y = last_value(&Y_VALUE, &text);
    if let (Some(x), Some(y)) = (x, y) {
        text.push_str(&format!("\n\\textbf{{Kết luận. }} x={x}, y={y}."));
    }
    text
}

fn mark_fallback(text: String) -> String {
    if LATEX_COMMAND.is_match(&text) || text.contains(FALLBACK_MARKER) {
        text
    } else {
        format!("{FALLBACK_MARKER}\n{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conclusion_count(text: &str) -> usize {
        CONCLUSION.find_iter(text).count()
    }

    #[test]
    fn test_sqrt_with_parentheses() {
        let out = post_process_latex("√(x+1)=2");
        assert!(out.contains(r"\sqrt{x+1}=2"), "{out}");
        assert!(!out.starts_with(FALLBACK_MARKER));
    }

    #[test]
    fn test_sqrt_bare_token() {
        assert_eq!(post_process_latex("√ 9 + √x"), r"\sqrt{9} + \sqrt{x}");
    }

    #[test]
    fn test_simple_fractions() {
        assert_eq!(
            post_process_latex("Ta có x/2 + y/3"),
            r"Ta có \dfrac{x}{2} + \dfrac{y}{3}"
        );
    }

    #[test]
    fn test_fraction_inside_frac_untouched() {
        assert_eq!(post_process_latex(r"\frac{a/b}{c}"), r"\frac{a/b}{c}");
    }

    #[test]
    fn test_equation_chain_becomes_aligned() {
        let out = post_process_latex("x= y+1\ny+1=2z\n2z=4");
        assert!(out.contains(r"\begin{aligned}"));
        assert!(out.contains(r"x &= y+1 \\"));
        assert!(out.contains(r"y+1 &= 2z \\"));
        assert!(out.contains("2z &= 4"));
        assert_eq!(out.lines().filter(|l| l.contains("&=")).count(), 3);
        assert!(out.starts_with(r"\["));
        assert!(out.ends_with(r"\]"));
    }

    #[test]
    fn test_single_equation_wrapped() {
        let out = post_process_latex("x = y+1");
        assert!(out.contains("$$x = y+1$$"));
        assert!(!out.contains("aligned"));
    }

    #[test]
    fn test_blank_line_splits_runs() {
        let out = post_process_latex("a=1\n\nb=2");
        assert!(out.contains("$$a=1$$\n\n$$b=2$$"), "{out}");
        assert!(!out.contains("aligned"));
    }

    #[test]
    fn test_conclusion_appended() {
        let out = post_process_latex("Kết quả:\nx = -2\ny = 1");
        assert_eq!(conclusion_count(&out), 1);
        assert!(out.ends_with(r"\textbf{Kết luận. } x=-2, y=1."), "{out}");
    }

    #[test]
    fn test_existing_conclusion_kept() {
        let out = post_process_latex("x=1\ny=2\n\\textbf{Kết luận. } x=1, y=2.");
        assert_eq!(conclusion_count(&out), 1);
    }

    #[test]
    fn test_no_empty_display_pairs() {
        let out = post_process_latex("x=1\ny=2");
        assert!(!Regex::new(r"\$\$\s*\$\$").unwrap().is_match(&out));
        assert_eq!(post_process_latex(r"$$ $$ \Delta"), r"$$ \Delta");
    }

    #[test]
    fn test_adjacent_displays_not_merged() {
        let out = post_process_latex("$$x=1$$ $$y=2$$");
        assert!(out.ends_with("$$x=1$$ $$y=2$$"), "{out}");
        assert_eq!(collapse_empty_displays("a $$\t$$ b $$c$$"), "a $$ b $$c$$");
    }

    #[test]
    fn test_conclusion_ignores_combined_equations() {
        let out = post_process_latex("x + y = 3\nx - y = 1\n\nx = 2\ny = 1");
        assert_eq!(conclusion_count(&out), 1);
        assert!(out.ends_with(r"\textbf{Kết luận. } x=2, y=1."), "{out}");
    }

    #[test]
    fn test_conclusion_uses_final_assignment() {
        let out = post_process_latex("x = 5\n\nx = 1\n\ny = 0");
        assert!(out.ends_with(r"\textbf{Kết luận. } x=1, y=0."), "{out}");
    }

    #[test]
    fn test_plain_text_gets_marker() {
        let out = post_process_latex("KET QUA DON GIAN");
        assert!(out.starts_with(FALLBACK_MARKER));
        assert_eq!(out, format!("{FALLBACK_MARKER}\nKET QUA DON GIAN"));
    }

    #[test]
    fn test_empty_input_returns_marker() {
        assert_eq!(post_process_latex(""), FALLBACK_MARKER);
        assert_eq!(post_process_latex(" \r\n "), FALLBACK_MARKER);
    }

    #[test]
    fn test_carriage_returns_stripped() {
        let out = post_process_latex("x=1\r\ny=2\r\n");
        assert!(!out.contains('\r'));
        assert!(out.contains(r"\begin{aligned}"));
    }

    #[test]
    fn test_second_pass_is_stable() {
        for input in [
            "Kết quả:\nx = -2\ny = 1",
            "x = y+1",
            "x= y+1\ny+1=2z\n2z=4",
            "√(x+1)=2",
            "KET QUA DON GIAN",
            "Ta có x/2 + y/3",
        ] {
            let once = post_process_latex(input);
            let twice = post_process_latex(&once);
            assert_eq!(once, twice, "input: {input}");
            assert_eq!(conclusion_count(&twice), conclusion_count(&once));
            assert_eq!(twice.matches(FALLBACK_MARKER).count(), once.matches(FALLBACK_MARKER).count());
        }
    }

    #[test]
    fn test_window_near_multibyte_chars() {
        assert_eq!(post_process_latex("ạạạ 1/2"), r"ạạạ \dfrac{1}{2}");
    }
}
