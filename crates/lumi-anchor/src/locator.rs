//! Helpers over the rendering surface's opaque position pointers (EPUB
//! canonical fragment identifiers). Only the numeric steps matter here;
//! everything else in a pointer is treated as noise.

use std::cmp::Ordering;

fn numeric_steps(cfi: &str) -> Vec<u64> {
    let mut steps = Vec::new();
    let mut current: Option<u64> = None;
    for c in cfi.chars() {
        match c.to_digit(10) {
            // Digit runs are attacker-supplied; saturate rather than
            // overflow on absurdly long ones.
            Some(d) => {
                current = Some(
                    current
                        .unwrap_or(0)
                        .saturating_mul(10)
                        .saturating_add(u64::from(d)),
                )
            }
            None => {
                if let Some(value) = current.take() {
                    steps.push(value);
                }
            }
        }
    }
    if let Some(value) = current {
        steps.push(value);
    }
    steps
}

/// Compare two pointers by their numeric step sequences, shorter sequences
/// padded with zeros.
pub fn compare_cfi(a: &str, b: &str) -> Ordering {
    let steps_a = numeric_steps(a);
    let steps_b = numeric_steps(b);
    let len = steps_a.len().max(steps_b.len());

    for i in 0..len {
        let va = steps_a.get(i).copied().unwrap_or(0);
        let vb = steps_b.get(i).copied().unwrap_or(0);
        match va.cmp(&vb) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

pub fn is_valid_cfi(cfi: &str) -> bool {
    cfi.strip_prefix("epubcfi(")
        .and_then(|rest| rest.strip_suffix(')'))
        .is_some_and(|inner| !inner.is_empty())
}

/// The second step of the pointer, which addresses the chapter in the
/// spine. `None` when the pointer does not start with two `/n` steps.
pub fn chapter_index(cfi: &str) -> Option<u64> {
    let rest = cfi.strip_prefix("epubcfi(/")?;
    let mut parts = rest.split(['/', ')', '!', ':', ',']);
    let _spine = parse_leading_digits(parts.next()?)?;
    parse_leading_digits(parts.next()?)
}

fn parse_leading_digits(part: &str) -> Option<u64> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_step_sequence() {
        assert_eq!(
            compare_cfi("epubcfi(/6/4!/4/2:3)", "epubcfi(/6/8!/2/2:0)"),
            Ordering::Less
        );
        assert_eq!(
            compare_cfi("epubcfi(/6/4)", "epubcfi(/6/4)"),
            Ordering::Equal
        );
        // Missing trailing steps compare as zero.
        assert_eq!(
            compare_cfi("epubcfi(/6/4/2)", "epubcfi(/6/4)"),
            Ordering::Greater
        );
    }

    #[test]
    fn oversized_digit_runs_saturate_instead_of_panicking() {
        let huge = format!("epubcfi(/{}/4)", "9".repeat(40));
        assert_eq!(compare_cfi(&huge, &huge), Ordering::Equal);
        assert_eq!(compare_cfi("epubcfi(/6/4)", &huge), Ordering::Less);
    }

    #[test]
    fn validity_is_shape_only() {
        assert!(is_valid_cfi("epubcfi(/6/4!/4/2:3)"));
        assert!(!is_valid_cfi("epubcfi()"));
        assert!(!is_valid_cfi("/6/4"));
        assert!(!is_valid_cfi(""));
    }

    #[test]
    fn chapter_is_the_second_step() {
        assert_eq!(chapter_index("epubcfi(/6/14!/4/2:3)"), Some(14));
        assert_eq!(chapter_index("epubcfi(/6)"), None);
        assert_eq!(chapter_index("not a cfi"), None);
    }
}
